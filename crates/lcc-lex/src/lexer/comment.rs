//! Comment skipping.

use lcc_util::Position;

use crate::reader::EOF_CHAR;
use crate::Lexer;

impl Lexer {
    /// Skips at most one comment ahead of the next token.
    ///
    /// `//` consumes up to the next newline, which is left unconsumed so it
    /// can produce its own token. `/*` consumes through the matching `*/`,
    /// advancing the line counter for every newline inside. A `/` followed
    /// by neither is division; the character is retracted.
    ///
    /// # Errors
    ///
    /// Returns the opener position when a block comment reaches end of input
    /// unterminated; the caller surfaces it as a trailing `Invalid` token.
    pub(crate) fn skip_comment(&mut self) -> Result<(), Position> {
        if self.reader.peek_char() != b'/' {
            return Ok(());
        }

        let opener = self.reader.position();
        self.reader.next_char();

        if self.match_char(b'/') {
            let mut c = self.reader.next_char();
            while c != b'\n' && c != EOF_CHAR {
                c = self.reader.next_char();
            }
            if c == b'\n' {
                self.reader.retract_char();
            }
        } else if self.match_char(b'*') {
            let mut last_star = false;
            loop {
                let c = self.reader.next_char();
                if c == EOF_CHAR {
                    return Err(opener);
                }
                if c == b'\n' {
                    self.reader.next_line();
                }
                if c == b'/' && last_star {
                    break;
                }
                last_star = c == b'*';
            }
        } else {
            // Division, not a comment.
            self.reader.retract_char();
        }

        Ok(())
    }
}
