//! Number literal scanning.

use crate::reader::EOF_CHAR;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Scans a numeric literal starting with the already-consumed digit.
    ///
    /// A plain digit run is an `Integer`. A `.` followed by at least one
    /// digit extends the literal into a `Float`; a `.` followed by anything
    /// else is retracted and left for the next token.
    pub(crate) fn read_number(&mut self, first: u8) -> Token {
        let mut buffer = vec![first];
        loop {
            let c = self.reader.next_char();
            if c.is_ascii_digit() {
                buffer.push(c);
                continue;
            }

            if c == b'.' && self.reader.peek_char().is_ascii_digit() {
                buffer.push(b'.');
                while self.reader.peek_char().is_ascii_digit() {
                    buffer.push(self.reader.next_char());
                }
                let text = String::from_utf8_lossy(&buffer).into_owned();
                return self.make_content_token(TokenKind::Float, text);
            }

            if c != EOF_CHAR {
                self.reader.retract_char();
            }
            break;
        }

        let text = String::from_utf8_lossy(&buffer).into_owned();
        self.make_content_token(TokenKind::Integer, text)
    }
}
