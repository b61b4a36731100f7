//! String and character literal scanning.

use crate::reader::EOF_CHAR;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Scans a string literal; the opening `"` is already consumed.
    ///
    /// A backslash consumes the next byte literally (the backslash itself is
    /// dropped). Reaching end of input before the closing `"` yields an
    /// `Invalid` token at the opener's position.
    pub(crate) fn read_string(&mut self) -> Token {
        self.read_quoted(b'"', TokenKind::StrLit)
    }

    /// Scans a character literal; the opening `'` is already consumed.
    ///
    /// Same rules as strings with `'` as the terminator.
    pub(crate) fn read_char(&mut self) -> Token {
        self.read_quoted(b'\'', TokenKind::CharLit)
    }

    fn read_quoted(&mut self, terminator: u8, kind: TokenKind) -> Token {
        let mut buffer = Vec::new();
        loop {
            let mut c = self.reader.next_char();
            if c == terminator {
                break;
            }
            if c == EOF_CHAR {
                // Unterminated literal; the token position is the opener's.
                return self.make_token(TokenKind::Invalid);
            }
            if c == b'\\' {
                c = self.reader.next_char();
                if c == EOF_CHAR {
                    return self.make_token(TokenKind::Invalid);
                }
            }
            buffer.push(c);
        }

        let text = String::from_utf8_lossy(&buffer).into_owned();
        self.make_content_token(kind, text)
    }
}
