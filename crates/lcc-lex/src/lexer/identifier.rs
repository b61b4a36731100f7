//! Identifier and keyword scanning.

use crate::lexer::core::is_ident_continue;
use crate::reader::EOF_CHAR;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Scans an identifier starting with the already-consumed byte `first`.
    ///
    /// Accumulates while the next byte is alphanumeric, `_`, `$`, or in the
    /// extended range `0x80..=0xFD`, then retracts the byte that ended the
    /// run. The finished spelling is checked against the keyword table;
    /// identifier classification always precedes keyword classification.
    pub(crate) fn read_identifier(&mut self, first: u8) -> Token {
        let mut buffer = vec![first];
        loop {
            let c = self.reader.next_char();
            if is_ident_continue(c) {
                buffer.push(c);
                continue;
            }
            if c != EOF_CHAR {
                self.reader.retract_char();
            }
            break;
        }

        let text = String::from_utf8_lossy(&buffer).into_owned();
        if let Some(&kind) = self.keywords.get(text.as_str()) {
            return self.make_token(kind);
        }

        self.make_content_token(TokenKind::Identifier, text)
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::tokenize;

    fn first_token(source: &str) -> (TokenKind, String) {
        let tokens = tokenize(source);
        (tokens[0].kind, tokens[0].content_str().to_string())
    }

    #[test]
    fn test_simple_identifier() {
        assert_eq!(
            first_token("foo"),
            (TokenKind::Identifier, "foo".to_string())
        );
    }

    #[test]
    fn test_identifier_alphabet() {
        assert_eq!(
            first_token("_a$1z9"),
            (TokenKind::Identifier, "_a$1z9".to_string())
        );
    }

    #[test]
    fn test_identifier_stops_at_operator() {
        let tokens = tokenize("abc+def");
        assert_eq!(tokens[0].content_str(), "abc");
        assert_eq!(tokens[1].kind, TokenKind::Plus);
        assert_eq!(tokens[2].content_str(), "def");
    }

    #[test]
    fn test_high_bit_bytes() {
        let tokens = crate::Lexer::new(crate::SourceReader::from_bytes(vec![
            0x80, b'a', 0xFD, b';',
        ]))
        .run();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Semi);
    }

    #[test]
    fn test_keyword_int() {
        assert_eq!(first_token("int").0, TokenKind::KwInt);
    }

    #[test]
    fn test_keyword_float() {
        assert_eq!(first_token("float").0, TokenKind::KwFloat);
    }

    #[test]
    fn test_keyword_char() {
        assert_eq!(first_token("char").0, TokenKind::KwChar);
    }

    #[test]
    fn test_keyword_void() {
        assert_eq!(first_token("void").0, TokenKind::KwVoid);
    }

    #[test]
    fn test_keyword_if() {
        assert_eq!(first_token("if").0, TokenKind::KwIf);
    }

    #[test]
    fn test_keyword_else() {
        assert_eq!(first_token("else").0, TokenKind::KwElse);
    }

    #[test]
    fn test_keyword_while() {
        assert_eq!(first_token("while").0, TokenKind::KwWhile);
    }

    #[test]
    fn test_keyword_return() {
        assert_eq!(first_token("return").0, TokenKind::KwReturn);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            first_token("integer"),
            (TokenKind::Identifier, "integer".to_string())
        );
        assert_eq!(
            first_token("if_x"),
            (TokenKind::Identifier, "if_x".to_string())
        );
    }

    #[test]
    fn test_identifier_at_eof() {
        let tokens = tokenize("abc");
        assert_eq!(tokens[0].content_str(), "abc");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}
