//! Core lexer implementation.

use lcc_util::Position;
use rustc_hash::FxHashMap;

use crate::reader::{SourceReader, EOF_CHAR};
use crate::token::{keyword_table, Token, TokenKind};

/// Returns true for the space-like bytes that form whitespace runs.
///
/// Newline is not in this set; it produces its own token.
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | 0x0C | 0x0B)
}

/// Returns true for bytes that may start an identifier.
pub(crate) fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || (0x80..=0xFD).contains(&c)
}

/// Returns true for bytes that may continue an identifier.
pub(crate) fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || (0x80..=0xFD).contains(&c)
}

/// Lexer for the C-subset dialect.
///
/// Produces every token in order, terminating with an `Eof` token. The lexer
/// never fails; malformed input becomes `Invalid` tokens.
pub struct Lexer {
    /// Byte reader for source traversal.
    pub(crate) reader: SourceReader,

    /// Spelling-to-discriminant keyword table, built once at startup.
    pub(crate) keywords: FxHashMap<&'static str, TokenKind>,

    /// Number of classified tokens so far; whitespace runs do not count.
    token_count: u32,

    /// Position where the current token starts.
    token_pos: Position,

    /// Whether `run` keeps whitespace and newline tokens in its output.
    keep_trivia: bool,
}

impl Lexer {
    /// Creates a lexer over the given reader. Trivia tokens are elided from
    /// `run` output by default.
    pub fn new(reader: SourceReader) -> Self {
        Self {
            reader,
            keywords: keyword_table(),
            token_count: 0,
            token_pos: Position::new(1, 1),
            keep_trivia: false,
        }
    }

    /// Chooses whether whitespace and newline tokens are retained in the
    /// stream returned by `run`.
    pub fn keep_trivia(mut self, keep: bool) -> Self {
        self.keep_trivia = keep;
        self
    }

    /// Produces the full token stream, ending with an `Eof` token.
    pub fn run(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let at_end = token.kind == TokenKind::Eof;
            if self.keep_trivia || !token.kind.is_trivia() {
                tokens.push(token);
            }
            if at_end {
                break;
            }
        }

        tokens
    }

    /// Scans and returns the next token.
    ///
    /// Per iteration: skip at most one comment, record the token position,
    /// collapse a whitespace run into a single token, then classify on the
    /// first remaining byte.
    pub fn next_token(&mut self) -> Token {
        if let Err(opener) = self.skip_comment() {
            // Unterminated block comment; surface it at the opener.
            self.token_pos = opener;
            self.token_count += 1;
            return self.make_token(TokenKind::Invalid);
        }

        self.token_pos = self.reader.position();

        if let Some(space) = self.take_whitespace() {
            return space;
        }

        let c = self.reader.next_char();
        self.token_count += 1;

        match c {
            b'\n' => {
                let token = self.make_token(TokenKind::Newline);
                self.reader.next_line();
                token
            }
            c if is_ident_start(c) => self.read_identifier(c),
            b'0'..=b'9' => self.read_number(c),
            b'"' => self.read_string(),
            b'\'' => self.read_char(),
            b'=' => self.forward_search(b'=', TokenKind::Equal, TokenKind::Assign),
            b'<' => self.forward_search(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.forward_search(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'+' => self.make_token(TokenKind::Plus),
            b'-' => self.make_token(TokenKind::Minus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),
            b'{' => self.make_token(TokenKind::LBrace),
            b'}' => self.make_token(TokenKind::RBrace),
            b'[' => self.make_token(TokenKind::LBracket),
            b']' => self.make_token(TokenKind::RBracket),
            b'(' => self.make_token(TokenKind::LParen),
            b')' => self.make_token(TokenKind::RParen),
            b';' => self.make_token(TokenKind::Semi),
            b',' => self.make_token(TokenKind::Comma),
            EOF_CHAR => self.make_token(TokenKind::Eof),
            _ => self.make_token(TokenKind::Invalid),
        }
    }

    /// Collapses a run of space-like bytes into one `Whitespace` token.
    ///
    /// Whitespace does not advance the token count, so numbering stays dense
    /// over the tokens the parser sees.
    fn take_whitespace(&mut self) -> Option<Token> {
        if !is_space(self.reader.peek_char()) {
            return None;
        }

        while is_space(self.reader.peek_char()) {
            self.reader.next_char();
        }

        Some(self.make_token(TokenKind::Whitespace))
    }

    /// Builds a content-less token at the current token position.
    pub(crate) fn make_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            position: self.token_pos,
            number: self.token_count,
            content: None,
        }
    }

    /// Builds a token carrying literal content.
    pub(crate) fn make_content_token(&self, kind: TokenKind, content: String) -> Token {
        Token {
            kind,
            position: self.token_pos,
            number: self.token_count,
            content: Some(content),
        }
    }

    /// Consumes the next byte if it matches `expected`.
    pub(crate) fn match_char(&mut self, expected: u8) -> bool {
        if self.reader.peek_char() == expected {
            self.reader.next_char();
            true
        } else {
            false
        }
    }
}
