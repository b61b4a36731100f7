//! Token model.
//!
//! Every token kind has its own discriminant: keywords, operators, and
//! punctuators are not folded into catch-all buckets. The mapping from
//! keyword spelling to discriminant is built once at lexer startup via
//! [`keyword_table`].

use lcc_util::Position;
use rustc_hash::FxHashMap;

/// The kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    /// A run of space-like bytes (space, tab, form feed, vertical tab).
    Whitespace,
    /// A single `\n`.
    Newline,
    /// End of input; always the last token of a stream.
    Eof,
    /// A byte no scanning mode accepts, or an unterminated literal/comment.
    Invalid,

    // Literals
    /// An identifier; carries its spelling.
    Identifier,
    /// An integer literal; carries its digits.
    Integer,
    /// A floating-point literal; carries its digits including the `.`.
    Float,
    /// A character literal; carries its unquoted content.
    CharLit,
    /// A string literal; carries its unquoted content.
    StrLit,

    // Keywords
    KwInt,
    KwFloat,
    KwChar,
    KwVoid,
    KwIf,
    KwElse,
    KwWhile,
    KwReturn,

    // Operators
    Assign,
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,

    // Punctuators
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semi,
    Comma,
}

impl TokenKind {
    /// Returns the token-kind name used in JSON dumps.
    pub const fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "TOKEN_WHITESPACE",
            TokenKind::Newline => "TOKEN_NEWLINE",
            TokenKind::Eof => "TOKEN_EOF",
            TokenKind::Invalid => "TOKEN_INVALID",
            TokenKind::Identifier => "TOKEN_IDENTIFIER",
            TokenKind::Integer => "TOKEN_INTEGER",
            TokenKind::Float => "TOKEN_FLOAT",
            TokenKind::CharLit => "TOKEN_CHAR",
            TokenKind::StrLit => "TOKEN_STRING",
            TokenKind::KwInt => "KW_INT",
            TokenKind::KwFloat => "KW_FLOAT",
            TokenKind::KwChar => "KW_CHAR",
            TokenKind::KwVoid => "KW_VOID",
            TokenKind::KwIf => "KW_IF",
            TokenKind::KwElse => "KW_ELSE",
            TokenKind::KwWhile => "KW_WHILE",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::Assign => "TOKEN_OPASSIGN",
            TokenKind::Equal => "TOKEN_OPEQ",
            TokenKind::Less => "TOKEN_OPLESS",
            TokenKind::LessEqual => "TOKEN_OPLEQ",
            TokenKind::Greater => "TOKEN_OPGREATER",
            TokenKind::GreaterEqual => "TOKEN_OPGEQ",
            TokenKind::Plus => "TOKEN_OPADD",
            TokenKind::Minus => "TOKEN_OPMINUS",
            TokenKind::Star => "TOKEN_OPTIMES",
            TokenKind::Slash => "TOKEN_OPDIV",
            TokenKind::LBrace => "TOKEN_LBRACE",
            TokenKind::RBrace => "TOKEN_RBRACE",
            TokenKind::LBracket => "TOKEN_LBRACKET",
            TokenKind::RBracket => "TOKEN_RBRACKET",
            TokenKind::LParen => "TOKEN_LPAREN",
            TokenKind::RParen => "TOKEN_RPAREN",
            TokenKind::Semi => "TOKEN_SEMI",
            TokenKind::Comma => "TOKEN_COMMA",
        }
    }

    /// Returns the canonical spelling for keywords, operators and
    /// punctuators; `None` for structural kinds and literals.
    pub const fn spelling(&self) -> Option<&'static str> {
        match self {
            TokenKind::KwInt => Some("int"),
            TokenKind::KwFloat => Some("float"),
            TokenKind::KwChar => Some("char"),
            TokenKind::KwVoid => Some("void"),
            TokenKind::KwIf => Some("if"),
            TokenKind::KwElse => Some("else"),
            TokenKind::KwWhile => Some("while"),
            TokenKind::KwReturn => Some("return"),
            TokenKind::Assign => Some("="),
            TokenKind::Equal => Some("=="),
            TokenKind::Less => Some("<"),
            TokenKind::LessEqual => Some("<="),
            TokenKind::Greater => Some(">"),
            TokenKind::GreaterEqual => Some(">="),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::LBrace => Some("{"),
            TokenKind::RBrace => Some("}"),
            TokenKind::LBracket => Some("["),
            TokenKind::RBracket => Some("]"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::Semi => Some(";"),
            TokenKind::Comma => Some(","),
            _ => None,
        }
    }

    /// Returns true for whitespace and newline tokens, which may be elided
    /// from the stream handed to the parser.
    pub const fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Returns true for the type-specifier keywords.
    pub const fn is_type_specifier(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwChar | TokenKind::KwVoid
        )
    }
}

/// Builds the spelling-to-discriminant keyword table.
///
/// Called once per lexer at startup.
pub fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    [
        ("int", TokenKind::KwInt),
        ("float", TokenKind::KwFloat),
        ("char", TokenKind::KwChar),
        ("void", TokenKind::KwVoid),
        ("if", TokenKind::KwIf),
        ("else", TokenKind::KwElse),
        ("while", TokenKind::KwWhile),
        ("return", TokenKind::KwReturn),
    ]
    .into_iter()
    .collect()
}

/// A single token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,

    /// Position of the token's first byte.
    pub position: Position,

    /// Token number within the file; monotonically increasing and dense
    /// over non-skipped tokens.
    pub number: u32,

    /// Literal content; only meaningful for identifier, number, string and
    /// char tokens.
    pub content: Option<String>,
}

impl Token {
    /// Returns the token's literal content, or `""` when it has none.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
