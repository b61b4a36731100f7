//! Token stream JSON dump.
//!
//! Produces the array-of-records shape consumed by external tooling:
//! `{id, type, content, position: [line, column]}` per token. Whitespace,
//! newline and invalid tokens are elided; the end-of-file token is kept with
//! content `"EOF"`.

use serde_json::{json, Value};

use crate::token::{Token, TokenKind};

/// Converts a token stream into its JSON dump representation.
pub fn jsonify_tokens(tokens: &[Token]) -> Value {
    let mut records = Vec::new();

    for token in tokens {
        let content = match token.kind {
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Invalid => continue,
            TokenKind::Eof => "EOF",
            TokenKind::Identifier
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::CharLit
            | TokenKind::StrLit => token.content_str(),
            kind => kind.spelling().unwrap_or(""),
        };

        records.push(json!({
            "id": token.number,
            "type": token.kind.name(),
            "content": content,
            "position": [token.position.line, token.position.column],
        }));
    }

    Value::Array(records)
}
