//! lcc-lex - Lexical Analyzer
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! The lexer turns a byte stream into a token stream. It is the first phase
//! of the pipeline and the only one that touches raw source bytes:
//!
//! ```text
//! bytes ──▶ [SourceReader] ──▶ [Lexer] ──▶ Vec<Token> ──▶ parser
//! ```
//!
//! Three properties shape the design:
//!
//! 1. BYTE-LEVEL INPUT
//!    Identifiers may contain bytes in `0x80..=0xFD`, so the reader hands out
//!    raw bytes rather than decoded characters. End of input is signalled by
//!    the sentinel byte [`reader::EOF_CHAR`].
//!
//! 2. ONE-CHARACTER RETRACTION
//!    Maximal-munch scanning (identifiers, numbers, the `/` that is not a
//!    comment) reads one byte too far and pushes it back. The reader supports
//!    exactly one slot of pushback; the lexer never needs more.
//!
//! 3. NO FAILURE
//!    Malformed input produces `Invalid` tokens and scanning continues.
//!    Error reporting belongs to the phases that consume the tokens.
//!
//! Line tracking is explicit: the reader only counts columns, and the lexer
//! calls [`SourceReader::next_line`] after it has consumed a `\n`.

pub mod json;
pub mod lexer;
pub mod reader;
pub mod token;

mod edge_cases;

pub use json::jsonify_tokens;
pub use lexer::Lexer;
pub use reader::{ReaderError, SourceReader, EOF_CHAR};
pub use token::{keyword_table, Token, TokenKind};

/// Tokenizes an in-memory source, eliding whitespace and newline tokens.
///
/// Convenience entry point for tests and the driver; equivalent to running a
/// [`Lexer`] over a [`SourceReader`] built from `source`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(SourceReader::from_bytes(source.as_bytes().to_vec())).run()
}
