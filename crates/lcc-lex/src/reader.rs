//! Byte-level source reader.
//!
//! The reader owns the file contents and hands out one byte at a time,
//! tracking the 1-indexed line/column position of the next unread byte.
//! Lines are advanced by the lexer (see [`SourceReader::next_line`]), not by
//! the reader itself, so that newline tokens can be positioned before the
//! line counter moves.

use std::path::{Path, PathBuf};

use lcc_util::Position;
use thiserror::Error;

/// Sentinel byte returned past end of input.
///
/// `0xFE` and `0xFF` sit outside the identifier byte range (`0x80..=0xFD`),
/// which keeps the sentinel unambiguous in every scanning mode.
pub const EOF_CHAR: u8 = 0xFF;

/// Error type for reader construction.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The input file could not be opened or read.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A buffered byte cursor with a single-character pushback.
///
/// # Example
///
/// ```
/// use lcc_lex::{SourceReader, EOF_CHAR};
///
/// let mut reader = SourceReader::from_bytes(b"ab".to_vec());
/// assert_eq!(reader.next_char(), b'a');
/// assert_eq!(reader.peek_char(), b'b');
/// reader.retract_char();
/// assert_eq!(reader.next_char(), b'a');
/// assert_eq!(reader.next_char(), b'b');
/// assert_eq!(reader.next_char(), EOF_CHAR);
/// ```
pub struct SourceReader {
    /// Raw file contents.
    bytes: Vec<u8>,

    /// Byte offset of the next unread byte.
    position: usize,

    /// Line of the next unread byte (1-based).
    line: u32,

    /// Column of the next unread byte (1-based).
    column: u32,
}

impl SourceReader {
    /// Opens a source file for reading.
    ///
    /// Fails if the file cannot be opened or read.
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        let bytes = std::fs::read(path).map_err(|source| ReaderError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Creates a reader over an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consumes and returns the next byte, advancing the column by one.
    ///
    /// Returns [`EOF_CHAR`] past end of input, without advancing.
    pub fn next_char(&mut self) -> u8 {
        if self.position >= self.bytes.len() {
            return EOF_CHAR;
        }

        let b = self.bytes[self.position];
        self.position += 1;
        self.column += 1;
        b
    }

    /// Returns the byte `next_char` would return, without consuming it.
    pub fn peek_char(&self) -> u8 {
        if self.position >= self.bytes.len() {
            return EOF_CHAR;
        }

        self.bytes[self.position]
    }

    /// Moves the cursor back by exactly one byte.
    ///
    /// Only a single-character pushback depth is guaranteed; callers must
    /// not retract twice without an intervening `next_char`.
    pub fn retract_char(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.column = self.column.saturating_sub(1).max(1);
        }
    }

    /// Advances the line counter and resets the column to 1.
    ///
    /// Must be called by the lexer after it has consumed a `\n`; the reader
    /// itself never touches the line counter.
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Returns the position of the next unread byte.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if all input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }
}
