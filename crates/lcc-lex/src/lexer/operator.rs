//! Operator scanning.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Resolves a two-character operator form against its one-character
    /// fallback.
    ///
    /// The two-character form is always tried first: with `=` consumed,
    /// `forward_search(b'=', Equal, Assign)` yields `==` before `=`.
    pub(crate) fn forward_search(
        &mut self,
        possible: u8,
        possible_kind: TokenKind,
        default_kind: TokenKind,
    ) -> Token {
        if self.match_char(possible) {
            self.make_token(possible_kind)
        } else {
            self.make_token(default_kind)
        }
    }
}
