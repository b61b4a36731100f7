//! Error types for quaternion generation.

use lcc_ast::Ty;
use thiserror::Error;

/// Error type for the quaternion generator.
#[derive(Debug, Error)]
pub enum QuadError {
    /// A name was declared twice in the same scope.
    #[error("Redeclaration {ty} {name}")]
    Redeclaration { ty: Ty, name: String },

    /// An expression referenced a name not visible from its scope.
    #[error("Symbol {name} not declared")]
    Undeclared { name: String },

    /// A function name was registered twice.
    #[error("Function {name} redeclaration")]
    RedefinitionFunction { name: String },

    /// An internal invariant failed.
    #[error("Internal error: {0}")]
    Internal(String),
}
