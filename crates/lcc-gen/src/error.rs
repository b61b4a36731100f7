//! Error types for LLVM IR generation.

use lcc_ast::Ty;
use thiserror::Error;

/// Error type for the low-level IR generator.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A local name was declared twice in the same scope.
    #[error("Redefinition {ty} {name}")]
    Redefinition { ty: Ty, name: String },

    /// A module-level global was declared twice.
    #[error("Redeclaration global variable {ty} {name}")]
    RedefinitionGlobal { ty: Ty, name: String },

    /// A function with a body was defined twice.
    #[error("Redefinition function {name}")]
    RedefinitionFunction { name: String },

    /// A redeclaration disagrees with the declared signature.
    #[error("Function {name} definition doesn't match declaration")]
    SignatureMismatch { name: String },

    /// A parameter type outside the lowerable set.
    #[error("Unsupported param type {ty} in function {name}")]
    UnsupportedParamType { ty: Ty, name: String },

    /// A return type outside the lowerable set.
    #[error("Unsupported return type {ty} for function {name}")]
    UnsupportedReturnType { ty: Ty, name: String },

    /// A declaration type with no IR lowering.
    #[error("Unsupported type {ty} for {name}")]
    UnsupportedType { ty: Ty, name: String },

    /// The underlying builder rejected an instruction.
    #[error("LLVM operation failed: {0}")]
    Llvm(#[from] inkwell::builder::BuilderError),

    /// Writing the module to disk failed.
    #[error("cannot write IR: {0}")]
    Dump(String),

    /// An internal invariant failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for code generation operations.
pub type Result<T> = std::result::Result<T, CodeGenError>;
