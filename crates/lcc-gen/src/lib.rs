//! lcc-gen - Low-level IR Generator
//!
//! Lowers the AST into an LLVM module named `LCC_LLVMIRGenerator`. Function
//! lowering builds the structured skeleton the backend expects: an `entry`
//! block holding every stack allocation, a dedicated `return` block holding
//! the single `ret`, spilled arguments bound in a fresh scope, and an
//! unconditional branch from the body into `return`.
//!
//! Expression and statement lowering beyond declarations and literals is a
//! recognized-but-unlowered surface: the generator accepts those nodes and
//! succeeds without emitting, leaving their lowering to a later iteration.

pub mod error;
pub mod llvm;
pub mod scope;

mod edge_cases;

pub use error::CodeGenError;
pub use llvm::LlvmGenerator;
pub use scope::ScopeChain;
