//! lcc-quad - Quaternion IR Generator
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! Lowers the AST into linear three-address code. Each instruction is a
//! quaternion `(op, arg1, arg2, result)` appended to a stable, append-only
//! list; operands reference symbol-table entries, immediate values, or (for
//! future jump patching) absolute code addresses.
//!
//! Two structures tie the generator together:
//!
//! - A scope arena ([`scope::ScopeTree`]): one node per lexical scope,
//!   linked toward its parent by index. Scopes are created on function entry
//!   and on every compound statement, and are never destroyed once exited,
//!   so entries stay addressable by identity for later passes.
//! - The function table: an ordered map from function name to the code index
//!   where the function's quaternions begin.
//!
//! Expression lowering threads a `place` through the AST: after a node is
//! generated, its `place` names the entry (variable or fresh `@T<n>`
//! temporary) holding its value, and parent nodes resolve those places back
//! to entries when emitting their own quaternions.

pub mod error;
pub mod gen;
pub mod quad;
pub mod scope;

mod edge_cases;

pub use error::QuadError;
pub use gen::QuadGenerator;
pub use quad::{Immediate, Operand, QuadOp, Quaternion};
pub use scope::{EntryId, Scope, ScopeId, ScopeTree, SymbolEntry};
