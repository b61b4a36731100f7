//! lcc-ast - AST Node Definitions
//!
//! The tree handed over by the parser and walked by the IR generators. The
//! AST is pure data: generation logic lives in the generator crates, which
//! match over [`ExprKind`]/[`Stmt`]/[`Decl`] rather than dispatching through
//! the nodes themselves. Expressions carry a `place` slot that the
//! quaternion generator fills in with the name holding the expression's
//! computed value.

use serde::Serialize;
use std::fmt;

/// A source-level type in the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ty {
    Void,
    Int,
    Float,
    Char,
}

impl Ty {
    /// Canonical source spelling.
    pub const fn spelling(&self) -> &'static str {
        match self {
            Ty::Void => "void",
            Ty::Int => "int",
            Ty::Float => "float",
            Ty::Char => "char",
        }
    }

    /// Storage width in bytes for symbol-table layout.
    pub const fn width(&self) -> u32 {
        match self {
            Ty::Void => 0,
            Ty::Char => 1,
            Ty::Int | Ty::Float => 4,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// AST root: a translation unit is a list of external declarations.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationUnit {
    pub decls: Vec<Decl>,
}

/// External or local declaration.
#[derive(Debug, Clone, Serialize)]
pub enum Decl {
    Var(VarDecl),
    Function(FunctionDecl),
}

/// Variable declaration, optionally initialized.
///
/// Function parameters reuse this node (always uninitialized).
#[derive(Debug, Clone, Serialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: Ty,
    pub init: Option<Expr>,
}

impl VarDecl {
    /// Creates an uninitialized declaration.
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            init: None,
        }
    }

    /// Creates an initialized declaration.
    pub fn with_init(name: impl Into<String>, ty: Ty, init: Expr) -> Self {
        Self {
            name: name.into(),
            ty,
            init: Some(init),
        }
    }

    /// Returns true if the declaration carries an initializer.
    pub fn is_initialized(&self) -> bool {
        self.init.is_some()
    }
}

/// Function declaration; `body` is `None` for forward declarations.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub ret_ty: Ty,
    pub params: Vec<VarDecl>,
    pub body: Option<Stmt>,
}

/// Statement.
#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    /// `{ ... }`; opens a fresh scope.
    Compound(Vec<Stmt>),
    /// A declaration statement; one or more declarators.
    Decl(Vec<VarDecl>),
    If(IfStmt),
    While(WhileStmt),
    Return(Option<Expr>),
    /// An expression statement.
    Value(Expr),
}

/// If statement.
#[derive(Debug, Clone, Serialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// While loop.
#[derive(Debug, Clone, Serialize)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Box<Stmt>,
}

/// Expression node.
///
/// `place` is empty until the quaternion generator visits the node; after
/// generation it names the symbol-table entry (variable or temporary)
/// holding the expression's value.
#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub kind: ExprKind,

    #[serde(skip)]
    pub place: String,
}

/// Expression variants.
#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
    IntegerLiteral(i32),
    FloatingLiteral(f64),
    /// A name reference; `is_call` marks the callee position of a call.
    DeclRef {
        name: String,
        is_call: bool,
    },
    /// An explicit C-style cast.
    Cast {
        target_ty: Ty,
        sub: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        sub: Box<Expr>,
    },
    Paren(Box<Expr>),
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Wraps an [`ExprKind`] with an unset place.
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            place: String::new(),
        }
    }

    pub fn int(value: i32) -> Self {
        Self::new(ExprKind::IntegerLiteral(value))
    }

    pub fn float(value: f64) -> Self {
        Self::new(ExprKind::FloatingLiteral(value))
    }

    pub fn decl_ref(name: impl Into<String>) -> Self {
        Self::new(ExprKind::DeclRef {
            name: name.into(),
            is_call: false,
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn unary(op: UnaryOp, sub: Expr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            sub: Box::new(sub),
        })
    }

    pub fn paren(sub: Expr) -> Self {
        Self::new(ExprKind::Paren(Box::new(sub)))
    }

    pub fn cast(target_ty: Ty, sub: Expr) -> Self {
        Self::new(ExprKind::Cast {
            target_ty,
            sub: Box::new(sub),
        })
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: callee.into(),
            args,
        })
    }
}

/// Binary operators, including C-style assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Assign,
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Sub,
    Mul,
    Div,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ty_spellings() {
        assert_eq!(Ty::Void.spelling(), "void");
        assert_eq!(Ty::Int.spelling(), "int");
        assert_eq!(Ty::Float.spelling(), "float");
        assert_eq!(Ty::Char.spelling(), "char");
    }

    #[test]
    fn test_ty_widths() {
        assert_eq!(Ty::Void.width(), 0);
        assert_eq!(Ty::Char.width(), 1);
        assert_eq!(Ty::Int.width(), 4);
        assert_eq!(Ty::Float.width(), 4);
    }

    #[test]
    fn test_expr_place_starts_empty() {
        let expr = Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2));
        assert!(expr.place.is_empty());
    }

    #[test]
    fn test_var_decl_initialized() {
        assert!(!VarDecl::new("x", Ty::Int).is_initialized());
        assert!(VarDecl::with_init("x", Ty::Int, Expr::int(3)).is_initialized());
    }

    #[test]
    fn test_place_not_serialized() {
        let json = serde_json::to_value(Expr::int(1)).unwrap();
        assert!(json.get("place").is_none());
    }
}
