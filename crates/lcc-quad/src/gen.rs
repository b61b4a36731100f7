//! AST walk and quaternion emission.

use std::io::{self, Write};

use indexmap::IndexMap;
use lcc_ast::{Decl, Expr, ExprKind, Stmt, TranslationUnit, Ty, VarDecl};

use crate::error::QuadError;
use crate::quad::{Immediate, Operand, QuadOp, Quaternion};
use crate::scope::{EntryId, ScopeTree};

/// Quaternion IR generator.
///
/// An ordinary value: construct one per translation unit and call
/// [`QuadGenerator::generate`]. The emitted code, the function table, and
/// the scope tree remain available afterwards, including after a failed
/// generation (partial code is kept for inspection).
pub struct QuadGenerator {
    tables: ScopeTree,
    codes: Vec<Quaternion>,
    /// Function name to entry index, in definition order.
    functions: IndexMap<String, usize>,
    next_temp: u32,
}

impl QuadGenerator {
    pub fn new() -> Self {
        Self {
            tables: ScopeTree::new(),
            codes: Vec::new(),
            functions: IndexMap::new(),
            next_temp: 0,
        }
    }

    /// Generates code for a whole translation unit, aborting on the first
    /// failure.
    pub fn generate(&mut self, unit: &mut TranslationUnit) -> Result<(), QuadError> {
        for decl in &mut unit.decls {
            self.gen_decl(decl)?;
        }

        Ok(())
    }

    /// Emitted code, in emission order. Indices are stable.
    pub fn codes(&self) -> &[Quaternion] {
        &self.codes
    }

    /// The function table, in definition order.
    pub fn function_table(&self) -> &IndexMap<String, usize> {
        &self.functions
    }

    /// The scope tree built during generation.
    pub fn tables(&self) -> &ScopeTree {
        &self.tables
    }

    // ===================== declarations =====================

    fn gen_decl(&mut self, decl: &mut Decl) -> Result<(), QuadError> {
        match decl {
            Decl::Var(var) => self.gen_var_decl(var),
            Decl::Function(func) => {
                if self.functions.contains_key(&func.name) {
                    return Err(QuadError::RedefinitionFunction {
                        name: func.name.clone(),
                    });
                }
                self.functions.insert(func.name.clone(), self.codes.len());

                self.tables.enter_scope();
                for param in &mut func.params {
                    self.gen_var_decl(param)?;
                }
                if let Some(body) = &mut func.body {
                    self.gen_stmt(body)?;
                }
                self.tables.exit_scope();

                Ok(())
            }
        }
    }

    /// Reserves storage for the declaration, then generates and assigns the
    /// initializer. Storage is reserved first, so an initializer can see the
    /// name it initializes.
    fn gen_var_decl(&mut self, var: &mut VarDecl) -> Result<(), QuadError> {
        if self
            .tables
            .define(&var.name, var.ty, var.ty.width())
            .is_none()
        {
            return Err(QuadError::Redeclaration {
                ty: var.ty,
                name: var.name.clone(),
            });
        }

        if let Some(init) = &mut var.init {
            self.gen_expr(init)?;
            let arg1 = self.entry_operand(&init.place)?;
            let result = self.entry_operand(&var.name)?;
            self.emit(QuadOp::Assign, arg1, Operand::Nil, result);
        }

        Ok(())
    }

    // ===================== statements =====================

    fn gen_stmt(&mut self, stmt: &mut Stmt) -> Result<(), QuadError> {
        match stmt {
            Stmt::Compound(body) => {
                self.tables.enter_scope();
                for stmt in body {
                    self.gen_stmt(stmt)?;
                }
                self.tables.exit_scope();
                Ok(())
            }
            Stmt::Decl(decls) => {
                for decl in decls {
                    self.gen_var_decl(decl)?;
                }
                Ok(())
            }
            Stmt::Value(expr) => self.gen_expr(expr),
            Stmt::Return(Some(value)) => self.gen_expr(value),
            Stmt::Return(None) => Ok(()),
            // Branch emission waits on CodeAddr jump patching.
            Stmt::If(_) | Stmt::While(_) => Ok(()),
        }
    }

    // ===================== expressions =====================

    fn gen_expr(&mut self, expr: &mut Expr) -> Result<(), QuadError> {
        match &mut expr.kind {
            ExprKind::IntegerLiteral(value) => {
                let value = *value;
                let temp = self.new_temp(Ty::Int)?;
                expr.place = self.tables.entry(temp).name.clone();
                self.emit(
                    QuadOp::Assign,
                    Operand::Value(Immediate::Int(value)),
                    Operand::Nil,
                    Operand::Entry(temp),
                );
                Ok(())
            }
            ExprKind::FloatingLiteral(value) => {
                let value = *value;
                let temp = self.new_temp(Ty::Float)?;
                expr.place = self.tables.entry(temp).name.clone();
                self.emit(
                    QuadOp::Assign,
                    Operand::Value(Immediate::Float(value)),
                    Operand::Nil,
                    Operand::Entry(temp),
                );
                Ok(())
            }
            ExprKind::DeclRef { name, is_call } => {
                if *is_call {
                    // Call lowering is unfinished; the callee name is not a
                    // data reference.
                    return Ok(());
                }
                let entry = self
                    .tables
                    .lookup(name)
                    .ok_or_else(|| QuadError::Undeclared { name: name.clone() })?;
                expr.place = self.tables.entry(entry).name.clone();
                Ok(())
            }
            ExprKind::Cast { sub, .. } => {
                // Casts are identity at this stage.
                self.gen_expr(sub)?;
                expr.place = sub.place.clone();
                Ok(())
            }
            ExprKind::Paren(sub) => {
                self.gen_expr(sub)?;
                expr.place = sub.place.clone();
                Ok(())
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let op = QuadOp::from(*op);
                self.gen_expr(lhs)?;
                self.gen_expr(rhs)?;

                let temp = self.new_temp(Ty::Int)?;
                let arg1 = self.entry_operand(&lhs.place)?;
                let arg2 = self.entry_operand(&rhs.place)?;
                expr.place = self.tables.entry(temp).name.clone();
                self.emit(op, arg1, arg2, Operand::Entry(temp));
                Ok(())
            }
            ExprKind::Unary { op, sub } => {
                let op = QuadOp::from(*op);
                self.gen_expr(sub)?;

                let temp = self.new_temp(Ty::Int)?;
                let arg1 = self.entry_operand(&sub.place)?;
                expr.place = self.tables.entry(temp).name.clone();
                self.emit(op, arg1, Operand::Nil, Operand::Entry(temp));
                Ok(())
            }
            // Calls are recognized but not lowered yet.
            ExprKind::Call { .. } => Ok(()),
        }
    }

    // ===================== support =====================

    /// Inserts a fresh `@T<n>` temporary into the current scope.
    fn new_temp(&mut self, ty: Ty) -> Result<EntryId, QuadError> {
        let name = format!("@T{}", self.next_temp);
        self.next_temp += 1;

        self.tables
            .define(&name, ty, ty.width())
            .ok_or_else(|| QuadError::Internal(format!("temporary {} already defined", name)))
    }

    /// Resolves a place name to an entry operand.
    fn entry_operand(&self, name: &str) -> Result<Operand, QuadError> {
        self.tables
            .lookup(name)
            .map(Operand::Entry)
            .ok_or_else(|| QuadError::Undeclared {
                name: name.to_string(),
            })
    }

    fn emit(&mut self, op: QuadOp, arg1: Operand, arg2: Operand, result: Operand) {
        debug_assert!(
            !matches!(result, Operand::Value(_)),
            "a literal is not assignable"
        );
        self.codes.push(Quaternion {
            op,
            arg1,
            arg2,
            result,
        });
    }

    // ===================== listing =====================

    /// Writes the code listing, one `index: (op, arg1, arg2, result)` record
    /// per line, annotating function entry indices with `<name>:` lines.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (index, code) in self.codes.iter().enumerate() {
            for (name, entry) in &self.functions {
                if *entry == index {
                    writeln!(out, "{}:", name)?;
                }
            }

            writeln!(
                out,
                "{:4}: ({:<10}, {:<10}, {:<10}, {:<10})",
                index,
                code.op.mnemonic(),
                self.render_operand(&code.arg1),
                self.render_operand(&code.arg2),
                self.render_operand(&code.result),
            )?;
        }

        Ok(())
    }

    /// Prints the code listing to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_listing(&mut stdout.lock())
    }

    /// Returns the listing as a string.
    pub fn listing(&self) -> String {
        let mut buffer = Vec::new();
        self.write_listing(&mut buffer)
            .expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn render_operand(&self, operand: &Operand) -> String {
        match operand {
            Operand::Nil => "_".to_string(),
            Operand::Entry(id) => self.tables.entry(*id).name.clone(),
            Operand::Value(imm) => imm.to_string(),
            Operand::CodeAddr(addr) => addr.to_string(),
        }
    }
}

impl Default for QuadGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcc_ast::{BinaryOp, FunctionDecl};

    fn unit_of(decls: Vec<Decl>) -> TranslationUnit {
        TranslationUnit { decls }
    }

    fn main_with(body: Vec<Stmt>) -> TranslationUnit {
        unit_of(vec![Decl::Function(FunctionDecl {
            name: "main".to_string(),
            ret_ty: Ty::Int,
            params: Vec::new(),
            body: Some(Stmt::Compound(body)),
        })])
    }

    #[test]
    fn test_literal_initializer() {
        // int main() { int a = 1 + 2; }
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2)),
        )])]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();

        let codes = gen.codes();
        assert_eq!(codes.len(), 4);
        assert_eq!(codes[0].op, QuadOp::Assign);
        assert_eq!(codes[0].arg1, Operand::Value(Immediate::Int(1)));
        assert_eq!(codes[1].arg1, Operand::Value(Immediate::Int(2)));
        assert_eq!(codes[2].op, QuadOp::Add);
        assert_eq!(codes[3].op, QuadOp::Assign);

        let listing = gen.listing();
        assert!(listing.starts_with("main:\n"));
        assert!(listing.contains("   0: (=         , 1         , _         , @T0       )"));
        assert!(listing.contains("   2: (+         , @T0       , @T1       , @T2       )"));
        assert!(listing.contains("   3: (=         , @T2       , _         , a         )"));
    }

    #[test]
    fn test_same_scope_redeclaration_fails_and_keeps_first_entry() {
        let mut unit = unit_of(vec![
            Decl::Var(VarDecl::new("x", Ty::Int)),
            Decl::Var(VarDecl::new("x", Ty::Int)),
        ]);

        let mut gen = QuadGenerator::new();
        let err = gen.generate(&mut unit).unwrap_err();
        assert!(matches!(err, QuadError::Redeclaration { .. }));
        assert!(gen.tables().lookup("x").is_some());
    }

    #[test]
    fn test_undeclared_reference() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::decl_ref("ghost"),
        )])]);

        let mut gen = QuadGenerator::new();
        let err = gen.generate(&mut unit).unwrap_err();
        assert!(matches!(err, QuadError::Undeclared { name } if name == "ghost"));
    }

    #[test]
    fn test_shadowing_resolves_to_inner() {
        // int x = 1; int main() { int x = 2; int y = x; }
        let mut unit = unit_of(vec![
            Decl::Var(VarDecl::with_init("x", Ty::Int, Expr::int(1))),
            Decl::Function(FunctionDecl {
                name: "main".to_string(),
                ret_ty: Ty::Int,
                params: Vec::new(),
                body: Some(Stmt::Compound(vec![
                    Stmt::Decl(vec![VarDecl::with_init("x", Ty::Int, Expr::int(2))]),
                    Stmt::Decl(vec![VarDecl::with_init("y", Ty::Int, Expr::decl_ref("x"))]),
                ])),
            }),
        ]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();

        // The last assignment reads the inner x, not the global.
        let last = gen.codes().last().unwrap();
        let Operand::Entry(src) = last.arg1 else {
            panic!("expected entry operand");
        };
        assert_eq!(gen.tables().entry(src).name, "x");
        // After generation the current scope is the root again, so a fresh
        // lookup resolves to the global x.
        let global_x = gen.tables().lookup("x").unwrap();
        assert_ne!(src, global_x);
    }

    #[test]
    fn test_function_table_entries() {
        let mut unit = unit_of(vec![
            Decl::Function(FunctionDecl {
                name: "f".to_string(),
                ret_ty: Ty::Void,
                params: Vec::new(),
                body: Some(Stmt::Compound(vec![Stmt::Decl(vec![VarDecl::with_init(
                    "a",
                    Ty::Int,
                    Expr::int(1),
                )])])),
            }),
            Decl::Function(FunctionDecl {
                name: "g".to_string(),
                ret_ty: Ty::Void,
                params: Vec::new(),
                body: Some(Stmt::Compound(Vec::new())),
            }),
        ]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();
        assert_eq!(gen.function_table().get("f"), Some(&0));
        assert_eq!(gen.function_table().get("g"), Some(&2));
    }

    #[test]
    fn test_duplicate_function_rejected() {
        let func = FunctionDecl {
            name: "f".to_string(),
            ret_ty: Ty::Void,
            params: Vec::new(),
            body: Some(Stmt::Compound(Vec::new())),
        };
        let mut unit = unit_of(vec![
            Decl::Function(func.clone()),
            Decl::Function(func),
        ]);

        let mut gen = QuadGenerator::new();
        let err = gen.generate(&mut unit).unwrap_err();
        assert!(matches!(err, QuadError::RedefinitionFunction { name } if name == "f"));
    }

    #[test]
    fn test_param_redeclaration_in_function_scope() {
        let mut unit = unit_of(vec![Decl::Function(FunctionDecl {
            name: "f".to_string(),
            ret_ty: Ty::Void,
            params: vec![VarDecl::new("a", Ty::Int), VarDecl::new("a", Ty::Int)],
            body: None,
        })]);

        let mut gen = QuadGenerator::new();
        let err = gen.generate(&mut unit).unwrap_err();
        assert!(matches!(err, QuadError::Redeclaration { name, .. } if name == "a"));
    }

    #[test]
    fn test_paren_and_cast_propagate_place() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::paren(Expr::cast(Ty::Int, Expr::int(7))),
        )])]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();

        // Only the literal's temp assignment and the variable assignment.
        assert_eq!(gen.codes().len(), 2);
        assert_eq!(gen.codes()[1].op, QuadOp::Assign);
    }

    #[test]
    fn test_unary_emission() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::unary(lcc_ast::UnaryOp::Neg, Expr::int(5)),
        )])]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();

        let codes = gen.codes();
        assert_eq!(codes.len(), 3);
        assert_eq!(codes[1].op, QuadOp::Neg);
        assert_eq!(codes[1].arg2, Operand::Nil);
    }

    #[test]
    fn test_temporaries_are_distinct() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::binary(
                BinaryOp::Add,
                Expr::binary(BinaryOp::Mul, Expr::int(1), Expr::int(2)),
                Expr::binary(BinaryOp::Mul, Expr::int(3), Expr::int(4)),
            ),
        )])]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();

        let mut temps: Vec<String> = Vec::new();
        for code in gen.codes() {
            if let Operand::Entry(id) = code.result {
                let name = gen.tables().entry(id).name.clone();
                if name.starts_with("@T") {
                    temps.push(name);
                }
            }
        }
        let mut unique = temps.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(temps.len(), unique.len());
    }

    #[test]
    fn test_result_is_never_a_value() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::binary(BinaryOp::Sub, Expr::int(9), Expr::int(4)),
        )])]);

        let mut gen = QuadGenerator::new();
        gen.generate(&mut unit).unwrap();
        assert!(gen
            .codes()
            .iter()
            .all(|code| !matches!(code.result, Operand::Value(_))));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut unit = main_with(vec![Stmt::Decl(vec![VarDecl::with_init(
            "a",
            Ty::Int,
            Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2)),
        )])]);

        // Generating twice from the same AST yields byte-identical listings.
        let mut first = QuadGenerator::new();
        first.generate(&mut unit).unwrap();
        let mut second = QuadGenerator::new();
        second.generate(&mut unit).unwrap();
        assert_eq!(first.listing(), second.listing());
    }
}
