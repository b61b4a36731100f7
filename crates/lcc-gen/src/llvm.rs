//! LLVM module construction.

use std::path::Path;

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::{BasicMetadataTypeEnum, BasicTypeEnum, FunctionType};
use inkwell::values::{BasicValueEnum, FunctionValue, PointerValue};

use lcc_ast::{Decl, Expr, ExprKind, FunctionDecl, Stmt, TranslationUnit, Ty, VarDecl};

use crate::error::{CodeGenError, Result};
use crate::scope::ScopeChain;

/// Low-level IR generator.
///
/// An ordinary value built over a caller-owned [`Context`]; one instance
/// builds one module. The module survives a failed generation so partial IR
/// can still be dumped.
pub struct LlvmGenerator<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    scopes: ScopeChain<'ctx>,
    /// Return-value slot of the function currently being lowered; `None`
    /// for void functions and outside function lowering.
    ret_slot: Option<PointerValue<'ctx>>,
}

impl<'ctx> LlvmGenerator<'ctx> {
    /// Creates a generator building the module `LCC_LLVMIRGenerator`.
    pub fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            module: context.create_module("LCC_LLVMIRGenerator"),
            builder: context.create_builder(),
            scopes: ScopeChain::new(),
            ret_slot: None,
        }
    }

    /// The module under construction.
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Generates IR for a whole translation unit, aborting on the first
    /// failure.
    pub fn generate(&mut self, unit: &mut TranslationUnit) -> Result<()> {
        for decl in &mut unit.decls {
            match decl {
                Decl::Var(var) => self.gen_var_decl(var)?,
                Decl::Function(func) => self.gen_function(func)?,
            }
        }

        Ok(())
    }

    /// Writes the module's textual IR to `path`.
    pub fn dump(&self, path: &Path) -> Result<()> {
        self.module
            .print_to_file(path)
            .map_err(|e| CodeGenError::Dump(e.to_string()))
    }

    /// Prints the module's textual IR to stdout.
    pub fn print(&self) {
        println!("{}", self.module.print_to_string().to_string());
    }

    // ===================== functions =====================

    /// Lowers a function declaration or definition.
    fn gen_function(&mut self, func_decl: &mut FunctionDecl) -> Result<()> {
        let fn_type = self.function_type(func_decl)?;
        let function = self.resolve_function(func_decl, fn_type)?;

        for (arg, param) in function.get_param_iter().zip(&func_decl.params) {
            arg.set_name(&param.name);
        }

        // A body-less declaration is complete at this point.
        if func_decl.body.is_none() {
            return Ok(());
        }

        let entry = self.context.append_basic_block(function, "entry");
        let ret_block = self.context.append_basic_block(function, "return");

        // Build the return block first: allocate the return slot (in the
        // entry block, like every allocation) and emit the single ret.
        self.builder.position_at_end(ret_block);
        self.ret_slot = match func_decl.ret_ty {
            Ty::Void => None,
            ty => Some(self.entry_block_alloca(function, "retVal", ty)?),
        };
        match self.ret_slot {
            Some(slot) => self.builder.build_return(Some(&slot))?,
            None => self.builder.build_return(None)?,
        };

        // Spill arguments into named entry-block slots visible to the body.
        self.builder.position_at_end(entry);
        self.scopes.enter_scope();

        for (arg, param) in function.get_param_iter().zip(&func_decl.params) {
            let slot = self.entry_block_alloca(function, &param.name, param.ty)?;
            self.builder.build_store(slot, arg)?;
            self.scopes.bind(&param.name, slot);
        }

        if let Some(body) = &mut func_decl.body {
            self.gen_stmt(body)?;
        }
        self.builder.build_unconditional_branch(ret_block)?;

        self.scopes.exit_scope();
        Ok(())
    }

    /// Maps the source signature onto an LLVM function type.
    ///
    /// Parameters lower as `int -> i32`, `float -> f32`, `char -> f32`;
    /// return types may be `void`, `int`, or `float`.
    fn function_type(&self, func_decl: &FunctionDecl) -> Result<FunctionType<'ctx>> {
        let mut param_types: Vec<BasicMetadataTypeEnum<'ctx>> =
            Vec::with_capacity(func_decl.params.len());
        for param in &func_decl.params {
            let ty = self
                .value_type(param.ty)
                .ok_or_else(|| CodeGenError::UnsupportedParamType {
                    ty: param.ty,
                    name: func_decl.name.clone(),
                })?;
            param_types.push(ty.into());
        }

        Ok(match func_decl.ret_ty {
            Ty::Void => self.context.void_type().fn_type(&param_types, false),
            Ty::Int => self.context.i32_type().fn_type(&param_types, false),
            Ty::Float => self.context.f32_type().fn_type(&param_types, false),
            Ty::Char => {
                return Err(CodeGenError::UnsupportedReturnType {
                    ty: Ty::Char,
                    name: func_decl.name.clone(),
                })
            }
        })
    }

    /// Finds or creates the module function this declaration refers to.
    ///
    /// A defined function rejects any redeclaration. A declaration-only
    /// placeholder accepts a matching redeclaration, or a defining
    /// completion; a parameterless placeholder constrains nothing and is
    /// replaced by the definition's signature.
    fn resolve_function(
        &mut self,
        func_decl: &FunctionDecl,
        fn_type: FunctionType<'ctx>,
    ) -> Result<FunctionValue<'ctx>> {
        let Some(existing) = self.module.get_function(&func_decl.name) else {
            return Ok(self
                .module
                .add_function(&func_decl.name, fn_type, Some(Linkage::External)));
        };

        if existing.count_basic_blocks() > 0 {
            return Err(CodeGenError::RedefinitionFunction {
                name: func_decl.name.clone(),
            });
        }

        if existing.get_type() == fn_type {
            return Ok(existing);
        }

        if func_decl.body.is_some() && existing.count_params() == 0 {
            // SAFETY: the placeholder has no body and nothing refers to it
            // yet; deleting it leaves no dangling uses.
            unsafe { existing.delete() };
            return Ok(self
                .module
                .add_function(&func_decl.name, fn_type, Some(Linkage::External)));
        }

        Err(CodeGenError::SignatureMismatch {
            name: func_decl.name.clone(),
        })
    }

    // ===================== declarations =====================

    /// Lowers a variable declaration.
    ///
    /// Inside a function this is an entry-block alloca bound in the current
    /// scope, with the initializer stored when one is present. At module
    /// level only zero-initialized int globals are supported.
    fn gen_var_decl(&mut self, var: &mut VarDecl) -> Result<()> {
        if self.scopes.lookup_current(&var.name).is_some() {
            return Err(CodeGenError::Redefinition {
                ty: var.ty,
                name: var.name.clone(),
            });
        }

        let init_value = match &mut var.init {
            Some(init) => self.gen_expr(init)?,
            None => None,
        };

        if let Some(block) = self.builder.get_insert_block() {
            let function = block.get_parent().ok_or_else(|| {
                CodeGenError::Internal("insertion block has no parent function".to_string())
            })?;
            let slot = self.entry_block_alloca(function, &var.name, var.ty)?;
            self.scopes.bind(&var.name, slot);
            if let Some(value) = init_value {
                self.builder.build_store(slot, value)?;
            }
            return Ok(());
        }

        // No insertion point: module-level global.
        if self.module.get_global(&var.name).is_some() {
            return Err(CodeGenError::RedefinitionGlobal {
                ty: var.ty,
                name: var.name.clone(),
            });
        }

        match var.ty {
            Ty::Int => {
                let global = self
                    .module
                    .add_global(self.context.i32_type(), None, &var.name);
                global.set_linkage(Linkage::External);
                global.set_initializer(&self.context.i32_type().const_zero());
                Ok(())
            }
            ty => Err(CodeGenError::UnsupportedType {
                ty,
                name: var.name.clone(),
            }),
        }
    }

    // ===================== statements =====================

    fn gen_stmt(&mut self, stmt: &mut Stmt) -> Result<()> {
        match stmt {
            Stmt::Compound(body) => {
                self.scopes.enter_scope();
                for stmt in body {
                    self.gen_stmt(stmt)?;
                }
                self.scopes.exit_scope();
                Ok(())
            }
            Stmt::Decl(decls) => {
                for decl in decls {
                    self.gen_var_decl(decl)?;
                }
                Ok(())
            }
            // Recognized; lowering pending.
            Stmt::If(_) | Stmt::While(_) | Stmt::Return(_) | Stmt::Value(_) => Ok(()),
        }
    }

    // ===================== expressions =====================

    /// Lowers an expression to a value.
    ///
    /// Literals produce constants; every other node is recognized and
    /// yields no value (lowering pending).
    fn gen_expr(&mut self, expr: &mut Expr) -> Result<Option<BasicValueEnum<'ctx>>> {
        match &expr.kind {
            ExprKind::IntegerLiteral(value) => Ok(Some(
                self.context
                    .i32_type()
                    .const_int(*value as u64, true)
                    .into(),
            )),
            ExprKind::FloatingLiteral(value) => {
                Ok(Some(self.context.f32_type().const_float(*value).into()))
            }
            ExprKind::DeclRef { .. }
            | ExprKind::Cast { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Paren(_)
            | ExprKind::Call { .. } => Ok(None),
        }
    }

    // ===================== support =====================

    /// The IR value type backing a source type, if it has one.
    ///
    /// `char` lowers as `f32` in this dialect, same as parameters.
    fn value_type(&self, ty: Ty) -> Option<BasicTypeEnum<'ctx>> {
        match ty {
            Ty::Int => Some(self.context.i32_type().into()),
            Ty::Float | Ty::Char => Some(self.context.f32_type().into()),
            Ty::Void => None,
        }
    }

    /// Allocates a named stack slot at the top of the function's entry
    /// block, regardless of where the current insertion point is.
    fn entry_block_alloca(
        &self,
        function: FunctionValue<'ctx>,
        name: &str,
        ty: Ty,
    ) -> Result<PointerValue<'ctx>> {
        let entry = function.get_first_basic_block().ok_or_else(|| {
            CodeGenError::Internal(format!("function has no entry block for {}", name))
        })?;

        let builder = self.context.create_builder();
        match entry.get_first_instruction() {
            Some(first) => builder.position_before(&first),
            None => builder.position_at_end(entry),
        }

        let value_ty = self.value_type(ty).ok_or_else(|| CodeGenError::UnsupportedType {
            ty,
            name: name.to_string(),
        })?;

        Ok(builder.build_alloca(value_ty, name)?)
    }
}
