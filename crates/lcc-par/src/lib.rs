//! lcc-par - Parser
//!
//! Recursive-descent parser for the C-subset dialect. Consumes the elided
//! token stream produced by `lcc-lex` and builds the `lcc-ast` tree:
//! external variable/function declarations, compound statements,
//! `if`/`while`/`return`, and precedence-layered expressions with calls and
//! C-style casts.
//!
//! The grammar is deliberately small; each nonterminal is one method, and
//! binary operators are layered by precedence (assignment < equality <
//! relational < additive < multiplicative < unary < primary).

use lcc_ast::{
    BinaryOp, Decl, Expr, FunctionDecl, IfStmt, Stmt, TranslationUnit, Ty, UnaryOp, VarDecl,
    WhileStmt,
};
use lcc_lex::{Token, TokenKind};
use lcc_util::Position;
use thiserror::Error;

/// Error type for parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The parser met a token it cannot use here.
    #[error("unexpected {found} at {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: Position,
    },

    /// A literal's spelling does not fit its value type.
    #[error("invalid {what} literal '{content}' at {position}")]
    InvalidLiteral {
        what: &'static str,
        content: String,
        position: Position,
    },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses a full token stream into a translation unit.
pub fn parse(tokens: Vec<Token>) -> Result<TranslationUnit> {
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over a token vector.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser. The stream must be trivia-free and end with `Eof`
    /// (the shape `Lexer::run` produces by default).
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses the whole stream.
    pub fn parse(&mut self) -> Result<TranslationUnit> {
        let mut decls = Vec::new();
        while !self.at(TokenKind::Eof) {
            decls.extend(self.parse_external_decl()?);
        }

        Ok(TranslationUnit { decls })
    }

    // ===================== declarations =====================

    /// One external declaration; a variable line may carry several
    /// declarators, hence the vector.
    fn parse_external_decl(&mut self) -> Result<Vec<Decl>> {
        let ty = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        if self.at(TokenKind::LParen) {
            return Ok(vec![Decl::Function(self.parse_function(ty, name)?)]);
        }

        let vars = self.parse_var_declarators(ty, name)?;
        Ok(vars.into_iter().map(Decl::Var).collect())
    }

    /// Parameter list, then either a body or `;` for a forward declaration.
    fn parse_function(&mut self, ret_ty: Ty, name: String) -> Result<FunctionDecl> {
        self.expect(TokenKind::LParen, "'('")?;

        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let ty = self.parse_type_specifier()?;
                let param = self.expect_identifier()?;
                params.push(VarDecl::new(param, ty));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let body = if self.eat(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_compound()?)
        };

        Ok(FunctionDecl {
            name,
            ret_ty,
            params,
            body,
        })
    }

    /// Declarator list after the first name: `= init`, `, name = init`, `;`.
    fn parse_var_declarators(&mut self, ty: Ty, first: String) -> Result<Vec<VarDecl>> {
        let mut decls = Vec::new();
        let mut name = first;

        loop {
            let init = if self.eat(TokenKind::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            decls.push(VarDecl { name, ty, init });

            if !self.eat(TokenKind::Comma) {
                break;
            }
            name = self.expect_identifier()?;
        }
        self.expect(TokenKind::Semi, "';'")?;

        Ok(decls)
    }

    fn parse_type_specifier(&mut self) -> Result<Ty> {
        let token = self.bump();
        match token.kind {
            TokenKind::KwVoid => Ok(Ty::Void),
            TokenKind::KwInt => Ok(Ty::Int),
            TokenKind::KwFloat => Ok(Ty::Float),
            TokenKind::KwChar => Ok(Ty::Char),
            _ => Err(self.unexpected(&token, "a type specifier")),
        }
    }

    // ===================== statements =====================

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.peek_kind() {
            TokenKind::LBrace => self.parse_compound(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwReturn => self.parse_return(),
            kind if kind.is_type_specifier() => self.parse_decl_stmt(),
            TokenKind::Semi => {
                // Null statement.
                self.bump();
                Ok(Stmt::Compound(Vec::new()))
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi, "';'")?;
                Ok(Stmt::Value(expr))
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            body.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        Ok(Stmt::Compound(body))
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(TokenKind::KwElse) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            cond,
            then_branch,
            else_branch,
        }))
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::While(WhileStmt { cond, body }))
    }

    fn parse_return(&mut self) -> Result<Stmt> {
        self.bump();
        if self.eat(TokenKind::Semi) {
            return Ok(Stmt::Return(None));
        }
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semi, "';'")?;

        Ok(Stmt::Return(Some(value)))
    }

    fn parse_decl_stmt(&mut self) -> Result<Stmt> {
        let ty = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;
        let decls = self.parse_var_declarators(ty, name)?;

        Ok(Stmt::Decl(decls))
    }

    // ===================== expressions =====================

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and lowest precedence.
    fn parse_assignment(&mut self) -> Result<Expr> {
        let lhs = self.parse_equality()?;
        if self.eat(TokenKind::Assign) {
            let rhs = self.parse_assignment()?;
            return Ok(Expr::binary(BinaryOp::Assign, lhs, rhs));
        }

        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_relational()?;
        while self.eat(TokenKind::Equal) {
            let rhs = self.parse_relational()?;
            lhs = Expr::binary(BinaryOp::Equal, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_additive()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat(TokenKind::Plus) {
            return Ok(Expr::unary(UnaryOp::Plus, self.parse_unary()?));
        }
        if self.eat(TokenKind::Minus) {
            return Ok(Expr::unary(UnaryOp::Neg, self.parse_unary()?));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek_kind() {
            TokenKind::Integer => {
                let token = self.bump();
                let value = token.content_str().parse::<i32>().map_err(|_| {
                    ParseError::InvalidLiteral {
                        what: "integer",
                        content: token.content_str().to_string(),
                        position: token.position,
                    }
                })?;
                Ok(Expr::int(value))
            }
            TokenKind::Float => {
                let token = self.bump();
                let value = token.content_str().parse::<f64>().map_err(|_| {
                    ParseError::InvalidLiteral {
                        what: "float",
                        content: token.content_str().to_string(),
                        position: token.position,
                    }
                })?;
                Ok(Expr::float(value))
            }
            TokenKind::LParen => {
                // A parenthesized type is a cast, anything else grouping.
                if self.peek_nth_kind(1).is_type_specifier() {
                    self.bump();
                    let target_ty = self.parse_type_specifier()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    let sub = self.parse_unary()?;
                    return Ok(Expr::cast(target_ty, sub));
                }
                self.bump();
                let sub = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::paren(sub))
            }
            TokenKind::Identifier => {
                let token = self.bump();
                let name = token.content_str().to_string();
                if self.at(TokenKind::LParen) {
                    return self.parse_call(name);
                }
                Ok(Expr::decl_ref(name))
            }
            _ => {
                let token = self.bump();
                Err(self.unexpected(&token, "an expression"))
            }
        }
    }

    fn parse_call(&mut self, callee: String) -> Result<Expr> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        Ok(Expr::call(callee, args))
    }

    // ===================== cursor helpers =====================

    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_nth_kind(&self, n: usize) -> TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[(self.pos + n).min(last)].kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        let token = self.peek().clone();
        Err(self.unexpected(&token, expected))
    }

    fn expect_identifier(&mut self) -> Result<String> {
        let token = self.expect(TokenKind::Identifier, "an identifier")?;
        Ok(token.content_str().to_string())
    }

    fn unexpected(&self, token: &Token, expected: &str) -> ParseError {
        let found = match &token.content {
            Some(content) => format!("'{}'", content),
            None => token
                .kind
                .spelling()
                .map(|s| format!("'{}'", s))
                .unwrap_or_else(|| token.kind.name().to_string()),
        };

        ParseError::UnexpectedToken {
            found,
            expected: expected.to_string(),
            position: token.position,
        }
    }
}
