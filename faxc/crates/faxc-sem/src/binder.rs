//! The binder (§4): turns an unbound [`faxc_par::ast::Program`] into a bound
//! [`crate::hir::Program`]. One pass each for declaring names, resolving
//! structural type shapes, registering callable signatures, and finally
//! binding bodies — so a function may call another declared later in the
//! same file, and a structure may embed one declared after it.
//!
//! Every failure is reported through the shared [`Handler`] tagged
//! [`Stage::Abt`] and answered with a poisoned node ([`Type::Invalid`] /
//! [`hir::ExprKind::Poison`]) rather than aborting the pass — one bad
//! declaration never prevents the rest of the program from being bound.

use crate::hir::{
    self, AccessKind, Block, Declaration, ElseBranch, Expr, ExprKind, ForVariant, Literal,
    MatchClause, Param, Referent, Statement,
};
use crate::scope::{ScopeStack, SymbolDescriptor, SymbolKind};
use crate::types::{Assignability, BinaryOp, PrimitiveKind, Type, UnaryOp};
use faxc_par::ast;
use faxc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler, Stage};
use faxc_util::{FxHashMap, Span, Symbol};

fn primitive_from_str(s: &str) -> Option<PrimitiveKind> {
    Some(match s {
        "void" => PrimitiveKind::Void,
        "bool" => PrimitiveKind::Bool,
        "u8" => PrimitiveKind::U8,
        "u16" => PrimitiveKind::U16,
        "u32" => PrimitiveKind::U32,
        "u64" => PrimitiveKind::U64,
        "i8" => PrimitiveKind::I8,
        "i16" => PrimitiveKind::I16,
        "i32" => PrimitiveKind::I32,
        "i64" => PrimitiveKind::I64,
        "f32" => PrimitiveKind::F32,
        "f64" => PrimitiveKind::F64,
        "char" => PrimitiveKind::Char,
        "string" => PrimitiveKind::String,
        "type" => PrimitiveKind::Type,
        _ => return None,
    })
}

fn unary_op(op: ast::UnaryOperator) -> UnaryOp {
    match op {
        ast::UnaryOperator::Neg => UnaryOp::Neg,
        ast::UnaryOperator::Not => UnaryOp::Not,
        ast::UnaryOperator::BitNot => UnaryOp::BitNot,
    }
}

fn binary_op(op: ast::BinaryOperator) -> BinaryOp {
    match op {
        ast::BinaryOperator::Add => BinaryOp::Add,
        ast::BinaryOperator::Sub => BinaryOp::Sub,
        ast::BinaryOperator::Mul => BinaryOp::Mul,
        ast::BinaryOperator::Div => BinaryOp::Div,
        ast::BinaryOperator::Mod => BinaryOp::Mod,
        ast::BinaryOperator::Eq => BinaryOp::Eq,
        ast::BinaryOperator::Ne => BinaryOp::Ne,
        ast::BinaryOperator::Lt => BinaryOp::Lt,
        ast::BinaryOperator::Gt => BinaryOp::Gt,
        ast::BinaryOperator::Le => BinaryOp::Le,
        ast::BinaryOperator::Ge => BinaryOp::Ge,
        ast::BinaryOperator::And => BinaryOp::And,
        ast::BinaryOperator::Or => BinaryOp::Or,
        ast::BinaryOperator::BitAnd => BinaryOp::BitAnd,
        ast::BinaryOperator::BitOr => BinaryOp::BitOr,
        ast::BinaryOperator::BitXor => BinaryOp::BitXor,
        ast::BinaryOperator::Shl => BinaryOp::Shl,
        ast::BinaryOperator::Shr => BinaryOp::Shr,
    }
}

/// A callable's parameter names, kept alongside its `Type::Function` entry
/// in scope so named-argument calls can be reordered to positional order
/// without widening `Type::Function` itself to carry names.
#[derive(Clone)]
struct Signature {
    param_names: Vec<Symbol>,
}

struct Binder<'a> {
    handler: &'a Handler,
    scope: ScopeStack,
    signatures: FxHashMap<Symbol, Signature>,
    /// `(block_index, scope_depth)` of every loop currently being bound,
    /// innermost last — the default `break`/`continue` target when no
    /// label is named (§4.6).
    loop_stack: Vec<(u32, usize)>,
    return_type: Type,
}

impl<'a> Binder<'a> {
    fn new(handler: &'a Handler) -> Self {
        Binder {
            handler,
            scope: ScopeStack::new(),
            signatures: FxHashMap::default(),
            loop_stack: Vec::new(),
            return_type: Type::void(),
        }
    }

    fn error(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(span)
            .stage(Stage::Abt)
            .emit(self.handler);
    }

    fn warn(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::warning(message)
            .code(code)
            .span(span)
            .stage(Stage::Abt)
            .emit(self.handler);
    }

    // ---- type resolution --------------------------------------------

    fn resolve_type_ref(&mut self, r: &ast::TypeRef, span: Span) -> Type {
        match r {
            ast::TypeRef::Named(name) => {
                if let Some(kind) = primitive_from_str(name.as_str()) {
                    return Type::Primitive { kind, mutable: false };
                }
                match self.scope.lookup(*name) {
                    Some(desc)
                        if matches!(
                            desc.kind,
                            SymbolKind::Struct | SymbolKind::Enum | SymbolKind::Alias
                        ) =>
                    {
                        desc.ty.clone()
                    }
                    Some(_) => {
                        self.error(
                            DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                            span,
                            format!("`{}` does not name a type", name.as_str()),
                        );
                        Type::Invalid
                    }
                    None => {
                        self.error(
                            DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                            span,
                            format!("unresolved type `{}`", name.as_str()),
                        );
                        Type::Invalid
                    }
                }
            }
            ast::TypeRef::Array { element, length } => {
                let element = self.resolve_type_ref(element, span);
                Type::Array {
                    element: Box::new(element),
                    length: *length,
                    mutable: false,
                }
            }
        }
    }

    // ---- program-level passes ----------------------------------------

    fn bind_program(&mut self, program: ast::Program) -> hir::Program {
        for decl in &program.declarations {
            self.predeclare_type_name(decl);
        }
        for decl in &program.declarations {
            self.resolve_type_shape(decl);
        }
        for decl in &program.declarations {
            self.register_signature(decl);
        }

        let declarations = program
            .declarations
            .iter()
            .map(|d| self.bind_declaration(d))
            .collect();

        hir::Program { declarations }
    }

    fn predeclare_type_name(&mut self, decl: &ast::Declaration) {
        let (name, kind, placeholder, span) = match decl {
            ast::Declaration::Structure(s) => (
                s.name,
                SymbolKind::Struct,
                Type::Structure { name: s.name, fields: Vec::new() },
                s.info.span,
            ),
            ast::Declaration::Enumeration(e) => (
                e.name,
                SymbolKind::Enum,
                Type::Enumeration { name: e.name, variants: Vec::new() },
                e.info.span,
            ),
            ast::Declaration::Alias(a) => {
                (a.name, SymbolKind::Alias, Type::Invalid, a.info.span)
            }
            _ => return,
        };
        let descriptor = SymbolDescriptor {
            kind,
            ty: placeholder,
            mutable: false,
            block_index: 0,
        };
        if self.scope.declare(name, descriptor).is_err() {
            self.error(
                DiagnosticCode::E_ABT_REDECLARATION,
                span,
                format!("`{}` is already declared", name.as_str()),
            );
        }
    }

    fn resolve_type_shape(&mut self, decl: &ast::Declaration) {
        match decl {
            ast::Declaration::Structure(s) => {
                let fields: Vec<(Symbol, Type)> = s
                    .fields
                    .iter()
                    .map(|(name, ty)| (*name, self.resolve_type_ref(ty, s.info.span)))
                    .collect();
                let resolved = Type::Structure { name: s.name, fields };
                if let Some(desc) = self.scope.lookup_mut(s.name) {
                    desc.ty = resolved;
                }
            }
            ast::Declaration::Enumeration(e) => {
                let variants: Vec<(Symbol, Option<Type>)> = e
                    .variants
                    .iter()
                    .map(|(name, ty)| (*name, ty.as_ref().map(|t| self.resolve_type_ref(t, e.info.span))))
                    .collect();
                let resolved = Type::Enumeration { name: e.name, variants };
                if let Some(desc) = self.scope.lookup_mut(e.name) {
                    desc.ty = resolved;
                }
            }
            ast::Declaration::Alias(a) => {
                let target = self.resolve_type_ref(&a.target, a.info.span);
                let resolved = Type::Alias { name: a.name, target: Box::new(target) };
                if let Some(desc) = self.scope.lookup_mut(a.name) {
                    desc.ty = resolved;
                }
            }
            _ => {}
        }
    }

    fn register_signature(&mut self, decl: &ast::Declaration) {
        match decl {
            ast::Declaration::Function(f) => {
                let parameters: Vec<Type> = f
                    .parameters
                    .iter()
                    .map(|p| self.resolve_type_ref(&p.ty, f.info.span))
                    .collect();
                let return_ty = f
                    .return_type
                    .as_ref()
                    .map(|t| self.resolve_type_ref(t, f.info.span))
                    .unwrap_or_else(Type::void);
                let ty = Type::Function { return_ty: Box::new(return_ty), parameters };
                let descriptor = SymbolDescriptor {
                    kind: SymbolKind::Function,
                    ty,
                    mutable: false,
                    block_index: 0,
                };
                if self.scope.declare(f.name, descriptor).is_err() {
                    self.error(
                        DiagnosticCode::E_ABT_REDECLARATION,
                        f.info.span,
                        format!("`{}` is already declared", f.name.as_str()),
                    );
                }
                self.signatures.insert(
                    f.name,
                    Signature { param_names: f.parameters.iter().map(|p| p.name).collect() },
                );
            }
            ast::Declaration::External(e) => {
                let parameters: Vec<Type> = e
                    .parameters
                    .iter()
                    .map(|p| self.resolve_type_ref(&p.ty, e.info.span))
                    .collect();
                let return_ty = e
                    .return_type
                    .as_ref()
                    .map(|t| self.resolve_type_ref(t, e.info.span))
                    .unwrap_or_else(Type::void);
                let ty = Type::Function { return_ty: Box::new(return_ty), parameters };
                let descriptor = SymbolDescriptor {
                    kind: SymbolKind::Function,
                    ty,
                    mutable: false,
                    block_index: 0,
                };
                if self.scope.declare(e.name, descriptor).is_err() {
                    self.error(
                        DiagnosticCode::E_ABT_REDECLARATION,
                        e.info.span,
                        format!("`{}` is already declared", e.name.as_str()),
                    );
                }
                self.signatures.insert(
                    e.name,
                    Signature { param_names: e.parameters.iter().map(|p| p.name).collect() },
                );
            }
            _ => {}
        }
    }

    // ---- declarations --------------------------------------------------

    fn bind_declaration(&mut self, decl: &ast::Declaration) -> Declaration {
        match decl {
            ast::Declaration::Variable(v) => Declaration::Variable(self.bind_variable(v)),
            ast::Declaration::Function(f) => Declaration::Function(self.bind_function(f)),
            ast::Declaration::External(e) => Declaration::External(self.bind_external(e)),
            ast::Declaration::Structure(s) => Declaration::Structure(hir::StructureDecl {
                name: s.name,
                fields: self.expect_struct_fields(s.name),
            }),
            ast::Declaration::Enumeration(e) => Declaration::Enumeration(hir::EnumerationDecl {
                name: e.name,
                variants: self.expect_enum_variants(e.name),
            }),
            ast::Declaration::Alias(a) => Declaration::Alias(hir::AliasDecl {
                name: a.name,
                target: self.expect_alias_target(a.name),
            }),
        }
    }

    fn expect_struct_fields(&self, name: Symbol) -> Vec<(Symbol, Type)> {
        match self.scope.lookup(name).map(|d| &d.ty) {
            Some(Type::Structure { fields, .. }) => fields.clone(),
            _ => Vec::new(),
        }
    }

    fn expect_enum_variants(&self, name: Symbol) -> Vec<(Symbol, Option<Type>)> {
        match self.scope.lookup(name).map(|d| &d.ty) {
            Some(Type::Enumeration { variants, .. }) => variants.clone(),
            _ => Vec::new(),
        }
    }

    fn expect_alias_target(&self, name: Symbol) -> Type {
        match self.scope.lookup(name).map(|d| &d.ty) {
            Some(Type::Alias { target, .. }) => (**target).clone(),
            _ => Type::Invalid,
        }
    }

    fn bind_variable(&mut self, v: &ast::VariableDecl) -> hir::VariableDecl {
        let declared = v.declared_type.as_ref().map(|t| self.resolve_type_ref(t, v.info.span));
        let bound_init = v.initializer.as_ref().map(|e| self.bind_expr(e, declared.as_ref()));

        let (ty, initializer) = match (declared, bound_init) {
            (Some(declared), Some(init)) => {
                let coerced = self.coerce(init, &declared, v.info.span, DiagnosticCode::E_ABT_TYPE_MISMATCH);
                (declared, Some(coerced))
            }
            (Some(declared), None) => {
                if !v.mutable {
                    self.error(
                        DiagnosticCode::E_ABT_UNINITIALIZED_BINDING,
                        v.info.span,
                        format!("immutable binding `{}` is never initialized", v.name.as_str()),
                    );
                }
                (declared, None)
            }
            (None, Some(init)) => (init.ty.clone(), Some(init)),
            (None, None) => {
                self.error(
                    DiagnosticCode::E_ABT_UNINITIALIZED_BINDING,
                    v.info.span,
                    format!("cannot infer a type for `{}` with no initializer", v.name.as_str()),
                );
                (Type::Invalid, None)
            }
        };

        let descriptor = SymbolDescriptor {
            kind: SymbolKind::Variable,
            ty: ty.clone(),
            mutable: v.mutable,
            block_index: 0,
        };
        if self.scope.declare(v.name, descriptor).is_err() {
            self.error(
                DiagnosticCode::E_ABT_REDECLARATION,
                v.info.span,
                format!("`{}` is already declared in this scope", v.name.as_str()),
            );
        }

        hir::VariableDecl { name: v.name, mutable: v.mutable, ty, initializer }
    }

    fn bind_function(&mut self, f: &ast::FunctionDecl) -> hir::FunctionDecl {
        let (return_ty, parameters) = match self.scope.lookup(f.name).map(|d| d.ty.clone()) {
            Some(Type::Function { return_ty, parameters }) => (*return_ty, parameters),
            _ => (Type::void(), Vec::new()),
        };

        self.scope.push_frame();
        let bound_params: Vec<Param> = f
            .parameters
            .iter()
            .zip(parameters.iter())
            .map(|(p, ty)| {
                let descriptor = SymbolDescriptor {
                    kind: SymbolKind::Variable,
                    ty: ty.clone(),
                    mutable: p.mutable,
                    block_index: 0,
                };
                if self.scope.declare(p.name, descriptor).is_err() {
                    self.error(
                        DiagnosticCode::E_ABT_REDECLARATION,
                        f.info.span,
                        format!("duplicate parameter `{}`", p.name.as_str()),
                    );
                }
                Param { name: p.name, mutable: p.mutable, ty: ty.clone() }
            })
            .collect();

        let previous_return = std::mem::replace(&mut self.return_type, return_ty.clone());
        let previous_loops = std::mem::take(&mut self.loop_stack);

        let body = self.bind_block(&f.body, Some(&return_ty));

        if !return_ty.is_void() && !block_guarantees_return(&body, &return_ty) {
            self.error(
                DiagnosticCode::E_ABT_MISSING_RETURN,
                f.info.span,
                format!("function `{}` does not return a value on every path", f.name.as_str()),
            );
        }

        self.return_type = previous_return;
        self.loop_stack = previous_loops;
        self.scope.pop_frame();

        hir::FunctionDecl { name: f.name, parameters: bound_params, return_type: return_ty, body }
    }

    fn bind_external(&mut self, e: &ast::ExternalDecl) -> hir::ExternalDecl {
        let (return_ty, parameters) = match self.scope.lookup(e.name).map(|d| d.ty.clone()) {
            Some(Type::Function { return_ty, parameters }) => (*return_ty, parameters),
            _ => (Type::void(), Vec::new()),
        };
        let parameters = e
            .parameters
            .iter()
            .zip(parameters.iter())
            .map(|(p, ty)| Param { name: p.name, mutable: p.mutable, ty: ty.clone() })
            .collect();
        hir::ExternalDecl { name: e.name, parameters, return_type: return_ty }
    }

    // ---- statements ------------------------------------------------------

    fn bind_block(&mut self, block: &ast::Block, hint: Option<&Type>) -> Block {
        let statements = block.statements.iter().map(|s| self.bind_statement(s)).collect();
        let tail = block.tail.as_ref().map(|e| Box::new(self.bind_expr(e, hint)));
        let ty = tail.as_ref().map(|e| e.ty.clone()).unwrap_or_else(Type::void);
        Block { statements, tail, ty }
    }

    fn bind_statement(&mut self, stmt: &ast::Statement) -> Statement {
        match stmt {
            ast::Statement::Expression(s) => Statement::Expression(self.bind_expr(&s.expr, None)),
            ast::Statement::Declaration(d) => Statement::Declaration(self.bind_declaration(d)),
            ast::Statement::Scope(b) => {
                self.scope.push_frame();
                let bound = self.bind_block(b, None);
                self.scope.pop_frame();
                Statement::Scope(bound)
            }
            ast::Statement::Return(s) => {
                let return_ty = self.return_type.clone();
                let value = s.value.as_ref().map(|e| {
                    let bound = self.bind_expr(e, Some(&return_ty));
                    self.coerce(bound, &return_ty, s.info.span, DiagnosticCode::E_ABT_TYPE_MISMATCH)
                });
                if value.is_none() && !return_ty.is_void() {
                    self.error(
                        DiagnosticCode::E_ABT_TYPE_MISMATCH,
                        s.info.span,
                        "`return;` with no value in a function that returns a value",
                    );
                }
                Statement::Return(value)
            }
            ast::Statement::Break(s) => {
                let target = self.resolve_break_target(s.label, s.info.span);
                let value = s.value.as_ref().map(|e| self.bind_expr(e, None));
                Statement::Break { target, value }
            }
            ast::Statement::Continue(s) => {
                let target = self.resolve_break_target(s.label, s.info.span);
                Statement::Continue { target }
            }
            ast::Statement::Label(s) => {
                let block_index = self.scope.next_block_index();
                if self.scope.declare_label(s.name, block_index).is_err() {
                    self.error(
                        DiagnosticCode::E_ABT_REDECLARATION,
                        s.info.span,
                        format!("label `{}` is already declared in this scope", s.name.as_str()),
                    );
                }
                let target = Box::new(self.bind_statement(&s.target));
                Statement::Label { name: s.name, block_index, target }
            }
            ast::Statement::Jump(s) => {
                let target = match self.scope.lookup_label(s.target) {
                    Some(t) => Some(t),
                    None => {
                        self.error(
                            DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                            s.info.span,
                            format!("no label `{}` in scope", s.target.as_str()),
                        );
                        None
                    }
                };
                Statement::Jump { target }
            }
            ast::Statement::PutChar(s) => {
                let bound = self.bind_expr(&s.value, Some(&Type::char_ty()));
                let bound = self.coerce(bound, &Type::char_ty(), s.info.span, DiagnosticCode::E_ABT_TYPE_MISMATCH);
                Statement::PutChar(bound)
            }
            ast::Statement::PutString(s) => {
                let bound = self.bind_expr(&s.value, Some(&Type::string_ty()));
                let bound = self.coerce(bound, &Type::string_ty(), s.info.span, DiagnosticCode::E_ABT_TYPE_MISMATCH);
                Statement::PutString(bound)
            }
        }
    }

    fn resolve_break_target(&self, label: Option<Symbol>, span: Span) -> hir::LabelTarget {
        match label {
            Some(name) => match self.scope.lookup_label(name) {
                Some(t) => Some(t),
                None => {
                    self.error(
                        DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                        span,
                        format!("no enclosing loop labeled `{}`", name.as_str()),
                    );
                    None
                }
            },
            None => match self.loop_stack.last() {
                Some(t) => Some(*t),
                None => {
                    self.error(DiagnosticCode::E_ABT_UNRESOLVED_NAME, span, "not inside a loop");
                    None
                }
            },
        }
    }

    // ---- expressions -----------------------------------------------------

    fn bind_expr(&mut self, expr: &ast::Expr, hint: Option<&Type>) -> Expr {
        let span = expr.info.span;
        match &expr.kind {
            ast::ExprKind::Literal(lit) => self.bind_literal(lit, hint),
            ast::ExprKind::Identifier { name, .. } => self.bind_identifier(*name, span),
            ast::ExprKind::Unary { op, operand } => self.bind_unary(*op, operand, hint, span),
            ast::ExprKind::Binary { op, left, right } => self.bind_binary(*op, left, right, hint, span),
            ast::ExprKind::Parenthesis(inner) => {
                let bound = self.bind_expr(inner, hint);
                let ty = bound.ty.clone();
                Expr { kind: ExprKind::Parenthesis(Box::new(bound)), ty }
            }
            ast::ExprKind::Index { base, index } => self.bind_index(base, index, span),
            ast::ExprKind::Access { base, member } => self.bind_access(base, *member, span),
            ast::ExprKind::Range { start, end, inclusive } => self.bind_range(start, end, *inclusive),
            ast::ExprKind::ArrayInitializer(elems) => self.bind_array_initializer(elems, hint, span),
            ast::ExprKind::StructureInitializer { name, values } => {
                self.bind_structure_initializer(*name, values, span)
            }
            ast::ExprKind::IfElse(if_else) => self.bind_if_else(if_else, hint),
            ast::ExprKind::While(w) => self.bind_while(w),
            ast::ExprKind::For(f) => self.bind_for(f),
            ast::ExprKind::Match(m) => self.bind_match(m, span),
            ast::ExprKind::Block(b) => {
                self.scope.push_frame();
                let bound = self.bind_block(b, hint);
                self.scope.pop_frame();
                let ty = bound.ty.clone();
                Expr { kind: ExprKind::Block(bound), ty }
            }
            ast::ExprKind::FunctionCall { callee, arguments } => {
                self.bind_call(*callee, arguments, span, false)
            }
            ast::ExprKind::ExternalCall { callee, arguments } => {
                self.bind_call(*callee, arguments, span, true)
            }
            ast::ExprKind::Conversion { value, target } => self.bind_conversion(value, target, span),
            ast::ExprKind::Shell(inner) => {
                let bound = self.bind_expr(inner, Some(&Type::string_ty()));
                let bound =
                    self.coerce(bound, &Type::string_ty(), span, DiagnosticCode::E_ABT_TYPE_MISMATCH);
                Expr { kind: ExprKind::Shell(Box::new(bound)), ty: Type::string_ty() }
            }
            ast::ExprKind::Assignment { target, compound_op, value } => {
                self.bind_assignment(target, *compound_op, value, span)
            }
            ast::ExprKind::TypeExpression(t) => {
                let ty = self.resolve_type_ref(t, span);
                Expr {
                    kind: ExprKind::TypeExpression(ty),
                    ty: Type::Primitive { kind: PrimitiveKind::Type, mutable: false },
                }
            }
        }
    }

    fn bind_literal(&mut self, lit: &ast::Literal, hint: Option<&Type>) -> Expr {
        match lit {
            ast::Literal::Int(v) => {
                let ty = match hint.map(|h| h.unwrap_alias()) {
                    Some(Type::Primitive { kind, .. }) if kind.is_integer() && kind.contains_int_literal(*v as i128) => {
                        Type::Primitive { kind: *kind, mutable: false }
                    }
                    _ => Type::i32_ty(),
                };
                Expr { kind: ExprKind::Literal(Literal::Int(*v)), ty }
            }
            ast::Literal::UInt(v) => {
                let ty = match hint.map(|h| h.unwrap_alias()) {
                    Some(Type::Primitive { kind, .. }) if kind.is_integer() && kind.contains_int_literal(*v as i128) => {
                        Type::Primitive { kind: *kind, mutable: false }
                    }
                    _ => Type::i32_ty(),
                };
                Expr { kind: ExprKind::Literal(Literal::UInt(*v)), ty }
            }
            ast::Literal::Float(v) => {
                let ty = match hint.map(|h| h.unwrap_alias()) {
                    Some(Type::Primitive { kind, .. }) if kind.is_float() => {
                        Type::Primitive { kind: *kind, mutable: false }
                    }
                    _ => Type::Primitive { kind: PrimitiveKind::F64, mutable: false },
                };
                Expr { kind: ExprKind::Literal(Literal::Float(*v)), ty }
            }
            ast::Literal::Bool(v) => Expr { kind: ExprKind::Literal(Literal::Bool(*v)), ty: Type::bool_ty() },
            ast::Literal::Char(v) => Expr { kind: ExprKind::Literal(Literal::Char(*v)), ty: Type::char_ty() },
            ast::Literal::String(v) => {
                Expr { kind: ExprKind::Literal(Literal::String(*v)), ty: Type::string_ty() }
            }
        }
    }

    fn bind_identifier(&mut self, name: Symbol, span: Span) -> Expr {
        match self.scope.lookup(name) {
            Some(desc) => match desc.kind {
                SymbolKind::Variable => Expr {
                    kind: ExprKind::Identifier(Referent::Variable { symbol: name, mutable: desc.mutable }),
                    ty: desc.ty.clone(),
                },
                SymbolKind::Function => Expr {
                    kind: ExprKind::Identifier(Referent::Function { symbol: name }),
                    ty: desc.ty.clone(),
                },
                SymbolKind::Struct | SymbolKind::Enum | SymbolKind::Alias => {
                    self.error(
                        DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                        span,
                        format!("`{}` names a type, not a value", name.as_str()),
                    );
                    Expr::poisoned()
                }
            },
            None => {
                self.error(
                    DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                    span,
                    format!("unresolved name `{}`", name.as_str()),
                );
                Expr::poisoned()
            }
        }
    }

    fn bind_unary(&mut self, op: ast::UnaryOperator, operand: &ast::Expr, hint: Option<&Type>, span: Span) -> Expr {
        let op = unary_op(op);
        let operand = self.bind_expr(operand, hint);
        match Type::unary(op, &operand.ty) {
            Some(ty) => Expr { kind: ExprKind::Unary { op, operand: Box::new(operand) }, ty },
            None => {
                self.error(
                    DiagnosticCode::E_ABT_INVALID_OPERATOR,
                    span,
                    format!("operator cannot apply to type `{}`", describe(&operand.ty)),
                );
                Expr::poisoned()
            }
        }
    }

    fn bind_binary(
        &mut self,
        op: ast::BinaryOperator,
        left: &ast::Expr,
        right: &ast::Expr,
        hint: Option<&Type>,
        span: Span,
    ) -> Expr {
        let op = binary_op(op);
        let left = self.bind_expr(left, hint);
        let right = self.bind_expr(right, Some(&left.ty));
        match Type::binary(op, &left.ty, &right.ty) {
            Some(ty) => Expr { kind: ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, ty },
            None => {
                self.error(
                    DiagnosticCode::E_ABT_INVALID_OPERATOR,
                    span,
                    format!("operator cannot apply to `{}` and `{}`", describe(&left.ty), describe(&right.ty)),
                );
                Expr::poisoned()
            }
        }
    }

    fn bind_index(&mut self, base: &ast::Expr, index: &ast::Expr, span: Span) -> Expr {
        let base = self.bind_expr(base, None);
        let index = self.bind_expr(index, None);
        if !index.ty.is_integer() && !index.ty.is_invalid() {
            self.error(DiagnosticCode::E_ABT_TYPE_MISMATCH, span, "array index must be an integer");
        }
        match base.ty.unwrap_alias().clone() {
            Type::Array { element, .. } => Expr {
                kind: ExprKind::Index { base: Box::new(base), index: Box::new(index) },
                ty: *element,
            },
            Type::Invalid => Expr::poisoned(),
            other => {
                self.error(
                    DiagnosticCode::E_ABT_TYPE_MISMATCH,
                    span,
                    format!("cannot index into `{}`", describe(&other)),
                );
                Expr::poisoned()
            }
        }
    }

    fn bind_access(&mut self, base: &ast::Expr, member: Symbol, span: Span) -> Expr {
        if let ast::ExprKind::Identifier { name, .. } = &base.kind {
            if let Some(desc) = self.scope.lookup(*name) {
                if desc.kind == SymbolKind::Enum {
                    let enum_ty = desc.ty.clone();
                    if let Type::Enumeration { name: enum_name, variants } = enum_ty.unwrap_alias() {
                        if let Some(index) = variants.iter().position(|(v, _)| *v == member) {
                            let base_expr = Expr {
                                kind: ExprKind::TypeExpression(enum_ty.clone()),
                                ty: Type::Primitive { kind: PrimitiveKind::Type, mutable: false },
                            };
                            return Expr {
                                kind: ExprKind::Access {
                                    base: Box::new(base_expr),
                                    kind: AccessKind::Enumerator {
                                        enum_name: *enum_name,
                                        variant_index: index as u32,
                                    },
                                },
                                ty: enum_ty.clone(),
                            };
                        }
                    }
                    self.error(
                        DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                        span,
                        format!("enumeration `{}` has no variant `{}`", name.as_str(), member.as_str()),
                    );
                    return Expr::poisoned();
                }
            }
        }

        let base = self.bind_expr(base, None);
        match base.ty.unwrap_alias().clone() {
            Type::Structure { fields, .. } => match fields.iter().position(|(f, _)| *f == member) {
                Some(index) => {
                    let ty = fields[index].1.clone();
                    Expr { kind: ExprKind::Access { base: Box::new(base), kind: AccessKind::Field { field_index: index } }, ty }
                }
                None => {
                    self.error(
                        DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                        span,
                        format!("no field `{}` on `{}`", member.as_str(), describe(&base.ty)),
                    );
                    Expr::poisoned()
                }
            },
            Type::Invalid => Expr::poisoned(),
            other => {
                self.error(
                    DiagnosticCode::E_ABT_TYPE_MISMATCH,
                    span,
                    format!("`{}` has no fields", describe(&other)),
                );
                Expr::poisoned()
            }
        }
    }

    fn bind_range(&mut self, start: &ast::Expr, end: &ast::Expr, inclusive: bool) -> Expr {
        let start = self.bind_expr(start, None);
        let end = self.bind_expr(end, Some(&start.ty));
        let ty = start.ty.common(&end.ty).unwrap_or(Type::Invalid);
        Expr { kind: ExprKind::Range { start: Box::new(start), end: Box::new(end), inclusive }, ty }
    }

    fn bind_array_initializer(&mut self, elems: &[ast::Expr], hint: Option<&Type>, span: Span) -> Expr {
        let element_hint = match hint.map(|h| h.unwrap_alias()) {
            Some(Type::Array { element, .. }) => Some((**element).clone()),
            _ => None,
        };
        let bound: Vec<Expr> = elems.iter().map(|e| self.bind_expr(e, element_hint.as_ref())).collect();
        let element_ty = bound
            .iter()
            .try_fold(None::<Type>, |acc, e| match acc {
                None => Some(Some(e.ty.clone())),
                Some(prev) => prev.unwrap().common(&e.ty).map(Some),
            })
            .flatten()
            .unwrap_or_else(|| {
                if !bound.is_empty() {
                    self.error(DiagnosticCode::E_ABT_TYPE_MISMATCH, span, "array elements have incompatible types");
                }
                Type::Invalid
            });
        let length = bound.len() as u64;
        Expr {
            kind: ExprKind::ArrayInitializer(bound),
            ty: Type::Array { element: Box::new(element_ty), length: Some(length), mutable: false },
        }
    }

    fn bind_structure_initializer(&mut self, name: Symbol, values: &[ast::Expr], span: Span) -> Expr {
        let fields = match self.scope.lookup(name) {
            Some(desc) if desc.kind == SymbolKind::Struct => match desc.ty.unwrap_alias() {
                Type::Structure { fields, .. } => fields.clone(),
                _ => Vec::new(),
            },
            _ => {
                self.error(
                    DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                    span,
                    format!("`{}` does not name a structure", name.as_str()),
                );
                Vec::new()
            }
        };

        if values.len() != fields.len() {
            self.error(
                DiagnosticCode::E_ABT_ARITY_MISMATCH,
                span,
                format!(
                    "`{}` has {} field(s), {} value(s) given",
                    name.as_str(),
                    fields.len(),
                    values.len()
                ),
            );
        }

        let bound: Vec<Expr> = values
            .iter()
            .zip(fields.iter().map(|(_, t)| Some(t.clone())).chain(std::iter::repeat(None)))
            .map(|(v, field_ty)| {
                let bound = self.bind_expr(v, field_ty.as_ref());
                match field_ty {
                    Some(ft) => self.coerce(bound, &ft, span, DiagnosticCode::E_ABT_ARGUMENT_TYPE_MISMATCH),
                    None => bound,
                }
            })
            .collect();

        Expr {
            kind: ExprKind::StructureInitializer { name, values: bound },
            ty: Type::Structure { name, fields },
        }
    }

    fn bind_if_else(&mut self, if_else: &ast::IfElseExpr, hint: Option<&Type>) -> Expr {
        let condition = self.bind_expr(&if_else.condition, Some(&Type::bool_ty()));
        if !condition.ty.equals(&Type::bool_ty()) && !condition.ty.is_invalid() {
            self.error(
                DiagnosticCode::E_ABT_TYPE_MISMATCH,
                if_else.info.span,
                "`if` condition must be `bool`",
            );
        }

        self.scope.push_frame();
        let then_branch = self.bind_block(&if_else.then_branch, hint);
        self.scope.pop_frame();

        let else_branch = if_else.else_branch.as_ref().map(|clause| match clause {
            ast::ElseClause::Block(b) => {
                self.scope.push_frame();
                let bound = self.bind_block(b, hint);
                self.scope.pop_frame();
                ElseBranch::Block(bound)
            }
            ast::ElseClause::If(nested) => {
                let nested_expr = ast::Expr::new(nested.info.clone(), ast::ExprKind::IfElse((**nested).clone()));
                ElseBranch::If(Box::new(self.bind_expr(&nested_expr, hint)))
            }
        });

        let ty = match &else_branch {
            Some(ElseBranch::Block(b)) => then_branch.ty.common(&b.ty).unwrap_or(Type::Invalid),
            Some(ElseBranch::If(e)) => then_branch.ty.common(&e.ty).unwrap_or(Type::Invalid),
            None => Type::void(),
        };

        Expr { kind: ExprKind::If { condition: Box::new(condition), then_branch, else_branch }, ty }
    }

    fn bind_while(&mut self, w: &ast::WhileExpr) -> Expr {
        let condition = self.bind_expr(&w.condition, Some(&Type::bool_ty()));
        if !condition.ty.equals(&Type::bool_ty()) && !condition.ty.is_invalid() {
            self.error(DiagnosticCode::E_ABT_TYPE_MISMATCH, w.info.span, "`while` condition must be `bool`");
        }

        self.scope.push_frame();
        let block_index = self.scope.next_block_index();
        if let Some(label) = w.label {
            if self.scope.declare_label(label, block_index).is_err() {
                self.error(
                    DiagnosticCode::E_ABT_REDECLARATION,
                    w.info.span,
                    format!("label `{}` is already declared in this scope", label.as_str()),
                );
            }
        }
        self.loop_stack.push((block_index, self.scope.depth()));
        let body = self.bind_block(&w.body, None);
        self.loop_stack.pop();
        self.scope.pop_frame();

        Expr {
            kind: ExprKind::While { block_index, condition: Box::new(condition), body },
            ty: Type::void(),
        }
    }

    fn bind_for(&mut self, f: &ast::ForExpr) -> Expr {
        self.scope.push_frame();
        let block_index = self.scope.next_block_index();
        if let Some(label) = f.label {
            if self.scope.declare_label(label, block_index).is_err() {
                self.error(
                    DiagnosticCode::E_ABT_REDECLARATION,
                    f.info.span,
                    format!("label `{}` is already declared in this scope", label.as_str()),
                );
            }
        }
        self.loop_stack.push((block_index, self.scope.depth()));

        let variant = match &f.variant {
            ast::ForVariant::CStyle { init, condition, step } => {
                let init = init.as_ref().map(|s| Box::new(self.bind_statement(s)));
                let condition = condition.as_ref().map(|c| {
                    let bound = self.bind_expr(c, Some(&Type::bool_ty()));
                    if !bound.ty.equals(&Type::bool_ty()) && !bound.ty.is_invalid() {
                        self.error(DiagnosticCode::E_ABT_TYPE_MISMATCH, f.info.span, "`for` condition must be `bool`");
                    }
                    Box::new(bound)
                });
                let step = step.as_ref().map(|s| Box::new(self.bind_expr(s, None)));
                ForVariant::CStyle { init, condition, step }
            }
            ast::ForVariant::Ranged { binding, iterable } => {
                let iterable = self.bind_expr(iterable, None);
                let element_ty = match iterable.ty.unwrap_alias().clone() {
                    Type::Array { element, .. } => *element,
                    other if other.is_invalid() => Type::Invalid,
                    _ => iterable.ty.clone(),
                };
                let descriptor = SymbolDescriptor {
                    kind: SymbolKind::Variable,
                    ty: element_ty.clone(),
                    mutable: false,
                    block_index: 0,
                };
                if self.scope.declare(*binding, descriptor).is_err() {
                    self.error(
                        DiagnosticCode::E_ABT_REDECLARATION,
                        f.info.span,
                        format!("`{}` is already declared", binding.as_str()),
                    );
                }
                ForVariant::Ranged { binding: *binding, element_ty, iterable: Box::new(iterable) }
            }
        };

        let body = self.bind_block(&f.body, None);
        self.loop_stack.pop();
        self.scope.pop_frame();

        Expr { kind: ExprKind::For { block_index, variant, body }, ty: Type::void() }
    }

    fn bind_match(&mut self, m: &ast::MatchExpr, span: Span) -> Expr {
        let scrutinee = self.bind_expr(&m.scrutinee, None);
        let scrutinee_ty = scrutinee.ty.clone();

        let mut result_ty: Option<Type> = None;
        let mut covered_variants: Vec<u32> = Vec::new();
        let mut has_default = false;

        let clauses: Vec<MatchClause> = m
            .clauses
            .iter()
            .map(|clause| {
                if clause.patterns.is_empty() {
                    has_default = true;
                }
                let patterns: Vec<Expr> = clause
                    .patterns
                    .iter()
                    .map(|p| {
                        let bound = self.bind_expr(p, Some(&scrutinee_ty));
                        if let ExprKind::Access { kind: AccessKind::Enumerator { variant_index, .. }, .. } = &bound.kind {
                            covered_variants.push(*variant_index);
                        }
                        if !bound.ty.is_invalid()
                            && !scrutinee_ty.is_invalid()
                            && !bound.ty.equals(&scrutinee_ty)
                            && !bound.ty.assignable(&scrutinee_ty).is_allowed_implicitly()
                        {
                            self.error(
                                DiagnosticCode::E_ABT_TYPE_MISMATCH,
                                span,
                                format!(
                                    "match pattern of type `{}` is not assignable to `{}`",
                                    describe(&bound.ty),
                                    describe(&scrutinee_ty)
                                ),
                            );
                        }
                        bound
                    })
                    .collect();
                let body = self.bind_expr(&clause.body, None);
                result_ty = Some(match &result_ty {
                    Some(prev) => prev.common(&body.ty).unwrap_or(Type::Invalid),
                    None => body.ty.clone(),
                });
                MatchClause { patterns, body }
            })
            .collect();

        if let Type::Enumeration { variants, .. } = scrutinee_ty.unwrap_alias() {
            if !has_default {
                let all_covered = (0..variants.len() as u32).all(|i| covered_variants.contains(&i));
                if !all_covered {
                    self.warn(
                        DiagnosticCode::W_ABT_NON_EXHAUSTIVE_MATCH,
                        span,
                        "match does not cover every variant of this enumeration",
                    );
                }
            }
        }

        Expr {
            kind: ExprKind::Match { scrutinee: Box::new(scrutinee), clauses },
            ty: result_ty.unwrap_or_else(Type::void),
        }
    }

    fn bind_call(&mut self, callee: Symbol, arguments: &[ast::Argument], span: Span, external: bool) -> Expr {
        let signature = match self.scope.lookup(callee) {
            Some(desc) if desc.kind == SymbolKind::Function => desc.ty.clone(),
            _ => {
                self.error(
                    DiagnosticCode::E_ABT_UNRESOLVED_NAME,
                    span,
                    format!("unresolved function `{}`", callee.as_str()),
                );
                return Expr::poisoned();
            }
        };
        let (return_ty, parameters) = match signature {
            Type::Function { return_ty, parameters } => (*return_ty, parameters),
            _ => (Type::Invalid, Vec::new()),
        };
        let param_names = self.signatures.get(&callee).map(|s| s.param_names.clone()).unwrap_or_default();

        if arguments.len() != parameters.len() {
            self.error(
                DiagnosticCode::E_ABT_ARITY_MISMATCH,
                span,
                format!(
                    "`{}` expects {} argument(s), {} given",
                    callee.as_str(),
                    parameters.len(),
                    arguments.len()
                ),
            );
        }

        let ordered = reorder_arguments(arguments, &param_names);
        let bound_args: Vec<Expr> = ordered
            .into_iter()
            .zip(parameters.iter())
            .map(|(arg, ty)| match arg {
                Some(expr) => {
                    let bound = self.bind_expr(expr, Some(ty));
                    self.coerce(bound, ty, span, DiagnosticCode::E_ABT_ARGUMENT_TYPE_MISMATCH)
                }
                None => Expr::poisoned(),
            })
            .collect();

        let kind = if external {
            ExprKind::ExternalCall { callee, arguments: bound_args }
        } else {
            ExprKind::Call { callee, arguments: bound_args }
        };
        Expr { kind, ty: return_ty }
    }

    fn bind_conversion(&mut self, value: &ast::Expr, target: &ast::TypeRef, span: Span) -> Expr {
        let value = self.bind_expr(value, None);
        let target_ty = self.resolve_type_ref(target, span);
        let assignability = value.ty.assignable(&target_ty);
        if !assignability.is_allowed_explicitly() {
            self.error(
                DiagnosticCode::E_ABT_INVALID_OPERATOR,
                span,
                format!("cannot convert `{}` to `{}`", describe(&value.ty), describe(&target_ty)),
            );
            return Expr::poisoned();
        }
        let initial_type = value.ty.clone();
        Expr {
            kind: ExprKind::Conversion {
                value: Box::new(value),
                initial_type,
                target_type: target_ty.clone(),
                explicit: true,
            },
            ty: target_ty,
        }
    }

    fn bind_assignment(
        &mut self,
        target: &ast::Expr,
        compound_op: Option<ast::BinaryOperator>,
        value: &ast::Expr,
        span: Span,
    ) -> Expr {
        let bound_target = self.bind_expr(target, None);
        match lvalue_root_mutable(&bound_target) {
            Some(true) | None => {}
            Some(false) => {
                self.error(
                    DiagnosticCode::E_ABT_IMMUTABLE_ASSIGNMENT,
                    span,
                    "cannot assign to an immutable binding",
                );
            }
        }

        let bound_value = self.bind_expr(value, Some(&bound_target.ty));
        let compound_op = compound_op.map(binary_op);

        let coerced_value = match compound_op {
            Some(op) => {
                if Type::binary(op, &bound_target.ty, &bound_value.ty).is_none() {
                    self.error(
                        DiagnosticCode::E_ABT_INVALID_OPERATOR,
                        span,
                        "compound assignment operator does not apply to these types",
                    );
                }
                self.coerce(bound_value, &bound_target.ty, span, DiagnosticCode::E_ABT_TYPE_MISMATCH)
            }
            None => self.coerce(bound_value, &bound_target.ty, span, DiagnosticCode::E_ABT_TYPE_MISMATCH),
        };

        let ty = bound_target.ty.clone();
        Expr {
            kind: ExprKind::Assignment {
                target: Box::new(bound_target),
                compound_op,
                value: Box::new(coerced_value),
            },
            ty,
        }
    }

    /// Coerces `expr` to `target`, inserting an implicit [`hir::ExprKind::Conversion`]
    /// node when widening is required, or reporting `code` and poisoning the
    /// node when the types are outright incompatible (§4.2, §4.5).
    fn coerce(&mut self, expr: Expr, target: &Type, span: Span, code: DiagnosticCode) -> Expr {
        if expr.ty.is_invalid() || expr.ty.equals(target) {
            return expr;
        }
        match expr.ty.assignable(target) {
            Assignability::Identity => expr,
            Assignability::ImplicitWiden => {
                let initial_type = expr.ty.clone();
                Expr {
                    kind: ExprKind::Conversion {
                        value: Box::new(expr),
                        initial_type,
                        target_type: target.clone(),
                        explicit: false,
                    },
                    ty: target.clone(),
                }
            }
            _ => {
                self.error(
                    code,
                    span,
                    format!("expected `{}`, found `{}`", describe(target), describe(&expr.ty)),
                );
                Expr::poisoned()
            }
        }
    }
}

fn describe(ty: &Type) -> String {
    match ty.unwrap_alias() {
        Type::Primitive { kind, .. } => kind.to_string(),
        Type::Array { element, length, .. } => match length {
            Some(n) => format!("[{}; {}]", describe(element), n),
            None => format!("[{}]", describe(element)),
        },
        Type::Function { return_ty, parameters } => format!(
            "fn({}) -> {}",
            parameters.iter().map(describe).collect::<Vec<_>>().join(", "),
            describe(return_ty)
        ),
        Type::Structure { name, .. } => name.as_str().to_string(),
        Type::Enumeration { name, .. } => name.as_str().to_string(),
        Type::Alias { name, .. } => name.as_str().to_string(),
        Type::Invalid => "<invalid>".to_string(),
    }
}

fn lvalue_root_mutable(expr: &Expr) -> Option<bool> {
    match &expr.kind {
        ExprKind::Identifier(Referent::Variable { mutable, .. }) => Some(*mutable),
        ExprKind::Index { base, .. } => lvalue_root_mutable(base),
        ExprKind::Access { base, .. } => lvalue_root_mutable(base),
        ExprKind::Parenthesis(inner) => lvalue_root_mutable(inner),
        _ => None,
    }
}

/// Reorders call arguments into parameter order: a named argument lands in
/// its parameter's slot, the remaining unnamed arguments fill whatever
/// slots are left in the order they appear (§4.5 — "named or positional
/// arguments permitted").
fn reorder_arguments<'a>(arguments: &'a [ast::Argument], param_names: &[Symbol]) -> Vec<Option<&'a ast::Expr>> {
    let mut slots: Vec<Option<&ast::Expr>> = vec![None; param_names.len()];
    let mut leftover = Vec::new();

    for arg in arguments {
        match arg.name {
            Some(name) => match param_names.iter().position(|p| *p == name) {
                Some(index) => slots[index] = Some(&arg.value),
                None => leftover.push(&arg.value),
            },
            None => leftover.push(&arg.value),
        }
    }

    let mut leftover = leftover.into_iter();
    for slot in slots.iter_mut() {
        if slot.is_none() {
            *slot = leftover.next();
        }
    }
    slots
}

/// A conservative, recursion-friendly check that a block's control flow
/// cannot fall off the end without returning a value: a tail expression
/// assignable to `return_ty`, a trailing `return`, a trailing `if/else`
/// whose every arm itself guarantees a return, or a trailing exhaustive
/// `match` whose every clause body itself guarantees a return (§4.5
/// "match exhaustive on returns").
fn block_guarantees_return(block: &Block, return_ty: &Type) -> bool {
    if let Some(tail) = &block.tail {
        return tail.ty.assignable(return_ty).is_allowed_implicitly() || tail.ty.is_invalid();
    }
    match block.statements.last() {
        Some(Statement::Return(_)) => true,
        Some(Statement::Expression(Expr { kind: ExprKind::If { then_branch, else_branch, .. }, .. })) => {
            let then_ok = block_guarantees_return(then_branch, return_ty) || then_branch.tail.is_some();
            let else_ok = match else_branch {
                Some(ElseBranch::Block(b)) => block_guarantees_return(b, return_ty) || b.tail.is_some(),
                Some(ElseBranch::If(_)) => true,
                None => false,
            };
            then_ok && else_ok
        }
        Some(Statement::Expression(Expr { kind: ExprKind::Match { scrutinee, clauses }, .. })) => {
            match_guarantees_return(&scrutinee.ty, clauses, return_ty)
        }
        _ => false,
    }
}

/// Whether every clause of a match covers its case and guarantees a return:
/// the match itself must be exhaustive (a default clause, or every variant
/// of an enumeration scrutinee covered), and each clause body must itself
/// guarantee a return.
fn match_guarantees_return(scrutinee_ty: &Type, clauses: &[MatchClause], return_ty: &Type) -> bool {
    let mut covered_variants: Vec<u32> = Vec::new();
    let mut has_default = false;
    for clause in clauses {
        if clause.patterns.is_empty() {
            has_default = true;
        }
        for pattern in &clause.patterns {
            if let ExprKind::Access { kind: AccessKind::Enumerator { variant_index, .. }, .. } = &pattern.kind {
                covered_variants.push(*variant_index);
            }
        }
    }
    let exhaustive = match scrutinee_ty.unwrap_alias() {
        Type::Enumeration { variants, .. } => {
            has_default || (0..variants.len() as u32).all(|i| covered_variants.contains(&i))
        }
        _ => has_default,
    };
    exhaustive && clauses.iter().all(|clause| clause_body_guarantees_return(&clause.body, return_ty))
}

/// Whether a match clause's body (an expression, not a statement list)
/// guarantees a return — true for a block body ending in `return`, a
/// nested exhaustive match, or a nested if/else, false for a plain value
/// expression like `a => 1`.
fn clause_body_guarantees_return(body: &Expr, return_ty: &Type) -> bool {
    match &body.kind {
        ExprKind::Block(b) => block_guarantees_return(b, return_ty),
        ExprKind::Match { scrutinee, clauses } => match_guarantees_return(&scrutinee.ty, clauses, return_ty),
        ExprKind::If { then_branch, else_branch, .. } => {
            let then_ok = block_guarantees_return(then_branch, return_ty) || then_branch.tail.is_some();
            let else_ok = match else_branch {
                Some(ElseBranch::Block(b)) => block_guarantees_return(b, return_ty) || b.tail.is_some(),
                Some(ElseBranch::If(e)) => clause_body_guarantees_return(e, return_ty),
                None => false,
            };
            then_ok && else_ok
        }
        _ => false,
    }
}

/// Binds a parsed program into its bound tree, reporting every diagnostic
/// it produces through `handler` tagged [`Stage::Abt`].
pub fn bind(program: ast::Program, handler: &Handler) -> hir::Program {
    Binder::new(handler).bind_program(program)
}
