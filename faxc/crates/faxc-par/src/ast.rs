//! The unbound tree: the purely syntactic program representation produced
//! by parsing (§3.3). Every node owns its children, trees are acyclic, and
//! every node is `Clone` — a derived `.clone()` *is* the deep-clone
//! operation the binder relies on when it needs to fold a function body
//! into a value or specialize a match clause without aliasing the source.

use faxc_lex::Token;
use faxc_util::{Span, Symbol};

/// Metadata every node in the tree carries: the tokens it was built from
/// (kept for diagnostics and pretty-printing), its source span, and the
/// line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    pub tokens: Vec<Token>,
    pub span: Span,
    pub line: u32,
}

impl NodeInfo {
    pub fn new(tokens: Vec<Token>, span: Span, line: u32) -> Self {
        NodeInfo { tokens, span, line }
    }
}

/// The operator spelled by a unary expression, before any type is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Not,
    BitNot,
}

/// The operator spelled by a binary expression, before any type is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

/// A syntactic reference to a type: a name (primitive or a declared
/// structure/enumeration/alias) or an array shape. Resolved to a real
/// `faxc_sem::types::Type` by the binder.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named(Symbol),
    Array {
        element: Box<TypeRef>,
        length: Option<u64>,
    },
}

/// The root of a parsed program: an ordered sequence of top-level
/// declarations (§6 — "root = ordered sequence of unbound declarations").
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Variable(VariableDecl),
    Function(FunctionDecl),
    External(ExternalDecl),
    Structure(StructureDecl),
    Enumeration(EnumerationDecl),
    Alias(AliasDecl),
}

impl Declaration {
    pub fn info(&self) -> &NodeInfo {
        match self {
            Declaration::Variable(d) => &d.info,
            Declaration::Function(d) => &d.info,
            Declaration::External(d) => &d.info,
            Declaration::Structure(d) => &d.info,
            Declaration::Enumeration(d) => &d.info,
            Declaration::Alias(d) => &d.info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub mutable: bool,
    pub declared_type: Option<TypeRef>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Symbol,
    pub mutable: bool,
    pub ty: TypeRef,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub generics: Vec<Symbol>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct ExternalDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct StructureDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub fields: Vec<(Symbol, TypeRef)>,
}

#[derive(Debug, Clone)]
pub struct EnumerationDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub variants: Vec<(Symbol, Option<TypeRef>)>,
}

#[derive(Debug, Clone)]
pub struct AliasDecl {
    pub info: NodeInfo,
    pub name: Symbol,
    pub target: TypeRef,
}

/// A lexical block: a sequence of statements with an optional trailing
/// expression that becomes the block's value when present.
#[derive(Debug, Clone)]
pub struct Block {
    pub info: NodeInfo,
    pub statements: Vec<Statement>,
    pub tail: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub enum Statement {
    Expression(ExpressionStmt),
    Declaration(Declaration),
    Scope(Block),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Label(LabelStmt),
    Jump(JumpStmt),
    PutChar(PutCharStmt),
    PutString(PutStringStmt),
}

impl Statement {
    pub fn info(&self) -> &NodeInfo {
        match self {
            Statement::Expression(s) => &s.info,
            Statement::Declaration(d) => d.info(),
            Statement::Scope(b) => &b.info,
            Statement::Return(s) => &s.info,
            Statement::Break(s) => &s.info,
            Statement::Continue(s) => &s.info,
            Statement::Label(s) => &s.info,
            Statement::Jump(s) => &s.info,
            Statement::PutChar(s) => &s.info,
            Statement::PutString(s) => &s.info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub info: NodeInfo,
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub info: NodeInfo,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub info: NodeInfo,
    pub label: Option<Symbol>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub info: NodeInfo,
    pub label: Option<Symbol>,
}

/// Introduces a named, labelable block: `label outer: while ... { ... }`.
#[derive(Debug, Clone)]
pub struct LabelStmt {
    pub info: NodeInfo,
    pub name: Symbol,
    pub target: Box<Statement>,
}

/// `goto` — an unconditional jump to a `label:` by name, scoped to the
/// current function body only (§9 open-question resolution).
#[derive(Debug, Clone)]
pub struct JumpStmt {
    pub info: NodeInfo,
    pub target: Symbol,
}

#[derive(Debug, Clone)]
pub struct PutCharStmt {
    pub info: NodeInfo,
    pub value: Expr,
}

#[derive(Debug, Clone)]
pub struct PutStringStmt {
    pub info: NodeInfo,
    pub value: Expr,
}

/// A call argument, optionally named (§4.5 — "named or positional
/// arguments permitted").
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Option<Symbol>,
    pub value: Expr,
}

#[derive(Debug, Clone)]
pub enum ElseClause {
    Block(Block),
    If(Box<IfElseExpr>),
}

#[derive(Debug, Clone)]
pub struct IfElseExpr {
    pub info: NodeInfo,
    pub condition: Box<Expr>,
    pub then_branch: Block,
    pub else_branch: Option<ElseClause>,
}

#[derive(Debug, Clone)]
pub struct WhileExpr {
    pub info: NodeInfo,
    pub label: Option<Symbol>,
    pub condition: Box<Expr>,
    pub body: Block,
}

/// The two surface forms a `for` loop can take (§3.3).
#[derive(Debug, Clone)]
pub enum ForVariant {
    /// `for (init; cond; step) { ... }`
    CStyle {
        init: Option<Box<Statement>>,
        condition: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    /// `for binding in iterable { ... }`
    Ranged { binding: Symbol, iterable: Box<Expr> },
}

#[derive(Debug, Clone)]
pub struct ForExpr {
    pub info: NodeInfo,
    pub label: Option<Symbol>,
    pub variant: ForVariant,
    pub body: Block,
}

/// One `pattern, pattern => body` clause. An empty `patterns` list is the
/// default clause (§4.5 exhaustiveness rule).
#[derive(Debug, Clone)]
pub struct MatchClause {
    pub info: NodeInfo,
    pub patterns: Vec<Expr>,
    pub body: Expr,
}

#[derive(Debug, Clone)]
pub struct MatchExpr {
    pub info: NodeInfo,
    pub scrutinee: Box<Expr>,
    pub clauses: Vec<MatchClause>,
}

#[derive(Debug, Clone)]
pub enum Literal {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(Symbol),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub info: NodeInfo,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    /// An identifier, optionally carrying a turbofish generic-arguments
    /// clause. Generics are inert metadata (§9) — the binder never
    /// instantiates them.
    Identifier {
        name: Symbol,
        generic_args: Vec<TypeRef>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Parenthesis(Box<Expr>),
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Access {
        base: Box<Expr>,
        member: Symbol,
    },
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        inclusive: bool,
    },
    ArrayInitializer(Vec<Expr>),
    /// Positional match against the target structure's declared field
    /// sequence (§4.5).
    StructureInitializer {
        name: Symbol,
        values: Vec<Expr>,
    },
    IfElse(IfElseExpr),
    While(WhileExpr),
    For(ForExpr),
    Match(MatchExpr),
    Block(Block),
    FunctionCall {
        callee: Symbol,
        arguments: Vec<Argument>,
    },
    ExternalCall {
        callee: Symbol,
        arguments: Vec<Argument>,
    },
    /// An explicit `as`-style conversion.
    Conversion {
        value: Box<Expr>,
        target: TypeRef,
    },
    /// `shell(command)` — hands a string to the host shell; out of scope
    /// to execute here, the binder only type-checks it.
    Shell(Box<Expr>),
    Assignment {
        target: Box<Expr>,
        /// `Some(op)` for compound assignment (`+=`, `&=`, ...).
        compound_op: Option<BinaryOperator>,
        value: Box<Expr>,
    },
    /// A type used as a value, e.g. as a call argument to a reflective
    /// builtin: `type(i32)`.
    TypeExpression(TypeRef),
}

impl Expr {
    pub fn new(info: NodeInfo, kind: ExprKind) -> Self {
        Expr { info, kind }
    }
}

/// A child of an unbound node, tagged by which of the three node
/// hierarchies it belongs to (§4.3's `children(node)` operation).
pub enum Child<'a> {
    Expr(&'a Expr),
    Statement(&'a Statement),
    Declaration(&'a Declaration),
}

impl Expr {
    /// The ordered sequence of this expression's direct children, for
    /// generic traversal and pretty-printing.
    pub fn children(&self) -> Vec<Child<'_>> {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Identifier { .. } | ExprKind::TypeExpression(_) => {
                vec![]
            }
            ExprKind::Unary { operand, .. } => vec![Child::Expr(operand)],
            ExprKind::Binary { left, right, .. } => vec![Child::Expr(left), Child::Expr(right)],
            ExprKind::Parenthesis(inner) | ExprKind::Shell(inner) => vec![Child::Expr(inner)],
            ExprKind::Index { base, index } => vec![Child::Expr(base), Child::Expr(index)],
            ExprKind::Access { base, .. } => vec![Child::Expr(base)],
            ExprKind::Range { start, end, .. } => vec![Child::Expr(start), Child::Expr(end)],
            ExprKind::ArrayInitializer(elems) => elems.iter().map(Child::Expr).collect(),
            ExprKind::StructureInitializer { values, .. } => values.iter().map(Child::Expr).collect(),
            ExprKind::IfElse(if_else) => {
                let mut out = vec![Child::Expr(&if_else.condition)];
                out.extend(if_else.then_branch.statements.iter().map(Child::Statement));
                if let Some(tail) = &if_else.then_branch.tail {
                    out.push(Child::Expr(tail));
                }
                out
            }
            ExprKind::While(w) => {
                let mut out = vec![Child::Expr(&w.condition)];
                out.extend(w.body.statements.iter().map(Child::Statement));
                out
            }
            ExprKind::For(f) => f.body.statements.iter().map(Child::Statement).collect(),
            ExprKind::Match(m) => {
                let mut out = vec![Child::Expr(&m.scrutinee)];
                for clause in &m.clauses {
                    out.extend(clause.patterns.iter().map(Child::Expr));
                    out.push(Child::Expr(&clause.body));
                }
                out
            }
            ExprKind::Block(block) => {
                let mut out: Vec<Child<'_>> = block.statements.iter().map(Child::Statement).collect();
                if let Some(tail) = &block.tail {
                    out.push(Child::Expr(tail));
                }
                out
            }
            ExprKind::FunctionCall { arguments, .. } | ExprKind::ExternalCall { arguments, .. } => {
                arguments.iter().map(|a| Child::Expr(&a.value)).collect()
            }
            ExprKind::Conversion { value, .. } => vec![Child::Expr(value)],
            ExprKind::Assignment { target, value, .. } => vec![Child::Expr(target), Child::Expr(value)],
        }
    }
}

impl Statement {
    pub fn children(&self) -> Vec<Child<'_>> {
        match self {
            Statement::Expression(s) => vec![Child::Expr(&s.expr)],
            Statement::Declaration(d) => vec![Child::Declaration(d)],
            Statement::Scope(b) => b.statements.iter().map(Child::Statement).collect(),
            Statement::Return(s) => s.value.iter().map(Child::Expr).collect(),
            Statement::Break(s) => s.value.iter().map(Child::Expr).collect(),
            Statement::Continue(_) | Statement::Jump(_) => vec![],
            Statement::Label(s) => vec![Child::Statement(&s.target)],
            Statement::PutChar(s) => vec![Child::Expr(&s.value)],
            Statement::PutString(s) => vec![Child::Expr(&s.value)],
        }
    }
}

impl Declaration {
    pub fn children(&self) -> Vec<Child<'_>> {
        match self {
            Declaration::Variable(v) => v.initializer.iter().map(Child::Expr).collect(),
            Declaration::Function(f) => f.body.statements.iter().map(Child::Statement).collect(),
            Declaration::External(_)
            | Declaration::Structure(_)
            | Declaration::Enumeration(_)
            | Declaration::Alias(_) => vec![],
        }
    }
}
