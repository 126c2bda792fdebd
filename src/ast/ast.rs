use crate::Position;

use super::types::Type;

/// Statement node kinds. A `Block` is the single shared representation for
/// function bodies and nested blocks; its statement list preserves source
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Block),
    FnDecl(FnDecl),
    Return(Return),
    Let(Let),
    Import(Import),
    Expression(Expression),
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Block(stmt) => stmt.position,
            Stmt::FnDecl(stmt) => stmt.position,
            Stmt::Return(stmt) => stmt.position,
            Stmt::Let(stmt) => stmt.position,
            Stmt::Import(stmt) => stmt.position,
            Stmt::Expression(stmt) => stmt.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub name: String,
    /// Ordered (name, annotated type) pairs.
    pub params: Vec<(String, Type)>,
    /// `Void` when the annotation was omitted before the body.
    pub return_type: Type,
    pub is_public: bool,
    pub body: Block,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: String,
    pub ty: Type,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub name: String,
    pub from: Option<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub expr: Expr,
    pub position: Position,
}

/// Expression node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Call(Call),
    Identifier(Identifier),
    Str(StringLit),
    Int(IntegerLit),
    Assignment(Assignment),
    FieldAccess(FieldAccess),
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::Call(expr) => expr.position,
            Expr::Identifier(expr) => expr.position,
            Expr::Str(expr) => expr.position,
            Expr::Int(expr) => expr.position,
            Expr::Assignment(expr) => expr.position,
            Expr::FieldAccess(expr) => expr.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLit {
    pub value: u64,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub object: Box<Expr>,
    pub field: String,
    pub position: Position,
}
