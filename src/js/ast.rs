//! Output tree handed to the serializer.
//!
//! Expressions and statements are disjoint. The only crossings are `JsStmt::Expr`
//! (an expression standing alone as a statement) and `JsExpr::Block` (a statement
//! block standing where a value is required; its value is the last statement's).

use serde::Serialize;

pub use crate::ir::{BinaryOp, UnaryOp};
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsExpr {
    Null,
    Bool(bool),
    Int(i64),
    /// Always finite; the lowering rejects NaN and the infinities.
    Float(f64),
    Str(String),
    Regex { pattern: String, flags: String },
    Ident(String),
    This,
    Super,
    /// `object.property`
    Member { object: Box<JsExpr>, property: String },
    /// `object[index]`
    Index { object: Box<JsExpr>, index: Box<JsExpr> },
    Call { callee: Box<JsExpr>, args: Vec<JsExpr> },
    New { callee: Box<JsExpr>, args: Vec<JsExpr> },
    Unary { op: UnaryOp, operand: Box<JsExpr> },
    Binary { op: BinaryOp, lhs: Box<JsExpr>, rhs: Box<JsExpr> },
    /// `i++` / `i--`
    Update { op: UpdateOp, target: Box<JsExpr> },
    Conditional {
        test: Box<JsExpr>,
        consequent: Box<JsExpr>,
        alternate: Box<JsExpr>,
    },
    Assign { target: Box<JsExpr>, value: Box<JsExpr> },
    Object(Vec<(String, JsExpr)>),
    Function(Box<JsFunction>),
    Arrow(Box<JsArrow>),
    Class(Box<JsClass>),
    Block(Vec<JsStmt>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsStmt {
    Expr(JsExpr),
    Decl(JsDecl),
    If {
        test: JsExpr,
        consequent: Vec<JsStmt>,
        alternate: Option<Vec<JsStmt>>,
    },
    While { test: JsExpr, body: Vec<JsStmt> },
    /// `for (const binding of iterable)`
    ForOf {
        binding: String,
        iterable: JsExpr,
        body: Vec<JsStmt>,
    },
    /// `for (let binding = init; test; update)`
    For {
        binding: String,
        init: JsExpr,
        test: JsExpr,
        update: JsExpr,
        body: Vec<JsStmt>,
    },
    Try {
        block: Vec<JsStmt>,
        handler: Option<JsCatch>,
        finalizer: Option<Vec<JsStmt>>,
    },
    Return(Option<JsExpr>),
    ExportDefault(JsExpr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsCatch {
    pub param: String,
    pub body: Vec<JsStmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Const,
    Let,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsDecl {
    Var {
        kind: VarKind,
        name: String,
        init: Option<JsExpr>,
    },
    /// `import local from "source"`
    Import { local: String, source: String },
}

/// `function name(params) { body }` in expression position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsFunction {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<JsStmt>,
    pub is_generator: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsArrow {
    pub params: Vec<String>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrowBody {
    Block(Vec<JsStmt>),
    Expr(Box<JsExpr>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsClass {
    pub name: Option<String>,
    pub extends: Option<JsExpr>,
    pub members: Vec<JsClassMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Constructor,
    Method,
    Getter,
    Setter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsClassMember {
    pub kind: MethodKind,
    pub key: String,
    pub is_static: bool,
    pub params: Vec<String>,
    pub body: Vec<JsStmt>,
    pub is_generator: bool,
    pub is_async: bool,
}

/// One lowered file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<JsStmt>,
    pub span: Option<Span>,
}

// ---- Builders ----

impl JsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        JsExpr::Ident(name.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        JsExpr::Str(s.into())
    }

    pub fn member(object: JsExpr, property: impl Into<String>) -> Self {
        JsExpr::Member { object: Box::new(object), property: property.into() }
    }

    pub fn index(object: JsExpr, index: JsExpr) -> Self {
        JsExpr::Index { object: Box::new(object), index: Box::new(index) }
    }

    pub fn call(callee: JsExpr, args: Vec<JsExpr>) -> Self {
        JsExpr::Call { callee: Box::new(callee), args }
    }

    pub fn assign(target: JsExpr, value: JsExpr) -> Self {
        JsExpr::Assign { target: Box::new(target), value: Box::new(value) }
    }

    pub fn arrow(params: Vec<String>, body: ArrowBody) -> Self {
        JsExpr::Arrow(Box::new(JsArrow { params, body, is_async: false }))
    }

    /// `(() => { body })()`
    pub fn iife(body: Vec<JsStmt>) -> Self {
        JsExpr::call(JsExpr::arrow(Vec::new(), ArrowBody::Block(body)), Vec::new())
    }
}

impl JsStmt {
    pub fn var(kind: VarKind, name: impl Into<String>, init: JsExpr) -> Self {
        JsStmt::Decl(JsDecl::Var { kind, name: name.into(), init: Some(init) })
    }

    pub fn ret(expr: JsExpr) -> Self {
        JsStmt::Return(Some(expr))
    }
}
