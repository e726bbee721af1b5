use serde::{Deserialize, Serialize};

use super::decl::Decorator;
use crate::span::Span;

/// Resolved static type of an IR node. Lowering only distinguishes unit from everything else.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub enum Type {
    Unit,
    Boolean,
    Number,
    String,
    Regex,
    Array(Box<Type>),
    Option(Box<Type>),
    Function { params: Vec<Type>, ret: Box<Type> },
    Entity(String),
    #[default]
    Any,
}

impl Type {
    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Unit)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub ty: Type,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ExprKind {
    Value(Value),
    Apply {
        callee: Box<Expr>,
        args: Vec<Expr>,
        #[serde(default)]
        is_constructor: bool,
    },
    /// A string-literal key is static property access; any other key is computed.
    Get { target: Box<Expr>, key: Box<Expr> },
    IfThenElse {
        guard: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// The last element is the result.
    Sequential(Vec<Expr>),
    Loop(Loop),
    Set {
        target: Box<Expr>,
        #[serde(default)]
        key: Option<Box<Expr>>,
        value: Box<Expr>,
    },
    VarDeclaration {
        binding: String,
        init: Box<Expr>,
        #[serde(default)]
        mutable: bool,
    },
    TryCatch {
        body: Box<Expr>,
        #[serde(default)]
        catch: Option<CatchClause>,
        #[serde(default)]
        finalizer: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatchClause {
    pub param: String,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Loop {
    While { guard: Box<Expr>, body: Box<Expr> },
    ForOf {
        binding: String,
        enumerable: Box<Expr>,
        body: Box<Expr>,
    },
    /// Counting loop over `start..=limit`, descending when `ascending` is false.
    For {
        binding: String,
        start: Box<Expr>,
        limit: Box<Expr>,
        body: Box<Expr>,
        ascending: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Regex {
        pattern: String,
        #[serde(default)]
        flags: String,
    },
    Identifier(String),
    This,
    Super,
    /// Default import of `path`, optionally followed by a member of it.
    ImportRef {
        path: String,
        #[serde(default)]
        member: Option<String>,
    },
    Lambda(Function),
    ArrayConst(Vec<Expr>),
    ObjectExpr(Vec<(String, Expr)>),
    TypeRef(EntityRef),
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),
    LogicalOp(LogicalOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FunctionKind {
    #[default]
    Immediate,
    Generator,
    Async,
}

/// A function value: lambda bodies, member bodies and test bodies all share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    pub params: Vec<String>,
    #[serde(default)]
    pub has_rest: bool,
    #[serde(default)]
    pub kind: FunctionKind,
    pub body: Box<Expr>,
}

/// Reference to an entity, as carried by `Value::TypeRef` and class base clauses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityRef {
    pub full_name: String,
    /// Identity of the declaring file; `None` cannot be resolved.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
}

impl EntityRef {
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    In,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl ExprKind {
    /// Human-readable node name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ExprKind::Value(v) => v.describe(),
            ExprKind::Apply { .. } => "application",
            ExprKind::Get { .. } => "property access",
            ExprKind::IfThenElse { .. } => "conditional",
            ExprKind::Sequential(_) => "sequential block",
            ExprKind::Loop(Loop::While { .. }) => "while loop",
            ExprKind::Loop(Loop::ForOf { .. }) => "for-of loop",
            ExprKind::Loop(Loop::For { .. }) => "for loop",
            ExprKind::Set { .. } => "assignment",
            ExprKind::VarDeclaration { .. } => "variable declaration",
            ExprKind::TryCatch { .. } => "try/catch",
        }
    }
}

impl Value {
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Null => "null literal",
            Value::Bool(_) => "boolean literal",
            Value::Int(_) => "integer literal",
            Value::Float(_) => "float literal",
            Value::String(_) => "string literal",
            Value::Regex { .. } => "regex literal",
            Value::Identifier(_) => "identifier",
            Value::This => "this",
            Value::Super => "super",
            Value::ImportRef { .. } => "import reference",
            Value::Lambda(_) => "lambda",
            Value::ArrayConst(_) => "array literal",
            Value::ObjectExpr(_) => "object expression",
            Value::TypeRef(_) => "type reference",
            Value::UnaryOp(_) => "unary operator",
            Value::BinaryOp(_) => "binary operator",
            Value::LogicalOp(_) => "logical operator",
        }
    }
}

// ---- Constructors ----

impl Expr {
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty, span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn value(value: Value, ty: Type) -> Self {
        Self::new(ExprKind::Value(value), ty)
    }

    pub fn null() -> Self {
        Self::value(Value::Null, Type::Unit)
    }

    pub fn bool(b: bool) -> Self {
        Self::value(Value::Bool(b), Type::Boolean)
    }

    pub fn int(n: i64) -> Self {
        Self::value(Value::Int(n), Type::Number)
    }

    pub fn float(n: f64) -> Self {
        Self::value(Value::Float(n), Type::Number)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::value(Value::String(s.into()), Type::String)
    }

    pub fn ident(name: impl Into<String>, ty: Type) -> Self {
        Self::value(Value::Identifier(name.into()), ty)
    }

    pub fn type_ref(full_name: impl Into<String>, file: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let ty = Type::Entity(full_name.clone());
        Self::value(
            Value::TypeRef(EntityRef {
                full_name,
                file: Some(file.into()),
                decorators: Vec::new(),
            }),
            ty,
        )
    }

    pub fn lambda(params: Vec<String>, body: Expr) -> Self {
        let ret = Box::new(body.ty.clone());
        Self::value(
            Value::Lambda(Function::new(params.clone(), body)),
            Type::Function { params: params.iter().map(|_| Type::Any).collect(), ret },
        )
    }

    pub fn apply(callee: Expr, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Apply { callee: Box::new(callee), args, is_constructor: false },
            ty,
        )
    }

    pub fn construct(callee: Expr, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Apply { callee: Box::new(callee), args, is_constructor: true },
            ty,
        )
    }

    /// Binary operation encoded the IR way: an operator tag applied to two arguments.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, ty: Type) -> Self {
        Self::apply(Self::value(Value::BinaryOp(op), Type::Any), vec![lhs, rhs], ty)
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Self::apply(Self::value(Value::UnaryOp(op), Type::Any), vec![operand], ty)
    }

    pub fn get(target: Expr, key: Expr, ty: Type) -> Self {
        Self::new(ExprKind::Get { target: Box::new(target), key: Box::new(key) }, ty)
    }

    pub fn if_then_else(guard: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        let ty = then_branch.ty.clone();
        Self::new(
            ExprKind::IfThenElse {
                guard: Box::new(guard),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            ty,
        )
    }

    pub fn sequential(exprs: Vec<Expr>) -> Self {
        let ty = exprs.last().map(|e| e.ty.clone()).unwrap_or(Type::Unit);
        Self::new(ExprKind::Sequential(exprs), ty)
    }

    pub fn set(target: Expr, key: Option<Expr>, value: Expr) -> Self {
        Self::new(
            ExprKind::Set {
                target: Box::new(target),
                key: key.map(Box::new),
                value: Box::new(value),
            },
            Type::Unit,
        )
    }

    pub fn var(binding: impl Into<String>, init: Expr, mutable: bool) -> Self {
        Self::new(
            ExprKind::VarDeclaration { binding: binding.into(), init: Box::new(init), mutable },
            Type::Unit,
        )
    }

    pub fn try_catch(body: Expr, catch: Option<(String, Expr)>, finalizer: Option<Expr>) -> Self {
        let ty = body.ty.clone();
        Self::new(
            ExprKind::TryCatch {
                body: Box::new(body),
                catch: catch.map(|(param, body)| CatchClause { param, body: Box::new(body) }),
                finalizer: finalizer.map(Box::new),
            },
            ty,
        )
    }

    pub fn while_loop(guard: Expr, body: Expr) -> Self {
        Self::new(
            ExprKind::Loop(Loop::While { guard: Box::new(guard), body: Box::new(body) }),
            Type::Unit,
        )
    }

    pub fn for_of(binding: impl Into<String>, enumerable: Expr, body: Expr) -> Self {
        Self::new(
            ExprKind::Loop(Loop::ForOf {
                binding: binding.into(),
                enumerable: Box::new(enumerable),
                body: Box::new(body),
            }),
            Type::Unit,
        )
    }

    pub fn for_range(binding: impl Into<String>, start: Expr, limit: Expr, body: Expr, ascending: bool) -> Self {
        Self::new(
            ExprKind::Loop(Loop::For {
                binding: binding.into(),
                start: Box::new(start),
                limit: Box::new(limit),
                body: Box::new(body),
                ascending,
            }),
            Type::Unit,
        )
    }

    /// True for the `null` literal, which the IR uses for an absent else branch.
    pub fn is_null(&self) -> bool {
        matches!(self.kind, ExprKind::Value(Value::Null))
    }
}

impl Function {
    pub fn new(params: Vec<String>, body: Expr) -> Self {
        Self {
            params,
            has_rest: false,
            kind: FunctionKind::Immediate,
            body: Box::new(body),
        }
    }

    pub fn with_kind(mut self, kind: FunctionKind) -> Self {
        self.kind = kind;
        self
    }
}
