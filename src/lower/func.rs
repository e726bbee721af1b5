use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{CatchClause, Expr, ExprKind, Function, FunctionKind};
use crate::js::{ArrowBody, JsArrow, JsCatch, JsExpr, JsFunction, JsStmt};
use crate::naming::sanitize_name;

/// Shape of a lowered function body.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Vec<JsStmt>),
    /// Single expression whose value is returned.
    Expr(JsExpr),
}

impl FunctionBody {
    pub fn into_block(self) -> Vec<JsStmt> {
        match self {
            FunctionBody::Block(stmts) => stmts,
            FunctionBody::Expr(expr) => vec![JsStmt::ret(expr)],
        }
    }

    pub fn into_arrow_body(self) -> ArrowBody {
        match self {
            FunctionBody::Block(stmts) => ArrowBody::Block(stmts),
            FunctionBody::Expr(expr) => ArrowBody::Expr(Box::new(expr)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoweredFunction {
    pub params: Vec<String>,
    pub body: FunctionBody,
    pub is_generator: bool,
    pub is_async: bool,
}

impl LoweredFunction {
    /// Arrow function, or a `function*` expression for generators.
    pub fn into_arrow(self) -> JsExpr {
        if self.is_generator {
            return self.into_function(None);
        }
        JsExpr::Arrow(Box::new(JsArrow {
            params: self.params,
            body: self.body.into_arrow_body(),
            is_async: self.is_async,
        }))
    }

    pub fn into_function(self, name: Option<String>) -> JsExpr {
        JsExpr::Function(Box::new(JsFunction {
            name,
            params: self.params,
            body: self.body.into_block(),
            is_generator: self.is_generator,
            is_async: self.is_async,
        }))
    }
}

impl Lowerer<'_> {
    pub fn function(&mut self, ctx: &Context<'_>, function: &Function) -> Result<LoweredFunction, LowerError> {
        if function.has_rest {
            return Err(LowerError::unsupported("rest parameter", function.body.span));
        }
        let (is_generator, is_async) = match function.kind {
            FunctionKind::Immediate => (false, false),
            FunctionKind::Generator => (true, false),
            FunctionKind::Async => (false, true),
        };
        Ok(LoweredFunction {
            params: function.params.iter().map(|p| sanitize_name(p)).collect(),
            body: self.function_body(ctx, &function.body)?,
            is_generator,
            is_async,
        })
    }

    /// Pick the body shape: unit bodies are statement blocks, a valued try/catch returns
    /// from each path, anything else is a single returned expression.
    pub fn function_body(&mut self, ctx: &Context<'_>, body: &Expr) -> Result<FunctionBody, LowerError> {
        if body.ty.is_unit() {
            return Ok(FunctionBody::Block(self.block(ctx, body)?));
        }
        if let ExprKind::TryCatch { body: inner, catch, finalizer } = &body.kind {
            let block = vec![JsStmt::ret(self.expr(ctx, inner)?)];
            let handler = match catch {
                Some(CatchClause { param, body }) => Some(JsCatch {
                    param: sanitize_name(param),
                    body: vec![JsStmt::ret(self.expr(ctx, body)?)],
                }),
                None => None,
            };
            let finalizer = match finalizer {
                Some(f) => Some(self.block(ctx, f)?),
                None => None,
            };
            return Ok(FunctionBody::Block(vec![JsStmt::Try { block, handler, finalizer }]));
        }
        Ok(FunctionBody::Expr(self.expr(ctx, body)?))
    }
}
