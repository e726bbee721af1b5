use super::resolve::require;
use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{BinaryOp, CatchClause, Expr, ExprKind, Loop};
use crate::js::{JsCatch, JsExpr, JsStmt, UpdateOp, VarKind};
use crate::naming::sanitize_name;

impl Lowerer<'_> {
    /// Lower `expr` in statement position.
    pub fn stmt(&mut self, ctx: &Context<'_>, expr: &Expr) -> Result<JsStmt, LowerError> {
        match &expr.kind {
            ExprKind::Value(_) | ExprKind::Get { .. } | ExprKind::Apply { .. } => {
                Ok(JsStmt::Expr(self.expr(ctx, expr)?))
            }
            ExprKind::Loop(lp) => self.loop_stmt(ctx, lp),
            ExprKind::Set { target, key, value } => {
                let value = self.expr(ctx, value)?;
                let target = match key {
                    Some(key) => {
                        let object = self.target_expr(ctx, target)?;
                        self.access(ctx, object, key)?
                    }
                    None => {
                        let target_expr = self.target_expr(ctx, target)?;
                        require(target_expr, "assignment target", target.span)?
                    }
                };
                Ok(JsStmt::Expr(JsExpr::assign(target, value)))
            }
            ExprKind::VarDeclaration { binding, init, .. } => {
                Ok(JsStmt::var(VarKind::Let, sanitize_name(binding), self.expr(ctx, init)?))
            }
            ExprKind::TryCatch { body, catch, finalizer } => Ok(JsStmt::Try {
                block: self.block(ctx, body)?,
                handler: match catch {
                    Some(CatchClause { param, body }) => Some(JsCatch {
                        param: sanitize_name(param),
                        body: self.block(ctx, body)?,
                    }),
                    None => None,
                },
                finalizer: match finalizer {
                    Some(f) => Some(self.block(ctx, f)?),
                    None => None,
                },
            }),
            ExprKind::IfThenElse { guard, then_branch, else_branch } => Ok(JsStmt::If {
                test: self.expr(ctx, guard)?,
                consequent: self.block(ctx, then_branch)?,
                alternate: if else_branch.is_null() { None } else { Some(self.block(ctx, else_branch)?) },
            }),
            ExprKind::Sequential(_) => Err(LowerError::internal(
                "sequential block where a single statement is required",
                expr.span,
            )),
        }
    }

    fn loop_stmt(&mut self, ctx: &Context<'_>, lp: &Loop) -> Result<JsStmt, LowerError> {
        match lp {
            Loop::While { guard, body } => Ok(JsStmt::While {
                test: self.expr(ctx, guard)?,
                body: self.block(ctx, body)?,
            }),
            Loop::ForOf { binding, enumerable, body } => Ok(JsStmt::ForOf {
                binding: sanitize_name(binding),
                iterable: self.expr(ctx, enumerable)?,
                body: self.block(ctx, body)?,
            }),
            Loop::For { binding, start, limit, body, ascending } => {
                let binding = sanitize_name(binding);
                let (cmp, update) = if *ascending {
                    (BinaryOp::LtEq, UpdateOp::Increment)
                } else {
                    (BinaryOp::GtEq, UpdateOp::Decrement)
                };
                Ok(JsStmt::For {
                    init: self.expr(ctx, start)?,
                    test: JsExpr::Binary {
                        op: cmp,
                        lhs: Box::new(JsExpr::ident(binding.as_str())),
                        rhs: Box::new(self.expr(ctx, limit)?),
                    },
                    update: JsExpr::Update { op: update, target: Box::new(JsExpr::ident(binding.as_str())) },
                    body: self.block(ctx, body)?,
                    binding,
                })
            }
        }
    }

    /// Statement block for `expr`. A top-level `Sequential` is spliced in place; one nested
    /// inside it is an internal error.
    pub fn block(&mut self, ctx: &Context<'_>, expr: &Expr) -> Result<Vec<JsStmt>, LowerError> {
        if let ExprKind::Sequential(items) = &expr.kind {
            return self.statements(ctx, items);
        }
        Ok(vec![self.stmt(ctx, expr)?])
    }

    pub fn statements(&mut self, ctx: &Context<'_>, exprs: &[Expr]) -> Result<Vec<JsStmt>, LowerError> {
        let mut out = Vec::with_capacity(exprs.len());
        for expr in exprs {
            out.push(self.stmt(ctx, expr)?);
        }
        Ok(out)
    }
}
