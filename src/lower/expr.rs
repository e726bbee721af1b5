use super::resolve::{property, require};
use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{Expr, ExprKind, Value};
use crate::js::JsExpr;
use crate::naming::sanitize_name;

impl Lowerer<'_> {
    /// Lower `expr` where a value is required.
    pub fn expr(&mut self, ctx: &Context<'_>, expr: &Expr) -> Result<JsExpr, LowerError> {
        match &expr.kind {
            ExprKind::Value(value) => self.value(ctx, value, expr),
            ExprKind::Apply { callee, args, is_constructor } => self.apply(ctx, callee, args, *is_constructor, expr),
            ExprKind::Get { target, key } => {
                let object = self.target_expr(ctx, target)?;
                self.access(ctx, object, key)
            }
            ExprKind::IfThenElse { guard, then_branch, else_branch } => Ok(JsExpr::Conditional {
                test: Box::new(self.expr(ctx, guard)?),
                consequent: Box::new(self.expr(ctx, then_branch)?),
                alternate: Box::new(self.expr(ctx, else_branch)?),
            }),
            ExprKind::Sequential(items) => Ok(JsExpr::Block(self.statements(ctx, items)?)),
            ExprKind::TryCatch { .. } => {
                let body = self.function_body(ctx, expr)?;
                Ok(JsExpr::iife(body.into_block()))
            }
            ExprKind::Loop(_) | ExprKind::Set { .. } | ExprKind::VarDeclaration { .. } => Err(LowerError::internal(
                format!("{} in expression position", expr.kind.describe()),
                expr.span,
            )),
        }
    }

    /// Like `expr`, but a type reference naming the current scope yields `None`.
    pub fn target_expr(&mut self, ctx: &Context<'_>, expr: &Expr) -> Result<Option<JsExpr>, LowerError> {
        if let ExprKind::Value(Value::TypeRef(entity)) = &expr.kind {
            return self.type_ref(ctx, entity, expr.span);
        }
        self.expr(ctx, expr).map(Some)
    }

    /// Property access on `object` through `key`.
    ///
    /// A string-literal key is a static property (bracketed when it is not an identifier);
    /// any other key is computed. Without an object the property stands alone.
    pub fn access(&mut self, ctx: &Context<'_>, object: Option<JsExpr>, key: &Expr) -> Result<JsExpr, LowerError> {
        if let ExprKind::Value(Value::String(name)) = &key.kind {
            return Ok(match object {
                Some(object) => property(object, name),
                None => JsExpr::Ident(sanitize_name(name)),
            });
        }
        let key = self.expr(ctx, key)?;
        Ok(match object {
            Some(object) => JsExpr::index(object, key),
            None => key,
        })
    }

    fn value(&mut self, ctx: &Context<'_>, value: &Value, expr: &Expr) -> Result<JsExpr, LowerError> {
        match value {
            Value::Null => Ok(JsExpr::Null),
            Value::Bool(b) => Ok(JsExpr::Bool(*b)),
            Value::Int(n) => Ok(JsExpr::Int(*n)),
            // JSON has no spelling for NaN or the infinities.
            Value::Float(n) if !n.is_finite() => {
                Err(LowerError::unsupported(format!("non-finite float literal {n}"), expr.span))
            }
            Value::Float(n) => Ok(JsExpr::Float(*n)),
            Value::String(s) => Ok(JsExpr::Str(s.clone())),
            Value::Regex { pattern, flags } => Ok(JsExpr::Regex { pattern: pattern.clone(), flags: flags.clone() }),
            Value::Identifier(name) => Ok(JsExpr::Ident(sanitize_name(name))),
            Value::This => Ok(JsExpr::This),
            Value::Super => Ok(JsExpr::Super),
            Value::ImportRef { path, member } => {
                let alias = JsExpr::Ident(self.imports.alias_for(path));
                Ok(match member {
                    Some(member) => property(alias, member),
                    None => alias,
                })
            }
            Value::Lambda(function) => Ok(self.function(ctx, function)?.into_arrow()),
            Value::ArrayConst(_) | Value::ObjectExpr(_) => Err(LowerError::unsupported(value.describe(), expr.span)),
            Value::TypeRef(entity) => {
                let resolved = self.type_ref(ctx, entity, expr.span)?;
                require(resolved, &format!("type reference '{}'", entity.full_name), expr.span)
            }
            Value::UnaryOp(_) | Value::BinaryOp(_) | Value::LogicalOp(_) => Err(LowerError::internal(
                format!("{} used as a value", value.describe()),
                expr.span,
            )),
        }
    }

    fn apply(
        &mut self,
        ctx: &Context<'_>,
        callee: &Expr,
        args: &[Expr],
        is_constructor: bool,
        expr: &Expr,
    ) -> Result<JsExpr, LowerError> {
        if let ExprKind::Value(op) = &callee.kind {
            match op {
                Value::UnaryOp(op) => {
                    let [operand] = args else {
                        return Err(arity_error("unary", 1, args.len(), expr));
                    };
                    return Ok(JsExpr::Unary { op: *op, operand: Box::new(self.expr(ctx, operand)?) });
                }
                Value::BinaryOp(op) => {
                    let [lhs, rhs] = args else {
                        return Err(arity_error("binary", 2, args.len(), expr));
                    };
                    let lhs = self.expr(ctx, lhs)?;
                    let rhs = self.expr(ctx, rhs)?;
                    return Ok(JsExpr::Binary { op: *op, lhs: Box::new(lhs), rhs: Box::new(rhs) });
                }
                Value::LogicalOp(_) => return Err(LowerError::unsupported("logical operator", expr.span)),
                Value::Null
                | Value::Bool(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::String(_)
                | Value::Regex { .. }
                | Value::Identifier(_)
                | Value::This
                | Value::Super
                | Value::ImportRef { .. }
                | Value::Lambda(_)
                | Value::ArrayConst(_)
                | Value::ObjectExpr(_)
                | Value::TypeRef(_) => {}
            }
        }

        let callee = self.expr(ctx, callee)?;
        let args = args.iter().map(|arg| self.expr(ctx, arg)).collect::<Result<Vec<_>, _>>()?;
        Ok(if is_constructor {
            JsExpr::New { callee: Box::new(callee), args }
        } else {
            JsExpr::call(callee, args)
        })
    }
}

fn arity_error(kind: &str, expected: usize, found: usize, expr: &Expr) -> LowerError {
    LowerError::internal(
        format!("{kind} operator applied to {found} argument(s), expected {expected}"),
        expr.span,
    )
}
