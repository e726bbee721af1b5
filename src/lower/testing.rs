//! Rewriting of marked declarations into test-registration calls.
//!
//! A method carrying the test-case marker becomes `it("name", () => body)`; an entity
//! carrying the test-fixture marker becomes `describe("name", () => { ... })` whose
//! body is the entity's declarations flattened without a namespace object.

use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{Declaration, MemberKind};
use crate::js::{ArrowBody, JsExpr, JsStmt};

impl Lowerer<'_> {
    /// The registration statement for `decl`, or `None` if it is not a test declaration.
    pub fn rewrite_test<'c>(
        &mut self,
        ctx: &Context<'c>,
        decl: &'c Declaration,
    ) -> Result<Option<JsStmt>, LowerError> {
        let markers = &self.config.markers;
        match decl {
            Declaration::Member(member) if member.has_decorator(&markers.test_case) => {
                match member.kind {
                    MemberKind::Method => {}
                    MemberKind::Constructor | MemberKind::Getter | MemberKind::Setter => {
                        return Err(LowerError::unsupported(
                            format!("test case marker on {} '{}'", member.kind.describe(), member.name),
                            member.span,
                        ));
                    }
                }
                if !member.function.params.is_empty() {
                    return Err(LowerError::unsupported(
                        format!("test case '{}' takes parameters", member.name),
                        member.span,
                    ));
                }
                let body = self.function(ctx, &member.function)?.into_arrow();
                Ok(Some(JsStmt::Expr(self.registration(
                    &self.config.test_runtime.case_fn,
                    &member.name,
                    body,
                ))))
            }
            Declaration::Entity(entity) if entity.entity.has_decorator(&markers.test_fixture) => {
                let inner = ctx.nested(&entity.entity.full_name);
                let body = self.declarations(&inner, &entity.declarations, None)?;
                Ok(Some(JsStmt::Expr(self.group_registration(&entity.entity.name, body))))
            }
            Declaration::Member(_) | Declaration::Entity(_) | Declaration::Action(_) => Ok(None),
        }
    }

    /// `describe("name", () => { body })`
    pub fn group_registration(&self, name: &str, body: Vec<JsStmt>) -> JsExpr {
        self.registration(
            &self.config.test_runtime.group_fn,
            name,
            JsExpr::arrow(Vec::new(), ArrowBody::Block(body)),
        )
    }

    fn registration(&self, function: &str, name: &str, callback: JsExpr) -> JsExpr {
        JsExpr::call(JsExpr::ident(function), vec![JsExpr::string(name), callback])
    }
}
