use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{EntityRef, ExternalBinding};
use crate::js::JsExpr;
use crate::naming::{is_valid_identifier, sanitize_name};
use crate::span::Span;

fn segments(name: &str) -> Vec<&str> {
    if name.is_empty() {
        Vec::new()
    } else {
        name.split('.').collect()
    }
}

/// Segments of `full_name` left after dropping the leading segments it shares with `base`.
///
/// `diff("A.B", "A.B.C.D") == ["C", "D"]`, `diff("A.B", "X.Y") == ["X", "Y"]`.
pub fn diff(base: &str, full_name: &str) -> Vec<String> {
    let base = segments(base);
    let full = segments(full_name);
    let common = base.iter().zip(&full).take_while(|(a, b)| a == b).count();
    full[common..].iter().map(|s| s.to_string()).collect()
}

/// `object.key`, or `object["key"]` when `key` is not a bare identifier.
pub fn property(object: JsExpr, key: &str) -> JsExpr {
    if is_valid_identifier(key) {
        JsExpr::member(object, key)
    } else {
        JsExpr::index(object, JsExpr::string(key))
    }
}

/// Property chain over `segments` starting at `base`. Without a base the first segment
/// is a bare identifier; with neither a base nor segments there is no expression.
pub fn member_chain(base: Option<JsExpr>, segments: &[String]) -> Option<JsExpr> {
    segments.iter().fold(base, |acc, segment| {
        Some(match acc {
            Some(object) => property(object, segment),
            None => JsExpr::Ident(sanitize_name(segment)),
        })
    })
}

/// Parent namespace of a fully-qualified name (`"A.B.C"` → `"A.B"`, `"A"` → `""`).
pub fn parent_namespace(full_name: &str) -> &str {
    full_name.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("")
}

/// Turn a possibly-empty resolution into an expression, failing if it was empty.
pub fn require(expr: Option<JsExpr>, what: &str, span: Option<Span>) -> Result<JsExpr, LowerError> {
    expr.ok_or_else(|| {
        LowerError::internal(format!("{what} resolved to no expression"), span)
    })
}

impl Lowerer<'_> {
    /// Expression reaching the entity `full_name` declared in `file`.
    ///
    /// `Ok(None)` means the name is the current scope itself and has no expression.
    pub fn resolve_entity(
        &mut self,
        ctx: &Context<'_>,
        full_name: &str,
        file: Option<&str>,
        span: Option<Span>,
    ) -> Result<Option<JsExpr>, LowerError> {
        let Some(file_id) = file else {
            return Err(LowerError::internal(
                format!("cannot resolve '{full_name}': reference has no declaring file"),
                span,
            ));
        };
        let project = self.project;
        let same_file = file_id == ctx.file.path;
        let declaring = if same_file {
            ctx.file
        } else {
            project.file(file_id).ok_or_else(|| LowerError::unresolved(full_name, span))?
        };

        match declaring.external_binding(full_name) {
            Some(ExternalBinding::ImportModule { prefix, path }) => {
                let alias = self.imports.alias_for(path);
                Ok(member_chain(Some(JsExpr::Ident(alias)), &diff(prefix, full_name)))
            }
            Some(ExternalBinding::GlobalModule { prefix }) => Ok(member_chain(None, &diff(prefix, full_name))),
            None if !same_file => {
                let alias = self.imports.alias_for(&declaring.path);
                Ok(member_chain(
                    Some(JsExpr::Ident(alias)),
                    &diff(declaring.root_namespace(), full_name),
                ))
            }
            None => Ok(member_chain(None, &diff(ctx.module_full_name, full_name))),
        }
    }

    /// Lower a type reference. Erased entities are reached through their parent namespace.
    pub fn type_ref(
        &mut self,
        ctx: &Context<'_>,
        entity: &EntityRef,
        span: Option<Span>,
    ) -> Result<Option<JsExpr>, LowerError> {
        let full_name = if entity.has_decorator(&self.config.markers.erase) {
            parent_namespace(&entity.full_name)
        } else {
            entity.full_name.as_str()
        };
        self.resolve_entity(ctx, full_name, entity.file.as_deref(), span)
    }
}
