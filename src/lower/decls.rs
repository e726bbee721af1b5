use std::collections::HashSet;

use super::func::FunctionBody;
use super::resolve::{property, require};
use super::{Context, Lowerer};
use crate::diagnostics::LowerError;
use crate::ir::{Declaration, EntityDeclaration, EntityKind, Expr, ExprKind, MemberDeclaration, MemberKind};
use crate::js::{ArrowBody, JsClass, JsClassMember, JsExpr, JsStmt, MethodKind, VarKind};
use crate::naming::{sanitize, sanitize_name};

impl Lowerer<'_> {
    /// Flatten `decls` into statements. With a namespace in scope public bindings are also
    /// attached to it and the list ends by returning it.
    ///
    /// Member and entity bindings get distinct local names within the scope. They avoid the
    /// namespace parameter and any `let` the body's actions declare.
    pub fn declarations<'c>(
        &mut self,
        ctx: &Context<'c>,
        decls: &'c [Declaration],
        namespace: Option<&str>,
    ) -> Result<Vec<JsStmt>, LowerError> {
        let mut out = Vec::new();
        let mut bound = HashSet::new();
        for decl in decls {
            if let Declaration::Action(expr) = decl {
                action_bindings(expr, &mut bound);
            }
        }
        bound.extend(namespace.map(str::to_string));
        for decl in decls {
            if let Some(stmt) = self.rewrite_test(ctx, decl)? {
                out.push(stmt);
                continue;
            }
            match decl {
                Declaration::Action(expr) => out.extend(self.block(ctx, expr)?),
                Declaration::Member(member) => {
                    let value = self.module_member(ctx, member)?;
                    bind(&mut out, &mut bound, &member.name, value, member.is_public, namespace);
                }
                Declaration::Entity(entity) => {
                    let value = self.entity(ctx, entity)?;
                    bind(&mut out, &mut bound, &entity.entity.name, value, entity.entity.is_public, namespace);
                }
            }
        }
        if let Some(ns) = namespace {
            out.push(JsStmt::ret(JsExpr::ident(ns)));
        }
        Ok(out)
    }

    /// `((ns) => { ...decls; return ns; })({})`, with `ctx` already naming the module.
    pub fn module_closure<'c>(
        &mut self,
        ctx: &Context<'c>,
        name: &str,
        decls: &'c [Declaration],
    ) -> Result<JsExpr, LowerError> {
        let taken = binding_names(decls);
        let ns = sanitize(name, |candidate| taken.contains(candidate));
        let body = self.declarations(ctx, decls, Some(&ns))?;
        Ok(JsExpr::call(
            JsExpr::arrow(vec![ns], ArrowBody::Block(body)),
            vec![JsExpr::Object(Vec::new())],
        ))
    }

    fn module_member(&mut self, ctx: &Context<'_>, member: &MemberDeclaration) -> Result<JsExpr, LowerError> {
        match member.kind {
            MemberKind::Getter => {
                if !member.function.params.is_empty() {
                    return Err(LowerError::internal(
                        format!("module-level getter '{}' takes parameters", member.name),
                        member.span,
                    ));
                }
                // Module values are evaluated once, at binding time.
                Ok(match self.function_body(ctx, &member.function.body)? {
                    FunctionBody::Expr(expr) => expr,
                    FunctionBody::Block(stmts) => JsExpr::iife(stmts),
                })
            }
            MemberKind::Method => {
                let function = self.function(ctx, &member.function)?;
                Ok(function.into_function(Some(sanitize_name(&member.name))))
            }
            MemberKind::Constructor | MemberKind::Setter => Err(LowerError::internal(
                format!("{} '{}' at module level", member.kind.describe(), member.name),
                member.span,
            )),
        }
    }

    fn entity<'c>(&mut self, ctx: &Context<'c>, decl: &'c EntityDeclaration) -> Result<JsExpr, LowerError> {
        let entity = &decl.entity;
        if entity.has_decorator(&self.config.markers.erase) {
            return Err(LowerError::internal(
                format!("erased entity '{}' has no runtime declaration", entity.full_name),
                decl.span,
            ));
        }
        match &entity.kind {
            EntityKind::Module => {
                let inner = ctx.nested(&entity.full_name);
                self.module_closure(&inner, &entity.name, &decl.declarations)
            }
            EntityKind::Class { .. } | EntityKind::Record | EntityKind::Union => self.class(ctx, decl),
            EntityKind::Interface => Err(LowerError::internal(
                format!("interface '{}' has no runtime declaration", entity.full_name),
                decl.span,
            )),
        }
    }

    fn class(&mut self, ctx: &Context<'_>, decl: &EntityDeclaration) -> Result<JsExpr, LowerError> {
        let entity = &decl.entity;
        let extends = match &entity.kind {
            EntityKind::Class { base: Some(base) } => {
                let resolved = self.type_ref(ctx, base, decl.span)?;
                Some(require(resolved, &format!("base class '{}'", base.full_name), decl.span)?)
            }
            EntityKind::Class { base: None } | EntityKind::Record | EntityKind::Union => None,
            EntityKind::Module | EntityKind::Interface => {
                return Err(LowerError::internal(
                    format!("'{}' lowered as a class", entity.full_name),
                    decl.span,
                ));
            }
        };

        let mut members = Vec::with_capacity(decl.declarations.len());
        for nested in &decl.declarations {
            match nested {
                Declaration::Member(member) => {
                    if member.has_decorator(&self.config.markers.test_case) {
                        return Err(LowerError::unsupported(
                            format!("test case marker on class member '{}.{}'", entity.name, member.name),
                            member.span,
                        ));
                    }
                    members.push(self.class_member(ctx, member)?);
                }
                Declaration::Entity(inner) => {
                    return Err(LowerError::internal(
                        format!("entity '{}' declared inside class '{}'", inner.entity.full_name, entity.full_name),
                        inner.span,
                    ));
                }
                Declaration::Action(expr) => {
                    return Err(LowerError::internal(
                        format!("{} inside class '{}'", expr.kind.describe(), entity.full_name),
                        expr.span,
                    ));
                }
            }
        }

        Ok(JsExpr::Class(Box::new(JsClass {
            name: Some(sanitize_name(&entity.name)),
            extends,
            members,
        })))
    }

    fn class_member(&mut self, ctx: &Context<'_>, member: &MemberDeclaration) -> Result<JsClassMember, LowerError> {
        let kind = match member.kind {
            MemberKind::Constructor => MethodKind::Constructor,
            MemberKind::Method => MethodKind::Method,
            MemberKind::Getter => MethodKind::Getter,
            MemberKind::Setter => MethodKind::Setter,
        };
        let key = match member.kind {
            MemberKind::Constructor => "constructor".to_string(),
            MemberKind::Method | MemberKind::Getter | MemberKind::Setter => member.name.clone(),
        };
        let function = self.function(ctx, &member.function)?;
        Ok(JsClassMember {
            kind,
            key,
            is_static: member.is_static,
            params: function.params,
            body: function.body.into_block(),
            is_generator: function.is_generator,
            is_async: function.is_async,
        })
    }
}

/// `const name = value;` plus `ns.name = name;` for public bindings under a namespace.
/// The property key keeps the original name; the local one is unique within `bound`.
fn bind(
    out: &mut Vec<JsStmt>,
    bound: &mut HashSet<String>,
    name: &str,
    value: JsExpr,
    is_public: bool,
    namespace: Option<&str>,
) {
    let local = sanitize(name, |candidate| bound.contains(candidate));
    bound.insert(local.clone());
    out.push(JsStmt::var(VarKind::Const, local.as_str(), value));
    if let (true, Some(ns)) = (is_public, namespace) {
        out.push(JsStmt::Expr(JsExpr::assign(property(JsExpr::ident(ns), name), JsExpr::Ident(local))));
    }
}

/// Local names a module body binds directly; the namespace parameter must avoid them.
fn binding_names(decls: &[Declaration]) -> HashSet<String> {
    let mut names = HashSet::new();
    for decl in decls {
        match decl {
            Declaration::Member(member) => {
                names.insert(sanitize_name(&member.name));
            }
            Declaration::Entity(entity) => {
                names.insert(sanitize_name(&entity.entity.name));
            }
            Declaration::Action(expr) => action_bindings(expr, &mut names),
        }
    }
    names
}

/// `let` names an action introduces into the enclosing scope, including those of a spliced
/// `Sequential`.
fn action_bindings(expr: &Expr, names: &mut HashSet<String>) {
    let items = if let ExprKind::Sequential(items) = &expr.kind {
        items.as_slice()
    } else {
        std::slice::from_ref(expr)
    };
    for item in items {
        if let ExprKind::VarDeclaration { binding, .. } = &item.kind {
            names.insert(sanitize_name(binding));
        }
    }
}
