use serde::Deserialize;

use super::expr::{EntityRef, Expr, Function};
use crate::span::Span;

/// A decorator attached to a member or entity. Lowering matches on `name` only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Decorator {
    pub name: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl Decorator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum EntityKind {
    Module,
    Class {
        #[serde(default)]
        base: Option<EntityRef>,
    },
    Record,
    Union,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    pub full_name: String,
    pub name: String,
    /// Identity of the file that declares this entity.
    pub file: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MemberKind {
    Constructor,
    Method,
    Getter,
    Setter,
}

impl MemberKind {
    pub fn describe(self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Method => "method",
            MemberKind::Getter => "getter",
            MemberKind::Setter => "setter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberDeclaration {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
    pub function: Function,
    #[serde(default)]
    pub span: Option<Span>,
}

impl MemberDeclaration {
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityDeclaration {
    pub entity: Entity,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Declaration {
    /// Expression evaluated for its effect.
    Action(Expr),
    Member(MemberDeclaration),
    Entity(EntityDeclaration),
}

impl Declaration {
    pub fn span(&self) -> Option<Span> {
        match self {
            Declaration::Action(expr) => expr.span,
            Declaration::Member(m) => m.span,
            Declaration::Entity(e) => e.span,
        }
    }
}

// ---- Constructors ----

impl MemberDeclaration {
    pub fn method(name: impl Into<String>, function: Function) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            is_static: false,
            is_public: false,
            decorators: Vec::new(),
            function,
            span: None,
        }
    }

    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn decorated(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(Decorator::new(name));
        self
    }
}

impl Entity {
    pub fn new(full_name: impl Into<String>, file: impl Into<String>, kind: EntityKind) -> Self {
        let full_name = full_name.into();
        let name = full_name.rsplit('.').next().unwrap_or_default().to_string();
        Self {
            full_name,
            name,
            file: file.into(),
            is_public: false,
            decorators: Vec::new(),
            kind,
        }
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn decorated(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(Decorator::new(name));
        self
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef {
            full_name: self.full_name.clone(),
            file: Some(self.file.clone()),
            decorators: self.decorators.clone(),
        }
    }
}

impl EntityDeclaration {
    pub fn new(entity: Entity, declarations: Vec<Declaration>) -> Self {
        Self { entity, declarations, span: None }
    }
}
