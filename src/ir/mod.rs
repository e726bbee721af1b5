//! Typed, resolved input IR handed over by the front end.

pub mod decl;
pub mod expr;

pub use decl::*;
pub use expr::*;

use serde::Deserialize;

use crate::diagnostics::LowerError;

/// How a declaring file binds a namespace prefix to something outside the project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ExternalBinding {
    /// Names under `prefix` live in the module at `path` (default export).
    ImportModule { prefix: String, path: String },
    /// Names under `prefix` are ambient globals.
    GlobalModule { prefix: String },
}

impl ExternalBinding {
    pub fn prefix(&self) -> &str {
        match self {
            ExternalBinding::ImportModule { prefix, .. } | ExternalBinding::GlobalModule { prefix } => prefix,
        }
    }
}

/// One source file as produced by the front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceFile {
    /// File identity; also the import specifier other files use to reach it.
    pub path: String,
    pub root: Entity,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub external_bindings: Vec<ExternalBinding>,
    /// Original source text, used only for rendering diagnostics.
    #[serde(default)]
    pub source: Option<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, root: Entity, declarations: Vec<Declaration>) -> Self {
        Self {
            path: path.into(),
            root,
            declarations,
            external_bindings: Vec::new(),
            source: None,
        }
    }

    pub fn with_binding(mut self, binding: ExternalBinding) -> Self {
        self.external_bindings.push(binding);
        self
    }

    /// Fully-qualified name every declaration of this file lives under.
    pub fn root_namespace(&self) -> &str {
        &self.root.full_name
    }

    /// The binding whose prefix is `full_name` itself or the longest namespace prefix of it.
    pub fn external_binding(&self, full_name: &str) -> Option<&ExternalBinding> {
        self.external_bindings
            .iter()
            .filter(|b| is_namespace_prefix(b.prefix(), full_name))
            .max_by_key(|b| b.prefix().len())
    }
}

fn is_namespace_prefix(prefix: &str, full_name: &str) -> bool {
    match full_name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Read-only store of every file in a compilation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    pub files: Vec<SourceFile>,
}

impl Project {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    pub fn from_json(json: &str) -> Result<Self, LowerError> {
        serde_json::from_str(json).map_err(|e| LowerError::input(format!("invalid IR document: {e}")))
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }
}
