//! IR → output-tree lowering.
//!
//! One `Lowerer` lowers one file. Transforms are methods on it, split by concern:
//! - `resolve`: entity references and the name-path `diff`
//! - `expr` / `stmt`: expression-position and statement-position lowering
//! - `func`: parameter lists and body shape selection
//! - `decls`: module, member and class flattening
//! - `testing`: test case / test fixture rewriting
//!
//! The import table is the only mutable state and lives on the `Lowerer`; everything
//! else flows down through an immutable `Context`.

pub mod decls;
pub mod expr;
pub mod func;
pub mod imports;
pub mod resolve;
pub mod stmt;
pub mod testing;

use crate::config::LowerConfig;
use crate::diagnostics::LowerError;
use crate::ir::{Declaration, EntityKind, Project, SourceFile};
use crate::js::{JsStmt, Program};
use crate::span::Span;

use imports::ImportTable;

/// Where the walk currently is: which file, and which module names are relative to.
#[derive(Debug, Clone, Copy)]
pub struct Context<'c> {
    pub file: &'c SourceFile,
    pub module_full_name: &'c str,
}

impl<'c> Context<'c> {
    pub fn root(file: &'c SourceFile) -> Self {
        Self { file, module_full_name: &file.root.full_name }
    }

    /// Same file, names now relative to `module_full_name`.
    pub fn nested(&self, module_full_name: &'c str) -> Self {
        Self { file: self.file, module_full_name }
    }
}

pub struct Lowerer<'a> {
    project: &'a Project,
    config: &'a LowerConfig,
    imports: ImportTable,
}

impl<'a> Lowerer<'a> {
    pub fn new(project: &'a Project, config: &'a LowerConfig) -> Self {
        Self { project, config, imports: ImportTable::new() }
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// Freeze the import table into import declarations.
    pub fn finish(self) -> Vec<JsStmt> {
        self.imports.into_declarations()
    }

    /// The file's top-level statement: its exported namespace, or one test group.
    pub fn root(&mut self, ctx: &Context<'_>) -> Result<JsStmt, LowerError> {
        let root = &ctx.file.root;
        if root.has_decorator(&self.config.markers.test_fixture) {
            let body = self.declarations(ctx, &ctx.file.declarations, None)?;
            return Ok(JsStmt::Expr(self.group_registration(&root.name, body)));
        }
        if !matches!(root.kind, EntityKind::Module) {
            return Err(LowerError::internal(
                format!("root entity '{}' of '{}' is not a module", root.full_name, ctx.file.path),
                None,
            ));
        }
        let namespace = self.module_closure(ctx, &root.name, &ctx.file.declarations)?;
        Ok(JsStmt::ExportDefault(namespace))
    }
}

/// Lower one file. Nothing is returned for a file that fails.
pub fn lower_file(project: &Project, file: &SourceFile, config: &LowerConfig) -> Result<Program, LowerError> {
    let mut lowerer = Lowerer::new(project, config);
    let ctx = Context::root(file);
    let body = lowerer.root(&ctx)?;

    let mut statements = lowerer.finish();
    statements.push(body);
    Ok(Program {
        statements,
        span: Span::combine(file.declarations.iter().map(Declaration::span)),
    })
}

/// Lower every file independently; one file failing does not affect the others.
pub fn lower_project(project: &Project, config: &LowerConfig) -> Vec<(String, Result<Program, LowerError>)> {
    project
        .files
        .iter()
        .map(|file| (file.path.clone(), lower_file(project, file, config)))
        .collect()
}
