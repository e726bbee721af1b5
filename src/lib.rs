pub mod span;
pub mod diagnostics;
pub mod config;
pub mod naming;
pub mod ir;
pub mod js;
pub mod lower;

pub use config::LowerConfig;
pub use diagnostics::LowerError;
pub use lower::{lower_file, lower_project};

use std::path::Path;

/// Read a project document from disk and lower every file in it.
///
/// Reading or parsing the document is the only failure; per-file results are independent.
pub fn lower_path(
    path: &Path,
    config: &LowerConfig,
) -> Result<(ir::Project, Vec<(String, Result<js::Program, LowerError>)>), LowerError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LowerError::input(format!("could not read '{}': {e}", path.display())))?;
    let project = ir::Project::from_json(&text)?;
    let results = lower_project(&project, config);
    Ok((project, results))
}
