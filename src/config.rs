use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::LowerError;

pub const CONFIG_FILE_NAME: &str = "esgen.toml";

/// Decorator names the front end uses to flag special declarations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Markers {
    /// Method is a single test case.
    pub test_case: String,
    /// Entity is a group of tests.
    pub test_fixture: String,
    /// Entity has no runtime identity of its own.
    pub erase: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            test_case: "TestCase".to_string(),
            test_fixture: "TestFixture".to_string(),
            erase: "Erase".to_string(),
        }
    }
}

/// Global functions test declarations are rewritten into calls of.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TestRuntime {
    pub case_fn: String,
    pub group_fn: String,
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self {
            case_fn: "it".to_string(),
            group_fn: "describe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LowerConfig {
    pub markers: Markers,
    pub test_runtime: TestRuntime,
}

impl LowerConfig {
    /// Parse config text; `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> Result<Self, LowerError> {
        let config: LowerConfig = toml::from_str(text)
            .map_err(|e| LowerError::config(format!("invalid config: {e}"), path.to_path_buf()))?;
        config.validate(path)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, LowerError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LowerError::config(format!("could not read config: {e}"), path.to_path_buf())
        })?;
        Self::parse(&text, path)
    }

    /// Load `esgen.toml` from `dir` if present, defaults otherwise.
    pub fn find(dir: &Path) -> Result<Self, LowerError> {
        let path: PathBuf = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self, path: &Path) -> Result<(), LowerError> {
        let names = [
            ("markers.test-case", &self.markers.test_case),
            ("markers.test-fixture", &self.markers.test_fixture),
            ("markers.erase", &self.markers.erase),
            ("test-runtime.case-fn", &self.test_runtime.case_fn),
            ("test-runtime.group-fn", &self.test_runtime.group_fn),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(LowerError::config(format!("'{key}' must not be empty"), path.to_path_buf()));
            }
        }
        Ok(())
    }
}
