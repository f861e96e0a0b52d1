//! CLI configuration.
//!
//! A small TOML file controlling which modules run and how much of the
//! report gets printed. Every field is optional; an empty file is a valid
//! config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use vantage_types::Severity;

use crate::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Suggestions below this severity are not printed (text output only;
    /// JSON output always carries the full report).
    pub min_severity: Option<Severity>,
    /// Module names to drop from the default roster.
    pub disabled_modules: Vec<String>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text)
            .map_err(|err| CliError::Parse { path: path.to_path_buf(), message: err.to_string() })
    }
}
