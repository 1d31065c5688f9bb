use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::CycleLimits;
use crate::error::{CppGraphError, Result};

pub const CONFIG_FILE_NAME: &str = "cppgraph.toml";

/// Settings for one analysis run, optionally read from `cppgraph.toml`.
///
/// ```toml
/// exclude_dirs = ["build", "third_party"]
/// extensions = ["cpp", "h"]
/// top_coupled = 5
///
/// [cycles]
/// max_cycles = 1000
/// max_cycle_length = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names skipped anywhere below the root.
    pub exclude_dirs: Vec<String>,
    /// File extensions (without the dot) treated as C++ sources.
    pub extensions: Vec<String>,
    pub cycles: CycleLimits,
    pub top_coupled: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: ["build", "cmake-build", ".git", "node_modules"]
                .map(String::from)
                .to_vec(),
            extensions: ["cpp", "cc", "cxx", "c", "h", "hpp", "hh"]
                .map(String::from)
                .to_vec(),
            cycles: CycleLimits::default(),
            top_coupled: 10,
        }
    }
}

impl AnalysisConfig {
    /// Load `cppgraph.toml` from `root`, falling back to defaults when it is
    /// missing or unusable.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Self::default();
        }

        match Self::from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Load an explicitly named file. Errors are returned, not swallowed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CppGraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|err| CppGraphError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
