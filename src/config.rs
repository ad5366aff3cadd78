use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DIAGNOSTIC_LIMIT: usize = 256;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Front-end settings, usually read from an `extodan.toml`:
///
/// ```toml
/// [diagnostics]
/// limit = 32
/// filename = "main.ext"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Most diagnostics a parser keeps. Recovery continues past the limit.
    pub limit: usize,
    pub filename: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_DIAGNOSTIC_LIMIT,
            filename: "<input>".to_string(),
        }
    }
}

impl FrontendConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
