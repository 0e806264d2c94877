//! Conversion options.
//!
//! Options are read from a JSON object with camelCase keys; every key is
//! optional:
//!
//! ```json
//! { "name": "my-lib", "excludePrivate": true, "basePath": "/work/src" }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Options {
    /// Name of the project root reflection.
    pub name: String,
    /// Skip members declared `private`.
    pub exclude_private: bool,
    /// Skip members declared `protected`.
    pub exclude_protected: bool,
    /// Skip declarations from external sources instead of flagging them.
    pub exclude_externals: bool,
    /// Remove reflections that have no documentation comment.
    pub exclude_not_documented: bool,
    /// Prefix stripped from source file names.
    pub base_path: Option<String>,
    /// Indent JSON output.
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: "Documentation".to_string(),
            exclude_private: false,
            exclude_protected: false,
            exclude_externals: false,
            exclude_not_documented: false,
            base_path: None,
            pretty: true,
        }
    }
}

impl Options {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
