//! Database location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    ".rollcall/rollcall.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file, relative to the working directory
    /// unless absolute. `":memory:"` is accepted for ephemeral runs.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Resolved database path.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}
