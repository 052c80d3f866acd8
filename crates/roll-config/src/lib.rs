//! # roll-config
//!
//! Layered configuration loading for Rollcall using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROLLCALL_*` prefix, `__` as separator)
//! 2. Project-level `.rollcall/config.toml`
//! 3. User-level `~/.config/rollcall/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROLLCALL_DATABASE__PATH` -> `database.path`,
//! `ROLLCALL_GENERAL__DEFAULT_ACTOR` -> `general.default_actor`, etc.
//! The `__` (double underscore) separates nested config sections.

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RollConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RollConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// This is the typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".rollcall/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ROLLCALL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rollcall").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = RollConfig::default();
        assert_eq!(config.database.path, ".rollcall/rollcall.db");
        assert_eq!(config.general.default_limit, 50);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: RollConfig = RollConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_actor, "admin");
    }

    #[test]
    fn env_overrides_default_path() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROLLCALL_DATABASE__PATH", "/tmp/other.db");
            let config: RollConfig = RollConfig::figment().extract()?;
            assert_eq!(config.database.path, "/tmp/other.db");
            Ok(())
        });
    }
}
