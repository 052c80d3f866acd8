//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

fn default_actor() -> String {
    "admin".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/audit commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Actor recorded as `performed_by` when the CLI is run without
    /// an explicit `--actor`.
    #[serde(default = "default_actor")]
    pub default_actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_actor: default_actor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.default_actor, "admin");
    }
}
