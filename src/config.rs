//! Launcher configuration.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults (the public bonding-curve deployment)
//! 2. `<home>/config.json`
//! 3. `PUMP_STEAMM_*` environment variables
//! 4. Command-line flags
//!
//! Home is `--home`, else `PUMP_STEAMM_HOME`, else `~/.pump-steamm`.

use anyhow::{Context, Result};
use pump_steamm_core::requests::DEFAULT_BIND_GAS_BUDGET;
use pump_steamm_types::env_utils::{env_string, env_var};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PACKAGE_ID: &str =
    "0xdd718c698ebfb995e2ca740fd5c9ac625fe748b0a5e1e76db3ee629641688881";
pub const DEFAULT_REGISTRY_ID: &str =
    "0x7cd97809c61e369a592901d0b1c34520342e55325742420beae271d031c193f6";

pub const ENV_HOME: &str = "PUMP_STEAMM_HOME";
pub const ENV_PACKAGE_ID: &str = "PUMP_STEAMM_PACKAGE_ID";
pub const ENV_REGISTRY_ID: &str = "PUMP_STEAMM_REGISTRY_ID";
pub const ENV_LOG_LEVEL: &str = "PUMP_STEAMM_LOG_LEVEL";
pub const ENV_BIND_GAS_BUDGET: &str = "PUMP_STEAMM_BIND_GAS_BUDGET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package that hosts the `bonding_curve` module.
    pub package_id: String,
    /// Shared registry object passed to the bind call.
    pub registry_id: String,
    pub log_level: String,
    pub bind_gas_budget: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            registry_id: DEFAULT_REGISTRY_ID.to_string(),
            log_level: "info".to_string(),
            bind_gas_budget: DEFAULT_BIND_GAS_BUDGET,
        }
    }
}

/// Resolve the home directory.
pub fn home_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env_string(ENV_HOME).map(PathBuf::from).unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pump-steamm")
    })
}

impl Config {
    /// Defaults, then the config file in `home`, then the environment.
    pub fn load(home: &Path) -> Result<Self> {
        let mut config = Self::from_file(&home.join(CONFIG_FILE))?.unwrap_or_default();
        config.apply_env();
        Ok(config)
    }

    /// `None` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn apply_env(&mut self) {
        if let Some(v) = env_string(ENV_PACKAGE_ID) {
            self.package_id = v;
        }
        if let Some(v) = env_string(ENV_REGISTRY_ID) {
            self.registry_id = v;
        }
        if let Some(v) = env_string(ENV_LOG_LEVEL) {
            self.log_level = v;
        }
        if let Some(v) = env_var(ENV_BIND_GAS_BUDGET) {
            self.bind_gas_budget = v;
        }
    }

    pub fn with_overrides(
        mut self,
        package_id: Option<String>,
        registry_id: Option<String>,
    ) -> Self {
        if let Some(v) = package_id {
            self.package_id = v;
        }
        if let Some(v) = registry_id {
            self.registry_id = v;
        }
        self
    }

    /// Write this config to `<home>/config.json`.
    pub fn save(&self, home: &Path) -> Result<PathBuf> {
        fs::create_dir_all(home)
            .with_context(|| format!("Failed to create {}", home.display()))?;
        let path = home.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::from_file(&temp.path().join(CONFIG_FILE)).unwrap();
        assert!(config.is_none());
        assert_eq!(Config::default().bind_gas_budget, 100_000_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            r#"{ "package_id": "0xabc" }"#,
        )
        .unwrap();
        let config = Config::from_file(&temp.path().join(CONFIG_FILE))
            .unwrap()
            .unwrap();
        assert_eq!(config.package_id, "0xabc");
        assert_eq!(config.registry_id, DEFAULT_REGISTRY_ID);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "{ nope").unwrap();
        let err = Config::from_file(&temp.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_save_then_load_from_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::default().with_overrides(Some("0x42".into()), None);
        let path = config.save(&temp.path().join("home")).unwrap();
        let loaded = Config::from_file(&path).unwrap().unwrap();
        assert_eq!(loaded.package_id, "0x42");
    }

    #[test]
    fn test_explicit_home_wins() {
        let home = home_dir(Some(Path::new("/tmp/steamm-home")));
        assert_eq!(home, PathBuf::from("/tmp/steamm-home"));
    }
}
