//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.tdev/config.toml` (user)
//! 3. `/etc/tdev/config.toml` (system)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::TorchSettings;
use crate::{DeviceError, Result};

/// Trainer configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub torch_settings: TorchSettings,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.tdev/config.toml`
    /// 3. `/etc/tdev/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_from_file(&path)
    }

    /// Like [`load`](Self::load), but a missing implicit config yields the
    /// default configuration. An explicit path must still exist.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        if explicit_path.is_some() {
            return Self::load(explicit_path);
        }
        match Self::implicit_config_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DeviceError::Configuration(format!("Failed to parse config: {e}")))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DeviceError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        tracing::debug!(?path, "loading config");
        toml::from_str(&content).map_err(|e| {
            DeviceError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(DeviceError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        Self::implicit_config_path().ok_or_else(|| {
            DeviceError::Configuration(
                "No config file found. Create ~/.tdev/config.toml or /etc/tdev/config.toml"
                    .to_string(),
            )
        })
    }

    fn implicit_config_path() -> Option<PathBuf> {
        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".tdev").join("config.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/tdev/config.toml");
        system_config.exists().then_some(system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_device() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.torch_settings, TorchSettings::default());
    }

    #[test]
    fn parse_torch_settings() {
        let toml = r#"
            [torch_settings]
            device = "cuda:42"
            num_threads = 2
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.torch_settings.device.as_deref(), Some("cuda:42"));
        assert_eq!(config.torch_settings.num_threads, Some(2));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn malformed_toml_is_configuration_error() {
        let result = Config::from_toml_str("[torch_settings]\nnum_threads = \"many\"");
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }
}
