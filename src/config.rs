use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the study-aid backend. When absent the app runs in demo
    /// mode against a built-in sample dataset and uploads are disabled.
    pub backend_url: Option<String>,

    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_user_id() -> String {
    // The backend assumes a single implicit user.
    "default-user-id".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            user_id: default_user_id(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyhall")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_backend() {
        let config = Config::default();
        assert!(config.backend_url.is_none());
        assert_eq!(config.user_id, "default-user-id");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            backend_url: Some("http://localhost:8000".to_string()),
            user_id: "someone".to_string(),
            request_timeout_secs: 5,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(loaded.user_id, "someone");
        assert_eq!(loaded.request_timeout_secs, 5);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("backend_url = \"http://x\"").unwrap();
        assert_eq!(config.user_id, "default-user-id");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
