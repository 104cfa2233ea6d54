use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub profile_path: Option<PathBuf>,
    pub theme: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            gemini_api_key: None,
            profile_path: None,
            theme: None,
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Credential lookup: environment first, config file second. A
    /// missing key is not an error here; requests made without one
    /// fail into the assistant's generic apology path.
    pub fn api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.gemini_api_key.clone())
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("folio.log"))
    }

    fn config_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("could not determine config directory"))?;
        Ok(config_dir.join("folio"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            gemini_api_key: Some("abc123".to_string()),
            profile_path: Some(PathBuf::from("/tmp/profile.json")),
            theme: Some("paper".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.gemini_api_key.as_deref(), Some("abc123"));
        assert_eq!(parsed.theme.as_deref(), Some("paper"));
    }

    #[test]
    fn api_key_falls_back_to_config_value() {
        // Only exercised when the env var is absent from the test
        // environment, since std::env is process-global.
        if std::env::var("GEMINI_API_KEY").is_err() {
            let mut config = Config::new();
            assert!(config.api_key().is_none());
            config.gemini_api_key = Some("from-config".to_string());
            assert_eq!(config.api_key().as_deref(), Some("from-config"));
        }
    }
}
