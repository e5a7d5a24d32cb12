//! Configuration: which spreadsheet to talk to and how to authorize
//!
//! Read from `<config_dir>/iptv-cli/config.toml`, then overridden by
//! `IPTV_SPREADSHEET`, `IPTV_WORKSHEET` and `IPTV_CREDENTIALS`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_SPREADSHEET: &str = "IPTV";
const DEFAULT_WORKSHEET: &str = "Klientet";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the spreadsheet document, resolved through Drive
    pub spreadsheet: String,
    /// Worksheet tab holding the client table
    pub worksheet: String,
    /// Path to the service-account JSON key file
    pub credentials: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet: DEFAULT_SPREADSHEET.to_string(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            credentials: None,
        }
    }
}

impl Config {
    /// Load the config file (missing file means defaults), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(spreadsheet) = std::env::var("IPTV_SPREADSHEET") {
            self.spreadsheet = spreadsheet;
        }
        if let Ok(worksheet) = std::env::var("IPTV_WORKSHEET") {
            self.worksheet = worksheet;
        }
        if let Ok(credentials) = std::env::var("IPTV_CREDENTIALS") {
            self.credentials = Some(PathBuf::from(credentials));
        }
    }

    /// The credential path is required as soon as a store is constructed
    pub fn credentials_path(&self) -> Result<PathBuf> {
        self.credentials.clone().context(
            "No service-account credentials configured. \
             Set IPTV_CREDENTIALS or add `credentials` to config.toml",
        )
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("iptv-cli").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.spreadsheet, "IPTV");
        assert_eq!(config.worksheet, "Klientet");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_parses_partial_toml() {
        let config: Config = toml::from_str("worksheet = \"Clients\"").unwrap();
        assert_eq!(config.spreadsheet, "IPTV");
        assert_eq!(config.worksheet, "Clients");
    }

    #[test]
    fn test_parses_full_toml() {
        let config: Config = toml::from_str(
            r#"
            spreadsheet = "Billing"
            worksheet = "Clients"
            credentials = "/etc/iptv/service-account.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.spreadsheet, "Billing");
        assert_eq!(
            config.credentials.as_deref(),
            Some(Path::new("/etc/iptv/service-account.json"))
        );
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        assert!(Config::default().credentials_path().is_err());
    }
}
