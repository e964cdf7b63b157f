//! TOML-based application configuration.
//!
//! Holds the injected rosters (adult emails, kid names), the shared calendar
//! id, and the OAuth client credentials. The rosters are configuration, not
//! application state -- core functions take them as explicit parameters and
//! never read them ambiently.
//!
//! Stored at `~/.config/chaperone/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::event::Adult;

/// OAuth client credentials for the Google Calendar API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/chaperone/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Shared calendar to read events from and patch attendees on.
    #[serde(default)]
    pub calendar_id: String,
    /// Adult roster, in priority order. Matching is case-insensitive.
    #[serde(default)]
    pub adult_emails: Vec<String>,
    /// Child-name roster, in priority order.
    #[serde(default)]
    pub kid_names: Vec<String>,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// Returns `~/.config/chaperone[-dev]/` based on CHAPERONE_ENV.
///
/// Set CHAPERONE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHAPERONE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chaperone-dev")
    } else {
        base_dir.join("chaperone")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(&path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The adult roster with derived display names, in roster order.
    pub fn adults(&self) -> Vec<Adult> {
        self.adult_emails
            .iter()
            .map(|email| Adult::from_email(email))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn populated_config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            calendar_id: "family@group.calendar.google.com".to_string(),
            adult_emails: vec![
                "parent1@gmail.com".to_string(),
                "parent2@gmail.com".to_string(),
            ],
            kid_names: vec!["Asa".to_string(), "Zola".to_string()],
            google: GoogleConfig {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
            },
        };
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("calendar_id = \"cal\"\n").unwrap();
        assert_eq!(cfg.calendar_id, "cal");
        assert!(cfg.adult_emails.is_empty());
        assert!(cfg.google.client_id.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "calendar_id = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn adults_derive_local_part_names_in_roster_order() {
        let cfg = Config {
            adult_emails: vec![
                "parent1@gmail.com".to_string(),
                "parent2@gmail.com".to_string(),
            ],
            ..Config::default()
        };
        let adults = cfg.adults();
        assert_eq!(adults.len(), 2);
        assert_eq!(adults[0].name, "parent1");
        assert_eq!(adults[1].email, "parent2@gmail.com");
    }
}
