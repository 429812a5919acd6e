//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub event: EventDefaultsConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Client-side request timeout. `None` leaves failure to the backend.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Admin session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub store_path: String,
}

/// Event settings shown until the backend answers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventDefaultsConfig {
    pub name: String,
    pub date: String,
    pub location: String,
    pub workload_hours: u32,
    pub capacity_day1: u32,
    pub capacity_day2: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file. Empty disables file output.
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a specific configuration file (extension optional)
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("JORNADA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PortalError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3001/api".to_string(),
                timeout_seconds: None,
                user_agent: "JornadaPortal/0.1".to_string(),
            },
            session: SessionConfig {
                store_path: ".jornada/session.json".to_string(),
            },
            event: EventDefaultsConfig {
                name: "Jornada Pedagógica 2026".to_string(),
                date: "25 e 26 de Fevereiro de 2026".to_string(),
                location: "Centro de Convenções — Tuntum, MA".to_string(),
                workload_hours: 40,
                capacity_day1: 500,
                capacity_day2: 500,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.api.base_url, "http://localhost:3001/api");
        assert!(settings.api.timeout_seconds.is_none());
    }

    #[test]
    fn test_from_missing_file_falls_back_to_defaults() {
        let settings = Settings::from_file("does-not-exist-anywhere").unwrap();
        assert_eq!(settings.event.name, "Jornada Pedagógica 2026");
        assert_eq!(settings.event.capacity_day1, 500);
    }
}
