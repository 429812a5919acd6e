//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{PortalError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_event_defaults(&settings.event)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(PortalError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)?;

    if config.timeout_seconds == Some(0) {
        return Err(PortalError::Config(
            "API timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.store_path.is_empty() {
        return Err(PortalError::Config(
            "Session store path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate default event settings
fn validate_event_defaults(config: &super::EventDefaultsConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(PortalError::Config(
            "Default event name is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PortalError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PortalError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_empty_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = String::new();
        assert_matches!(validate_settings(&settings), Err(PortalError::Config(_)));
    }

    #[test]
    fn test_rejects_unparsable_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(PortalError::UrlParse(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.api.timeout_seconds = Some(0);
        assert!(validate_settings(&settings).is_err());

        settings.api.timeout_seconds = Some(10);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_blank_event_name() {
        let mut settings = Settings::default();
        settings.event.name = "   ".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
