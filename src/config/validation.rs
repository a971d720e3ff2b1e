//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{Result, ZenFlowError};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_drafts_config(&settings.drafts)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ZenFlowError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(ZenFlowError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    if config.public_base_url.is_empty() {
        return Err(ZenFlowError::Config(
            "Public base URL is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ZenFlowError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(ZenFlowError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ZenFlowError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ZenFlowError::Config("Redis URL is required".to_string()));
    }

    if config.ttl_seconds == 0 {
        return Err(ZenFlowError::Config(
            "Draft TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate autosave configuration
fn validate_drafts_config(config: &super::DraftsConfig) -> Result<()> {
    if config.autosave_debounce_ms == 0 {
        return Err(ZenFlowError::Config(
            "Autosave debounce must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ZenFlowError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ZenFlowError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_zero_debounce() {
        let mut settings = Settings::default();
        settings.drafts.autosave_debounce_ms = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
