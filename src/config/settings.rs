//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub drafts: DraftsConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL used when deriving registration links
    pub public_base_url: String,
    /// When true, unpublished events resolve on the public detail endpoint
    pub dev_mode: bool,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration (draft persistence)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Wizard draft autosave configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftsConfig {
    /// Debounce window between a field mutation and the snapshot write
    pub autosave_debounce_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// Forward AI enhancement flags to the async pipeline after create
    pub ai_enhancement: bool,
    /// Attach related events to public detail responses
    pub related_events: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables.
    /// File and environment values layer over the built-in defaults.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ZENFLOW").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ZenFlowError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                public_base_url: "http://localhost:3000".to_string(),
                dev_mode: false,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/zenflow".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "zenflow:".to_string(),
                ttl_seconds: 86400,
            },
            drafts: DraftsConfig {
                autosave_debounce_ms: 2000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/zenflow".to_string(),
            },
            features: FeaturesConfig {
                ai_enhancement: true,
                related_events: true,
            },
        }
    }
}
