//! ZenFlow Event Platform
//!
//! A web platform for managing wellness programs and events. This library
//! provides the admin creation wizard, the event lifecycle API, and the
//! participant registration subsystem.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
pub mod wizard;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, ZenFlowError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::AppState;
pub use services::ServiceFactory;
pub use wizard::{RedisDraftStorage, SectionRegistry, WizardController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
