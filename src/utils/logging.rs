//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ZenFlow application.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender; it must stay alive for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "zenflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event lifecycle actions with structured data
pub fn log_event_action(event_id: i64, slug: &str, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        slug = slug,
        action = action,
        details = details,
        "Event action performed"
    );
}

/// Log registration actions with structured data
pub fn log_registration_action(registration_id: i64, event_id: i64, action: &str) {
    info!(
        registration_id = registration_id,
        event_id = event_id,
        action = action,
        "Registration action performed"
    );
}

/// Log wizard step transitions
pub fn log_wizard_transition(author: &str, from_step: u8, to_step: u8) {
    debug!(
        author = author,
        from_step = from_step,
        to_step = to_step,
        "Wizard step transition"
    );
}

/// Log draft autosave outcomes
pub fn log_autosave(author: &str, success: bool, details: Option<&str>) {
    if success {
        debug!(author = author, "Draft autosaved");
    } else {
        warn!(author = author, details = details, "Draft autosave failed");
    }
}
