//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod registration;

// Re-export commonly used services
pub use event::EventService;
pub use registration::RegistrationService;

use crate::config::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub events: EventService,
    pub registrations: RegistrationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: &DatabaseService, settings: Settings) -> Self {
        let events = EventService::new(database.events.clone(), settings);
        let registrations =
            RegistrationService::new(database.registrations.clone(), database.events.clone());

        Self {
            events,
            registrations,
        }
    }
}
