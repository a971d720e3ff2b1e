//! Registration service
//!
//! Business logic for participant registration: form validation, duplicate
//! and capacity guarding, confirmation code issuance, and the confirm and
//! cancel transitions.

use std::collections::BTreeMap;

use crate::database::repositories::{is_unique_violation, EventRepository, RegistrationRepository};
use crate::models::event::EventLookup;
use crate::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationFilter, RegistrationLookup,
    RegistrationStatus,
};
use crate::models::Pagination;
use crate::utils::errors::{Result, ZenFlowError};
use crate::utils::helpers::{
    calculate_pages, generate_confirmation_code, is_valid_email, is_valid_phone,
};
use crate::utils::logging::log_registration_action;

const CONFIRMATION_CODE_LENGTH: usize = 8;
const CODE_RETRY_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
    events: EventRepository,
}

impl RegistrationService {
    pub fn new(registrations: RegistrationRepository, events: EventRepository) -> Self {
        Self {
            registrations,
            events,
        }
    }

    /// Register a participant for an event.
    ///
    /// A repeat attempt for the same (event, email) surfaces the original
    /// confirmation code so the caller can show "you're already registered"
    /// instead of an opaque failure. Full events reject before any write.
    pub async fn register(
        &self,
        event_id: i64,
        request: &CreateRegistrationRequest,
    ) -> Result<Registration> {
        let errors = validate_request(request);
        if !errors.is_empty() {
            return Err(ZenFlowError::Validation { errors });
        }

        let lookup = EventLookup::ById(event_id);
        let event = self
            .events
            .find(&lookup)
            .await?
            .ok_or_else(|| ZenFlowError::EventNotFound {
                lookup: lookup.to_string(),
            })?;

        if let Some(existing) = self
            .registrations
            .find_by_event_and_email(event_id, &request.email)
            .await?
        {
            return Err(already_registered(&existing));
        }

        if event.is_full() {
            return Err(ZenFlowError::CapacityExceeded { event_id });
        }

        // Retry on the unlikely confirmation code collision
        let mut last_error = None;
        for _ in 0..CODE_RETRY_ATTEMPTS {
            let code = generate_confirmation_code(CONFIRMATION_CODE_LENGTH);
            match self
                .registrations
                .create(event_id, &event.title, request, &code)
                .await
            {
                Ok(registration) => {
                    log_registration_action(registration.id, event_id, "created");
                    return Ok(registration);
                }
                Err(ZenFlowError::Database(e))
                    if is_unique_violation(&e, "registrations_confirmation_code_key") =>
                {
                    last_error = Some(ZenFlowError::Database(e));
                }
                Err(ZenFlowError::Database(e))
                    if is_unique_violation(&e, "registrations_event_id_email_key") =>
                {
                    // Lost the race to a concurrent registration
                    let existing = self
                        .registrations
                        .find_by_event_and_email(event_id, &request.email)
                        .await?;
                    return Err(match existing {
                        Some(existing) => already_registered(&existing),
                        None => ZenFlowError::Database(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ZenFlowError::ServiceUnavailable("confirmation code generation".to_string())
        }))
    }

    /// Resolve a registration through either access path
    pub async fn get(&self, lookup: &RegistrationLookup) -> Result<Registration> {
        self.registrations
            .find(lookup)
            .await?
            .ok_or_else(|| ZenFlowError::RegistrationNotFound {
                lookup: lookup.to_string(),
            })
    }

    /// Admin listing with pagination
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Registration>, Pagination)> {
        let (registrations, total) = self.registrations.list(filter, page, limit).await?;

        let limit = limit.clamp(1, 100);
        let pagination = Pagination {
            current: page.max(1),
            pages: calculate_pages(total, limit),
            total,
            limit,
        };

        Ok((registrations, pagination))
    }

    /// Confirm a pending registration
    pub async fn confirm(&self, lookup: &RegistrationLookup) -> Result<Registration> {
        let registration = self.get(lookup).await?;

        match registration.status() {
            Some(RegistrationStatus::Pending) => {}
            _ => {
                return Err(ZenFlowError::InvalidStateTransition {
                    from: registration.status.clone(),
                    to: RegistrationStatus::Confirmed.as_str().to_string(),
                });
            }
        }

        let confirmed = self.registrations.confirm(registration.id).await?;
        log_registration_action(confirmed.id, confirmed.event_id, "confirmed");

        Ok(confirmed)
    }

    /// Cancel a registration. A confirmed one releases its seat; cancelling
    /// twice fails without a second decrement.
    pub async fn cancel(&self, lookup: &RegistrationLookup) -> Result<Registration> {
        let registration = self.get(lookup).await?;

        if registration.status() == Some(RegistrationStatus::Cancelled) {
            return Err(ZenFlowError::InvalidStateTransition {
                from: registration.status.clone(),
                to: RegistrationStatus::Cancelled.as_str().to_string(),
            });
        }

        let cancelled = self.registrations.cancel(&registration).await?;
        log_registration_action(cancelled.id, cancelled.event_id, "cancelled");

        Ok(cancelled)
    }

    /// Hard delete, releasing the seat when the registration was confirmed
    pub async fn delete(&self, id: i64) -> Result<()> {
        let registration = self.get(&RegistrationLookup::ById(id)).await?;

        self.registrations.delete(&registration).await?;
        log_registration_action(registration.id, registration.event_id, "deleted");

        Ok(())
    }
}

fn already_registered(existing: &Registration) -> ZenFlowError {
    ZenFlowError::AlreadyRegistered {
        confirmation_code: existing.confirmation_code.clone(),
        status: existing.status().unwrap_or(RegistrationStatus::Pending),
    }
}

fn validate_request(request: &CreateRegistrationRequest) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if request.full_name.trim().is_empty() {
        errors.insert("fullName".to_string(), "Full name is required".to_string());
    }
    if !is_valid_email(&request.email) {
        errors.insert(
            "email".to_string(),
            "A valid email address is required".to_string(),
        );
    }
    match request.phone.as_deref().map(str::trim) {
        Some(phone) if !phone.is_empty() => {
            if !is_valid_phone(phone) {
                errors.insert(
                    "phone".to_string(),
                    "Phone number format is invalid".to_string(),
                );
            }
        }
        _ => {
            errors.insert(
                "phone".to_string(),
                "Phone number is required".to_string(),
            );
        }
    }
    if request.country.as_deref().map(str::trim).unwrap_or("").is_empty() {
        errors.insert("country".to_string(), "Country is required".to_string());
    }
    if request.state.as_deref().map(str::trim).unwrap_or("").is_empty() {
        errors.insert("state".to_string(), "State is required".to_string());
    }
    if !request.agree_terms {
        errors.insert(
            "agreeTerms".to_string(),
            "You must agree to the terms and conditions".to_string(),
        );
    }

    errors
}
