//! Registration model
//!
//! Participant registrations for published events, keyed by confirmation
//! code for attendee-facing lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registration lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RegistrationStatus::Pending),
            "confirmed" => Some(RegistrationStatus::Confirmed),
            "cancelled" => Some(RegistrationStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted registration record.
///
/// `event_title` is denormalized at registration time so confirmation
/// responses survive later event edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub event_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub batch: Option<String>,
    pub language: String,
    pub receive_info: bool,
    pub agree_terms: bool,
    pub notes: Option<String>,
    pub confirmation_code: String,
    pub status: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    pub fn status(&self) -> Option<RegistrationStatus> {
        RegistrationStatus::parse(&self.status)
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RegistrationStatus::Confirmed.as_str()
    }
}

/// Incoming registration form payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub batch: Option<String>,
    pub language: Option<String>,
    pub receive_info: Option<bool>,
    pub agree_terms: bool,
    pub notes: Option<String>,
}

/// Tagged lookup for the dual id/code access paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationLookup {
    ById(i64),
    ByCode(String),
}

impl std::fmt::Display for RegistrationLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationLookup::ById(id) => write!(f, "id={}", id),
            RegistrationLookup::ByCode(code) => write!(f, "code={}", code),
        }
    }
}

/// Filters for the admin registration listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationFilter {
    pub event_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed,
            RegistrationStatus::Cancelled,
        ] {
            assert_eq!(RegistrationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RegistrationStatus::parse("waitlisted"), None);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: CreateRegistrationRequest = serde_json::from_str(
            r#"{"fullName":"Maya Chen","email":"maya@example.com","agreeTerms":true,"country":"India"}"#,
        )
        .unwrap();
        assert_eq!(request.full_name, "Maya Chen");
        assert!(request.agree_terms);
        assert!(request.receive_info.is_none());
        assert_eq!(request.country.as_deref(), Some("India"));
    }
}
