//! Registration endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::models::registration::{
    CreateRegistrationRequest, RegistrationFilter, RegistrationLookup,
};
use crate::utils::errors::{Result, ZenFlowError};

use super::response::ApiResponse;
use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationBody {
    pub event_id: i64,
    #[serde(flatten)]
    pub form: CreateRegistrationRequest,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRegistrationsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub event_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeQuery {
    pub confirmation_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeBody {
    pub confirmation_code: Option<String>,
}

/// Resolve the dual id/code access: a confirmation code wins when supplied,
/// otherwise the path segment must be a numeric id.
fn resolve_lookup(segment: &str, code: Option<String>) -> Result<RegistrationLookup> {
    if let Some(code) = code {
        return Ok(RegistrationLookup::ByCode(code));
    }

    segment
        .parse::<i64>()
        .map(RegistrationLookup::ById)
        .map_err(|_| ZenFlowError::InvalidInput("Invalid registration ID".to_string()))
}

pub async fn create_registration(
    State(state): State<AppState>,
    Json(body): Json<CreateRegistrationBody>,
) -> Result<impl IntoResponse> {
    let registration = state
        .services
        .registrations
        .register(body.event_id, &body.form)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok_with_message(
            "Registration successful! Please check your email for confirmation details.",
            json!({
                "registration": {
                    "id": registration.id,
                    "confirmationCode": registration.confirmation_code,
                    "status": registration.status,
                    "eventTitle": registration.event_title,
                    "fullName": registration.full_name,
                    "email": registration.email,
                    "registeredAt": registration.registered_at,
                }
            }),
        ),
    ))
}

pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<impl IntoResponse> {
    let filter = RegistrationFilter {
        event_id: query.event_id,
        status: query.status,
        search: query.search,
    };
    let (registrations, pagination) = state
        .services
        .registrations
        .list(&filter, query.page.unwrap_or(1), query.limit.unwrap_or(10))
        .await?;

    Ok(ApiResponse::ok(json!({
        "registrations": registrations,
        "pagination": pagination,
    })))
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(query): Query<CodeQuery>,
) -> Result<impl IntoResponse> {
    let lookup = resolve_lookup(&segment, query.confirmation_code)?;
    let registration = state.services.registrations.get(&lookup).await?;

    Ok(ApiResponse::ok(json!({ "registration": registration })))
}

pub async fn confirm_registration(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Option<Json<CodeBody>>,
) -> Result<impl IntoResponse> {
    let code = body.and_then(|Json(body)| body.confirmation_code);
    let lookup = resolve_lookup(&segment, code)?;
    let registration = state.services.registrations.confirm(&lookup).await?;

    Ok(ApiResponse::ok_with_message(
        "Registration confirmed successfully",
        json!({
            "registration": {
                "id": registration.id,
                "confirmationCode": registration.confirmation_code,
                "status": registration.status,
                "confirmedAt": registration.confirmed_at,
            }
        }),
    ))
}

pub async fn cancel_registration(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Option<Json<CodeBody>>,
) -> Result<impl IntoResponse> {
    let code = body.and_then(|Json(body)| body.confirmation_code);
    let lookup = resolve_lookup(&segment, code)?;
    let registration = state.services.registrations.cancel(&lookup).await?;

    Ok(ApiResponse::ok_with_message(
        "Registration cancelled successfully",
        json!({
            "registration": {
                "id": registration.id,
                "confirmationCode": registration.confirmation_code,
                "status": registration.status,
                "cancelledAt": registration.cancelled_at,
            }
        }),
    ))
}

pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.services.registrations.delete(id).await?;

    Ok(ApiResponse::message("Registration deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wins_over_segment() {
        let lookup = resolve_lookup("not-a-number", Some("A1B2C3D4".to_string())).unwrap();
        assert_eq!(lookup, RegistrationLookup::ByCode("A1B2C3D4".to_string()));
    }

    #[test]
    fn test_numeric_segment_without_code() {
        let lookup = resolve_lookup("17", None).unwrap();
        assert_eq!(lookup, RegistrationLookup::ById(17));
    }

    #[test]
    fn test_invalid_segment_rejected() {
        assert!(resolve_lookup("not-a-number", None).is_err());
    }
}
