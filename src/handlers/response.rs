//! API response envelope and error mapping
//!
//! Every endpoint responds with `{ success, message?, data? }`. Errors map
//! onto the same envelope with the appropriate status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::utils::errors::ZenFlowError;

/// Standard success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    pub fn ok_with_message(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        })
    }
}

impl IntoResponse for ZenFlowError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ZenFlowError::Validation { errors } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                }),
            ),
            ZenFlowError::AlreadyRegistered {
                confirmation_code,
                status,
            } => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "data": {
                        "confirmationCode": confirmation_code,
                        "status": status,
                    },
                }),
            ),
            ZenFlowError::EventNotFound { .. } | ZenFlowError::RegistrationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": self.to_string() }),
            ),
            ZenFlowError::DuplicateTitle { .. }
            | ZenFlowError::CapacityExceeded { .. }
            | ZenFlowError::InvalidStateTransition { .. }
            | ZenFlowError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": self.to_string() }),
            ),
            ZenFlowError::ServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "success": false, "message": self.to_string() }),
            ),
            _ => {
                error!(error = %self, severity = %self.severity(), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
