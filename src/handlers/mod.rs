//! HTTP handlers module
//!
//! This module wires the REST surface: shared application state, the route
//! table, and the response envelope.

pub mod events;
pub mod registrations;
pub mod response;

pub use response::ApiResponse;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::database::{health_check, DatabasePool};
use crate::services::ServiceFactory;
use crate::wizard::RedisDraftStorage;

/// Shared application state passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub db_pool: DatabasePool,
    pub drafts: RedisDraftStorage,
    pub settings: Settings,
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/api/events/featured", get(events::featured_events))
        .route("/api/events/upcoming", get(events::upcoming_events))
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/events/:id/publish", post(events::publish_event))
        .route(
            "/api/events/:id/visibility",
            patch(events::update_visibility),
        )
        .route(
            "/api/registrations",
            get(registrations::list_registrations).post(registrations::create_registration),
        )
        .route(
            "/api/registrations/:id",
            get(registrations::get_registration).delete(registrations::delete_registration),
        )
        .route(
            "/api/registrations/:id/confirm",
            patch(registrations::confirm_registration),
        )
        .route(
            "/api/registrations/:id/cancel",
            patch(registrations::cancel_registration),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness and dependency health
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_healthy = health_check(&state.db_pool).await.is_ok();
    let redis_healthy = state.drafts.test_connection().await.is_ok();

    let status = if database_healthy && redis_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "database": database_healthy,
        "redis": redis_healthy,
        "version": crate::VERSION,
    }))
}
