//! Event lifecycle endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::models::draft::EventDraft;
use crate::models::event::{
    EventFilter, EventLookup, ListParams, SectionVisibility, SortOrder, UpdateEventRequest,
};
use crate::utils::errors::Result;

use super::response::ApiResponse;
use super::AppState;

/// Query parameters for the listing endpoint. `status=all` lifts the
/// default published-only filter for administrative views.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEventsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishRequest {
    pub theme_id: Option<String>,
}

/// Interpret a path segment as an id when numeric, a slug otherwise
fn parse_lookup(segment: &str) -> EventLookup {
    match segment.parse::<i64>() {
        Ok(id) => EventLookup::ById(id),
        Err(_) => EventLookup::BySlug(segment.to_string()),
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse> {
    let public = !matches!(query.status.as_deref(), Some("all"));
    let filter = EventFilter {
        category: query.category,
        status: query.status.filter(|s| s != "all"),
        featured: query.featured,
        search: query.search,
        level: query.level,
        language: query.language,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let defaults = ListParams::default();
    let params = ListParams {
        page: query.page.unwrap_or(defaults.page),
        limit: query.limit.unwrap_or(defaults.limit),
        sort_by: query.sort_by.unwrap_or(defaults.sort_by),
        sort_order: query.sort_order.unwrap_or(defaults.sort_order),
    };

    let (events, pagination) = state.services.events.list(filter, &params, public).await?;
    let categories = state.services.events.categories().await?;

    Ok(ApiResponse::ok(json!({
        "events": events,
        "pagination": pagination,
        "filters": { "categories": categories },
    })))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse> {
    let lookup = parse_lookup(&segment);
    let event = state.services.events.get_public(&lookup).await?;
    let related = state.services.events.related(&event).await?;

    Ok(ApiResponse::ok(json!({
        "event": event,
        "relatedEvents": related,
    })))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<impl IntoResponse> {
    let event = state.services.events.create_from_draft(&draft).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok_with_message("Event created successfully", json!({ "event": event })),
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse> {
    let event = state.services.events.update(id, &request).await?;

    Ok(ApiResponse::ok_with_message(
        "Event updated successfully",
        json!({ "event": event }),
    ))
}

pub async fn update_visibility(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(visibility): Json<SectionVisibility>,
) -> Result<impl IntoResponse> {
    let event = state
        .services
        .events
        .update_visibility(id, &visibility)
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Section visibility updated successfully",
        json!({ "event": event }),
    ))
}

pub async fn publish_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<PublishRequest>>,
) -> Result<impl IntoResponse> {
    // A missing body or theme fails validation in the service
    let theme_id = body
        .and_then(|Json(request)| request.theme_id)
        .unwrap_or_default();
    let event = state.services.events.publish(id, &theme_id).await?;

    Ok(ApiResponse::ok_with_message(
        "Event published successfully",
        json!({ "event": event }),
    ))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.services.events.delete(id).await?;

    Ok(ApiResponse::message("Event deleted successfully"))
}

pub async fn featured_events(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    let events = state
        .services
        .events
        .featured(query.limit.unwrap_or(6))
        .await?;

    Ok(ApiResponse::ok(json!({ "events": events })))
}

pub async fn upcoming_events(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    let events = state
        .services
        .events
        .upcoming(query.limit.unwrap_or(6))
        .await?;

    Ok(ApiResponse::ok(json!({ "events": events })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segment_is_id() {
        assert_eq!(parse_lookup("42"), EventLookup::ById(42));
    }

    #[test]
    fn test_text_segment_is_slug() {
        assert_eq!(
            parse_lookup("mindful-leadership-mastery"),
            EventLookup::BySlug("mindful-leadership-mastery".to_string())
        );
    }
}
