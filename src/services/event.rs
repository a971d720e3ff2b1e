//! Event lifecycle service
//!
//! Business logic for event CRUD and status transitions. Slug derivation,
//! duplicate guarding and the publish transition all live here; handlers
//! stay thin.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::Settings;
use crate::database::repositories::{is_unique_violation, EventRepository};
use crate::models::draft::EventDraft;
use crate::models::event::{
    Event, EventFilter, EventLookup, EventStatus, ListParams, Pagination, SectionVisibility,
    UpdateEventRequest,
};
use crate::utils::errors::{Result, ZenFlowError};
use crate::utils::helpers::{calculate_pages, generate_registration_url, generate_slug};
use crate::utils::logging::log_event_action;
use crate::wizard::{validate_step, SectionRegistry};

const RELATED_EVENTS_LIMIT: i64 = 3;

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    settings: Settings,
}

impl EventService {
    pub fn new(events: EventRepository, settings: Settings) -> Self {
        Self { events, settings }
    }

    /// Create a draft event from a wizard draft.
    ///
    /// The gated wizard steps are re-validated here so a direct API call
    /// cannot bypass the form rules.
    pub async fn create_from_draft(&self, draft: &EventDraft) -> Result<Event> {
        let registry = SectionRegistry::standard();
        for step in [1u8, 3] {
            let errors = validate_step(step, draft, &registry);
            if !errors.is_empty() {
                return Err(ZenFlowError::Validation { errors });
            }
        }

        let slug = generate_slug(&draft.title);
        if slug.is_empty() {
            return Err(ZenFlowError::field(
                "title",
                "Title must contain at least one letter or digit",
            ));
        }

        if self.events.find_by_slug(&slug).await?.is_some() {
            return Err(ZenFlowError::DuplicateTitle { slug });
        }

        let registration_url =
            generate_registration_url(&self.settings.server.public_base_url, &slug);

        let event = match self.events.create(draft, &slug, &registration_url).await {
            Ok(event) => event,
            // Race fallback behind the pre-insert check
            Err(ZenFlowError::Database(e)) if is_unique_violation(&e, "events_slug_key") => {
                return Err(ZenFlowError::DuplicateTitle { slug });
            }
            Err(e) => return Err(e),
        };

        log_event_action(event.id, &event.slug, "created", None);

        if self.settings.features.ai_enhancement && draft.ai_enhancement.any_enabled() {
            info!(event_id = event.id, "AI enhancement requested, queued for processing");
        }

        Ok(event)
    }

    /// Resolve an event for administrative access
    pub async fn get(&self, lookup: &EventLookup) -> Result<Event> {
        self.events
            .find(lookup)
            .await?
            .ok_or_else(|| ZenFlowError::EventNotFound {
                lookup: lookup.to_string(),
            })
    }

    /// Resolve an event for public access. Unpublished events stay hidden
    /// unless dev mode is on.
    pub async fn get_public(&self, lookup: &EventLookup) -> Result<Event> {
        let event = self.get(lookup).await?;

        let visible = matches!(
            event.status(),
            Some(EventStatus::Published) | Some(EventStatus::Trending)
        );
        if !visible && !self.settings.server.dev_mode {
            return Err(ZenFlowError::EventNotFound {
                lookup: lookup.to_string(),
            });
        }

        Ok(event)
    }

    /// Update event fields. A title change re-derives the slug through the
    /// same normalization as creation.
    pub async fn update(&self, id: i64, request: &UpdateEventRequest) -> Result<Event> {
        let existing = self.get(&EventLookup::ById(id)).await?;

        let errors = validate_update(request);
        if !errors.is_empty() {
            return Err(ZenFlowError::Validation { errors });
        }

        let new_slug = match &request.title {
            Some(title) if *title != existing.title => {
                let slug = generate_slug(title);
                if slug.is_empty() {
                    return Err(ZenFlowError::field(
                        "title",
                        "Title must contain at least one letter or digit",
                    ));
                }
                if let Some(other) = self.events.find_by_slug(&slug).await? {
                    if other.id != id {
                        return Err(ZenFlowError::DuplicateTitle { slug });
                    }
                }
                Some(slug)
            }
            _ => None,
        };

        let event = self.events.update(id, request, new_slug.as_deref()).await?;
        log_event_action(event.id, &event.slug, "updated", None);

        Ok(event)
    }

    /// Replace the section visibility flags
    pub async fn update_visibility(
        &self,
        id: i64,
        visibility: &SectionVisibility,
    ) -> Result<Event> {
        self.get(&EventLookup::ById(id)).await?;

        let event = self.events.update_visibility(id, visibility).await?;
        log_event_action(event.id, &event.slug, "visibility_updated", None);

        Ok(event)
    }

    /// Transition a draft to published. A theme must accompany every
    /// publish; re-publishing an already published event overwrites the
    /// theme and nothing else.
    pub async fn publish(&self, id: i64, theme_id: &str) -> Result<Event> {
        if theme_id.trim().is_empty() {
            return Err(ZenFlowError::field(
                "themeId",
                "A theme is required to publish an event",
            ));
        }

        let existing = self.get(&EventLookup::ById(id)).await?;

        match existing.status() {
            Some(EventStatus::Draft) | Some(EventStatus::Published) => {}
            _ => {
                return Err(ZenFlowError::InvalidStateTransition {
                    from: existing.status.clone(),
                    to: EventStatus::Published.as_str().to_string(),
                });
            }
        }

        let event = self
            .events
            .update_status(id, EventStatus::Published.as_str(), theme_id)
            .await?;
        log_event_action(event.id, &event.slug, "published", Some(theme_id));

        Ok(event)
    }

    /// Hard delete. Registrations cascade with the event.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let existing = self.get(&EventLookup::ById(id)).await?;

        if !self.events.delete(id).await? {
            return Err(ZenFlowError::EventNotFound {
                lookup: EventLookup::ById(id).to_string(),
            });
        }

        log_event_action(id, &existing.slug, "deleted", None);
        Ok(())
    }

    /// List events. Public listings default to published only; admin
    /// listings pass `public = false` and see every status.
    pub async fn list(
        &self,
        mut filter: EventFilter,
        params: &ListParams,
        public: bool,
    ) -> Result<(Vec<Event>, Pagination)> {
        if public && filter.status.is_none() {
            filter.status = Some(EventStatus::Published.as_str().to_string());
        }

        let (events, total) = self.events.list(&filter, params).await?;

        let limit = params.limit.clamp(1, 100);
        let pagination = Pagination {
            current: params.page.max(1),
            pages: calculate_pages(total, limit),
            total,
            limit,
        };

        Ok((events, pagination))
    }

    /// Category filter values offered alongside public listings
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.events.list_categories().await
    }

    pub async fn featured(&self, limit: i64) -> Result<Vec<Event>> {
        self.events.find_featured(limit.clamp(1, 50)).await
    }

    pub async fn upcoming(&self, limit: i64) -> Result<Vec<Event>> {
        self.events.find_upcoming(limit.clamp(1, 50)).await
    }

    /// Related events for a detail page: the manually curated list when
    /// present, same-category fallback otherwise.
    pub async fn related(&self, event: &Event) -> Result<Vec<Event>> {
        if !self.settings.features.related_events {
            return Ok(Vec::new());
        }

        if !event.related_events.is_empty() {
            return self.events.find_by_ids(&event.related_events).await;
        }

        self.events
            .find_related(event.id, &event.category, RELATED_EVENTS_LIMIT)
            .await
    }
}

/// Field checks for partial updates. Absent fields stay untouched by the
/// update and pass; present fields must hold usable values.
fn validate_update(request: &UpdateEventRequest) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    let required_text = [
        ("title", &request.title, "Title cannot be empty"),
        (
            "shortDescription",
            &request.short_description,
            "Short description cannot be empty",
        ),
        (
            "detailedDescription",
            &request.detailed_description,
            "Detailed description cannot be empty",
        ),
        ("category", &request.category, "Category cannot be empty"),
        ("duration", &request.duration, "Duration cannot be empty"),
        ("price", &request.price, "Price cannot be empty"),
    ];
    for (key, value, message) in required_text {
        if let Some(value) = value {
            if value.trim().is_empty() {
                errors.insert(key.to_string(), message.to_string());
            }
        }
    }

    if let Some(max) = request.max_participants {
        if max <= 0 {
            errors.insert(
                "maxParticipants".to_string(),
                "Maximum participants must be greater than 0".to_string(),
            );
        }
    }
    if let Some(rating) = request.rating {
        if !(0.0..=5.0).contains(&rating) {
            errors.insert(
                "rating".to_string(),
                "Rating must be between 0 and 5".to_string(),
            );
        }
    }

    errors
}
