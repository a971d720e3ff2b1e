//! Event repository implementation

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::draft::EventDraft;
use crate::models::event::{
    Event, EventFilter, EventLookup, ListParams, SectionVisibility, SortOrder, UpdateEventRequest,
};
use crate::utils::errors::ZenFlowError;
use crate::utils::helpers::calculate_offset;

/// Counter update shared by the registration flows. Recomputes the derived
/// progress column in the same statement so the two never drift.
pub(crate) const ADJUST_PARTICIPANTS_SQL: &str = r#"
    UPDATE events
    SET participants = GREATEST(participants + $2, 0),
        progress = LEAST(COALESCE(GREATEST(participants + $2, 0) * 100 / NULLIF(max_participants, 0), 0), 100),
        updated_at = NOW()
    WHERE id = $1
"#;

const EVENT_COLUMNS: &str = "id, title, subtitle, slug, short_description, detailed_description, \
     category, start_date, end_date, duration, price, original_price, location, timezone, \
     language, level, status, featured, participants, max_participants, progress, rating, tags, \
     hero_image, key_benefits, curriculum, facilitator, video_testimonial, text_testimonials, \
     faq, stats, upcoming_session, section_visibility, ai_enhancement, theme_id, \
     registration_url, related_events, created_at, updated_at";

/// Sortable columns for the listing endpoint. Anything else falls back to
/// start_date.
const SORTABLE_COLUMNS: &[&str] = &[
    "start_date",
    "created_at",
    "updated_at",
    "title",
    "rating",
    "participants",
    "price",
];

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new event from a validated draft. Status always starts at
    /// draft regardless of what the payload claims.
    pub async fn create(
        &self,
        draft: &EventDraft,
        slug: &str,
        registration_url: &str,
    ) -> Result<Event, ZenFlowError> {
        let facilitator = (!draft.facilitator.name.is_empty()).then_some(Json(&draft.facilitator));
        let video = (!draft.video_testimonial.video_url.is_empty())
            .then_some(Json(&draft.video_testimonial));
        let stats = (draft.stats != Default::default()).then_some(Json(&draft.stats));
        let session =
            (!draft.upcoming_session.title.is_empty()).then_some(Json(&draft.upcoming_session));

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (
                title, subtitle, slug, short_description, detailed_description, category,
                start_date, end_date, duration, price, original_price, location, timezone,
                language, level, status, featured, max_participants, tags, hero_image,
                key_benefits, curriculum, facilitator, video_testimonial, text_testimonials,
                faq, stats, upcoming_session, section_visibility, ai_enhancement, theme_id,
                registration_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    'draft', $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27,
                    $28, $29, $30, $31, $32, $33)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(non_empty(&draft.subtitle))
        .bind(slug)
        .bind(&draft.short_description)
        .bind(&draft.detailed_description)
        .bind(&draft.category)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(&draft.duration)
        .bind(&draft.price)
        .bind(non_empty(&draft.original_price))
        .bind(non_empty(&draft.location))
        .bind(non_empty(&draft.timezone))
        .bind(&draft.language)
        .bind(non_empty(&draft.level))
        .bind(draft.featured)
        .bind(draft.max_participants)
        .bind(&draft.tags)
        .bind(non_empty(&draft.hero_image))
        .bind(&draft.key_benefits)
        .bind(Json(&draft.curriculum))
        .bind(facilitator)
        .bind(video)
        .bind(Json(&draft.text_testimonials))
        .bind(Json(&draft.faq))
        .bind(stats)
        .bind(session)
        .bind(Json(&draft.section_visibility))
        .bind(Json(&draft.ai_enhancement))
        .bind(&draft.theme_id)
        .bind(registration_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Resolve an event through either access path
    pub async fn find(&self, lookup: &EventLookup) -> Result<Option<Event>, ZenFlowError> {
        let event = match lookup {
            EventLookup::ById(id) => {
                sqlx::query_as::<_, Event>(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            EventLookup::BySlug(slug) => {
                sqlx::query_as::<_, Event>(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
                ))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(event)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, ZenFlowError> {
        self.find(&EventLookup::BySlug(slug.to_string())).await
    }

    /// Update event fields, regenerating the slug when a new one is supplied
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateEventRequest,
        new_slug: Option<&str>,
    ) -> Result<Event, ZenFlowError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                slug = COALESCE($4, slug),
                short_description = COALESCE($5, short_description),
                detailed_description = COALESCE($6, detailed_description),
                category = COALESCE($7, category),
                start_date = COALESCE($8, start_date),
                end_date = COALESCE($9, end_date),
                duration = COALESCE($10, duration),
                price = COALESCE($11, price),
                original_price = COALESCE($12, original_price),
                location = COALESCE($13, location),
                timezone = COALESCE($14, timezone),
                language = COALESCE($15, language),
                level = COALESCE($16, level),
                featured = COALESCE($17, featured),
                max_participants = COALESCE($18, max_participants),
                rating = COALESCE($19, rating),
                tags = COALESCE($20, tags),
                hero_image = COALESCE($21, hero_image),
                key_benefits = COALESCE($22, key_benefits),
                curriculum = COALESCE($23, curriculum),
                facilitator = COALESCE($24, facilitator),
                video_testimonial = COALESCE($25, video_testimonial),
                text_testimonials = COALESCE($26, text_testimonials),
                faq = COALESCE($27, faq),
                stats = COALESCE($28, stats),
                upcoming_session = COALESCE($29, upcoming_session),
                related_events = COALESCE($30, related_events),
                progress = LEAST(COALESCE(participants * 100 / NULLIF(COALESCE($18, max_participants), 0), 0), 100),
                updated_at = $31
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.title)
        .bind(&request.subtitle)
        .bind(new_slug)
        .bind(&request.short_description)
        .bind(&request.detailed_description)
        .bind(&request.category)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.duration)
        .bind(&request.price)
        .bind(&request.original_price)
        .bind(&request.location)
        .bind(&request.timezone)
        .bind(&request.language)
        .bind(&request.level)
        .bind(request.featured)
        .bind(request.max_participants)
        .bind(request.rating)
        .bind(&request.tags)
        .bind(&request.hero_image)
        .bind(&request.key_benefits)
        .bind(request.curriculum.as_ref().map(Json))
        .bind(request.facilitator.as_ref().map(Json))
        .bind(request.video_testimonial.as_ref().map(Json))
        .bind(request.text_testimonials.as_ref().map(Json))
        .bind(request.faq.as_ref().map(Json))
        .bind(request.stats.as_ref().map(Json))
        .bind(request.upcoming_session.as_ref().map(Json))
        .bind(&request.related_events)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Replace the section visibility flags wholesale
    pub async fn update_visibility(
        &self,
        id: i64,
        visibility: &SectionVisibility,
    ) -> Result<Event, ZenFlowError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET section_visibility = $2, updated_at = $3 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(Json(visibility))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Transition the lifecycle status, recording the presentation theme
    pub async fn update_status(
        &self,
        id: i64,
        status: &str,
        theme_id: &str,
    ) -> Result<Event, ZenFlowError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $2,
                theme_id = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(theme_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Hard delete. Registrations go with the event via ON DELETE CASCADE.
    pub async fn delete(&self, id: i64) -> Result<bool, ZenFlowError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List events with filters and pagination, returning the page and the
    /// unpaged total.
    pub async fn list(
        &self,
        filter: &EventFilter,
        params: &ListParams,
    ) -> Result<(Vec<Event>, i64), ZenFlowError> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM events WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {EVENT_COLUMNS} FROM events WHERE 1=1"));
        push_filters(&mut query, filter);

        let sort_by = if SORTABLE_COLUMNS.contains(&params.sort_by.as_str()) {
            params.sort_by.as_str()
        } else {
            "start_date"
        };
        let direction = match params.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        query.push(format!(" ORDER BY {sort_by} {direction}"));

        let limit = params.limit.clamp(1, 100);
        let offset = calculate_offset(params.page, limit);
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let events = query.build_query_as::<Event>().fetch_all(&self.pool).await?;

        Ok((events, total))
    }

    /// Published events flagged as featured
    pub async fn find_featured(&self, limit: i64) -> Result<Vec<Event>, ZenFlowError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE featured = true AND status IN ('published', 'trending') \
             ORDER BY start_date ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Published events starting in the future
    pub async fn find_upcoming(&self, limit: i64) -> Result<Vec<Event>, ZenFlowError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE start_date > NOW() AND status IN ('published', 'trending') \
             ORDER BY start_date ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Published events sharing a category, excluding the event itself.
    /// Used as the fallback when no related events were assigned manually.
    pub async fn find_related(
        &self,
        event_id: i64,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Event>, ZenFlowError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE category = $1 AND id <> $2 AND status IN ('published', 'trending') \
             ORDER BY start_date ASC LIMIT $3"
        ))
        .bind(category)
        .bind(event_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Distinct categories across publicly visible events, for the listing
    /// filter controls
    pub async fn list_categories(&self) -> Result<Vec<String>, ZenFlowError> {
        let categories = sqlx::query_scalar(
            "SELECT DISTINCT category FROM events \
             WHERE status IN ('published', 'trending') ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Event>, ZenFlowError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ANY($1) ORDER BY start_date ASC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
    if let Some(category) = &filter.category {
        query.push(" AND category = ");
        query.push_bind(category.clone());
    }
    if let Some(status) = &filter.status {
        query.push(" AND status = ");
        query.push_bind(status.clone());
    }
    if let Some(featured) = filter.featured {
        query.push(" AND featured = ");
        query.push_bind(featured);
    }
    if let Some(level) = &filter.level {
        query.push(" AND level = ");
        query.push_bind(level.clone());
    }
    if let Some(language) = &filter.language {
        query.push(" AND ");
        query.push_bind(language.clone());
        query.push(" = ANY(language)");
    }
    if let Some(start) = filter.start_date {
        query.push(" AND start_date >= ");
        query.push_bind(start);
    }
    if let Some(end) = filter.end_date {
        query.push(" AND start_date <= ");
        query.push_bind(end);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query.push(" AND (title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR short_description ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR detailed_description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
