//! Event model
//!
//! Canonical server-side event record plus the nested section structures and
//! the request/filter types used by the lifecycle API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Event lifecycle status.
///
/// `draft -> published` is the only user-triggered transition. `archived` is
/// reserved for future flows and `trending` is a manually assigned display tag,
/// never set by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Archived,
    Trending,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Archived => "archived",
            EventStatus::Trending => "trending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(EventStatus::Draft),
            "published" => Some(EventStatus::Published),
            "archived" => Some(EventStatus::Archived),
            "trending" => Some(EventStatus::Trending),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-event section visibility flags.
///
/// `hero_section`, `about_section` and `registration_card` back required
/// sections and default on; the rest are optional toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionVisibility {
    pub hero_section: bool,
    pub about_section: bool,
    pub benefits_section: bool,
    pub curriculum_section: bool,
    pub facilitator_card: bool,
    pub video_testimonial_section: bool,
    pub text_testimonials_section: bool,
    pub faq_section: bool,
    pub stats_card: bool,
    pub upcoming_session_card: bool,
    pub registration_card: bool,
    pub related_programs_section: bool,
    pub countdown_timer: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            hero_section: true,
            about_section: true,
            benefits_section: true,
            curriculum_section: false,
            facilitator_card: false,
            video_testimonial_section: false,
            text_testimonials_section: false,
            faq_section: false,
            stats_card: false,
            upcoming_session_card: false,
            registration_card: true,
            related_programs_section: true,
            countdown_timer: true,
        }
    }
}

impl SectionVisibility {
    /// Look up a flag by its registry key.
    pub fn is_enabled(&self, key: &str) -> bool {
        match key {
            "heroSection" => self.hero_section,
            "aboutSection" => self.about_section,
            "benefitsSection" => self.benefits_section,
            "curriculumSection" => self.curriculum_section,
            "facilitatorCard" => self.facilitator_card,
            "videoTestimonialSection" => self.video_testimonial_section,
            "textTestimonialsSection" => self.text_testimonials_section,
            "faqSection" => self.faq_section,
            "statsCard" => self.stats_card,
            "upcomingSessionCard" => self.upcoming_session_card,
            "registrationCard" => self.registration_card,
            "relatedProgramsSection" => self.related_programs_section,
            "countdownTimer" => self.countdown_timer,
            _ => false,
        }
    }

    /// Set a flag by its registry key. Unknown keys are ignored.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) {
        match key {
            "heroSection" => self.hero_section = enabled,
            "aboutSection" => self.about_section = enabled,
            "benefitsSection" => self.benefits_section = enabled,
            "curriculumSection" => self.curriculum_section = enabled,
            "facilitatorCard" => self.facilitator_card = enabled,
            "videoTestimonialSection" => self.video_testimonial_section = enabled,
            "textTestimonialsSection" => self.text_testimonials_section = enabled,
            "faqSection" => self.faq_section = enabled,
            "statsCard" => self.stats_card = enabled,
            "upcomingSessionCard" => self.upcoming_session_card = enabled,
            "registrationCard" => self.registration_card = enabled,
            "relatedProgramsSection" => self.related_programs_section = enabled,
            "countdownTimer" => self.countdown_timer = enabled,
            _ => {}
        }
    }
}

/// AI enhancement flags, advisory only. They never gate a save; the async
/// pipeline reads them after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiEnhancement {
    pub enhance_descriptions: bool,
    pub generate_images: bool,
    pub create_testimonials: bool,
    pub optimize_seo: bool,
    pub generate_faqs: bool,
}

impl Default for AiEnhancement {
    fn default() -> Self {
        Self {
            enhance_descriptions: true,
            generate_images: true,
            create_testimonials: true,
            optimize_seo: true,
            generate_faqs: true,
        }
    }
}

impl AiEnhancement {
    pub fn any_enabled(&self) -> bool {
        self.enhance_descriptions
            || self.generate_images
            || self.create_testimonials
            || self.optimize_seo
            || self.generate_faqs
    }
}

/// Program facilitator details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Facilitator {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image: String,
    pub credentials: Vec<String>,
    pub experience: String,
    pub students_guided: String,
}

/// Featured video testimonial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoTestimonial {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub video_poster: String,
    pub duration: String,
}

/// Written participant testimonial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextTestimonial {
    pub text: String,
    pub rating: f64,
    pub author_name: String,
    pub author_location: String,
    pub author_image: String,
}

/// One week of the program curriculum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurriculumWeek {
    pub week: String,
    pub title: String,
    pub description: String,
    pub lessons: Vec<String>,
}

/// FAQ entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Program impact statistics. Validation treats these with OR semantics:
/// any one populated stat satisfies the section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramStats {
    pub total_graduates: i64,
    pub average_stress_reduction: String,
    pub practice_retention: String,
    pub recommendation_rate: String,
    pub countries_represented: i64,
}

/// Free preview session or webinar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpcomingSession {
    pub date: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub registration_url: String,
}

/// Persisted event record. Owned exclusively by the lifecycle API; the
/// `participants` counter and derived `progress` are server-maintained.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub short_description: String,
    pub detailed_description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration: String,
    pub price: String,
    pub original_price: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub language: Vec<String>,
    pub level: Option<String>,
    pub status: String,
    pub featured: bool,
    pub participants: i32,
    pub max_participants: i32,
    pub progress: i32,
    pub rating: f64,
    pub tags: Vec<String>,
    pub hero_image: Option<String>,
    pub key_benefits: Vec<String>,
    pub curriculum: Json<Vec<CurriculumWeek>>,
    pub facilitator: Option<Json<Facilitator>>,
    pub video_testimonial: Option<Json<VideoTestimonial>>,
    pub text_testimonials: Json<Vec<TextTestimonial>>,
    pub faq: Json<Vec<FaqItem>>,
    pub stats: Option<Json<ProgramStats>>,
    pub upcoming_session: Option<Json<UpcomingSession>>,
    pub section_visibility: Json<SectionVisibility>,
    pub ai_enhancement: Json<AiEnhancement>,
    pub theme_id: Option<String>,
    pub registration_url: Option<String>,
    pub related_events: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn status(&self) -> Option<EventStatus> {
        EventStatus::parse(&self.status)
    }

    pub fn is_published(&self) -> bool {
        self.status == EventStatus::Published.as_str()
    }

    pub fn is_full(&self) -> bool {
        self.max_participants > 0 && self.participants >= self.max_participants
    }
}

/// Partial update for an existing event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub short_description: Option<String>,
    pub detailed_description: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<Vec<String>>,
    pub level: Option<String>,
    pub featured: Option<bool>,
    pub max_participants: Option<i32>,
    pub rating: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub hero_image: Option<String>,
    pub key_benefits: Option<Vec<String>>,
    pub curriculum: Option<Vec<CurriculumWeek>>,
    pub facilitator: Option<Facilitator>,
    pub video_testimonial: Option<VideoTestimonial>,
    pub text_testimonials: Option<Vec<TextTestimonial>>,
    pub faq: Option<Vec<FaqItem>>,
    pub stats: Option<ProgramStats>,
    pub upcoming_session: Option<UpcomingSession>,
    pub related_events: Option<Vec<i64>>,
}

/// Tagged lookup for the dual id/slug access paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLookup {
    ById(i64),
    BySlug(String),
}

impl std::fmt::Display for EventLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventLookup::ById(id) => write!(f, "id={}", id),
            EventLookup::BySlug(slug) => write!(f, "slug={}", slug),
        }
    }
}

/// Filters for event listing. All fields combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Sort order for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

/// Paging and ordering for event listings
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 12,
            sort_by: "start_date".to_string(),
            sort_order: SortOrder::Asc,
        }
    }
}

/// Pagination block returned with every listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: i64,
    pub pages: i64,
    pub total: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::Archived,
            EventStatus::Trending,
        ] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("generating"), None);
    }

    #[test]
    fn test_section_visibility_defaults() {
        let visibility = SectionVisibility::default();
        assert!(visibility.hero_section);
        assert!(visibility.about_section);
        assert!(visibility.registration_card);
        assert!(!visibility.faq_section);
        assert!(!visibility.curriculum_section);
    }

    #[test]
    fn test_section_visibility_key_access() {
        let mut visibility = SectionVisibility::default();
        assert!(!visibility.is_enabled("faqSection"));
        visibility.set_enabled("faqSection", true);
        assert!(visibility.is_enabled("faqSection"));
        assert!(!visibility.is_enabled("unknownSection"));
    }

    #[test]
    fn test_visibility_deserializes_from_partial_json() {
        let visibility: SectionVisibility = serde_json::from_str(r#"{"faqSection":true}"#).unwrap();
        assert!(visibility.faq_section);
        assert!(visibility.about_section);
    }
}
