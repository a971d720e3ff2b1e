//! Wizard draft model
//!
//! The in-progress working copy edited by the creation wizard. Drafts live
//! outside the events table until submission and are snapshotted per author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{
    AiEnhancement, CurriculumWeek, Facilitator, FaqItem, ProgramStats, SectionVisibility,
    TextTestimonial, UpcomingSession, VideoTestimonial,
};

/// Working copy of an event under construction.
///
/// Every field the published record carries is editable here, but nothing is
/// validated on mutation. Validation runs at step boundaries and on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: String,
    pub subtitle: String,
    pub short_description: String,
    pub detailed_description: String,
    pub category: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration: String,
    pub price: String,
    pub original_price: String,
    pub location: String,
    pub timezone: String,
    pub language: Vec<String>,
    pub level: String,
    pub featured: bool,
    pub max_participants: i32,
    pub tags: Vec<String>,
    pub hero_image: String,
    pub key_benefits: Vec<String>,
    pub curriculum: Vec<CurriculumWeek>,
    pub facilitator: Facilitator,
    pub video_testimonial: VideoTestimonial,
    pub text_testimonials: Vec<TextTestimonial>,
    pub faq: Vec<FaqItem>,
    pub stats: ProgramStats,
    pub upcoming_session: UpcomingSession,
    pub section_visibility: SectionVisibility,
    pub ai_enhancement: AiEnhancement,
    pub theme_id: Option<String>,
}

/// Defaults mirror a blank wizard form. Capacity starts at 50 so payloads
/// that never touch the field inherit a usable limit instead of zero.
impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            short_description: String::new(),
            detailed_description: String::new(),
            category: String::new(),
            start_date: None,
            end_date: None,
            duration: String::new(),
            price: String::new(),
            original_price: String::new(),
            location: String::new(),
            timezone: String::new(),
            language: Vec::new(),
            level: String::new(),
            featured: false,
            max_participants: 50,
            tags: Vec::new(),
            hero_image: String::new(),
            key_benefits: Vec::new(),
            curriculum: Vec::new(),
            facilitator: Facilitator::default(),
            video_testimonial: VideoTestimonial::default(),
            text_testimonials: Vec::new(),
            faq: Vec::new(),
            stats: ProgramStats::default(),
            upcoming_session: UpcomingSession::default(),
            section_visibility: SectionVisibility::default(),
            ai_enhancement: AiEnhancement::default(),
            theme_id: None,
        }
    }
}

impl EventDraft {
    /// A draft with nothing filled in, as presented on wizard entry.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Autosaved wizard snapshot, one per author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub author: String,
    pub current_step: u8,
    pub draft: EventDraft,
    pub saved_at: DateTime<Utc>,
}

impl DraftSnapshot {
    pub fn new(author: &str, current_step: u8, draft: EventDraft) -> Self {
        Self {
            author: author.to_string(),
            current_step,
            draft,
            saved_at: Utc::now(),
        }
    }
}
