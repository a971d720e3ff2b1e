//! Test data helpers for creating drafts, requests, and settings

use chrono::{Duration, Utc};
use ZenFlow::config::Settings;
use ZenFlow::models::draft::EventDraft;
use ZenFlow::models::event::{CurriculumWeek, FaqItem};
use ZenFlow::models::registration::CreateRegistrationRequest;

/// A draft that passes both gated wizard steps
pub fn valid_draft(title: &str) -> EventDraft {
    let mut draft = EventDraft::empty();
    draft.title = title.to_string();
    draft.short_description = "Lead with presence and clarity".to_string();
    draft.detailed_description = "An eight week guided program for mindful leaders".to_string();
    draft.category = "Leadership".to_string();
    draft.start_date = Some(Utc::now() + Duration::days(30));
    draft.duration = "8 weeks".to_string();
    draft.price = "$299".to_string();
    draft.max_participants = 3;
    draft
}

/// A valid draft with the FAQ section enabled and populated
pub fn draft_with_faq(title: &str) -> EventDraft {
    let mut draft = valid_draft(title);
    draft.section_visibility.set_enabled("faqSection", true);
    draft.faq.push(FaqItem {
        question: "Do I need prior experience?".to_string(),
        answer: "No, the program starts from the basics.".to_string(),
    });
    draft
}

/// A valid draft with the curriculum section enabled and populated
pub fn draft_with_curriculum(title: &str) -> EventDraft {
    let mut draft = valid_draft(title);
    draft.section_visibility.set_enabled("curriculumSection", true);
    draft.curriculum.push(CurriculumWeek {
        week: "1".to_string(),
        title: "Foundations".to_string(),
        description: "Breath and attention".to_string(),
        lessons: vec!["Body scan".to_string()],
    });
    draft
}

/// A complete registration form
pub fn registration_request(full_name: &str, email: &str) -> CreateRegistrationRequest {
    CreateRegistrationRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: Some("+1 555 0100".to_string()),
        country: Some("India".to_string()),
        state: Some("Kerala".to_string()),
        city: Some("Kochi".to_string()),
        batch: Some("Morning".to_string()),
        language: Some("English".to_string()),
        receive_info: Some(true),
        agree_terms: true,
        notes: None,
    }
}

/// Settings suitable for service-level tests
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.server.public_base_url = "http://localhost:3000".to_string();
    settings
}
