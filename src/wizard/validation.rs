//! Validation engine
//!
//! Pure step validation over a draft. Returns a field to message map; an
//! empty map means the step may be left.

use std::collections::BTreeMap;

use crate::models::draft::EventDraft;

use super::registry::SectionRegistry;

/// Validate a wizard step. Steps 2, 4 and 5 carry no blocking rules.
pub fn validate_step(
    step: u8,
    draft: &EventDraft,
    registry: &SectionRegistry,
) -> BTreeMap<String, String> {
    match step {
        1 => validate_basic_details(draft),
        3 => validate_section_details(draft, registry),
        _ => BTreeMap::new(),
    }
}

/// Step 1: unconditionally required basics
fn validate_basic_details(draft: &EventDraft) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if draft.title.trim().is_empty() {
        errors.insert("title".to_string(), "Title is required".to_string());
    }
    if draft.short_description.trim().is_empty() {
        errors.insert(
            "shortDescription".to_string(),
            "Short description is required".to_string(),
        );
    }
    if draft.detailed_description.trim().is_empty() {
        errors.insert(
            "detailedDescription".to_string(),
            "Detailed description is required".to_string(),
        );
    }
    if draft.category.trim().is_empty() {
        errors.insert("category".to_string(), "Category is required".to_string());
    }
    if draft.start_date.is_none() {
        errors.insert("startDate".to_string(), "Start date is required".to_string());
    }
    if draft.duration.trim().is_empty() {
        errors.insert("duration".to_string(), "Duration is required".to_string());
    }
    if draft.price.trim().is_empty() {
        errors.insert("price".to_string(), "Price is required".to_string());
    }
    if draft.max_participants <= 0 {
        errors.insert(
            "maxParticipants".to_string(),
            "Maximum participants must be greater than 0".to_string(),
        );
    }

    errors
}

/// Step 3: mandatory-if-enabled section rules. A disabled section never
/// contributes to the error map, whatever its content.
fn validate_section_details(
    draft: &EventDraft,
    registry: &SectionRegistry,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    for requirement in registry.requirements() {
        if !draft.section_visibility.is_enabled(requirement.section_key) {
            continue;
        }
        if !requirement.is_satisfied(draft) {
            errors.insert(
                requirement.field_key.to_string(),
                requirement.message.to_string(),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::FaqItem;
    use chrono::Utc;

    fn valid_basics() -> EventDraft {
        let mut draft = EventDraft::empty();
        draft.title = "Mindful Leadership Mastery".to_string();
        draft.short_description = "Lead with presence".to_string();
        draft.detailed_description = "An eight week program".to_string();
        draft.category = "Leadership".to_string();
        draft.start_date = Some(Utc::now());
        draft.duration = "8 weeks".to_string();
        draft.price = "$299".to_string();
        draft
    }

    #[test]
    fn test_step_one_reports_all_missing_basics() {
        let registry = SectionRegistry::standard();
        let errors = validate_step(1, &EventDraft::empty(), &registry);
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("shortDescription"));
        assert!(errors.contains_key("startDate"));
        assert!(errors.contains_key("price"));
    }

    #[test]
    fn test_step_one_passes_with_basics() {
        let registry = SectionRegistry::standard();
        assert!(validate_step(1, &valid_basics(), &registry).is_empty());
    }

    #[test]
    fn test_payload_with_only_required_fields_passes_step_one() {
        let registry = SectionRegistry::standard();
        let draft: EventDraft = serde_json::from_str(
            r#"{
                "title": "Mindful Leadership Mastery",
                "shortDescription": "Lead with presence",
                "detailedDescription": "An eight week program",
                "category": "Leadership",
                "startDate": "2026-10-01T00:00:00Z",
                "duration": "8 weeks",
                "price": "$299"
            }"#,
        )
        .unwrap();

        assert!(validate_step(1, &draft, &registry).is_empty());
    }

    #[test]
    fn test_disabled_section_never_errors() {
        let registry = SectionRegistry::standard();
        let mut draft = valid_basics();
        draft.section_visibility.set_enabled("faqSection", false);
        draft.faq.clear();
        assert!(!validate_step(3, &draft, &registry).contains_key("faq"));
    }

    #[test]
    fn test_enabled_empty_faq_errors_until_filled() {
        let registry = SectionRegistry::standard();
        let mut draft = valid_basics();
        draft.section_visibility.set_enabled("faqSection", true);

        let errors = validate_step(3, &draft, &registry);
        assert_eq!(
            errors.get("faq").map(String::as_str),
            Some("At least one FAQ is required")
        );

        draft.faq.push(FaqItem {
            question: "Q".to_string(),
            answer: "A".to_string(),
        });
        assert!(!validate_step(3, &draft, &registry).contains_key("faq"));
    }

    #[test]
    fn test_other_steps_have_no_rules() {
        let registry = SectionRegistry::standard();
        let draft = EventDraft::empty();
        for step in [2u8, 4, 5] {
            assert!(validate_step(step, &draft, &registry).is_empty());
        }
    }
}
