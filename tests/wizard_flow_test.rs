//! End-to-end wizard flow tests
//!
//! These exercise the controller, registry, and validation engine together
//! against the in-memory draft store; no external services are involved.

mod helpers;

use std::time::Duration;

use helpers::test_data::valid_draft;
use ZenFlow::config::Settings;
use ZenFlow::models::event::FaqItem;
use ZenFlow::wizard::{DraftStore, MemoryDraftStore, StepOutcome, WizardController};
use ZenFlow::ZenFlowError;

async fn fresh_wizard(store: MemoryDraftStore) -> WizardController<MemoryDraftStore> {
    WizardController::hydrate("admin", store, Duration::from_millis(5))
        .await
        .expect("hydrate failed")
}

#[tokio::test]
async fn test_faq_section_gates_step_three() {
    let mut wizard = fresh_wizard(MemoryDraftStore::new()).await;

    wizard.update(|draft| {
        *draft = valid_draft("Evening Calm Intensive");
        draft.section_visibility.set_enabled("faqSection", true);
    });

    // Steps 1 and 2 pass
    assert!(matches!(wizard.advance(), StepOutcome::Advanced(2)));
    assert!(matches!(wizard.advance(), StepOutcome::Advanced(3)));

    // Step 3 blocks on the enabled but empty FAQ section
    match wizard.advance() {
        StepOutcome::Rejected(errors) => {
            assert_eq!(
                errors.get("faq").map(String::as_str),
                Some("At least one FAQ is required")
            );
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(wizard.current_step(), 3);

    // Filling the section clears the error
    wizard.update(|draft| {
        draft.faq.push(FaqItem {
            question: "When do sessions run?".to_string(),
            answer: "Evenings, twice a week.".to_string(),
        });
    });
    assert!(matches!(wizard.advance(), StepOutcome::Advanced(4)));
}

#[tokio::test]
async fn test_disabling_section_clears_step_three_errors() {
    let mut wizard = fresh_wizard(MemoryDraftStore::new()).await;

    wizard.update(|draft| {
        *draft = valid_draft("Morning Flow Series");
        draft.section_visibility.set_enabled("statsCard", true);
    });
    wizard.advance();
    wizard.advance();

    assert!(matches!(wizard.advance(), StepOutcome::Rejected(_)));

    // Toggling the section off removes its contribution entirely
    wizard.update(|draft| draft.section_visibility.set_enabled("statsCard", false));
    assert!(matches!(wizard.advance(), StepOutcome::Advanced(4)));
}

#[tokio::test]
async fn test_submission_jumps_back_to_invalidated_basics() {
    let mut wizard = fresh_wizard(MemoryDraftStore::new()).await;

    wizard.update(|draft| *draft = valid_draft("Deep Rest Workshop"));
    for _ in 0..4 {
        wizard.advance();
    }
    assert_eq!(wizard.current_step(), 5);

    // Invalidate a step-1 field through back-navigation style editing
    wizard.update(|draft| draft.title.clear());

    match wizard.validate_submission() {
        Err(ZenFlowError::Validation { errors }) => {
            assert!(errors.contains_key("title"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(wizard.current_step(), 1);
}

#[tokio::test]
async fn test_submission_jumps_back_to_section_details() {
    let mut wizard = fresh_wizard(MemoryDraftStore::new()).await;

    wizard.update(|draft| *draft = valid_draft("Deep Rest Workshop"));
    for _ in 0..4 {
        wizard.advance();
    }

    // Enable a section with no content after passing step 3
    wizard.update(|draft| draft.section_visibility.set_enabled("facilitatorCard", true));

    match wizard.validate_submission() {
        Err(ZenFlowError::Validation { errors }) => {
            assert!(errors.contains_key("facilitator"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(wizard.current_step(), 3);
}

#[tokio::test]
async fn test_settings_drive_autosave_debounce() {
    let store = MemoryDraftStore::new();
    let mut settings = Settings::default();
    settings.drafts.autosave_debounce_ms = 5;

    let mut wizard = WizardController::from_settings("admin", store.clone(), &settings)
        .await
        .expect("hydrate failed");
    wizard.update(|draft| draft.title = "Configured Cadence".to_string());

    // The configured window is 5ms, so the snapshot lands well within 50ms
    tokio::time::sleep(Duration::from_millis(50)).await;
    let snapshot = store.load("admin").await.unwrap().expect("no snapshot");
    assert_eq!(snapshot.draft.title, "Configured Cadence");
    assert_eq!(snapshot.current_step, 1);
}

#[tokio::test]
async fn test_wizard_resumes_from_autosaved_snapshot() {
    let store = MemoryDraftStore::new();

    {
        let mut wizard = fresh_wizard(store.clone()).await;
        wizard.update(|draft| *draft = valid_draft("Breathwork Basics"));
        wizard.advance();
        wizard.advance();

        // Let the debounced autosave land
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let resumed = fresh_wizard(store).await;
    assert_eq!(resumed.current_step(), 3);
    assert_eq!(resumed.draft().title, "Breathwork Basics");
}
