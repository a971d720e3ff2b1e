//! Event lifecycle integration tests
//!
//! Database-backed tests for create, lookup, update, publish, and delete.

mod helpers;

use serial_test::serial;

use helpers::test_data::{
    draft_with_curriculum, draft_with_faq, registration_request, test_settings, valid_draft,
};
use helpers::TestDatabase;
use ZenFlow::database::{EventRepository, RegistrationRepository};
use ZenFlow::models::event::{EventFilter, EventLookup, ListParams};
use ZenFlow::services::{EventService, RegistrationService};
use ZenFlow::ZenFlowError;

fn event_service(db: &TestDatabase) -> EventService {
    EventService::new(EventRepository::new(db.pool.clone()), test_settings())
}

fn registration_service(db: &TestDatabase) -> RegistrationService {
    RegistrationService::new(
        RegistrationRepository::new(db.pool.clone()),
        EventRepository::new(db.pool.clone()),
    )
}

#[tokio::test]
#[serial]
async fn test_create_and_resolve_by_both_paths() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let event = events
        .create_from_draft(&draft_with_faq("Mindful Leadership Mastery!!"))
        .await
        .expect("create failed");

    assert_eq!(event.slug, "mindful-leadership-mastery");
    assert_eq!(event.status, "draft");
    assert_eq!(event.participants, 0);
    assert_eq!(event.progress, 0);
    assert_eq!(
        event.registration_url.as_deref(),
        Some("http://localhost:3000/mindful-leadership-mastery/register")
    );

    let by_id = events.get(&EventLookup::ById(event.id)).await.unwrap();
    let by_slug = events
        .get(&EventLookup::BySlug(event.slug.clone()))
        .await
        .unwrap();
    assert_eq!(by_id.id, by_slug.id);
}

#[tokio::test]
#[serial]
async fn test_structured_sections_persist() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let event = events
        .create_from_draft(&draft_with_curriculum("Structured Program"))
        .await
        .expect("create failed");

    assert_eq!(event.curriculum.0.len(), 1);
    assert_eq!(event.curriculum.0[0].title, "Foundations");
    assert!(event.section_visibility.0.curriculum_section);

    // Sections left empty are stored as absent, not as empty objects
    assert!(event.facilitator.is_none());
    assert!(event.stats.is_none());
}

#[tokio::test]
#[serial]
async fn test_duplicate_title_is_rejected() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    events
        .create_from_draft(&valid_draft("Evening Calm"))
        .await
        .expect("first create failed");

    let result = events.create_from_draft(&valid_draft("Evening Calm")).await;
    match result {
        Err(ZenFlowError::DuplicateTitle { slug }) => assert_eq!(slug, "evening-calm"),
        other => panic!("expected duplicate title error, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn test_invalid_draft_is_rejected_server_side() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    // FAQ section enabled but empty bypassing the wizard
    let mut draft = valid_draft("Shortcut Attempt");
    draft.section_visibility.set_enabled("faqSection", true);

    match events.create_from_draft(&draft).await {
        Err(ZenFlowError::Validation { errors }) => assert!(errors.contains_key("faq")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn test_publish_requires_a_theme() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let event = events
        .create_from_draft(&valid_draft("Deep Rest Workshop"))
        .await
        .unwrap();

    // No theme, no publish; the event stays a draft
    match events.publish(event.id, "  ").await {
        Err(ZenFlowError::Validation { errors }) => assert!(errors.contains_key("themeId")),
        other => panic!("expected validation error, got {other:?}"),
    }
    let unchanged = events.get(&EventLookup::ById(event.id)).await.unwrap();
    assert_eq!(unchanged.status, "draft");

    let published = events.publish(event.id, "forest").await.unwrap();
    assert!(published.is_published());
    assert_eq!(published.theme_id.as_deref(), Some("forest"));

    // Re-publishing overwrites the theme and nothing else
    let republished = events.publish(event.id, "ocean").await.unwrap();
    assert_eq!(republished.status, "published");
    assert_eq!(republished.theme_id.as_deref(), Some("ocean"));
    assert_eq!(republished.participants, published.participants);
}

#[tokio::test]
#[serial]
async fn test_title_update_rederives_slug() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let event = events
        .create_from_draft(&valid_draft("Original Name"))
        .await
        .unwrap();
    assert_eq!(event.slug, "original-name");

    let request = ZenFlow::models::event::UpdateEventRequest {
        title: Some("Renamed Retreat!!".to_string()),
        ..Default::default()
    };
    let updated = events.update(event.id, &request).await.unwrap();
    assert_eq!(updated.slug, "renamed-retreat");

    // The old slug no longer resolves
    let stale = events
        .get(&EventLookup::BySlug("original-name".to_string()))
        .await;
    assert!(matches!(stale, Err(ZenFlowError::EventNotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_public_listing_defaults_to_published() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let mut yoga_draft = valid_draft("Still A Draft");
    yoga_draft.category = "Yoga".to_string();
    let draft_event = events.create_from_draft(&yoga_draft).await.unwrap();
    let to_publish = events
        .create_from_draft(&valid_draft("Going Live"))
        .await
        .unwrap();
    events.publish(to_publish.id, "forest").await.unwrap();

    let (public, pagination) = events
        .list(EventFilter::default(), &ListParams::default(), true)
        .await
        .unwrap();
    assert_eq!(pagination.total, 1);
    assert_eq!(public[0].id, to_publish.id);

    let (admin, pagination) = events
        .list(EventFilter::default(), &ListParams::default(), false)
        .await
        .unwrap();
    assert_eq!(pagination.total, 2);
    assert!(admin.iter().any(|e| e.id == draft_event.id));

    // Filter categories come from publicly visible events only
    let categories = events.categories().await.unwrap();
    assert_eq!(categories, vec!["Leadership".to_string()]);
}

#[tokio::test]
#[serial]
async fn test_unpublished_event_is_hidden_from_public_detail() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let event = events
        .create_from_draft(&valid_draft("Hidden Draft"))
        .await
        .unwrap();

    let result = events.get_public(&EventLookup::ById(event.id)).await;
    assert!(matches!(result, Err(ZenFlowError::EventNotFound { .. })));

    // Administrative access still resolves
    assert!(events.get(&EventLookup::ById(event.id)).await.is_ok());
}

#[tokio::test]
#[serial]
async fn test_delete_cascades_registrations() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);
    let registrations = registration_service(&db);

    let event = events
        .create_from_draft(&valid_draft("Cascade Check"))
        .await
        .unwrap();
    events.publish(event.id, "forest").await.unwrap();

    registrations
        .register(event.id, &registration_request("Maya Chen", "maya@example.com"))
        .await
        .unwrap();
    assert_eq!(db.count_records("registrations").await.unwrap(), 1);

    events.delete(event.id).await.unwrap();
    assert_eq!(db.count_records("registrations").await.unwrap(), 0);

    let missing = events.delete(event.id).await;
    assert!(matches!(missing, Err(ZenFlowError::EventNotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_featured_and_upcoming_listings() {
    let db = TestDatabase::new().await.expect("test database");
    let events = event_service(&db);

    let mut draft = valid_draft("Featured Flow");
    draft.featured = true;
    let featured = events.create_from_draft(&draft).await.unwrap();
    events.publish(featured.id, "forest").await.unwrap();

    let plain = events
        .create_from_draft(&valid_draft("Plain Program"))
        .await
        .unwrap();
    events.publish(plain.id, "forest").await.unwrap();

    let featured_list = events.featured(10).await.unwrap();
    assert_eq!(featured_list.len(), 1);
    assert_eq!(featured_list[0].id, featured.id);

    // Both start dates are in the future
    let upcoming = events.upcoming(10).await.unwrap();
    assert_eq!(upcoming.len(), 2);
}
