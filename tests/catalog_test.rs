//! Catalog reads and the superuser-only write surface.

mod common;

use ticketline::api::middleware::AuthContext;
use ticketline::api::services::catalog::{CatalogService, CreateEventRequest};
use ticketline::api::services::ticket_categories::{
    CreateTicketCategoryRequest, TicketCategoriesService,
};
use ticketline::error::AppError;
use ticketline::error::auth::AuthError;
use ticketline::error::catalog::CatalogError;

use common::{next_week, register_superuser, register_user, seed_category, seed_event, setup_state};

fn auth(user_id: i32, is_superuser: bool) -> AuthContext {
    AuthContext {
        user_id,
        is_superuser,
    }
}

fn catalog_error(err: AppError) -> CatalogError {
    match err {
        AppError::Catalog(e) => e,
        other => panic!("expected catalog error, got {other:?}"),
    }
}

#[tokio::test]
async fn events_are_listed_and_resolvable_by_id_and_slug() {
    let state = setup_state().await;
    let user = register_user(&state, "alice@example.com").await;
    let event = seed_event(&state, "rustconf", user.id).await;
    seed_event(&state, "devdays", user.id).await;

    let service = CatalogService::new(&state);

    let (items, total) = service.list_events(0, 100).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let by_id = service.get_event(event.id).await.unwrap();
    assert_eq!(by_id.slug, "rustconf");

    let by_slug = service.get_event_by_slug("rustconf").await.unwrap();
    assert_eq!(by_slug.id, event.id);

    let err = service.get_event_by_slug("no-such-event").await.unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::EventNotFound);
}

#[tokio::test]
async fn event_list_pages_with_skip_and_limit() {
    let state = setup_state().await;
    let user = register_user(&state, "alice@example.com").await;
    for i in 0..5 {
        seed_event(&state, &format!("event-{i}"), user.id).await;
    }

    let service = CatalogService::new(&state);
    let (items, total) = service.list_events(2, 2).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn superuser_creates_event_with_fresh_slug() {
    let state = setup_state().await;
    let admin = register_superuser(&state, "admin@example.com").await;
    let existing = seed_event(&state, "rustconf", admin.id).await;

    let service = CatalogService::new(&state);
    let request = CreateEventRequest {
        name: "DevDays".to_string(),
        slug: "devdays".to_string(),
        description: Some("Two days of talks".to_string()),
        held_at: next_week(),
        is_active: true,
        organizer_id: existing.organizer_id,
        event_type_id: existing.event_type_id,
        location_id: existing.location_id,
    };

    let event = service.create_event(&auth(admin.id, true), request).await.unwrap();
    assert_eq!(event.slug, "devdays");
    assert_eq!(event.created_by_id, admin.id);
}

#[tokio::test]
async fn event_creation_requires_superuser_and_valid_references() {
    let state = setup_state().await;
    let admin = register_superuser(&state, "admin@example.com").await;
    let user = register_user(&state, "alice@example.com").await;
    let existing = seed_event(&state, "rustconf", admin.id).await;

    let service = CatalogService::new(&state);
    let request = |slug: &str, organizer_id: i32| CreateEventRequest {
        name: "DevDays".to_string(),
        slug: slug.to_string(),
        description: None,
        held_at: next_week(),
        is_active: true,
        organizer_id,
        event_type_id: existing.event_type_id,
        location_id: existing.location_id,
    };

    let err = service
        .create_event(&auth(user.id, false), request("devdays", existing.organizer_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::SuperuserRequired)));

    let err = service
        .create_event(&auth(admin.id, true), request("rustconf", existing.organizer_id))
        .await
        .unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::SlugTaken);

    let err = service
        .create_event(&auth(admin.id, true), request("devdays", 424242))
        .await
        .unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::OrganizerNotFound);
}

#[tokio::test]
async fn reference_data_is_listed_and_fetched() {
    let state = setup_state().await;
    let user = register_user(&state, "alice@example.com").await;
    let event = seed_event(&state, "rustconf", user.id).await;

    let service = CatalogService::new(&state);

    let (organizers, total) = service.list_organizers(0, 100).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(service.get_organizer(organizers[0].id).await.unwrap().id, event.organizer_id);

    let (event_types, _) = service.list_event_types(0, 100).await.unwrap();
    assert_eq!(event_types.len(), 1);
    assert_eq!(
        service.get_event_type(event_types[0].id).await.unwrap().slug,
        "conference-rustconf"
    );

    let (locations, _) = service.list_locations(0, 100).await.unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(service.get_location(locations[0].id).await.unwrap().city, "Springfield");

    let err = service.get_speaker(1).await.unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::SpeakerNotFound);
}

#[tokio::test]
async fn ticket_category_creation_validates_input() {
    let state = setup_state().await;
    let admin = register_superuser(&state, "admin@example.com").await;
    let user = register_user(&state, "alice@example.com").await;
    let event = seed_event(&state, "rustconf", admin.id).await;
    seed_category(&state, event.id, "Regular", 10).await;

    let service = TicketCategoriesService::new(&state);
    let request = |name: &str, quota: i32, event_id: i32| CreateTicketCategoryRequest {
        name: name.to_string(),
        quota,
        event_id,
    };

    let err = service
        .create(&auth(user.id, false), request("VIP", 5, event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::SuperuserRequired)));

    let err = service
        .create(&auth(admin.id, true), request("VIP", 0, event.id))
        .await
        .unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::InvalidQuota);

    let err = service
        .create(&auth(admin.id, true), request("Regular", 5, event.id))
        .await
        .unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::CategoryNameTaken);

    let err = service
        .create(&auth(admin.id, true), request("VIP", 5, 424242))
        .await
        .unwrap_err();
    assert_eq!(catalog_error(err), CatalogError::EventNotFound);

    let category = service
        .create(&auth(admin.id, true), request("VIP", 5, event.id))
        .await
        .unwrap();
    assert_eq!(category.quota, 5);

    let rows = service.list_by_event(event.id, 0, 100).await.unwrap();
    assert_eq!(rows.len(), 2);
}
