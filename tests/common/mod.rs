//! Shared fixtures for integration tests. Every test gets a fresh
//! in-memory SQLite database with all migrations applied.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use entity::{event_types, events, locations, organizers, ticket_categories, users};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, Set};
use ticketline::AppConfig;
use ticketline::api::AppState;
use ticketline::api::services::auth::{AuthService, RegisterRequest};

pub async fn setup_state() -> AppState {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    AppState::new(Arc::new(AppConfig::default()), Arc::new(db))
}

pub async fn register_user(state: &AppState, email: &str) -> users::Model {
    AuthService::new(state)
        .register(RegisterRequest {
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .expect("register user")
}

pub async fn register_superuser(state: &AppState, email: &str) -> users::Model {
    let user = register_user(state, email).await;
    let mut active: users::ActiveModel = user.into();
    active.is_superuser = Set(true);
    active.update(state.db.as_ref()).await.expect("promote user")
}

pub fn next_week() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::days(7)
}

/// Seeds the reference rows an event needs, then the event itself.
pub async fn seed_event(state: &AppState, slug: &str, created_by_id: i32) -> events::Model {
    seed_event_at(state, slug, created_by_id, next_week(), true).await
}

pub async fn seed_event_at(
    state: &AppState,
    slug: &str,
    created_by_id: i32,
    held_at: NaiveDateTime,
    is_active: bool,
) -> events::Model {
    let db = state.db.as_ref();

    let organizer = organizers::ActiveModel {
        name: Set(format!("Organizer for {slug}")),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert organizer");

    let event_type = event_types::ActiveModel {
        parent_type_id: Set(None),
        name: Set("Conference".to_string()),
        slug: Set(format!("conference-{slug}")),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert event type");

    let location = locations::ActiveModel {
        name: Set("Main Hall".to_string()),
        city: Set("Springfield".to_string()),
        slug: Set(format!("main-hall-{slug}")),
        latitude: Set(51.1),
        longitude: Set(17.03),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert location");

    events::ActiveModel {
        name: Set(format!("Event {slug}")),
        slug: Set(slug.to_string()),
        description: Set(None),
        held_at: Set(held_at),
        is_active: Set(is_active),
        organizer_id: Set(organizer.id),
        event_type_id: Set(event_type.id),
        location_id: Set(location.id),
        created_by_id: Set(created_by_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert event")
}

pub async fn seed_category(
    state: &AppState,
    event_id: i32,
    name: &str,
    quota: i32,
) -> ticket_categories::Model {
    ticket_categories::ActiveModel {
        name: Set(name.to_string()),
        quota: Set(quota),
        event_id: Set(event_id),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert ticket category")
}
