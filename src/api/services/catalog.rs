//! Catalog reads and superuser-only event creation.
//!
//! Organizers, event types, locations, and speakers are reference
//! data: list and get only. Events additionally support creation.

use chrono::NaiveDateTime;
use entity::{event_types, events, locations, organizers, speakers};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use tracing::info;

use crate::api::middleware::AuthContext;
use crate::api::server::AppState;
use crate::error::{Result, auth::AuthError, catalog::CatalogError};

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub held_at: NaiveDateTime,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    pub organizer_id: i32,
    pub event_type_id: i32,
    pub location_id: i32,
}

fn default_is_active() -> bool {
    true
}

pub struct CatalogService<'a> {
    state: &'a AppState,
}

impl<'a> CatalogService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn list_events(&self, skip: u64, limit: u64) -> Result<(Vec<events::Model>, u64)> {
        let db = self.state.db.as_ref();
        let total = events::Entity::find().count(db).await?;
        let items = events::Entity::find()
            .order_by_asc(events::Column::HeldAt)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_event(&self, event_id: i32) -> Result<events::Model> {
        events::Entity::find_by_id(event_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::EventNotFound.into())
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<events::Model> {
        events::Entity::find()
            .filter(events::Column::Slug.eq(slug))
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::EventNotFound.into())
    }

    /// Creates an event. Superuser only; referenced catalog rows must
    /// exist and the slug must be free.
    pub async fn create_event(
        &self,
        auth: &AuthContext,
        request: CreateEventRequest,
    ) -> Result<events::Model> {
        if !auth.is_superuser {
            return Err(AuthError::SuperuserRequired.into());
        }

        let db = self.state.db.as_ref();

        organizers::Entity::find_by_id(request.organizer_id)
            .one(db)
            .await?
            .ok_or(CatalogError::OrganizerNotFound)?;
        event_types::Entity::find_by_id(request.event_type_id)
            .one(db)
            .await?
            .ok_or(CatalogError::EventTypeNotFound)?;
        locations::Entity::find_by_id(request.location_id)
            .one(db)
            .await?
            .ok_or(CatalogError::LocationNotFound)?;

        let slug_taken = events::Entity::find()
            .filter(events::Column::Slug.eq(&request.slug))
            .one(db)
            .await?
            .is_some();
        if slug_taken {
            return Err(CatalogError::SlugTaken.into());
        }

        let event = events::ActiveModel {
            name: Set(request.name),
            slug: Set(request.slug),
            description: Set(request.description),
            held_at: Set(request.held_at),
            is_active: Set(request.is_active),
            organizer_id: Set(request.organizer_id),
            event_type_id: Set(request.event_type_id),
            location_id: Set(request.location_id),
            created_by_id: Set(auth.user_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(event_id = event.id, slug = %event.slug, "event created");
        Ok(event)
    }

    pub async fn list_organizers(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<organizers::Model>, u64)> {
        let db = self.state.db.as_ref();
        let total = organizers::Entity::find().count(db).await?;
        let items = organizers::Entity::find()
            .order_by_asc(organizers::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_organizer(&self, organizer_id: i32) -> Result<organizers::Model> {
        organizers::Entity::find_by_id(organizer_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::OrganizerNotFound.into())
    }

    pub async fn list_event_types(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<event_types::Model>, u64)> {
        let db = self.state.db.as_ref();
        let total = event_types::Entity::find().count(db).await?;
        let items = event_types::Entity::find()
            .order_by_asc(event_types::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_event_type(&self, event_type_id: i32) -> Result<event_types::Model> {
        event_types::Entity::find_by_id(event_type_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::EventTypeNotFound.into())
    }

    pub async fn list_locations(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<locations::Model>, u64)> {
        let db = self.state.db.as_ref();
        let total = locations::Entity::find().count(db).await?;
        let items = locations::Entity::find()
            .order_by_asc(locations::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_location(&self, location_id: i32) -> Result<locations::Model> {
        locations::Entity::find_by_id(location_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::LocationNotFound.into())
    }

    pub async fn list_speakers(&self, skip: u64, limit: u64) -> Result<(Vec<speakers::Model>, u64)> {
        let db = self.state.db.as_ref();
        let total = speakers::Entity::find().count(db).await?;
        let items = speakers::Entity::find()
            .order_by_asc(speakers::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_speaker(&self, speaker_id: i32) -> Result<speakers::Model> {
        speakers::Entity::find_by_id(speaker_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| CatalogError::SpeakerNotFound.into())
    }

    /// Speakers appearing at an event, through the join table.
    pub async fn list_event_speakers(&self, event_id: i32) -> Result<Vec<speakers::Model>> {
        let db = self.state.db.as_ref();
        let event = self.get_event(event_id).await?;
        let speakers = event
            .find_related(speakers::Entity)
            .order_by_asc(speakers::Column::Id)
            .all(db)
            .await?;
        Ok(speakers)
    }
}
