//! Event entity, the reservable unit.
//!
//! An event is reservable only while `is_active` is true and `held_at`
//! has not passed; the reservation engine reads both fields.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub held_at: DateTime,
    pub is_active: bool,
    pub organizer_id: i32,
    pub event_type_id: i32,
    pub location_id: i32,
    pub created_by_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizers::Entity",
        from = "Column::OrganizerId",
        to = "super::organizers::Column::Id"
    )]
    Organizer,
    #[sea_orm(
        belongs_to = "super::event_types::Entity",
        from = "Column::EventTypeId",
        to = "super::event_types::Column::Id"
    )]
    EventType,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::ticket_categories::Entity")]
    TicketCategories,
    #[sea_orm(has_many = "super::event_speakers::Entity")]
    EventSpeakers,
}

impl Related<super::organizers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::event_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventType.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::ticket_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketCategories.def()
    }
}

impl Related<super::speakers::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_speakers::Relation::Speaker.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::event_speakers::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
