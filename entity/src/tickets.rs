//! Ticket entity, one row per reservation.
//!
//! `event_id` is denormalized from the owning category so the
//! one-ticket-per-(user, event) rule can live in a unique index
//! instead of an application-level check alone. `token` is the
//! unguessable handle used for presented-ticket lookup.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    #[sea_orm(unique)]
    pub token: String,
    pub created_at: DateTime,
    pub user_id: i32,
    pub event_id: i32,
    pub ticket_category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::ticket_categories::Entity",
        from = "Column::TicketCategoryId",
        to = "super::ticket_categories::Column::Id"
    )]
    TicketCategory,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::ticket_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
