//! Speaker entity, linked to events through the `event_speakers`
//! join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "speakers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_speakers::Entity")]
    EventSpeakers,
}

impl Related<super::event_speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSpeakers.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_speakers::Relation::Event.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::event_speakers::Relation::Speaker.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
