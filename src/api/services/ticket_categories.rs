//! Ticket category listing and superuser-only creation.

use entity::{events, ticket_categories};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::AuthContext;
use crate::api::server::AppState;
use crate::error::{Result, auth::AuthError, catalog::CatalogError};

#[derive(Debug, Deserialize)]
pub struct CreateTicketCategoryRequest {
    pub name: String,
    pub quota: i32,
    pub event_id: i32,
}

/// A category together with its remaining capacity, always computed
/// fresh from the ticket count.
#[derive(Debug, Serialize)]
pub struct TicketCategoryAvailability {
    #[serde(flatten)]
    pub category: ticket_categories::Model,
    pub tickets_left: i64,
}

pub struct TicketCategoriesService<'a> {
    state: &'a AppState,
}

impl<'a> TicketCategoriesService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Categories of one event with `tickets_left` per category.
    /// Resigned tickets show up here immediately.
    pub async fn list_by_event(
        &self,
        event_id: i32,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<TicketCategoryAvailability>> {
        let rows = self
            .state
            .stores
            .categories
            .list_by_event(event_id, skip, limit)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, tickets_left)| TicketCategoryAvailability {
                category,
                tickets_left,
            })
            .collect())
    }

    /// Creates a category. Superuser only; the event must exist, the
    /// name must be free, and the quota must be positive.
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateTicketCategoryRequest,
    ) -> Result<ticket_categories::Model> {
        if !auth.is_superuser {
            return Err(AuthError::SuperuserRequired.into());
        }
        if request.quota <= 0 {
            return Err(CatalogError::InvalidQuota.into());
        }

        let db = self.state.db.as_ref();

        events::Entity::find_by_id(request.event_id)
            .one(db)
            .await?
            .ok_or(CatalogError::EventNotFound)?;

        let name_taken = ticket_categories::Entity::find()
            .filter(ticket_categories::Column::Name.eq(&request.name))
            .one(db)
            .await?
            .is_some();
        if name_taken {
            return Err(CatalogError::CategoryNameTaken.into());
        }

        let category = ticket_categories::ActiveModel {
            name: Set(request.name),
            quota: Set(request.quota),
            event_id: Set(request.event_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            category_id = category.id,
            event_id = category.event_id,
            quota = category.quota,
            "ticket category created"
        );
        Ok(category)
    }
}
