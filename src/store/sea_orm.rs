//! Sea-ORM backed store implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use entity::{
    events, ticket_categories, ticket_categories::Entity as TicketCategories, tickets,
    tickets::Entity as Tickets,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::{EventStore, NewTicket, ReserveOutcome, TicketCategoryStore, TicketStore};
use crate::error::Result;

pub struct SeaOrmEventStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEventStore {
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventStore for SeaOrmEventStore {
    async fn find_by_id(&self, event_id: i32) -> Result<Option<events::Model>> {
        Ok(events::Entity::find_by_id(event_id)
            .one(self.db.as_ref())
            .await?)
    }
}

pub struct SeaOrmTicketCategoryStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTicketCategoryStore {
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketCategoryStore for SeaOrmTicketCategoryStore {
    async fn find_by_id(&self, category_id: i32) -> Result<Option<ticket_categories::Model>> {
        Ok(TicketCategories::find_by_id(category_id)
            .one(self.db.as_ref())
            .await?)
    }

    async fn list_by_event(
        &self,
        event_id: i32,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(ticket_categories::Model, i64)>> {
        let categories = TicketCategories::find()
            .filter(ticket_categories::Column::EventId.eq(event_id))
            .order_by_asc(ticket_categories::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let used = Tickets::find()
                .filter(tickets::Column::TicketCategoryId.eq(category.id))
                .count(self.db.as_ref())
                .await?;
            let tickets_left = i64::from(category.quota) - used as i64;
            result.push((category, tickets_left));
        }

        Ok(result)
    }
}

pub struct SeaOrmTicketStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTicketStore {
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketStore for SeaOrmTicketStore {
    async fn find_by_id(&self, ticket_id: i32) -> Result<Option<tickets::Model>> {
        Ok(Tickets::find_by_id(ticket_id).one(self.db.as_ref()).await?)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<tickets::Model>> {
        Ok(Tickets::find()
            .filter(tickets::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await?)
    }

    async fn find_by_user_and_event(
        &self,
        user_id: i32,
        event_id: i32,
    ) -> Result<Option<tickets::Model>> {
        Ok(Tickets::find()
            .filter(tickets::Column::UserId.eq(user_id))
            .filter(tickets::Column::EventId.eq(event_id))
            .one(self.db.as_ref())
            .await?)
    }

    async fn list_by_user(
        &self,
        user_id: i32,
        event_id: Option<i32>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<tickets::Model>> {
        let mut select = Tickets::find().filter(tickets::Column::UserId.eq(user_id));

        if let Some(event_id) = event_id {
            select = select.filter(tickets::Column::EventId.eq(event_id));
        }

        Ok(select
            .order_by_asc(tickets::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db.as_ref())
            .await?)
    }

    async fn reserve(&self, ticket: NewTicket, quota: i32) -> Result<ReserveOutcome> {
        // The count re-check and the insert share one transaction so
        // the check-then-act sequence is atomic against concurrent
        // attempts for the same category. The unique indexes on token
        // and (user_id, event_id) are the durable backstop: a race
        // lost at commit time comes back as a classified violation,
        // never as an extra row.
        let txn = self.db.begin().await?;

        let count = Tickets::find()
            .filter(tickets::Column::TicketCategoryId.eq(ticket.ticket_category_id))
            .count(&txn)
            .await?;

        if count >= u64::try_from(quota.max(0)).unwrap_or(0) {
            txn.rollback().await?;
            return Ok(ReserveOutcome::QuotaExhausted);
        }

        let active = tickets::ActiveModel {
            email: Set(ticket.email),
            token: Set(ticket.token),
            created_at: Set(Utc::now().naive_utc()),
            user_id: Set(ticket.user_id),
            event_id: Set(ticket.event_id),
            ticket_category_id: Set(ticket.ticket_category_id),
            ..Default::default()
        };

        match active.insert(&txn).await {
            Ok(model) => {
                txn.commit().await?;
                Ok(ReserveOutcome::Created(model))
            }
            Err(err) => {
                txn.rollback().await?;
                match classify_unique_violation(&err) {
                    Some(outcome) => Ok(outcome),
                    None => Err(err.into()),
                }
            }
        }
    }

    async fn delete(&self, ticket_id: i32) -> Result<()> {
        Tickets::delete_by_id(ticket_id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

/// Maps a unique-constraint violation on insert to the reservation
/// outcome it represents.
fn classify_unique_violation(err: &DbErr) -> Option<ReserveOutcome> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("token") {
                Some(ReserveOutcome::TokenCollision)
            } else if message.contains("user_id") || message.contains("event_id") {
                Some(ReserveOutcome::DuplicateReservation)
            } else {
                None
            }
        }
        _ => None,
    }
}
