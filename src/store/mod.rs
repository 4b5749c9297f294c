//! Persistence interfaces for the reservation engine.
//!
//! Each store is a small capability set passed to services explicitly
//! instead of being resolved dynamically. The production
//! implementation is backed by Sea-ORM; an in-memory fake backs the
//! engine tests.

pub mod memory;
pub mod sea_orm;

use std::sync::Arc;

use ::sea_orm::DatabaseConnection;
use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryStore;
pub use self::sea_orm::{SeaOrmEventStore, SeaOrmTicketCategoryStore, SeaOrmTicketStore};

/// Payload for a new ticket row. The token is generated by the engine,
/// `event_id` comes from the validated category.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub email: String,
    pub token: String,
    pub user_id: i32,
    pub event_id: i32,
    pub ticket_category_id: i32,
}

/// Result of an atomic reservation attempt.
///
/// The three failure outcomes are recoverable conditions the engine
/// maps to client errors or retries; store-level failures surface as
/// `Err` instead.
#[derive(Debug)]
pub enum ReserveOutcome {
    Created(entity::tickets::Model),
    /// The category already holds `quota` tickets.
    QuotaExhausted,
    /// The user already holds a ticket for this event.
    DuplicateReservation,
    /// The generated token is already taken; retry with a fresh one.
    TokenCollision,
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_by_id(&self, event_id: i32) -> Result<Option<entity::events::Model>>;
}

#[async_trait]
pub trait TicketCategoryStore: Send + Sync {
    async fn find_by_id(&self, category_id: i32)
    -> Result<Option<entity::ticket_categories::Model>>;

    /// Categories of an event paired with `tickets_left`, always
    /// freshly computed as `quota - count(tickets)`.
    async fn list_by_event(
        &self,
        event_id: i32,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(entity::ticket_categories::Model, i64)>>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn find_by_id(&self, ticket_id: i32) -> Result<Option<entity::tickets::Model>>;

    async fn find_by_token(&self, token: &str) -> Result<Option<entity::tickets::Model>>;

    async fn find_by_user_and_event(
        &self,
        user_id: i32,
        event_id: i32,
    ) -> Result<Option<entity::tickets::Model>>;

    async fn list_by_user(
        &self,
        user_id: i32,
        event_id: Option<i32>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<entity::tickets::Model>>;

    /// Atomically re-checks the category count against `quota` and
    /// inserts the ticket. The count-compare-insert sequence must be
    /// linearizable against concurrent attempts for the same category.
    async fn reserve(&self, ticket: NewTicket, quota: i32) -> Result<ReserveOutcome>;

    async fn delete(&self, ticket_id: i32) -> Result<()>;
}

/// Bundle of store handles shared by services.
#[derive(Clone)]
pub struct Stores {
    pub events: Arc<dyn EventStore>,
    pub categories: Arc<dyn TicketCategoryStore>,
    pub tickets: Arc<dyn TicketStore>,
}

impl Stores {
    /// Production stores over one database connection.
    pub fn sea_orm(db: Arc<DatabaseConnection>) -> Self {
        Self {
            events: Arc::new(SeaOrmEventStore::new(db.clone())),
            categories: Arc::new(SeaOrmTicketCategoryStore::new(db.clone())),
            tickets: Arc::new(SeaOrmTicketStore::new(db)),
        }
    }

    /// In-memory fakes sharing one state, for tests.
    pub fn in_memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let stores = Self {
            events: store.clone(),
            categories: store.clone(),
            tickets: store.clone(),
        };
        (stores, store)
    }
}
