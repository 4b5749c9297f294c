//! In-memory fake stores for tests.
//!
//! One mutex guards all state, so `reserve` is atomic exactly the way
//! the production transaction is, which makes the fake suitable for
//! exercising the engine's concurrency behavior.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use entity::{events, ticket_categories, tickets};

use super::{EventStore, NewTicket, ReserveOutcome, TicketCategoryStore, TicketStore};
use crate::error::{AppError, Result};

#[derive(Default)]
struct MemoryState {
    events: HashMap<i32, events::Model>,
    categories: HashMap<i32, ticket_categories::Model>,
    tickets: HashMap<i32, tickets::Model>,
    next_ticket_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_event(&self, event: events::Model) {
        let mut state = self.lock();
        state.events.insert(event.id, event);
    }

    pub fn put_category(&self, category: ticket_categories::Model) {
        let mut state = self.lock();
        state.categories.insert(category.id, category);
    }

    pub fn ticket_count(&self, category_id: i32) -> usize {
        self.lock()
            .tickets
            .values()
            .filter(|t| t.ticket_category_id == category_id)
            .count()
    }

    pub fn all_tokens(&self) -> Vec<String> {
        self.lock().tickets.values().map(|t| t.token.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn find_by_id(&self, event_id: i32) -> Result<Option<events::Model>> {
        Ok(self.lock().events.get(&event_id).cloned())
    }
}

#[async_trait]
impl TicketCategoryStore for MemoryStore {
    async fn find_by_id(&self, category_id: i32) -> Result<Option<ticket_categories::Model>> {
        Ok(self.lock().categories.get(&category_id).cloned())
    }

    async fn list_by_event(
        &self,
        event_id: i32,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(ticket_categories::Model, i64)>> {
        let state = self.lock();
        let mut categories: Vec<_> = state
            .categories
            .values()
            .filter(|c| c.event_id == event_id)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.id);

        Ok(categories
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|category| {
                let used = state
                    .tickets
                    .values()
                    .filter(|t| t.ticket_category_id == category.id)
                    .count() as i64;
                let left = i64::from(category.quota) - used;
                (category, left)
            })
            .collect())
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn find_by_id(&self, ticket_id: i32) -> Result<Option<tickets::Model>> {
        Ok(self.lock().tickets.get(&ticket_id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<tickets::Model>> {
        Ok(self
            .lock()
            .tickets
            .values()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn find_by_user_and_event(
        &self,
        user_id: i32,
        event_id: i32,
    ) -> Result<Option<tickets::Model>> {
        Ok(self
            .lock()
            .tickets
            .values()
            .find(|t| t.user_id == user_id && t.event_id == event_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: i32,
        event_id: Option<i32>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<tickets::Model>> {
        let state = self.lock();
        let mut tickets: Vec<_> = state
            .tickets
            .values()
            .filter(|t| t.user_id == user_id)
            .filter(|t| event_id.is_none_or(|id| t.event_id == id))
            .cloned()
            .collect();
        tickets.sort_by_key(|t| t.id);

        Ok(tickets
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn reserve(&self, ticket: NewTicket, quota: i32) -> Result<ReserveOutcome> {
        let mut state = self.lock();

        let used = state
            .tickets
            .values()
            .filter(|t| t.ticket_category_id == ticket.ticket_category_id)
            .count() as i64;
        if used >= i64::from(quota.max(0)) {
            return Ok(ReserveOutcome::QuotaExhausted);
        }

        if state
            .tickets
            .values()
            .any(|t| t.user_id == ticket.user_id && t.event_id == ticket.event_id)
        {
            return Ok(ReserveOutcome::DuplicateReservation);
        }

        if state.tickets.values().any(|t| t.token == ticket.token) {
            return Ok(ReserveOutcome::TokenCollision);
        }

        state.next_ticket_id += 1;
        let id = state.next_ticket_id;
        let model = tickets::Model {
            id,
            email: ticket.email,
            token: ticket.token,
            created_at: Utc::now().naive_utc(),
            user_id: ticket.user_id,
            event_id: ticket.event_id,
            ticket_category_id: ticket.ticket_category_id,
        };
        state.tickets.insert(id, model.clone());

        Ok(ReserveOutcome::Created(model))
    }

    async fn delete(&self, ticket_id: i32) -> Result<()> {
        let mut state = self.lock();
        state
            .tickets
            .remove(&ticket_id)
            .map(|_| ())
            .ok_or_else(|| AppError::database("Ticket row missing on delete"))
    }
}
