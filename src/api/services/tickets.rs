//! The ticket reservation engine.
//!
//! Reservation runs a fixed pipeline: the category is validated (it
//! must exist and its event must still accept reservations), then the
//! one-ticket-per-event rule is checked, and only then is the atomic
//! reserve attempted. Quota enforcement itself lives in the store's
//! `reserve`, which re-checks the count inside the same transaction
//! that inserts the row, so concurrent requests can never oversell a
//! category no matter what the earlier checks observed.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{NaiveDateTime, Utc};
use entity::{events, ticket_categories, tickets};
use rand::RngCore;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{AppError, Result, tickets::TicketError};
use crate::store::{NewTicket, ReserveOutcome, Stores};

/// How many fresh tokens the reserve loop will try before giving up.
pub const MAX_RESERVE_ATTEMPTS: u32 = 3;

/// Random bytes per ticket token, before base64 encoding.
const TOKEN_BYTES: usize = 24;

#[derive(Debug, Deserialize)]
pub struct ReserveTicketRequest {
    pub email: String,
    pub ticket_category_id: i32,
}

pub struct TicketsService {
    stores: Stores,
}

impl TicketsService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Reserves one ticket for `user_id` in the given category.
    pub async fn reserve(
        &self,
        user_id: i32,
        request: ReserveTicketRequest,
    ) -> Result<tickets::Model> {
        let (category, event) = self.validate_category(request.ticket_category_id).await?;
        self.validate_no_existing_reservation(user_id, event.id)
            .await?;

        for attempt in 1..=MAX_RESERVE_ATTEMPTS {
            let ticket = NewTicket {
                email: request.email.clone(),
                token: generate_token(),
                user_id,
                event_id: event.id,
                ticket_category_id: category.id,
            };

            match self.stores.tickets.reserve(ticket, category.quota).await? {
                ReserveOutcome::Created(model) => {
                    info!(
                        ticket_id = model.id,
                        category_id = category.id,
                        event_id = event.id,
                        "ticket reserved"
                    );
                    return Ok(model);
                }
                ReserveOutcome::QuotaExhausted => {
                    return Err(TicketError::NoMoreTicketsLeft.into());
                }
                ReserveOutcome::DuplicateReservation => {
                    // A concurrent request from the same user landed
                    // between the fast-path check and the insert.
                    return Err(TicketError::AlreadyReserved.into());
                }
                ReserveOutcome::TokenCollision => {
                    warn!(attempt, "ticket token collision, regenerating");
                }
            }
        }

        Err(TicketError::ReserveContention {
            attempts: MAX_RESERVE_ATTEMPTS,
        }
        .into())
    }

    /// Resolves the category and checks its event still accepts
    /// reservations.
    async fn validate_category(
        &self,
        category_id: i32,
    ) -> Result<(ticket_categories::Model, events::Model)> {
        let category = self
            .stores
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(TicketError::CategoryNotFound)?;

        let event = self
            .stores
            .events
            .find_by_id(category.event_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Ticket category {} references missing event {}",
                    category.id, category.event_id
                ))
            })?;

        if !event.is_active || is_expired(&event, Utc::now().naive_utc()) {
            return Err(TicketError::ReservationNotAvailable.into());
        }

        Ok((category, event))
    }

    /// Fast-path duplicate check. The unique index on
    /// (user_id, event_id) still catches races past this point.
    async fn validate_no_existing_reservation(&self, user_id: i32, event_id: i32) -> Result<()> {
        if self
            .stores
            .tickets
            .find_by_user_and_event(user_id, event_id)
            .await?
            .is_some()
        {
            return Err(TicketError::AlreadyReserved.into());
        }
        Ok(())
    }

    /// Deletes the user's ticket, freeing the category quota.
    pub async fn resign(&self, ticket_id: i32, user_id: i32) -> Result<tickets::Model> {
        let ticket = self.get_owned(ticket_id, user_id).await?;
        self.stores.tickets.delete(ticket.id).await?;
        info!(
            ticket_id = ticket.id,
            category_id = ticket.ticket_category_id,
            "ticket resigned"
        );
        Ok(ticket)
    }

    /// Fetches a ticket the user owns. A ticket owned by someone else
    /// reads the same as a missing one, so ids cannot be probed for
    /// other users' reservations.
    pub async fn get_owned(&self, ticket_id: i32, user_id: i32) -> Result<tickets::Model> {
        let ticket = self
            .stores
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or(TicketError::NotFound)?;
        if ticket.user_id != user_id {
            return Err(TicketError::NotFound.into());
        }
        Ok(ticket)
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        event_id: Option<i32>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<tickets::Model>> {
        self.stores
            .tickets
            .list_by_user(user_id, event_id, skip, limit)
            .await
    }

    /// Looks a ticket up by its token, e.g. for entrance validation.
    pub async fn find_by_token(&self, token: &str) -> Result<tickets::Model> {
        self.stores
            .tickets
            .find_by_token(token)
            .await?
            .ok_or_else(|| TicketError::NotFound.into())
    }
}

/// An event stops accepting reservations strictly after its start
/// instant; a reservation at exactly `held_at` still succeeds.
fn is_expired(event: &events::Model, now: NaiveDateTime) -> bool {
    now > event.held_at
}

/// 24 random bytes, base64url without padding. 32 characters, safe to
/// embed in URLs and QR codes.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{MemoryStore, TicketStore};

    fn event(id: i32, is_active: bool, held_at: chrono::NaiveDateTime) -> events::Model {
        events::Model {
            id,
            name: format!("Event {id}"),
            slug: format!("event-{id}"),
            description: None,
            held_at,
            is_active,
            organizer_id: 1,
            event_type_id: 1,
            location_id: 1,
            created_by_id: 1,
        }
    }

    fn category(id: i32, event_id: i32, quota: i32) -> ticket_categories::Model {
        ticket_categories::Model {
            id,
            name: format!("Category {id}"),
            quota,
            event_id,
        }
    }

    fn upcoming() -> chrono::NaiveDateTime {
        Utc::now().naive_utc() + Duration::days(7)
    }

    fn service_with_event(quota: i32) -> (TicketsService, Arc<MemoryStore>) {
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_category(category(1, 1, quota));
        (TicketsService::new(stores), store)
    }

    fn reserve_request(category_id: i32) -> ReserveTicketRequest {
        ReserveTicketRequest {
            email: "guest@example.com".into(),
            ticket_category_id: category_id,
        }
    }

    fn ticket_error(err: AppError) -> TicketError {
        match err {
            AppError::Ticket(e) => e,
            other => panic!("expected ticket error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reserve_creates_ticket_with_url_safe_token() {
        let (service, store) = service_with_event(5);

        let ticket = service.reserve(7, reserve_request(1)).await.unwrap();

        assert_eq!(ticket.user_id, 7);
        assert_eq!(ticket.event_id, 1);
        assert_eq!(ticket.ticket_category_id, 1);
        assert_eq!(ticket.token.len(), 32);
        assert!(
            ticket
                .token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(store.ticket_count(1), 1);
    }

    #[tokio::test]
    async fn reserve_unknown_category_is_not_found() {
        let (service, _store) = service_with_event(5);

        let err = service.reserve(7, reserve_request(99)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::CategoryNotFound);
    }

    #[tokio::test]
    async fn reserve_rejects_inactive_event() {
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, false, upcoming()));
        store.put_category(category(1, 1, 5));
        let service = TicketsService::new(stores);

        let err = service.reserve(7, reserve_request(1)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::ReservationNotAvailable);
    }

    #[test]
    fn event_is_reservable_at_the_exact_start_instant() {
        let start = Utc::now().naive_utc();
        let event = event(1, true, start);

        assert!(!is_expired(&event, start - Duration::hours(1)));
        assert!(!is_expired(&event, start));
        assert!(is_expired(&event, start + Duration::nanoseconds(1)));
        assert!(is_expired(&event, start + Duration::hours(1)));
    }

    #[tokio::test]
    async fn reserve_rejects_past_event() {
        let (stores, store) = Stores::in_memory();
        let past = Utc::now().naive_utc() - Duration::hours(1);
        store.put_event(event(1, true, past));
        store.put_category(category(1, 1, 5));
        let service = TicketsService::new(stores);

        let err = service.reserve(7, reserve_request(1)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::ReservationNotAvailable);
    }

    #[tokio::test]
    async fn category_check_runs_before_duplicate_check() {
        // A user already holding a ticket still sees the category
        // error first when the category is gone.
        let (service, _store) = service_with_event(5);
        service.reserve(7, reserve_request(1)).await.unwrap();

        let err = service.reserve(7, reserve_request(42)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::CategoryNotFound);
    }

    #[tokio::test]
    async fn reserve_twice_same_event_is_rejected() {
        let (service, store) = service_with_event(5);

        service.reserve(7, reserve_request(1)).await.unwrap();
        let err = service.reserve(7, reserve_request(1)).await.unwrap_err();

        assert_eq!(ticket_error(err), TicketError::AlreadyReserved);
        assert_eq!(store.ticket_count(1), 1);
    }

    #[tokio::test]
    async fn reserve_other_category_same_event_is_rejected() {
        let (service, store) = service_with_event(5);
        store.put_category(category(2, 1, 5));

        service.reserve(7, reserve_request(1)).await.unwrap();
        let err = service.reserve(7, reserve_request(2)).await.unwrap_err();

        assert_eq!(ticket_error(err), TicketError::AlreadyReserved);
    }

    #[tokio::test]
    async fn reserve_same_user_different_events_succeeds() {
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_event(event(2, true, upcoming()));
        store.put_category(category(1, 1, 5));
        store.put_category(category(2, 2, 5));
        let service = TicketsService::new(stores);

        service.reserve(7, reserve_request(1)).await.unwrap();
        service.reserve(7, reserve_request(2)).await.unwrap();

        assert_eq!(store.ticket_count(1), 1);
        assert_eq!(store.ticket_count(2), 1);
    }

    #[tokio::test]
    async fn quota_exhaustion_is_reported() {
        let (service, store) = service_with_event(2);

        service.reserve(1, reserve_request(1)).await.unwrap();
        service.reserve(2, reserve_request(1)).await.unwrap();
        let err = service.reserve(3, reserve_request(1)).await.unwrap_err();

        assert_eq!(ticket_error(err), TicketError::NoMoreTicketsLeft);
        assert_eq!(store.ticket_count(1), 2);
    }

    #[tokio::test]
    async fn zero_quota_category_never_issues() {
        let (service, _store) = service_with_event(0);

        let err = service.reserve(1, reserve_request(1)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::NoMoreTicketsLeft);
    }

    #[tokio::test]
    async fn resign_frees_quota_for_another_user() {
        let (service, store) = service_with_event(1);

        let ticket = service.reserve(1, reserve_request(1)).await.unwrap();
        let err = service.reserve(2, reserve_request(1)).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::NoMoreTicketsLeft);

        service.resign(ticket.id, 1).await.unwrap();
        assert_eq!(store.ticket_count(1), 0);

        service.reserve(2, reserve_request(1)).await.unwrap();
        assert_eq!(store.ticket_count(1), 1);
    }

    #[tokio::test]
    async fn resign_then_reserve_again_same_user() {
        let (service, _store) = service_with_event(5);

        let ticket = service.reserve(7, reserve_request(1)).await.unwrap();
        service.resign(ticket.id, 7).await.unwrap();
        service.reserve(7, reserve_request(1)).await.unwrap();
    }

    #[tokio::test]
    async fn resign_foreign_ticket_reads_as_missing() {
        let (service, store) = service_with_event(5);

        let ticket = service.reserve(1, reserve_request(1)).await.unwrap();
        let err = service.resign(ticket.id, 2).await.unwrap_err();

        assert_eq!(ticket_error(err), TicketError::NotFound);
        assert_eq!(store.ticket_count(1), 1);
    }

    #[tokio::test]
    async fn get_owned_hides_foreign_tickets() {
        let (service, _store) = service_with_event(5);
        let ticket = service.reserve(1, reserve_request(1)).await.unwrap();

        assert_eq!(service.get_owned(ticket.id, 1).await.unwrap().id, ticket.id);
        let err = service.get_owned(ticket.id, 2).await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::NotFound);
    }

    #[tokio::test]
    async fn list_for_user_filters_by_event() {
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_event(event(2, true, upcoming()));
        store.put_category(category(1, 1, 5));
        store.put_category(category(2, 2, 5));
        let service = TicketsService::new(stores);

        service.reserve(7, reserve_request(1)).await.unwrap();
        service.reserve(7, reserve_request(2)).await.unwrap();
        service.reserve(8, reserve_request(1)).await.unwrap();

        let all = service.list_for_user(7, None, 0, 100).await.unwrap();
        assert_eq!(all.len(), 2);

        let scoped = service.list_for_user(7, Some(2), 0, 100).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].event_id, 2);
    }

    #[tokio::test]
    async fn find_by_token_resolves_ticket() {
        let (service, _store) = service_with_event(5);
        let ticket = service.reserve(7, reserve_request(1)).await.unwrap();

        let found = service.find_by_token(&ticket.token).await.unwrap();
        assert_eq!(found.id, ticket.id);

        let err = service.find_by_token("no-such-token").await.unwrap_err();
        assert_eq!(ticket_error(err), TicketError::NotFound);
    }

    #[tokio::test]
    async fn tokens_are_unique_across_reservations() {
        let (service, store) = service_with_event(50);

        for user_id in 1..=50 {
            let mut request = reserve_request(1);
            request.email = format!("user{user_id}@example.com");
            service.reserve(user_id, request).await.unwrap();
        }

        let mut tokens = store.all_tokens();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 50);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reserves_never_exceed_quota() {
        let quota = 5;
        let contenders = 32;
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_category(category(1, 1, quota));
        let service = Arc::new(TicketsService::new(stores));

        let mut handles = Vec::new();
        for user_id in 1..=contenders {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.reserve(user_id, reserve_request(1)).await
            }));
        }

        let mut created = 0;
        let mut exhausted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => {
                    assert_eq!(ticket_error(err), TicketError::NoMoreTicketsLeft);
                    exhausted += 1;
                }
            }
        }

        assert_eq!(created, quota as usize);
        assert_eq!(exhausted, contenders as usize - quota as usize);
        assert_eq!(store.ticket_count(1), quota as usize);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reserves_same_user_issue_one_ticket_per_event() {
        // Attempts are spread across two categories of one event: the
        // rule is keyed on the event, not the category.
        let (stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_category(category(1, 1, 100));
        store.put_category(category(2, 1, 100));
        let service = Arc::new(TicketsService::new(stores));

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            let category_id = 1 + i % 2;
            handles.push(tokio::spawn(async move {
                service.reserve(7, reserve_request(category_id)).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert_eq!(ticket_error(err), TicketError::AlreadyReserved),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.ticket_count(1) + store.ticket_count(2), 1);
    }

    /// Delegates to the in-memory store but reports a token collision
    /// for the first `failures` reserve calls.
    struct CollidingStore {
        inner: Arc<MemoryStore>,
        remaining: AtomicU32,
    }

    #[async_trait]
    impl TicketStore for CollidingStore {
        async fn find_by_id(&self, ticket_id: i32) -> crate::error::Result<Option<tickets::Model>> {
            self.inner.find_by_id(ticket_id).await
        }

        async fn find_by_token(&self, token: &str) -> crate::error::Result<Option<tickets::Model>> {
            self.inner.find_by_token(token).await
        }

        async fn find_by_user_and_event(
            &self,
            user_id: i32,
            event_id: i32,
        ) -> crate::error::Result<Option<tickets::Model>> {
            self.inner.find_by_user_and_event(user_id, event_id).await
        }

        async fn list_by_user(
            &self,
            user_id: i32,
            event_id: Option<i32>,
            skip: u64,
            limit: u64,
        ) -> crate::error::Result<Vec<tickets::Model>> {
            self.inner.list_by_user(user_id, event_id, skip, limit).await
        }

        async fn reserve(
            &self,
            ticket: NewTicket,
            quota: i32,
        ) -> crate::error::Result<ReserveOutcome> {
            if self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Ok(ReserveOutcome::TokenCollision);
            }
            self.inner.reserve(ticket, quota).await
        }

        async fn delete(&self, ticket_id: i32) -> crate::error::Result<()> {
            self.inner.delete(ticket_id).await
        }
    }

    fn colliding_service(failures: u32) -> (TicketsService, Arc<MemoryStore>) {
        let (mut stores, store) = Stores::in_memory();
        store.put_event(event(1, true, upcoming()));
        store.put_category(category(1, 1, 5));
        stores.tickets = Arc::new(CollidingStore {
            inner: store.clone(),
            remaining: AtomicU32::new(failures),
        });
        (TicketsService::new(stores), store)
    }

    #[tokio::test]
    async fn token_collision_retries_with_fresh_token() {
        let (service, store) = colliding_service(MAX_RESERVE_ATTEMPTS - 1);

        service.reserve(7, reserve_request(1)).await.unwrap();
        assert_eq!(store.ticket_count(1), 1);
    }

    #[tokio::test]
    async fn persistent_collisions_exhaust_retry_budget() {
        let (service, store) = colliding_service(MAX_RESERVE_ATTEMPTS);

        let err = service.reserve(7, reserve_request(1)).await.unwrap_err();
        assert_eq!(
            ticket_error(err),
            TicketError::ReserveContention {
                attempts: MAX_RESERVE_ATTEMPTS
            }
        );
        assert_eq!(store.ticket_count(1), 0);
    }

    #[test]
    fn generated_tokens_do_not_repeat() {
        let mut tokens: Vec<String> = (0..256).map(|_| generate_token()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 256);
    }
}
