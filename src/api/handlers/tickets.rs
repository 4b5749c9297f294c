use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDateTime;
use entity::tickets;
use serde::{Deserialize, Serialize};

use crate::api::middleware::AuthContext;
use crate::api::response::ApiResponse;
use crate::api::server::AppState;
use crate::api::services::PageQuery;
use crate::api::services::tickets::{ReserveTicketRequest, TicketsService};
use crate::error::Result;

/// Public view of a ticket. The owner id stays internal.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: i32,
    pub email: String,
    pub token: String,
    pub created_at: NaiveDateTime,
    pub event_id: i32,
    pub ticket_category_id: i32,
}

impl From<tickets::Model> for TicketResponse {
    fn from(ticket: tickets::Model) -> Self {
        Self {
            id: ticket.id,
            email: ticket.email,
            token: ticket.token,
            created_at: ticket.created_at,
            event_id: ticket.event_id,
            ticket_category_id: ticket.ticket_category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub event_id: Option<i32>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn reserve_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<ReserveTicketRequest>,
) -> Result<ApiResponse<TicketResponse>> {
    let ticket = TicketsService::new(state.stores.clone())
        .reserve(auth.user_id, request)
        .await?;
    Ok(ApiResponse::Created(ticket.into()))
}

pub async fn list_my_tickets(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Query(query): Query<TicketListQuery>,
) -> Result<ApiResponse<Vec<TicketResponse>>> {
    let page = PageQuery {
        skip: query.skip,
        limit: query.limit,
    };
    let tickets = TicketsService::new(state.stores.clone())
        .list_for_user(auth.user_id, query.event_id, page.skip(), page.limit())
        .await?;
    Ok(ApiResponse::Success(
        tickets.into_iter().map(Into::into).collect(),
    ))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Path(ticket_id): Path<i32>,
) -> Result<ApiResponse<TicketResponse>> {
    let ticket = TicketsService::new(state.stores.clone())
        .get_owned(ticket_id, auth.user_id)
        .await?;
    Ok(ApiResponse::Success(ticket.into()))
}

pub async fn resign_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Path(ticket_id): Path<i32>,
) -> Result<ApiResponse<TicketResponse>> {
    let ticket = TicketsService::new(state.stores.clone())
        .resign(ticket_id, auth.user_id)
        .await?;
    Ok(ApiResponse::SuccessWithMessage(
        ticket.into(),
        "Ticket resigned".to_string(),
    ))
}

/// Token lookup for entrance validation; intentionally
/// unauthenticated, the token itself is the credential.
pub async fn lookup_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiResponse<TicketResponse>> {
    let ticket = TicketsService::new(state.stores.clone())
        .find_by_token(&token)
        .await?;
    Ok(ApiResponse::Success(ticket.into()))
}
