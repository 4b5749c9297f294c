use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use entity::ticket_categories;
use serde::Deserialize;

use crate::api::middleware::AuthContext;
use crate::api::response::ApiResponse;
use crate::api::server::AppState;
use crate::api::services::PageQuery;
use crate::api::services::ticket_categories::{
    CreateTicketCategoryRequest, TicketCategoriesService, TicketCategoryAvailability,
};
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct TicketCategoryQuery {
    pub event_id: i32,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_by_event(
    State(state): State<AppState>,
    Query(query): Query<TicketCategoryQuery>,
) -> Result<ApiResponse<Vec<TicketCategoryAvailability>>> {
    let page = PageQuery {
        skip: query.skip,
        limit: query.limit,
    };
    let categories = TicketCategoriesService::new(&state)
        .list_by_event(query.event_id, page.skip(), page.limit())
        .await?;
    Ok(ApiResponse::Success(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<CreateTicketCategoryRequest>,
) -> Result<ApiResponse<ticket_categories::Model>> {
    let category = TicketCategoriesService::new(&state)
        .create(&auth, request)
        .await?;
    Ok(ApiResponse::Created(category))
}
