use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use entity::{events, speakers};

use crate::api::middleware::AuthContext;
use crate::api::response::{ApiResponse, Pagination};
use crate::api::server::AppState;
use crate::api::services::PageQuery;
use crate::api::services::catalog::{CatalogService, CreateEventRequest};
use crate::error::Result;

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<events::Model>> {
    let (skip, limit) = (query.skip(), query.limit());
    let (items, total) = CatalogService::new(&state).list_events(skip, limit).await?;
    Ok(ApiResponse::Paginated(items, Pagination { skip, limit, total }))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<ApiResponse<events::Model>> {
    let event = CatalogService::new(&state).get_event(event_id).await?;
    Ok(ApiResponse::Success(event))
}

pub async fn get_event_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<events::Model>> {
    let event = CatalogService::new(&state).get_event_by_slug(&slug).await?;
    Ok(ApiResponse::Success(event))
}

pub async fn list_event_speakers(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<ApiResponse<Vec<speakers::Model>>> {
    let speakers = CatalogService::new(&state)
        .list_event_speakers(event_id)
        .await?;
    Ok(ApiResponse::Success(speakers))
}

pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<CreateEventRequest>,
) -> Result<ApiResponse<events::Model>> {
    let event = CatalogService::new(&state).create_event(&auth, request).await?;
    Ok(ApiResponse::Created(event))
}
