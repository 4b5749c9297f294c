//! Read-only catalog reference data: organizers, event types,
//! locations, speakers.

use axum::extract::{Path, Query, State};
use entity::{event_types, locations, organizers, speakers};

use crate::api::response::{ApiResponse, Pagination};
use crate::api::server::AppState;
use crate::api::services::PageQuery;
use crate::api::services::catalog::CatalogService;
use crate::error::Result;

pub async fn list_organizers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<organizers::Model>> {
    let (skip, limit) = (query.skip(), query.limit());
    let (items, total) = CatalogService::new(&state)
        .list_organizers(skip, limit)
        .await?;
    Ok(ApiResponse::Paginated(items, Pagination { skip, limit, total }))
}

pub async fn get_organizer(
    State(state): State<AppState>,
    Path(organizer_id): Path<i32>,
) -> Result<ApiResponse<organizers::Model>> {
    let organizer = CatalogService::new(&state).get_organizer(organizer_id).await?;
    Ok(ApiResponse::Success(organizer))
}

pub async fn list_event_types(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<event_types::Model>> {
    let (skip, limit) = (query.skip(), query.limit());
    let (items, total) = CatalogService::new(&state)
        .list_event_types(skip, limit)
        .await?;
    Ok(ApiResponse::Paginated(items, Pagination { skip, limit, total }))
}

pub async fn get_event_type(
    State(state): State<AppState>,
    Path(event_type_id): Path<i32>,
) -> Result<ApiResponse<event_types::Model>> {
    let event_type = CatalogService::new(&state)
        .get_event_type(event_type_id)
        .await?;
    Ok(ApiResponse::Success(event_type))
}

pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<locations::Model>> {
    let (skip, limit) = (query.skip(), query.limit());
    let (items, total) = CatalogService::new(&state)
        .list_locations(skip, limit)
        .await?;
    Ok(ApiResponse::Paginated(items, Pagination { skip, limit, total }))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
) -> Result<ApiResponse<locations::Model>> {
    let location = CatalogService::new(&state).get_location(location_id).await?;
    Ok(ApiResponse::Success(location))
}

pub async fn list_speakers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<speakers::Model>> {
    let (skip, limit) = (query.skip(), query.limit());
    let (items, total) = CatalogService::new(&state)
        .list_speakers(skip, limit)
        .await?;
    Ok(ApiResponse::Paginated(items, Pagination { skip, limit, total }))
}

pub async fn get_speaker(
    State(state): State<AppState>,
    Path(speaker_id): Path<i32>,
) -> Result<ApiResponse<speakers::Model>> {
    let speaker = CatalogService::new(&state).get_speaker(speaker_id).await?;
    Ok(ApiResponse::Success(speaker))
}
