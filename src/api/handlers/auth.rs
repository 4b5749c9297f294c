use std::sync::Arc;

use axum::{Extension, Json, extract::State};

use crate::api::middleware::AuthContext;
use crate::api::response::ApiResponse;
use crate::api::server::AppState;
use crate::api::services::auth::{
    AuthService, LoginRequest, LoginResponse, RegisterRequest, UserResponse,
};
use crate::error::Result;

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<ApiResponse<UserResponse>> {
    let user = AuthService::new(&state).register(request).await?;
    Ok(ApiResponse::Created(user.into()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>> {
    let response = AuthService::new(&state).login(request).await?;
    Ok(ApiResponse::Success(response))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
) -> Result<ApiResponse<UserResponse>> {
    let user = AuthService::new(&state).me(auth.user_id).await?;
    Ok(ApiResponse::Success(user.into()))
}
