//! Authentication middleware.
//!
//! Extracts the bearer JWT, validates it, loads the account, and
//! injects the authenticated principal into request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sea_orm::EntityTrait;

use crate::api::server::AppState;
use crate::auth::extract_bearer_token;
use crate::error::{AppError, auth::AuthError};

/// The authenticated principal for the current request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i32,
    pub is_superuser: bool,
}

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::TokenMissing)?;

    let token = extract_bearer_token(auth_header).ok_or(AuthError::TokenMissing)?;

    let claims = state.jwt.validate_token(token)?;
    let user_id = claims.user_id()?;

    // The token may outlive the account state it was issued for, so
    // activation and disabled flags are checked on every request.
    let user = entity::users::Entity::find_by_id(user_id)
        .one(state.db.as_ref())
        .await?
        .ok_or(AuthError::TokenInvalid)?;

    if !user.is_activated {
        return Err(AuthError::NotActivated.into());
    }
    if user.is_disabled {
        return Err(AuthError::Disabled.into());
    }

    request.extensions_mut().insert(Arc::new(AuthContext {
        user_id: user.id,
        is_superuser: user.is_superuser,
    }));

    Ok(next.run(request).await)
}
