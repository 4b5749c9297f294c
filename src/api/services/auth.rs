//! Registration, login, and account lookup.

use chrono::{NaiveDateTime, Utc};
use entity::users;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::server::AppState;
use crate::auth::{hash_password, verify_password};
use crate::error::{Result, auth::AuthError};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account. Never exposes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub is_activated: bool,
    pub is_superuser: bool,
    pub joined_at: NaiveDateTime,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_activated: user.is_activated,
            is_superuser: user.is_superuser,
            joined_at: user.joined_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers a new account. Accounts are activated immediately;
    /// there is no email confirmation step.
    pub async fn register(&self, request: RegisterRequest) -> Result<users::Model> {
        let email = request.email.trim().to_lowercase();

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(self.state.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            email: Set(email),
            password_hash: Set(password_hash),
            is_activated: Set(true),
            is_disabled: Set(false),
            is_superuser: Set(false),
            joined_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown email and wrong password fail identically so the
    /// endpoint does not reveal which emails are registered.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let email = request.email.trim().to_lowercase();

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(self.state.db.as_ref())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_activated {
            return Err(AuthError::NotActivated.into());
        }
        if user.is_disabled {
            return Err(AuthError::Disabled.into());
        }

        let access_token = self.state.jwt.issue_token(user.id, user.is_superuser)?;

        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse {
            access_token,
            token_type: "bearer",
            expires_in: self.state.jwt.expires_in_seconds(),
            user: user.into(),
        })
    }

    /// The authenticated user's own account.
    pub async fn me(&self, user_id: i32) -> Result<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(self.state.db.as_ref())
            .await?
            .ok_or_else(|| AuthError::TokenInvalid.into())
    }
}
