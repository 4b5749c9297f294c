//! Errors related to registration, login, and request authentication.

use axum::http::StatusCode;
use thiserror::Error;

/// The primary error type for identity and authorization operations.
///
/// "Not activated" and "disabled" fail distinctly from "invalid
/// token" so clients can tell an unusable account apart from a stale
/// credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authorization token was not provided")]
    TokenMissing,

    #[error("Authorization token is invalid or expired")]
    TokenInvalid,

    #[error("Account is not activated")]
    NotActivated,

    #[error("Account is disabled")]
    Disabled,

    #[error("Operation requires superuser privileges")]
    SuperuserRequired,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Password must be at least 8 characters long")]
    PasswordTooWeak,

    #[error("Password hashing failed")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::TokenMissing | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotActivated | Self::Disabled | Self::SuperuserRequired => StatusCode::FORBIDDEN,
            Self::EmailTaken | Self::PasswordTooWeak => StatusCode::BAD_REQUEST,
            Self::PasswordHash(_) | Self::TokenIssuance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenMissing => "TOKEN_MISSING",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::NotActivated => "ACCOUNT_NOT_ACTIVATED",
            Self::Disabled => "ACCOUNT_DISABLED",
            Self::SuperuserRequired => "SUPERUSER_REQUIRED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::PasswordTooWeak => "PASSWORD_TOO_WEAK",
            Self::PasswordHash(_) => "PASSWORD_HASH_FAILED",
            Self::TokenIssuance(_) => "TOKEN_ISSUANCE_FAILED",
        }
    }
}
