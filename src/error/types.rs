//! Central application error type.

use axum::http::StatusCode;
use thiserror::Error;

use super::auth::AuthError;
use super::catalog::CatalogError;
use super::tickets::TicketError;

/// The application-wide error type.
///
/// Domain errors keep their own enums and carry their HTTP mapping;
/// infrastructure failures collapse into the message + source shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// HTTP status the error maps to at the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => err.status_code(),
            Self::Ticket(err) => err.status_code(),
            Self::Catalog(err) => err.status_code(),
            Self::Context { source, .. } => source.status_code(),
            Self::Config { .. }
            | Self::Database { .. }
            | Self::Internal { .. }
            | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(err) => err.error_code(),
            Self::Ticket(err) => err.error_code(),
            Self::Catalog(err) => err.error_code(),
            Self::Context { source, .. } => source.error_code(),
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("Failed to parse configuration file", err)
    }
}
