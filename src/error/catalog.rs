//! Errors raised by the catalog read/write surface.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Event not found")]
    EventNotFound,

    #[error("Organizer not found")]
    OrganizerNotFound,

    #[error("Event type not found")]
    EventTypeNotFound,

    #[error("Location not found")]
    LocationNotFound,

    #[error("Speaker not found")]
    SpeakerNotFound,

    #[error("Slug is already in use")]
    SlugTaken,

    #[error("Ticket category name is already in use")]
    CategoryNameTaken,

    #[error("Quota must be a positive integer")]
    InvalidQuota,
}

impl CatalogError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EventNotFound
            | Self::OrganizerNotFound
            | Self::EventTypeNotFound
            | Self::LocationNotFound
            | Self::SpeakerNotFound => StatusCode::NOT_FOUND,
            Self::SlugTaken | Self::CategoryNameTaken | Self::InvalidQuota => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::OrganizerNotFound => "ORGANIZER_NOT_FOUND",
            Self::EventTypeNotFound => "EVENT_TYPE_NOT_FOUND",
            Self::LocationNotFound => "LOCATION_NOT_FOUND",
            Self::SpeakerNotFound => "SPEAKER_NOT_FOUND",
            Self::SlugTaken => "SLUG_TAKEN",
            Self::CategoryNameTaken => "CATEGORY_NAME_TAKEN",
            Self::InvalidQuota => "INVALID_QUOTA",
        }
    }
}
