//! Errors raised by the ticket reservation engine.
//!
//! Every variant is a client-facing failure with a stable code and an
//! HTTP status; the engine aborts the reservation pipeline as soon as
//! one is raised, so no partial reservation is ever persisted.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("Ticket category not found")]
    CategoryNotFound,

    #[error("Ticket reservation is not available for this event")]
    ReservationNotAvailable,

    #[error("User can reserve only one ticket per event")]
    AlreadyReserved,

    #[error("Could not reserve ticket - there are no tickets left")]
    NoMoreTicketsLeft,

    #[error("Ticket not found")]
    NotFound,

    /// The reserve loop exhausted its retry budget without landing a
    /// unique token. Signals systemic contention, not client fault.
    #[error("Could not reserve ticket after {attempts} attempts")]
    ReserveContention { attempts: u32 },
}

impl TicketError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CategoryNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::ReservationNotAvailable | Self::AlreadyReserved | Self::NoMoreTicketsLeft => {
                StatusCode::BAD_REQUEST
            }
            Self::ReserveContention { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CategoryNotFound => "TICKET_CATEGORY_NOT_FOUND",
            Self::ReservationNotAvailable => "TICKET_RESERVATION_NOT_AVAILABLE_FOR_EVENT",
            Self::AlreadyReserved => "TICKET_ALREADY_RESERVED",
            Self::NoMoreTicketsLeft => "NO_MORE_TICKETS_LEFT",
            Self::NotFound => "TICKET_NOT_FOUND",
            Self::ReserveContention { .. } => "TICKET_RESERVE_CONTENTION",
        }
    }
}
