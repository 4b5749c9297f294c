//! HTTP handlers. Thin adapters between axum extractors and the
//! service layer; every handler returns `Result<ApiResponse<_>>`.

pub mod auth;
pub mod catalog;
pub mod events;
pub mod ticket_categories;
pub mod tickets;
