//! Ticketline: an event ticketing backend.
//!
//! The core is a race-free ticket reservation engine: per-category
//! quotas are never oversold, a user holds at most one ticket per
//! event, and every ticket carries an unguessable unique token.
//! Around it sit an axum HTTP API, Sea-ORM persistence, JWT/bcrypt
//! authentication, and a read-mostly event catalog.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, Result};
