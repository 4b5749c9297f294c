//! HTTP API: server assembly, routes, middleware, handlers, and the
//! services behind them.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;

pub use server::{ApiServer, AppState};
