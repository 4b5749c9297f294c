//! Route table.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers;
use super::server::AppState;

/// Builds the API router. Public routes cover registration, login,
/// catalog reads, and token lookup; everything else goes through the
/// auth middleware.
pub fn create_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/events", get(handlers::events::list_events))
        .route("/events/{id}", get(handlers::events::get_event))
        .route("/events/slug/{slug}", get(handlers::events::get_event_by_slug))
        .route(
            "/events/{id}/speakers",
            get(handlers::events::list_event_speakers),
        )
        .route("/organizers", get(handlers::catalog::list_organizers))
        .route("/organizers/{id}", get(handlers::catalog::get_organizer))
        .route("/event-types", get(handlers::catalog::list_event_types))
        .route("/event-types/{id}", get(handlers::catalog::get_event_type))
        .route("/locations", get(handlers::catalog::list_locations))
        .route("/locations/{id}", get(handlers::catalog::get_location))
        .route("/speakers", get(handlers::catalog::list_speakers))
        .route("/speakers/{id}", get(handlers::catalog::get_speaker))
        .route(
            "/ticket-categories",
            get(handlers::ticket_categories::list_by_event),
        )
        .route(
            "/tickets/lookup/{token}",
            get(handlers::tickets::lookup_by_token),
        );

    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/events", post(handlers::events::create_event))
        .route(
            "/ticket-categories",
            post(handlers::ticket_categories::create_category),
        )
        .route(
            "/tickets",
            post(handlers::tickets::reserve_ticket).get(handlers::tickets::list_my_tickets),
        )
        .route(
            "/tickets/{id}",
            get(handlers::tickets::get_ticket).delete(handlers::tickets::resign_ticket),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            super::middleware::auth::auth,
        ));

    Router::new().merge(public).merge(protected).with_state(state)
}
