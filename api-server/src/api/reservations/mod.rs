//! Reservations API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Reservations router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    // The slot grid is public (allow-listed in the auth middleware)
    let customer_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/slots", get(handler::available_slots))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", put(handler::cancel));

    // Front-of-house edits: staff and admin
    let staff_routes = Router::new()
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_role(&[
            Role::Admin,
            Role::Staff,
        ])));

    customer_routes.merge(staff_routes)
}
