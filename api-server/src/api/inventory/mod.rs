//! Inventory API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Inventory router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    // Reads need a login; any role may check stock
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/low-stock", get(handler::low_stock))
        .route("/{id}", get(handler::get_by_id));

    // Stock edits: admin only
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/restock", put(handler::restock))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
