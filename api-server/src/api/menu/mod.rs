//! Menu API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    // Reads are public (allow-listed in the auth middleware)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/categories", get(handler::categories))
        .route("/{id}", get(handler::get_by_id));

    // Catalogue edits: admin only
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
