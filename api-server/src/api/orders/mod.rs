//! Orders API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Orders router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", put(handler::cancel));

    // Kitchen pipeline: staff, chef and admin
    let staff_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_role(&[
            Role::Admin,
            Role::Chef,
            Role::Staff,
        ])));

    customer_routes.merge(staff_routes)
}
