//! Payments API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Payments router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/history", get(handler::history))
        .route("/process", post(handler::process))
        .route("/{order_id}", get(handler::get_details));

    // Refunds are an admin operation
    let admin_routes = Router::new()
        .route("/{order_id}/refund", post(handler::refund))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    customer_routes.merge(admin_routes)
}
