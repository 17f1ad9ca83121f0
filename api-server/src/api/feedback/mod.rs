//! Feedback API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Feedback router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", routes())
}

fn routes() -> Router<ServerState> {
    // Approved feedback is public; submitting and reading your own
    // order's feedback needs a login
    let open_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/order/{order_id}", get(handler::get_for_order))
        .route("/{id}", get(handler::get_by_id));

    // Moderation: admin only
    let admin_routes = Router::new()
        .route("/admin", get(handler::list_all))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    open_routes.merge(admin_routes)
}
