//! Auth API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    // Public: register and login (allow-listed in the auth middleware)
    let public_routes = Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login));

    // Authenticated: own profile
    let profile_routes = Router::new()
        .route("/me", get(handler::me))
        .route("/profile", put(handler::update_profile));

    // Admin: user management
    let admin_routes = Router::new()
        .route("/users", get(handler::list_users))
        .route("/users/{id}", get(handler::get_user))
        .route("/users/{id}/status", put(handler::update_user_status))
        .route("/users/{id}/role", put(handler::update_user_role))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    public_routes.merge(profile_routes).merge(admin_routes)
}
