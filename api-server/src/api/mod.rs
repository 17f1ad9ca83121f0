//! API route modules
//!
//! One module per resource, each exposing a `router()` nested under
//! `/api/<resource>`:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register/login, profile, admin user management
//! - [`menu`] - menu catalogue
//! - [`orders`] - order lifecycle
//! - [`payments`] - payment processing, history and refunds
//! - [`reservations`] - table bookings and availability
//! - [`inventory`] - stock management
//! - [`feedback`] - customer reviews and moderation

pub mod auth;
pub mod feedback;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod reservations;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(reservations::router())
        .merge(inventory::router())
        .merge(feedback::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate a unique ID per request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // JWT authentication - injects CurrentUser, lets public paths through
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
