//! Authentication middleware
//!
//! Axum middleware for JWT authentication and role checks.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService, Role};
use crate::core::ServerState;

/// Is this request served without authentication?
///
/// Public surface: health check, register/login, menu reads, approved
/// feedback reads and the reservation availability grid.
fn is_public(method: &http::Method, path: &str) -> bool {
    if method == http::Method::OPTIONS {
        return true;
    }
    if !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }
    if method == http::Method::GET {
        if path == "/api/menu" || path.starts_with("/api/menu/") {
            return true;
        }
        if path == "/api/reservations/slots" {
            return true;
        }
        // Approved feedback is public; the admin and per-order views are not
        if path == "/api/feedback"
            || (path.starts_with("/api/feedback/")
                && !path.starts_with("/api/feedback/admin")
                && !path.starts_with("/api/feedback/order"))
        {
            return true;
        }
    }
    false
}

/// Authentication middleware - requires a valid bearer token
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`
/// and injects [`CurrentUser`] into the request extensions. Public
/// paths pass through untouched.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    let jwt_service = state.get_jwt_service();
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Role-check middleware
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/inventory", post(handler::create))
///     .layer(middleware::from_fn(require_role(&[Role::Admin])));
/// ```
///
/// Requires that `require_auth` already ran (it injects `CurrentUser`).
/// Rejects with 403 Forbidden when the caller's role is not allowed.
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_role(roles) {
                tracing::warn!(
                    target: "security",
                    user_id = %user.id,
                    role = %user.role,
                    "Role check failed"
                );
                return Err(AppError::forbidden(format!(
                    "Requires one of roles: {}",
                    roles
                        .iter()
                        .map(|r| r.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public(&get, "/health"));
        assert!(is_public(&post, "/api/auth/login"));
        assert!(is_public(&post, "/api/auth/register"));
        assert!(is_public(&get, "/api/menu"));
        assert!(is_public(&get, "/api/menu/menu_item:abc"));
        assert!(is_public(&get, "/api/reservations/slots"));
        assert!(is_public(&get, "/api/feedback"));
        assert!(is_public(&get, "/api/feedback/feedback:abc"));

        assert!(!is_public(&post, "/api/menu"));
        assert!(!is_public(&get, "/api/feedback/admin"));
        assert!(!is_public(&get, "/api/feedback/order/orders:abc"));
        assert!(!is_public(&get, "/api/orders"));
        assert!(!is_public(&post, "/api/reservations"));
    }
}
