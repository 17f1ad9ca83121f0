//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::time::now_ms;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub timestamp: i64,
}

/// Liveness probe: reports the build version and pings the database
pub async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    let database = match state.get_db().query("RETURN 1").await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Health check database ping failed");
            "unavailable"
        }
    };

    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
        timestamp: now_ms(),
    })
}
