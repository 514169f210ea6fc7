//! Health Routes
//!
//! Health check endpoints for monitoring and container probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (message store answers)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the message store answers a query.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.store.count().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Full health status with message counts.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let counts = match (state.store.count().await, state.store.unread_count().await) {
        (Ok(total), Ok(unread)) => Some((total, unread)),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Health check could not query the store");
            None
        }
    };

    let (status, storage) = if counts.is_some() {
        ("healthy", "ok")
    } else {
        ("unhealthy", "error")
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        messages: counts.map(|(total, _)| total),
        unread: counts.map(|(_, unread)| unread),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
