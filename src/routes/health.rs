//! Health check endpoints for monitoring and Kubernetes probes.

use std::time::Instant;

use axum::{Json, extract::State, response::IntoResponse};
use http::StatusCode;
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct HealthStatus {
    /// "healthy" or "unhealthy"
    #[cfg_attr(feature = "utoipa", schema(example = "healthy"))]
    pub status: String,
    /// Time of the check (RFC 3339)
    #[cfg_attr(feature = "utoipa", schema(example = "2025-01-15T10:30:00Z"))]
    pub timestamp: String,
    /// "connected" or "disconnected"
    #[cfg_attr(feature = "utoipa", schema(example = "connected"))]
    pub database: String,
    /// Time spent pinging the database, in milliseconds
    #[cfg_attr(feature = "utoipa", schema(example = 3))]
    pub response_time_ms: u64,
}

/// Ping the database. A server without a database counts as disconnected.
async fn database_connected(state: &AppState) -> bool {
    match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "Database health check failed");
                false
            }
        },
        None => false,
    }
}

/// Health check with database connectivity.
///
/// Also served at `/api/health`.
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/health",
    tag = "health",
    operation_id = "health_check",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus),
        (status = 503, description = "Database is unreachable", body = HealthStatus),
    )
))]
#[tracing::instrument(name = "health.check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let connected = database_connected(&state).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    let health = HealthStatus {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        database: if connected {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
        response_time_ms,
    };

    let status_code = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health))
}

/// Kubernetes liveness probe.
///
/// Returns 200 whenever the process can answer HTTP.
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    operation_id = "health_liveness",
    responses(
        (status = 200, description = "Service is alive"),
    )
))]
#[tracing::instrument(name = "health.liveness")]
pub async fn liveness() -> impl IntoResponse {
    StatusCode::OK
}

/// Kubernetes readiness probe.
///
/// Returns 200 only when the database answers.
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    operation_id = "health_readiness",
    responses(
        (status = 200, description = "Service is ready to accept traffic"),
        (status = 503, description = "Database is unavailable or not configured"),
    )
))]
#[tracing::instrument(name = "health.readiness", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if database_connected(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
