//! Health probes
//!
//! `/health` and `/health/live` only prove the process answers; `/health/ready`
//! also pings the database and reports 503 until it responds.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

const SERVICE_NAME: &str = "snippets-api";

/// Probe response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

/// Result of pinging the database
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub healthy: bool,
    pub latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn response(status: &'static str, database: Option<DatabaseCheck>) -> HealthResponse {
    HealthResponse {
        status,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        database,
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(response("healthy", None))
}

/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let started = Instant::now();
    let result = db::health_check(state.db()).await;
    let latency_ms = started.elapsed().as_millis();

    match result {
        Ok(()) => Ok(Json(response(
            "ready",
            Some(DatabaseCheck {
                healthy: true,
                latency_ms,
                error: None,
            }),
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(response(
                    "not_ready",
                    Some(DatabaseCheck {
                        healthy: false,
                        latency_ms,
                        error: Some(e.to_string()),
                    }),
                )),
            ))
        }
    }
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(response("alive", None))
}
