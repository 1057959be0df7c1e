//! Liveness and readiness probes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{HealthDto, ReadinessDto};
use crate::state::AppState;

/// `GET /health`
///
/// Reports that the process is serving; says nothing about the engine.
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto::ok())
}

/// `GET /ready`
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessDto>) {
    let readiness = ReadinessDto::from(state.speech.state());
    let status = if readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(readiness))
}
