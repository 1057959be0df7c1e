//! Probe response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vocalis_core::{ServiceState, ServiceStatus};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

impl HealthDto {
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessDto {
    /// `ready` or `unavailable`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// When the engine load finished, successfully or not.
    pub since: DateTime<Utc>,
}

impl ReadinessDto {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

impl From<&ServiceState> for ReadinessDto {
    fn from(state: &ServiceState) -> Self {
        let status = match state.status() {
            ServiceStatus::Ready => "ready",
            ServiceStatus::Failed => "unavailable",
        };
        Self {
            status,
            reason: state.failure_reason().map(str::to_string),
            since: state.since(),
        }
    }
}
