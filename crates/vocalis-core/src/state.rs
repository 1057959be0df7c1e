//! Process-wide service state.
//!
//! Built exactly once before the first request and shared read-only
//! afterwards (`Arc<ServiceState>`). There is no way to replace the engine
//! or retry a failed load; a restart is the only remediation.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::paths::ServicePaths;
use crate::ports::{EngineError, SynthesisEngine};

/// Coarse readiness of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Ready,
    Failed,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

enum Slot {
    Ready(Arc<dyn SynthesisEngine>),
    Failed(String),
}

/// Outcome of engine initialization, frozen for the process lifetime.
pub struct ServiceState {
    slot: Slot,
    since: DateTime<Utc>,
}

impl ServiceState {
    /// Run engine initialization against `paths`.
    ///
    /// Missing model assets or a failing `load` produce a `Failed` state
    /// instead of an error, so the process keeps serving health checks.
    /// Emits exactly one log line describing the outcome.
    pub fn initialize<F>(paths: &ServicePaths, load: F) -> Self
    where
        F: FnOnce(&Path, &Path) -> Result<Arc<dyn SynthesisEngine>, EngineError>,
    {
        if !paths.model_assets_present() {
            let reason = format!(
                "Model directory or config file not found (model_dir={}, config={})",
                paths.model_dir.display(),
                paths.config_path.display()
            );
            tracing::error!(%reason, "Synthesis engine initialization failed");
            return Self::failed(reason);
        }

        match load(&paths.model_dir, &paths.config_path) {
            Ok(engine) => {
                tracing::info!(
                    engine = engine.name(),
                    model_dir = %paths.model_dir.display(),
                    "Synthesis engine initialized successfully"
                );
                Self::ready(engine)
            }
            Err(e) => {
                tracing::error!(error = %e, "Synthesis engine initialization failed");
                Self::failed(e.to_string())
            }
        }
    }

    /// State holding a loaded engine.
    pub fn ready(engine: Arc<dyn SynthesisEngine>) -> Self {
        Self {
            slot: Slot::Ready(engine),
            since: Utc::now(),
        }
    }

    /// State recording a permanent initialization failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            slot: Slot::Failed(reason.into()),
            since: Utc::now(),
        }
    }

    pub const fn status(&self) -> ServiceStatus {
        match self.slot {
            Slot::Ready(_) => ServiceStatus::Ready,
            Slot::Failed(_) => ServiceStatus::Failed,
        }
    }

    /// The loaded engine, if initialization succeeded.
    pub fn engine(&self) -> Option<&Arc<dyn SynthesisEngine>> {
        match &self.slot {
            Slot::Ready(engine) => Some(engine),
            Slot::Failed(_) => None,
        }
    }

    /// Why initialization failed, if it did.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.slot {
            Slot::Ready(_) => None,
            Slot::Failed(reason) => Some(reason),
        }
    }

    /// When the state was frozen.
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }
}

impl fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ServiceState");
        match &self.slot {
            Slot::Ready(engine) => s.field("engine", &engine.name()),
            Slot::Failed(reason) => s.field("failure", reason),
        };
        s.field("since", &self.since).finish()
    }
}
