//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Read-only after bootstrap; the engine inside is never replaced.
pub type AppState = Arc<AxumContext>;
