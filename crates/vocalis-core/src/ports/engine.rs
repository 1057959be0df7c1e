//! Synthesis engine port.
//!
//! An engine is constructed once from a model directory and a configuration
//! file, then asked to turn `(reference voice, text)` into a WAV file at a
//! caller-chosen path. A successful return does NOT guarantee the file was
//! written; callers verify the output independently.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a synthesis engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be constructed from the model assets.
    #[error("Failed to load synthesis engine: {0}")]
    Load(String),

    /// The engine process could not be started.
    #[error("Failed to launch synthesis engine: {0}")]
    Spawn(String),

    /// The engine ran and reported a failure.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The engine did not finish within the configured limit.
    #[error("Inference timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// IO error while talking to the engine.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-to-speech engine that clones a reference voice.
///
/// Implementations must be `Send + Sync`: one handle is shared by every
/// request for the lifetime of the process. Callers serialize access when
/// the underlying model is not safe for concurrent use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Synthesize `text` in the voice of `reference_voice`, writing a WAV to `output_path`.
    async fn infer(
        &self,
        reference_voice: &Path,
        text: &str,
        output_path: &Path,
    ) -> Result<(), EngineError>;

    /// Short engine identifier for logs and diagnostics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::Load("checkpoint missing gpt.pth".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to load synthesis engine: checkpoint missing gpt.pth"
        );

        let err = EngineError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Inference timed out after 1.5s");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
