//! Speech service - orchestrates a single synthesis request.
//!
//! Preconditions are checked in a fixed order and short-circuit:
//! 1. the engine loaded at startup ([`SynthesisFailure::ServiceUnavailable`])
//! 2. the reference voice is on disk ([`SynthesisFailure::InvalidInput`])
//!
//! The engine is the only fallible collaborator and its errors are classified
//! right at the call site. After a successful call the output file is checked
//! independently, since engines may report success without writing anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::domain::{
    ClientId, DEFAULT_DOWNLOAD_NAME, OutputArtifact, SynthesisRequest, SynthesizedSpeech,
};
use crate::paths::ServicePaths;
use crate::ports::{EngineError, SynthesisEngine};
use crate::state::ServiceState;

/// Request-scoped failures, one per externally visible failure class.
#[derive(Debug, Error)]
pub enum SynthesisFailure {
    /// The engine never loaded; permanent until restart.
    #[error("TTS service is currently unavailable, model initialization failed.")]
    ServiceUnavailable,

    /// A required asset is missing, so the request cannot proceed.
    #[error("Reference audio file '{}' does not exist.", .reference.display())]
    InvalidInput { reference: PathBuf },

    /// The engine reported an error.
    #[error("An error occurred during speech generation: {detail}")]
    SynthesisError { detail: String },

    /// The engine reported success but left no output file.
    #[error("Speech file generation failed.")]
    SynthesisIncomplete,
}

impl SynthesisFailure {
    /// Stable discriminant for logs and API clients.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::SynthesisError { .. } => "SYNTHESIS_ERROR",
            Self::SynthesisIncomplete => "SYNTHESIS_INCOMPLETE",
        }
    }
}

/// Tunables for [`SpeechService`].
#[derive(Debug, Clone)]
pub struct SpeechServiceConfig {
    /// Engine calls allowed to run at once. 1 serializes inference.
    pub max_concurrent_inferences: usize,
    /// Upper bound for one engine call. `None` waits indefinitely.
    pub inference_timeout: Option<Duration>,
    /// Log only the length of the request text instead of the text itself.
    pub redact_text: bool,
    /// Filename presented to callers for the generated audio.
    pub download_name: String,
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            max_concurrent_inferences: 1,
            inference_timeout: None,
            redact_text: false,
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }
}

/// Turns synthesis requests into verified audio files.
pub struct SpeechService {
    state: Arc<ServiceState>,
    paths: ServicePaths,
    gate: Semaphore,
    config: SpeechServiceConfig,
}

impl SpeechService {
    /// Create a new speech service.
    pub fn new(state: Arc<ServiceState>, paths: ServicePaths, config: SpeechServiceConfig) -> Self {
        let permits = config.max_concurrent_inferences.max(1);
        Self {
            state,
            paths,
            gate: Semaphore::new(permits),
            config,
        }
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    /// Synthesize one request, returning the verified artifact.
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedSpeech, SynthesisFailure> {
        let SynthesisRequest { text, client } = request;
        self.log_receipt(&client, &text);

        let Some(engine) = self.state.engine() else {
            error!(%client, "TTS service unavailable, engine failed to initialize");
            return Err(SynthesisFailure::ServiceUnavailable);
        };

        let reference = &self.paths.reference_voice;
        if !file_exists(reference).await {
            error!(
                %client,
                reference = %reference.display(),
                "Reference audio file not found"
            );
            return Err(SynthesisFailure::InvalidInput {
                reference: reference.clone(),
            });
        }

        let artifact = OutputArtifact::allocate(&self.paths);
        info!(
            %client,
            output_path = %artifact.path().display(),
            "Generating speech"
        );

        if let Err(e) = self
            .run_engine(engine.as_ref(), reference, &text, artifact.path())
            .await
        {
            error!(%client, error = %e, "Speech generation failed");
            discard_partial(artifact.path()).await;
            return Err(SynthesisFailure::SynthesisError {
                detail: e.to_string(),
            });
        }

        match tokio::fs::metadata(artifact.path()).await {
            Ok(meta) if meta.is_file() => {
                info!(
                    %client,
                    output_path = %artifact.path().display(),
                    size_bytes = meta.len(),
                    "Successfully generated speech file"
                );
                Ok(SynthesizedSpeech {
                    artifact,
                    size_bytes: meta.len(),
                    download_name: self.config.download_name.clone(),
                })
            }
            _ => {
                error!(
                    %client,
                    output_path = %artifact.path().display(),
                    "Speech file generation failed, file not created"
                );
                Err(SynthesisFailure::SynthesisIncomplete)
            }
        }
    }

    fn log_receipt(&self, client: &ClientId, text: &str) {
        if self.config.redact_text {
            info!(%client, text_chars = text.chars().count(), "Incoming TTS request");
        } else {
            info!(%client, text = %text, "Incoming TTS request");
        }
    }

    /// Invoke the engine behind the inference gate and the optional timeout.
    async fn run_engine(
        &self,
        engine: &dyn SynthesisEngine,
        reference: &Path,
        text: &str,
        output: &Path,
    ) -> Result<(), EngineError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| EngineError::Inference(format!("inference gate closed: {e}")))?;

        let call = engine.infer(reference, text, output);
        match self.config.inference_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| EngineError::Timeout(limit))?,
            None => call.await,
        }
    }
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

async fn discard_partial(path: &Path) {
    if tokio::fs::remove_file(path).await.is_ok() {
        tracing::debug!(path = %path.display(), "Removed partial output");
    }
}
