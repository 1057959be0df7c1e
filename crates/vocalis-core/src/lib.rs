#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use domain::{
    ClientId, DEFAULT_DOWNLOAD_NAME, OutputArtifact, SynthesisRequest, SynthesizedSpeech,
    WAV_MEDIA_TYPE,
};
pub use paths::{
    DEFAULT_CONFIG_FILE, DEFAULT_MODEL_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_REFERENCE_VOICE,
    PathError, PathStatus, ServicePaths, ensure_output_dir,
};
pub use ports::{EngineError, SynthesisEngine};
pub use services::{SpeechService, SpeechServiceConfig, SynthesisFailure};
pub use state::{ServiceState, ServiceStatus};
