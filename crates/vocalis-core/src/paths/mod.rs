//! Filesystem layout for the synthesis service.
//!
//! Every file the service touches lives at a well-known location relative to
//! a service root:
//! - Model checkpoint directory and its config file (read at startup)
//! - Reference voice sample (read on every request)
//! - Output directory (one new WAV per successful request)
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Relative overrides are resolved against the root, absolute ones are kept
//! - No cleanup of generated audio; retention is left to the operator

mod ensure;
mod error;
mod layout;

pub use ensure::ensure_output_dir;
pub use error::PathError;
pub use layout::{
    DEFAULT_CONFIG_FILE, DEFAULT_MODEL_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_REFERENCE_VOICE,
    PathStatus, ServicePaths,
};
