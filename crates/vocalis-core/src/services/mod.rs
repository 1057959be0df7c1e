//! Application services that orchestrate domain operations over ports.

pub mod speech;

pub use speech::{SpeechService, SpeechServiceConfig, SynthesisFailure};
