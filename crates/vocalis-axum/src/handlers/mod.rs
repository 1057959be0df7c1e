//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to `SpeechService`.

pub mod health;
pub mod tts;
