//! Port definitions (trait abstractions) for external systems.
//!
//! The synthesis engine is the only external collaborator. Adapters in
//! `vocalis-runtime` implement it; tests substitute fakes.

pub mod engine;

pub use engine::{EngineError, SynthesisEngine};

#[cfg(test)]
pub use engine::MockSynthesisEngine;
