#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod command_engine;

pub use command_engine::{CommandEngine, CommandEngineOptions, DEFAULT_ENGINE_PROGRAM};
