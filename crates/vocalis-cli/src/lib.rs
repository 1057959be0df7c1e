#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs binary
use dotenvy as _;
use tokio as _;

pub mod commands;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, LayoutArgs, PathsArgs, ServeArgs};
pub use logging::{LogFormat, init_logging};
pub use parser::Cli;
