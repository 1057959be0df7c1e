//! Command handlers.
//!
//! Each handler receives parsed arguments and owns the command's output.

pub mod paths;
pub mod serve;
