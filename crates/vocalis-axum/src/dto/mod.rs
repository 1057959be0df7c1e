//! Data Transfer Objects (DTOs) for the HTTP API contract.

pub mod health;

pub use health::{HealthDto, ReadinessDto};
