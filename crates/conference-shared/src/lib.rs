//! # Conference Shared
//!
//! Shared configuration, telemetry, and small helpers for the conference crates.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
