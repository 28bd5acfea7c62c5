//! # Conference Core
//!
//! Conference definition, configuration records, the resolution engine, and
//! the seeding procedure, plus the repository trait the store adapters implement.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
