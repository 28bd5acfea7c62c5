//! # Conference Infrastructure
//!
//! Configuration store implementations (adapters): PostgreSQL and in-memory.

pub mod database;

pub use database::{create_lazy_pool, create_pool, run_migrations, InMemoryConfigurationRepository, PgConfigurationRepository};
