//! PostgreSQL repository implementations

pub mod configuration_repo_impl;

pub use configuration_repo_impl::PgConfigurationRepository;
