//! Database module (configuration store adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::{create_lazy_pool, create_pool, run_migrations};
pub use memory::InMemoryConfigurationRepository;
pub use postgres::PgConfigurationRepository;
