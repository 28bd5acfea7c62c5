//! Database connection pool

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

fn pool_options(max_connections: u32, acquire_timeout_secs: u64) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
}

/// Connects eagerly; fails when the store is unreachable.
pub async fn create_pool(url: &str, max_connections: u32, acquire_timeout_secs: u64) -> Result<PgPool, sqlx::Error> {
    pool_options(max_connections, acquire_timeout_secs).connect(url).await
}

/// Parses `url` only. Connections are opened on first use, so a store that
/// is down at startup is picked up once it comes back.
pub fn create_lazy_pool(url: &str, max_connections: u32, acquire_timeout_secs: u64) -> Result<PgPool, sqlx::Error> {
    pool_options(max_connections, acquire_timeout_secs).connect_lazy(url)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
