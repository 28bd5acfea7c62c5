// ============================================================================
// Conference Infrastructure - PostgreSQL Configuration Repository
// File: crates/conference-infrastructure/src/database/postgres/configuration_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use conference_core::domain::{merge_json, ConfigurationRecord, NewConfiguration};
use conference_core::error::DomainError;
use conference_core::repositories::ConfigurationRepository;
use conference_shared::new_id;

const RETURNING_COLUMNS: &str =
    "id, config_type, config_key, value, is_active, created_by, created_at, updated_at";

#[derive(Debug)]
pub struct PgConfigurationRepository {
    pool: PgPool,
}

impl PgConfigurationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ConfigurationRow {
    pub id: Uuid,
    pub config_type: String,
    pub config_key: String,
    pub value: Value,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConfigurationRow> for ConfigurationRecord {
    fn from(row: ConfigurationRow) -> Self {
        ConfigurationRecord {
            id: row.id,
            config_type: row.config_type,
            key: row.config_key,
            value: row.value,
            is_active: row.is_active,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Connection-level failures become `StoreUnavailable`; the rest are query errors.
fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    let unavailable = matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    );
    if unavailable {
        DomainError::StoreUnavailable(e.to_string())
    } else {
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ConfigurationRepository for PgConfigurationRepository {
    async fn upsert(&self, entry: &NewConfiguration) -> Result<ConfigurationRecord, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO configurations (id, config_type, config_key, value, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (config_type, config_key) DO UPDATE
            SET value = EXCLUDED.value,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let row: ConfigurationRow = sqlx::query_as(&sql)
            .bind(new_id())
            .bind(&entry.config_type)
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(entry.is_active)
            .bind(&entry.created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("upserting configuration", e))?;

        debug!("Upserted configuration {}:{}", row.config_type, row.config_key);
        Ok(row.into())
    }

    async fn merge_value(
        &self,
        config_type: &str,
        key: &str,
        patch: &Value,
        created_by: &str,
    ) -> Result<ConfigurationRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("starting merge transaction", e))?;

        // 1. Make sure the row exists, so the lock below always has a target
        sqlx::query(
            r#"
            INSERT INTO configurations (id, config_type, config_key, value, is_active, created_by)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            ON CONFLICT (config_type, config_key) DO NOTHING
            "#,
        )
        .bind(new_id())
        .bind(config_type)
        .bind(key)
        .bind(json!({}))
        .bind(created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("creating configuration for merge", e))?;

        // 2. Lock and read the current value
        let select = format!(
            "SELECT {} FROM configurations WHERE config_type = $1 AND config_key = $2 FOR UPDATE",
            RETURNING_COLUMNS
        );
        let current: ConfigurationRow = sqlx::query_as(&select)
            .bind(config_type)
            .bind(key)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| store_error("locking configuration", e))?;

        // 3. Merge and write back
        let mut value = current.value;
        merge_json(&mut value, patch);

        let update = format!(
            "UPDATE configurations SET value = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            RETURNING_COLUMNS
        );
        let row: ConfigurationRow = sqlx::query_as(&update)
            .bind(current.id)
            .bind(&value)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| store_error("merging configuration", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("committing merge transaction", e))?;

        debug!("Merged configuration {}:{}", config_type, key);
        Ok(row.into())
    }

    async fn find(&self, config_type: &str, key: &str) -> Result<Option<ConfigurationRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM configurations WHERE config_type = $1 AND config_key = $2",
            RETURNING_COLUMNS
        );
        let row: Option<ConfigurationRow> = sqlx::query_as(&sql)
            .bind(config_type)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("finding configuration", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_type(&self, config_type: &str) -> Result<Vec<ConfigurationRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM configurations WHERE config_type = $1 ORDER BY config_key",
            RETURNING_COLUMNS
        );
        let rows: Vec<ConfigurationRow> = sqlx::query_as(&sql)
            .bind(config_type)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("listing configurations by type", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_all(&self) -> Result<Vec<ConfigurationRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM configurations ORDER BY config_type, config_key",
            RETURNING_COLUMNS
        );
        let rows: Vec<ConfigurationRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("listing configurations", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
