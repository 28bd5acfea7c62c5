//! Configuration store trait (port)

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ConfigurationRecord, NewConfiguration};
use crate::error::DomainError;

/// Persisted `(type, key)` configuration documents.
///
/// Implementations must make `upsert` and `merge_value` atomic per pair:
/// concurrent writers may overwrite each other but never create a second
/// record for the same pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Creates the record, or replaces `value`, `is_active` and `updated_at`
    /// of the existing one. `id`, `created_at` and `created_by` are kept.
    async fn upsert(&self, entry: &NewConfiguration) -> Result<ConfigurationRecord, DomainError>;

    /// Deep-merges `patch` into the stored value, creating the record with
    /// `patch` as its value when the pair does not exist yet.
    async fn merge_value(
        &self,
        config_type: &str,
        key: &str,
        patch: &Value,
        created_by: &str,
    ) -> Result<ConfigurationRecord, DomainError>;

    async fn find(&self, config_type: &str, key: &str) -> Result<Option<ConfigurationRecord>, DomainError>;

    /// Ordered by key.
    async fn find_by_type(&self, config_type: &str) -> Result<Vec<ConfigurationRecord>, DomainError>;

    /// Ordered by type, then key.
    async fn list_all(&self) -> Result<Vec<ConfigurationRecord>, DomainError>;
}
