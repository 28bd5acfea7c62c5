//! In-memory configuration store
//!
//! Same upsert and merge semantics as the PostgreSQL adapter. Used by tests,
//! local development, and any deployment that only needs process-lifetime
//! overrides.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use conference_core::domain::{merge_json, ConfigurationRecord, NewConfiguration};
use conference_core::error::DomainError;
use conference_core::repositories::ConfigurationRepository;
use conference_shared::new_id;

type PairKey = (String, String);

#[derive(Debug, Default)]
pub struct InMemoryConfigurationRepository {
    records: RwLock<BTreeMap<PairKey, ConfigurationRecord>>,
}

impl InMemoryConfigurationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn pair(config_type: &str, key: &str) -> PairKey {
    (config_type.to_string(), key.to_string())
}

fn fresh_record(config_type: &str, key: &str, value: Value, is_active: bool, created_by: &str) -> ConfigurationRecord {
    let now = Utc::now();
    ConfigurationRecord {
        id: new_id(),
        config_type: config_type.to_string(),
        key: key.to_string(),
        value,
        is_active,
        created_by: created_by.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ConfigurationRepository for InMemoryConfigurationRepository {
    async fn upsert(&self, entry: &NewConfiguration) -> Result<ConfigurationRecord, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(pair(&entry.config_type, &entry.key))
            .and_modify(|existing| {
                existing.value = entry.value.clone();
                existing.is_active = entry.is_active;
                existing.updated_at = Utc::now();
            })
            .or_insert_with(|| {
                fresh_record(
                    &entry.config_type,
                    &entry.key,
                    entry.value.clone(),
                    entry.is_active,
                    &entry.created_by,
                )
            });
        Ok(record.clone())
    }

    async fn merge_value(
        &self,
        config_type: &str,
        key: &str,
        patch: &Value,
        created_by: &str,
    ) -> Result<ConfigurationRecord, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(pair(config_type, key))
            .or_insert_with(|| fresh_record(config_type, key, json!({}), true, created_by));
        merge_json(&mut record.value, patch);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn find(&self, config_type: &str, key: &str) -> Result<Option<ConfigurationRecord>, DomainError> {
        Ok(self.records.read().await.get(&pair(config_type, key)).cloned())
    }

    async fn find_by_type(&self, config_type: &str) -> Result<Vec<ConfigurationRecord>, DomainError> {
        // BTreeMap order is (type, key), so one type's records are already sorted by key.
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.config_type == config_type)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ConfigurationRecord>, DomainError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}
