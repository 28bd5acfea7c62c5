// ============================================================================
// Conference Core - Seed Service
// File: crates/conference-core/src/services/seed_service.rs
// Description: Idempotent writer of the default operational records
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use conference_shared::constants::DEFAULT_CREATED_BY;

use crate::domain::{ConferenceDefinition, ConfigurationRecord, NewConfiguration};
use crate::error::DomainError;
use crate::repositories::ConfigurationRepository;
use crate::services::seed_defaults::{default_writes, SeedWrite};

/// How existing records are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Overwrite every pair with its default. Manual edits are lost.
    #[default]
    Reset,
    /// Read each pair first and leave records an operator disabled alone.
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedAction {
    Upserted,
    Merged,
    SkippedDisabled,
}

impl fmt::Display for SeedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeedAction::Upserted => "upserted",
            SeedAction::Merged => "merged",
            SeedAction::SkippedDisabled => "skipped (disabled)",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub config_type: String,
    pub key: String,
    pub action: SeedAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub mode: SeedMode,
    pub outcomes: Vec<SeedOutcome>,
}

impl SeedReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action != SeedAction::SkippedDisabled)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

pub struct SeedService<R: ConfigurationRepository> {
    conference: Arc<ConferenceDefinition>,
    config_repo: Arc<R>,
    created_by: String,
}

impl<R: ConfigurationRepository> SeedService<R> {
    pub fn new(conference: Arc<ConferenceDefinition>, config_repo: Arc<R>) -> Self {
        Self {
            conference,
            config_repo,
            created_by: DEFAULT_CREATED_BY.to_string(),
        }
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Writes every default record. The first failing write aborts the run.
    pub async fn seed(&self, mode: SeedMode) -> Result<SeedReport, DomainError> {
        // 1. Build and validate every payload before touching the store
        let writes = default_writes(&self.conference)?;

        info!("Seeding {} configuration records ({:?} mode)", writes.len(), mode);

        // 2. Apply them in order
        let mut outcomes = Vec::with_capacity(writes.len());
        for write in writes {
            let action = self.apply(&write, mode).await?;
            info!("{}:{} {}", write.config_type(), write.key(), action);
            outcomes.push(SeedOutcome {
                config_type: write.config_type().to_string(),
                key: write.key().to_string(),
                action,
            });
        }

        Ok(SeedReport { mode, outcomes })
    }

    async fn apply(&self, write: &SeedWrite, mode: SeedMode) -> Result<SeedAction, DomainError> {
        if mode == SeedMode::Merge && self.is_disabled(write.config_type(), write.key()).await? {
            warn!("{}:{} is disabled, leaving it untouched", write.config_type(), write.key());
            return Ok(SeedAction::SkippedDisabled);
        }

        match write {
            SeedWrite::Replace(value) => {
                let entry = NewConfiguration::new(value, &self.created_by)?;
                self.config_repo.upsert(&entry).await?;
                Ok(SeedAction::Upserted)
            }
            SeedWrite::Merge { key, patch } => {
                self.config_repo
                    .merge_value(key.config_type(), key.key(), patch, &self.created_by)
                    .await?;
                Ok(SeedAction::Merged)
            }
        }
    }

    async fn is_disabled(&self, config_type: &str, key: &str) -> Result<bool, DomainError> {
        let existing = self.config_repo.find(config_type, key).await?;
        Ok(existing.is_some_and(|record| !record.is_active))
    }

    /// Every stored record, ordered by type then key.
    pub async fn summary(&self) -> Result<Vec<ConfigurationRecord>, DomainError> {
        self.config_repo.list_all().await
    }
}
