// ============================================================================
// Conference Core - Conference Service
// File: crates/conference-core/src/services/conference_service.rs
// ============================================================================
//! Store-aware resolution: prefers operational records, falls back to the
//! static conference definition whenever the store cannot answer.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    resolve_tier, CategoryPrice, ConferenceDefinition, ConfigKey, ConfigValue, Discount, PricingTiers, TierKey,
    Workshop,
};
use crate::repositories::ConfigurationRepository;
use crate::services::resolver::Resolver;

/// Where a pricing answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    Store,
    Static,
}

/// Snapshot of every time-dependent answer for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceStatus {
    pub date: NaiveDate,
    pub pricing_tier: TierKey,
    pub pricing_tier_label: String,
    pub pricing_source: PricingSource,
    pub registration_open: bool,
    pub abstract_submission_open: bool,
    pub event_in_progress: bool,
    pub days_until_event: i64,
    pub registration_prefix: String,
}

/// Price of one category on one date, resolved from a single tier snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPricing {
    pub tier: TierKey,
    pub tier_label: String,
    pub source: PricingSource,
    pub price: Option<CategoryPrice>,
    /// Lowest amount reachable with one applicable discount.
    pub discounted_amount: Option<u64>,
    /// Special offers of the snapshot followed by the active discounts.
    pub discounts: Vec<Discount>,
    pub workshops: Vec<Workshop>,
}

/// Resolved tier together with the override it was resolved from.
struct ResolvedTier {
    key: TierKey,
    label: String,
    source: PricingSource,
    tiers: Option<PricingTiers>,
}

/// Conference queries for presentation layers.
///
/// Each query reads the store at most once. Store failures are logged and
/// answered from the static definition; they never reach the caller.
pub struct ConferenceService<R: ConfigurationRepository + ?Sized> {
    conference: Arc<ConferenceDefinition>,
    config_repo: Option<Arc<R>>,
}

impl<R: ConfigurationRepository + ?Sized> ConferenceService<R> {
    pub fn new(conference: Arc<ConferenceDefinition>, config_repo: Arc<R>) -> Self {
        Self {
            conference,
            config_repo: Some(config_repo),
        }
    }

    /// Service without a configuration store; every answer is static.
    pub fn static_only(conference: Arc<ConferenceDefinition>) -> Self {
        Self {
            conference,
            config_repo: None,
        }
    }

    pub fn conference(&self) -> &ConferenceDefinition {
        &self.conference
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.conference)
    }

    pub fn has_store(&self) -> bool {
        self.config_repo.is_some()
    }

    /// Typed value of an active record, or `None` when there is no usable one.
    async fn active_value(&self, key: ConfigKey) -> Option<ConfigValue> {
        let repo = self.config_repo.as_ref()?;

        let record = match repo.find(key.config_type(), key.key()).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No {}:{} record, using static defaults", key.config_type(), key.key());
                return None;
            }
            Err(e) => {
                warn!("Configuration store unavailable, using static defaults: {}", e);
                return None;
            }
        };

        if !record.is_active {
            debug!("{}:{} is disabled, using static defaults", record.config_type, record.key);
            return None;
        }

        match record.decode() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring stored {}:{}: {}", record.config_type, record.key, e);
                None
            }
        }
    }

    async fn pricing_override(&self) -> Option<PricingTiers> {
        match self.active_value(ConfigKey::PricingTiers).await? {
            ConfigValue::PricingTiers(tiers) => Some(tiers),
            _ => None,
        }
    }

    async fn resolve(&self, today: NaiveDate) -> ResolvedTier {
        match self.pricing_override().await {
            Some(tiers) => {
                let key = resolve_tier(&tiers, today);
                let label = tiers
                    .get(key)
                    .map(|tier| tier.name.clone())
                    .unwrap_or_else(|| self.resolver().tier_label(key));
                ResolvedTier {
                    key,
                    label,
                    source: PricingSource::Store,
                    tiers: Some(tiers),
                }
            }
            None => {
                let resolver = self.resolver();
                let key = resolver.current_pricing_tier(today);
                ResolvedTier {
                    key,
                    label: resolver.tier_label(key),
                    source: PricingSource::Static,
                    tiers: None,
                }
            }
        }
    }

    /// Stored tiers win over the static payment tiers; same precedence walk.
    pub async fn current_pricing_tier(&self, today: NaiveDate) -> TierKey {
        self.resolve(today).await.key
    }

    /// Price of `category` in the tier that applies on `today`.
    ///
    /// Prices only exist in the stored pricing record, so this is `None`
    /// without one, and for categories the resolved tier does not list.
    pub async fn current_price(&self, category: &str, today: NaiveDate) -> Option<(TierKey, CategoryPrice)> {
        let resolved = self.resolve(today).await;
        let price = resolved.tiers?.price(resolved.key, category)?.clone();
        Some((resolved.key, price))
    }

    /// Active discounts covering `category` on `today`.
    pub async fn applicable_discounts(&self, category: &str, today: NaiveDate) -> Vec<Discount> {
        match self.active_value(ConfigKey::ActiveDiscounts).await {
            Some(ConfigValue::ActiveDiscounts(discounts)) => discounts
                .into_iter()
                .filter(|d| d.applies_to(category, today))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Tier, price, discounts and workshops for `category` on `today`.
    ///
    /// The pricing record is read once; tier, price, special offers and
    /// workshops all come from that read. Discounts are not stacked.
    pub async fn pricing(&self, category: &str, today: NaiveDate) -> CategoryPricing {
        let resolved = self.resolve(today).await;

        let (price, mut discounts, workshops) = match &resolved.tiers {
            Some(tiers) => (
                tiers.price(resolved.key, category).cloned(),
                tiers
                    .special_offers
                    .iter()
                    .filter(|d| d.applies_to(category, today))
                    .cloned()
                    .collect(),
                tiers.active_workshops().cloned().collect(),
            ),
            None => (None, Vec::new(), Vec::new()),
        };
        discounts.extend(self.applicable_discounts(category, today).await);

        let discounted_amount = price
            .as_ref()
            .and_then(|price| discounts.iter().map(|d| d.apply(price.amount)).min());

        CategoryPricing {
            tier: resolved.key,
            tier_label: resolved.label,
            source: resolved.source,
            price,
            discounted_amount,
            discounts,
            workshops,
        }
    }

    pub async fn status(&self, today: NaiveDate) -> ConferenceStatus {
        let resolved = self.resolve(today).await;
        let resolver = self.resolver();
        ConferenceStatus {
            date: today,
            pricing_tier: resolved.key,
            pricing_tier_label: resolved.label,
            pricing_source: resolved.source,
            registration_open: resolver.is_registration_open(today),
            abstract_submission_open: resolver.is_abstract_submission_open(today),
            event_in_progress: resolver.is_event_in_progress(today),
            days_until_event: resolver.days_until_event(today),
            registration_prefix: resolver.registration_prefix(),
        }
    }
}
