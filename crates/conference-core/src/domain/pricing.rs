// ============================================================================
// Conference Core - Operational Pricing
// File: crates/conference-core/src/domain/pricing.rs
// Description: Payload schemas of the `pricing` and `discounts` records
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tier::{TierKey, TierSlot, TierSource};
use super::window::{ensure_ordered, DateWindow};

fn default_true() -> bool {
    true
}

/// Payload of `(pricing, pricing_tiers)`: the editable source of truth for
/// tier windows and per-category prices once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTiers {
    #[serde(default)]
    pub special_offers: Vec<Discount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_bird: Option<PricingTier>,
    pub regular: PricingTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onsite: Option<PricingTier>,
    #[serde(default)]
    pub workshops: Vec<Workshop>,
}

impl PricingTiers {
    pub fn get(&self, key: TierKey) -> Option<&PricingTier> {
        match key {
            TierKey::EarlyBird => self.early_bird.as_ref(),
            TierKey::Regular => Some(&self.regular),
            TierKey::Onsite => self.onsite.as_ref(),
        }
    }

    /// Price of `category` in tier `key`, if that tier lists it.
    pub fn price(&self, key: TierKey, category: &str) -> Option<&CategoryPrice> {
        self.get(key)?.categories.get(category)
    }

    pub fn active_workshops(&self) -> impl Iterator<Item = &Workshop> {
        self.workshops.iter().filter(|w| w.is_active)
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        for key in TierKey::PRECEDENCE {
            if let Some(tier) = self.get(key) {
                ensure_ordered(key.as_str(), &tier.window())?;
            }
        }
        Ok(())
    }
}

impl TierSource for PricingTiers {
    fn tier_slot(&self, key: TierKey) -> Option<TierSlot> {
        self.get(key).map(|tier| TierSlot {
            enabled: tier.is_active,
            window: tier.window(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryPrice>,
}

impl PricingTier {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

/// Amounts are whole units of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPrice {
    pub amount: u64,
    pub currency: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub price: u64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Entry of `(discounts, active_discounts)` and of `specialOffers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub code: String,
    pub label: String,
    pub kind: DiscountKind,
    pub value: u64,
    /// Empty means every category.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Discount {
    /// Active, covers `category`, and `today` is within the optional bounds.
    pub fn applies_to(&self, category: &str, today: NaiveDate) -> bool {
        self.is_active
            && (self.categories.is_empty() || self.categories.iter().any(|c| c == category))
            && self.valid_from.map_or(true, |from| from <= today)
            && self.valid_until.map_or(true, |until| today <= until)
    }

    /// Amount after the discount, never below zero.
    pub fn apply(&self, amount: u64) -> u64 {
        match self.kind {
            DiscountKind::Percentage => {
                let off = u128::from(amount) * u128::from(self.value.min(100)) / 100;
                // off <= amount
                amount - off as u64
            }
            DiscountKind::Fixed => amount.saturating_sub(self.value),
        }
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("discount code must not be empty".into());
        }
        if self.kind == DiscountKind::Percentage && self.value > 100 {
            return Err(format!("discount {} exceeds 100%", self.code));
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            ensure_ordered(&format!("discount {}", self.code), &DateWindow::new(from, until))?;
        }
        Ok(())
    }
}
