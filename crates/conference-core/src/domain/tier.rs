// ============================================================================
// Conference Core - Pricing Tier Resolution
// File: crates/conference-core/src/domain/tier.rs
// Description: Tier keys and the precedence walk shared by static and stored tiers
// ============================================================================

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::DateWindow;

/// Pricing tier key, declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierKey {
    EarlyBird,
    Regular,
    Onsite,
}

impl TierKey {
    /// Evaluation order. An earlier tier wins when windows overlap.
    pub const PRECEDENCE: [TierKey; 3] = [TierKey::EarlyBird, TierKey::Regular, TierKey::Onsite];

    /// Returned when no enabled tier window contains the date.
    pub const FALLBACK: TierKey = TierKey::Regular;

    pub fn as_str(&self) -> &'static str {
        match self {
            TierKey::EarlyBird => "earlyBird",
            TierKey::Regular => "regular",
            TierKey::Onsite => "onsite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "earlyBird" => Some(TierKey::EarlyBird),
            "regular" => Some(TierKey::Regular),
            "onsite" => Some(TierKey::Onsite),
            _ => None,
        }
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tier as seen by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSlot {
    pub enabled: bool,
    pub window: DateWindow,
}

/// Anything that can answer "what is the window of tier X".
///
/// Implemented by the static payment tiers of the conference definition and by
/// the stored `pricing_tiers` record, so both resolve with the same walk.
pub trait TierSource {
    fn tier_slot(&self, key: TierKey) -> Option<TierSlot>;
}

/// First enabled tier, in precedence order, whose window contains `today`.
/// Falls back to [`TierKey::FALLBACK`], never "no tier".
pub fn resolve_tier<S: TierSource + ?Sized>(source: &S, today: NaiveDate) -> TierKey {
    TierKey::PRECEDENCE
        .into_iter()
        .find(|key| {
            source
                .tier_slot(*key)
                .is_some_and(|slot| slot.enabled && slot.window.contains(today))
        })
        .unwrap_or(TierKey::FALLBACK)
}
