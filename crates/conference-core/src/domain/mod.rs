//! # Conference Core - Domain Module
//!
//! Conference definition, pricing payloads, and configuration records.

pub mod window;
pub mod tier;
pub mod conference;
pub mod pricing;
pub mod settings;
pub mod configuration;

// Re-export all entities and enums
pub use window::DateWindow;
pub use tier::{resolve_tier, TierKey, TierSlot, TierSource};
pub use conference::{
    AbstractTrack, ConferenceDefinition, PaymentTiers, RegistrationCategory, SubmissionStage, TierWindow,
};
pub use pricing::{CategoryPrice, Discount, DiscountKind, PricingTier, PricingTiers, Workshop};
pub use settings::{
    BulkEmailSettings, BulkEmailTemplate, EmailSettings, EmailTemplateToggle, ExportFormat, ReportSettings,
    WebsiteContent,
};
pub use configuration::{merge_json, ConfigKey, ConfigValue, ConfigurationRecord, NewConfiguration};
