// ============================================================================
// Conference Core - Configuration Record Entity
// File: crates/conference-core/src/domain/configuration.rs
// Description: Persisted (type, key) configuration documents with typed payloads
// ============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::pricing::{CategoryPrice, Discount, PricingTiers};
use super::settings::{BulkEmailSettings, EmailSettings, ReportSettings, WebsiteContent};
use crate::error::DomainError;

pub const TYPE_PRICING: &str = "pricing";
pub const TYPE_DISCOUNTS: &str = "discounts";
pub const TYPE_SETTINGS: &str = "settings";
pub const TYPE_CONTENT: &str = "content";
pub const TYPE_REPORTS: &str = "reports";
pub const TYPE_BULK_EMAIL: &str = "bulk_email";

/// The `(type, key)` pairs whose payload has a known schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    PricingTiers,
    RegistrationCategories,
    ActiveDiscounts,
    EmailSettings,
    WebsiteContent,
    ReportSettings,
    BulkEmailSettings,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::PricingTiers,
        ConfigKey::RegistrationCategories,
        ConfigKey::ActiveDiscounts,
        ConfigKey::EmailSettings,
        ConfigKey::WebsiteContent,
        ConfigKey::ReportSettings,
        ConfigKey::BulkEmailSettings,
    ];

    pub fn config_type(&self) -> &'static str {
        match self {
            ConfigKey::PricingTiers | ConfigKey::RegistrationCategories => TYPE_PRICING,
            ConfigKey::ActiveDiscounts => TYPE_DISCOUNTS,
            ConfigKey::EmailSettings => TYPE_SETTINGS,
            ConfigKey::WebsiteContent => TYPE_CONTENT,
            ConfigKey::ReportSettings => TYPE_REPORTS,
            ConfigKey::BulkEmailSettings => TYPE_BULK_EMAIL,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ConfigKey::PricingTiers => "pricing_tiers",
            ConfigKey::RegistrationCategories => "registration_categories",
            ConfigKey::ActiveDiscounts => "active_discounts",
            ConfigKey::EmailSettings => "email_settings",
            ConfigKey::WebsiteContent => "website_content",
            ConfigKey::ReportSettings => "report_settings",
            ConfigKey::BulkEmailSettings => "bulk_email_settings",
        }
    }

    pub fn from_pair(config_type: &str, key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.config_type() == config_type && k.key() == key)
    }
}

/// Record payload, one variant per known `(type, key)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    PricingTiers(PricingTiers),
    /// Legacy mirror of the regular tier's category prices.
    RegistrationCategories(BTreeMap<String, CategoryPrice>),
    ActiveDiscounts(Vec<Discount>),
    EmailSettings(EmailSettings),
    WebsiteContent(WebsiteContent),
    ReportSettings(ReportSettings),
    BulkEmailSettings(BulkEmailSettings),
    /// Any other pair; stored as-is.
    Custom {
        config_type: String,
        key: String,
        value: Value,
    },
}

impl ConfigValue {
    /// Decodes and validates the payload stored under `(config_type, key)`.
    pub fn decode(config_type: &str, key: &str, value: Value) -> Result<Self, DomainError> {
        let Some(known) = ConfigKey::from_pair(config_type, key) else {
            return Ok(ConfigValue::Custom {
                config_type: config_type.to_string(),
                key: key.to_string(),
                value,
            });
        };

        let invalid = |reason: String| DomainError::invalid_payload(config_type, key, reason);
        let decoded = match known {
            ConfigKey::PricingTiers => {
                let tiers: PricingTiers = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
                tiers.check().map_err(invalid)?;
                for offer in &tiers.special_offers {
                    offer.check().map_err(invalid)?;
                }
                ConfigValue::PricingTiers(tiers)
            }
            ConfigKey::RegistrationCategories => ConfigValue::RegistrationCategories(
                serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?,
            ),
            ConfigKey::ActiveDiscounts => {
                let discounts: Vec<Discount> = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
                for discount in &discounts {
                    discount.check().map_err(invalid)?;
                }
                ConfigValue::ActiveDiscounts(discounts)
            }
            ConfigKey::EmailSettings => ConfigValue::EmailSettings(
                serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?,
            ),
            ConfigKey::WebsiteContent => ConfigValue::WebsiteContent(
                serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?,
            ),
            ConfigKey::ReportSettings => {
                let settings: ReportSettings = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
                settings.check().map_err(invalid)?;
                ConfigValue::ReportSettings(settings)
            }
            ConfigKey::BulkEmailSettings => {
                let settings: BulkEmailSettings =
                    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
                settings.check().map_err(invalid)?;
                ConfigValue::BulkEmailSettings(settings)
            }
        };
        Ok(decoded)
    }

    pub fn config_type(&self) -> &str {
        match self {
            ConfigValue::Custom { config_type, .. } => config_type,
            known => known.known_key().map(|k| k.config_type()).unwrap_or_default(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ConfigValue::Custom { key, .. } => key,
            known => known.known_key().map(|k| k.key()).unwrap_or_default(),
        }
    }

    fn known_key(&self) -> Option<ConfigKey> {
        match self {
            ConfigValue::PricingTiers(_) => Some(ConfigKey::PricingTiers),
            ConfigValue::RegistrationCategories(_) => Some(ConfigKey::RegistrationCategories),
            ConfigValue::ActiveDiscounts(_) => Some(ConfigKey::ActiveDiscounts),
            ConfigValue::EmailSettings(_) => Some(ConfigKey::EmailSettings),
            ConfigValue::WebsiteContent(_) => Some(ConfigKey::WebsiteContent),
            ConfigValue::ReportSettings(_) => Some(ConfigKey::ReportSettings),
            ConfigValue::BulkEmailSettings(_) => Some(ConfigKey::BulkEmailSettings),
            ConfigValue::Custom { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<Value, DomainError> {
        let encoded = match self {
            ConfigValue::PricingTiers(v) => serde_json::to_value(v),
            ConfigValue::RegistrationCategories(v) => serde_json::to_value(v),
            ConfigValue::ActiveDiscounts(v) => serde_json::to_value(v),
            ConfigValue::EmailSettings(v) => serde_json::to_value(v),
            ConfigValue::WebsiteContent(v) => serde_json::to_value(v),
            ConfigValue::ReportSettings(v) => serde_json::to_value(v),
            ConfigValue::BulkEmailSettings(v) => serde_json::to_value(v),
            ConfigValue::Custom { value, .. } => Ok(value.clone()),
        };
        encoded.map_err(|e| DomainError::invalid_payload(self.config_type(), self.key(), e))
    }
}

/// A stored configuration document. Unique on `(config_type, key)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub config_type: String,
    pub key: String,
    /// Raw payload; use [`ConfigurationRecord::decode`] for the typed form.
    pub value: Value,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConfigurationRecord {
    pub fn decode(&self) -> Result<ConfigValue, DomainError> {
        ConfigValue::decode(&self.config_type, &self.key, self.value.clone())
    }
}

/// Upsert command for the configuration store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConfiguration {
    pub config_type: String,
    pub key: String,
    pub value: Value,
    pub is_active: bool,
    pub created_by: String,
}

impl NewConfiguration {
    /// Builds an active record. Custom payloads that claim a known pair are
    /// validated against that pair's schema before they can be written.
    pub fn new(value: &ConfigValue, created_by: &str) -> Result<Self, DomainError> {
        let json = value.to_json()?;
        if let ConfigValue::Custom { config_type, key, .. } = value {
            if ConfigKey::from_pair(config_type, key).is_some() {
                ConfigValue::decode(config_type, key, json.clone())?;
            }
        }
        Ok(Self {
            config_type: value.config_type().to_string(),
            key: value.key().to_string(),
            value: json,
            is_active: true,
            created_by: created_by.to_string(),
        })
    }
}

/// Deep-merges `patch` into `target`: objects merge key by key, anything
/// else is replaced.
pub fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_key_pairs_are_unique() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_pair(key.config_type(), key.key()), Some(key));
        }
        assert_eq!(ConfigKey::from_pair("pricing", "unknown"), None);
    }

    #[test]
    fn test_unknown_pair_decodes_as_custom() {
        let value = ConfigValue::decode("feature_flags", "homepage", json!({"banner": true})).unwrap();
        assert_eq!(value.config_type(), "feature_flags");
        assert_eq!(value.key(), "homepage");
        assert_eq!(value.to_json().unwrap(), json!({"banner": true}));
    }

    #[test]
    fn test_known_pair_with_wrong_shape_is_rejected() {
        let err = ConfigValue::decode("discounts", "active_discounts", json!({"not": "a list"})).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload { ref key, .. } if key == "active_discounts"));
    }

    #[test]
    fn test_empty_discount_list_decodes() {
        let value = ConfigValue::decode("discounts", "active_discounts", json!([])).unwrap();
        assert_eq!(value, ConfigValue::ActiveDiscounts(vec![]));
    }

    #[test]
    fn test_custom_value_claiming_known_pair_is_validated() {
        let value = ConfigValue::Custom {
            config_type: "discounts".into(),
            key: "active_discounts".into(),
            value: json!("oops"),
        };
        assert!(NewConfiguration::new(&value, "system").is_err());
    }

    #[test]
    fn test_new_configuration_uses_variant_pair() {
        let entry = NewConfiguration::new(&ConfigValue::ActiveDiscounts(vec![]), "system")
            .unwrap();
        assert_eq!(entry.config_type, "discounts");
        assert_eq!(entry.key, "active_discounts");
        assert_eq!(entry.value, json!([]));
        assert!(entry.is_active);
    }

    #[test]
    fn test_merge_json_is_deep() {
        let mut target = json!({
            "smtpHost": "smtp.example.com",
            "templates": { "registration": { "enabled": false, "body": "kept" } }
        });
        merge_json(
            &mut target,
            &json!({ "templates": { "registration": { "enabled": true }, "payment": { "enabled": true } } }),
        );
        assert_eq!(
            target,
            json!({
                "smtpHost": "smtp.example.com",
                "templates": {
                    "registration": { "enabled": true, "body": "kept" },
                    "payment": { "enabled": true }
                }
            })
        );
    }

    #[test]
    fn test_merge_json_replaces_non_objects() {
        let mut target = json!(["a"]);
        merge_json(&mut target, &json!({"b": 1}));
        assert_eq!(target, json!({"b": 1}));
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = ConfigurationRecord {
            id: Uuid::nil(),
            config_type: "pricing".into(),
            key: "pricing_tiers".into(),
            value: json!({}),
            is_active: true,
            created_by: "system".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "pricing");
        assert_eq!(json["isActive"], true);
    }
}
