//! Payload schemas of the settings, content, report, and bulk-email records

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of `(settings, email_settings)`.
///
/// Seeding only patches template toggles, so every other field an operator
/// stored is kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub templates: BTreeMap<String, EmailTemplateToggle>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplateToggle {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `(content, website_content)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteContent {
    pub hero_section: HeroSection,
    pub about_section: AboutSection,
    pub venue_info: VenueInfo,
    pub key_dates: KeyDates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueInfo {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDates {
    pub conference_start: NaiveDate,
    pub conference_end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

/// Payload of `(reports, report_settings)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSettings {
    pub export_formats: Vec<ExportFormat>,
    pub default_format: ExportFormat,
    pub include_fields: ReportFields,
    pub filters: ReportFilters,
}

impl ReportSettings {
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.export_formats.contains(&self.default_format) {
            Ok(())
        } else {
            Err(format!("default format {:?} is not an export format", self.default_format))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    #[serde(default)]
    pub registrations: Vec<String>,
    #[serde(default)]
    pub payments: Vec<String>,
    #[serde(default)]
    pub workshops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    pub date_range: bool,
    pub registration_type: bool,
    pub payment_status: bool,
    pub verification_status: bool,
}

/// Payload of `(bulk_email, bulk_email_settings)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmailSettings {
    pub enabled: bool,
    pub max_recipients_per_batch: u32,
    /// Milliseconds.
    pub delay_between_batches: u64,
    pub max_emails_per_day: u32,
    #[serde(default)]
    pub allowed_senders: Vec<String>,
    #[serde(default)]
    pub templates: BTreeMap<String, BulkEmailTemplate>,
    #[serde(default)]
    pub recipient_filters: Vec<String>,
}

impl BulkEmailSettings {
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.max_recipients_per_batch == 0 {
            return Err("maxRecipientsPerBatch must be positive".into());
        }
        if self.max_recipients_per_batch > self.max_emails_per_day {
            return Err("maxRecipientsPerBatch exceeds maxEmailsPerDay".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkEmailTemplate {
    pub subject: String,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_settings_keep_unknown_fields() {
        let raw = json!({
            "smtpHost": "smtp.example.com",
            "templates": {
                "registration": { "enabled": true, "subject": "Welcome", "bodyHtml": "<p>Hi</p>" }
            }
        });
        let settings: EmailSettings = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settings.extra.get("smtpHost"), Some(&json!("smtp.example.com")));
        assert!(settings.templates["registration"].extra.contains_key("bodyHtml"));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);
    }

    #[test]
    fn test_report_default_format_must_be_exported() {
        let settings: ReportSettings = serde_json::from_value(json!({
            "exportFormats": ["csv"],
            "defaultFormat": "pdf",
            "includeFields": { "registrations": ["name"] },
            "filters": { "dateRange": true, "registrationType": true, "paymentStatus": false, "verificationStatus": false }
        }))
        .unwrap();
        assert!(settings.check().is_err());
    }

    #[test]
    fn test_bulk_email_batch_limits() {
        let mut settings = BulkEmailSettings {
            enabled: true,
            max_recipients_per_batch: 50,
            delay_between_batches: 2000,
            max_emails_per_day: 1000,
            allowed_senders: vec!["admin".into()],
            templates: BTreeMap::new(),
            recipient_filters: vec![],
        };
        assert!(settings.check().is_ok());
        settings.max_recipients_per_batch = 0;
        assert!(settings.check().is_err());
        settings.max_recipients_per_batch = 5000;
        assert!(settings.check().is_err());
    }
}
