// ============================================================================
// Conference Core - Conference Definition
// File: crates/conference-core/src/domain/conference.rs
// Description: Immutable description of one conference instance
// ============================================================================

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::tier::{TierKey, TierSlot, TierSource};
use super::window::{ensure_ordered, DateWindow};
use crate::error::DomainError;

const BUILTIN_DEFINITION: &str = include_str!("../../definitions/iscsgcon_2026.json");

/// Conference definition, constructed once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceDefinition {
    #[validate(length(min = 1, message = "Conference name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Short name must not be empty"))]
    pub short_name: String,

    /// Explicit registration-ID prefix, e.g. `ISCSG2026`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_prefix: Option<String>,

    pub organization_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    pub event_date: DateWindow,
    pub venue: Venue,

    #[validate(nested)]
    pub contact: Contact,

    pub theme: Theme,

    #[validate(nested)]
    pub registration: Registration,

    pub payment: Payment,

    #[validate(nested)]
    pub abstracts: Abstracts,

    pub email: EmailBranding,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,

    pub features: Features,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub accessibility: Vec<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub about_city: Option<AboutCity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutCity {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<CityHighlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityHighlight {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Not validated as an address here; `admin_email` reports malformed values.
    #[validate(length(min = 1, message = "Contact email must not be empty"))]
    pub email: String,
    pub phone: String,
    pub website: String,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub abstracts_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub error: String,
    pub warning: String,
    pub dark: String,
    pub light: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub enabled: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub form_fields: FormFields,

    #[validate(nested)]
    pub categories: Vec<RegistrationCategory>,

    pub workshops_enabled: bool,
    #[serde(default)]
    pub max_workshops_per_user: Option<u32>,
    pub accompanying_person_enabled: bool,
    #[serde(default)]
    pub max_accompanying_persons: Option<u32>,
}

impl Registration {
    /// The registration window, only when both bounds are configured.
    pub fn window(&self) -> Option<DateWindow> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateWindow::new(start, end)),
            _ => None,
        }
    }
}

/// Dropdown options for the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub designations: Vec<String>,
    #[serde(default)]
    pub relationship_types: Vec<String>,
    #[serde(default)]
    pub payment_methods: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCategory {
    #[validate(length(min = 1, message = "Category key must not be empty"))]
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_membership: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub enabled: bool,
    pub currency: String,
    pub currency_symbol: String,
    pub methods: PaymentMethods,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
    pub tiers: PaymentTiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethods {
    pub razorpay: bool,
    pub bank_transfer: bool,
    pub cash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub ifsc_code: String,
    #[serde(default)]
    pub branch_name: Option<String>,
}

/// Static tier windows; the bootstrap default for pricing resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_bird: Option<TierWindow>,
    pub regular: TierWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onsite: Option<TierWindow>,
}

impl PaymentTiers {
    pub fn get(&self, key: TierKey) -> Option<&TierWindow> {
        match key {
            TierKey::EarlyBird => self.early_bird.as_ref(),
            TierKey::Regular => Some(&self.regular),
            TierKey::Onsite => self.onsite.as_ref(),
        }
    }
}

impl TierSource for PaymentTiers {
    fn tier_slot(&self, key: TierKey) -> Option<TierSlot> {
        self.get(key).map(|tier| TierSlot {
            enabled: tier.enabled,
            window: tier.window(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierWindow {
    pub enabled: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: String,
}

impl TierWindow {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Abstracts {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_window: Option<SubmissionWindow>,
    pub max_abstracts_per_user: u32,

    #[validate(nested)]
    pub tracks: Vec<AbstractTrack>,

    #[serde(default)]
    pub allowed_initial_file_types: Vec<String>,
    #[serde(default)]
    pub allowed_final_file_types: Vec<String>,

    #[serde(rename = "maxFileSizeMB")]
    #[validate(range(min = 1, message = "Maximum file size must be at least 1 MB"))]
    pub max_file_size_mb: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionWindow {
    pub enabled: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SubmissionWindow {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AbstractTrack {
    #[validate(length(min = 1, message = "Track key must not be empty"))]
    pub key: String,
    pub label: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<String>,
}

/// Which upload an abstract file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStage {
    Initial,
    Final,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailBranding {
    pub from_name: String,
    pub reply_to: String,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub user_dashboard: bool,
    pub admin_panel: bool,
    pub reviewer_portal: bool,
    pub abstract_submission: bool,
    pub workshop_booking: bool,
    pub certificate_generation: bool,
    pub qr_code_generation: bool,
}

impl ConferenceDefinition {
    /// The definition compiled into the binary (ISCSGCON 2026).
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_json(BUILTIN_DEFINITION)
    }

    /// Parses and validates a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let definition: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidConference(e.to_string()))?;
        definition.ensure_valid()?;
        Ok(definition)
    }

    /// Rejects definitions that would resolve silently wrong later: empty
    /// identity fields, reversed date windows, empty or duplicate keys.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidConference(e.to_string()))?;

        let mut problems = Vec::new();

        if let Err(e) = ensure_ordered("eventDate", &self.event_date) {
            problems.push(e);
        }
        if let Some(window) = self.registration.window() {
            if let Err(e) = ensure_ordered("registration", &window) {
                problems.push(e);
            }
        }
        for key in TierKey::PRECEDENCE {
            if let Some(tier) = self.payment.tiers.get(key) {
                if let Err(e) = ensure_ordered(&format!("payment.tiers.{}", key), &tier.window()) {
                    problems.push(e);
                }
            }
        }
        if let Some(submission) = &self.abstracts.submission_window {
            if let Err(e) = ensure_ordered("abstracts.submissionWindow", &submission.window()) {
                problems.push(e);
            }
        }

        if let Some(key) = first_duplicate(self.registration.categories.iter().map(|c| c.key.as_str())) {
            problems.push(format!("duplicate registration category key '{}'", key));
        }
        if let Some(key) = first_duplicate(self.abstracts.tracks.iter().map(|t| t.key.as_str())) {
            problems.push(format!("duplicate abstract track key '{}'", key));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidConference(problems.join("; ")))
        }
    }
}

fn first_duplicate<'a>(keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    keys.into_iter().find(|key| !seen.insert(*key))
}
