//! Default operational records written by the seeding procedure.
//!
//! Payloads are assembled as JSON and decoded through [`ConfigValue::decode`],
//! so a default that drifts from its schema fails before anything is written.

use serde_json::{json, Value};

use crate::domain::{ConferenceDefinition, ConfigKey, ConfigValue, EmailSettings};
use crate::error::DomainError;
use crate::services::resolver::Resolver;

/// One write performed by the seeding procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedWrite {
    /// Upsert the full payload.
    Replace(ConfigValue),
    /// Deep-merge a partial payload into whatever is stored.
    Merge { key: ConfigKey, patch: Value },
}

impl SeedWrite {
    pub fn config_type(&self) -> &str {
        match self {
            SeedWrite::Replace(value) => value.config_type(),
            SeedWrite::Merge { key, .. } => key.config_type(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SeedWrite::Replace(value) => value.key(),
            SeedWrite::Merge { key, .. } => key.key(),
        }
    }
}

/// Every default write, in the order they are applied.
pub fn default_writes(conference: &ConferenceDefinition) -> Result<Vec<SeedWrite>, DomainError> {
    let resolver = Resolver::new(conference);

    let pricing = pricing_tiers(conference);
    let categories = pricing["regular"]["categories"].clone();

    Ok(vec![
        SeedWrite::Replace(decode(ConfigKey::PricingTiers, pricing)?),
        SeedWrite::Replace(decode(ConfigKey::RegistrationCategories, categories)?),
        SeedWrite::Replace(decode(ConfigKey::ActiveDiscounts, json!([]))?),
        email_settings_patch(&resolver)?,
        SeedWrite::Replace(decode(ConfigKey::WebsiteContent, website_content(&resolver))?),
        SeedWrite::Replace(decode(ConfigKey::ReportSettings, report_settings())?),
        SeedWrite::Replace(decode(ConfigKey::BulkEmailSettings, bulk_email_settings(&resolver))?),
    ])
}

fn decode(key: ConfigKey, value: Value) -> Result<ConfigValue, DomainError> {
    ConfigValue::decode(key.config_type(), key.key(), value)
}

fn category_prices(currency: &str) -> Value {
    json!({
        "postgraduate": { "amount": 2500, "currency": currency, "label": "Postgraduate" },
        "consultant": { "amount": 5000, "currency": currency, "label": "Consultants & Practicing Clinicians" }
    })
}

fn pricing_tiers(conference: &ConferenceDefinition) -> Value {
    let currency = conference.payment.currency.as_str();
    json!({
        "specialOffers": [],
        "earlyBird": {
            "name": "Early Bird Registration",
            "description": "Early Bird Registration",
            "startDate": "2025-12-01",
            "endDate": "2026-02-28",
            "isActive": true,
            "categories": category_prices(currency)
        },
        "regular": {
            "name": "Regular Registration",
            "description": "Standard registration pricing",
            "startDate": "2026-03-01",
            "endDate": "2026-03-13",
            "isActive": true,
            "categories": category_prices(currency)
        },
        "onsite": {
            "name": "Spot Registration",
            "description": "Registration at the venue",
            "startDate": "2026-03-14",
            "endDate": "2026-03-15",
            "isActive": true,
            "categories": category_prices(currency)
        },
        "workshops": [
            {
                "id": "orthobiologics-workshop",
                "name": "Live Orthobiologics Workshop",
                "description": "Hands-on workshop on orthobiologics and regenerative medicine",
                "instructor": "Dr. Lalith Mohan C",
                "duration": "Full Day",
                "price": 3500,
                "currency": currency,
                "maxSeats": 50,
                "venue": "NIMS Hyderabad",
                "date": conference.event_date.start,
                "isActive": true
            }
        ]
    })
}

/// Only template toggles and subjects; other stored fields stay untouched.
fn email_settings_patch(resolver: &Resolver<'_>) -> Result<SeedWrite, DomainError> {
    let template = |label: &str| json!({ "enabled": true, "subject": resolver.email_subject(label) });
    let patch = json!({
        "templates": {
            "registration": template("Application Received"),
            "payment": template("Payment Confirmation"),
            "reminder": template("Conference Reminder"),
            "bulkEmail": template("Important Update")
        }
    });

    let key = ConfigKey::EmailSettings;
    serde_json::from_value::<EmailSettings>(patch.clone())
        .map_err(|e| DomainError::invalid_payload(key.config_type(), key.key(), e))?;
    Ok(SeedWrite::Merge { key, patch })
}

fn website_content(resolver: &Resolver<'_>) -> Value {
    let conference = resolver.conference();
    let venue = &conference.venue;
    let deadline = conference.registration.window().map(|w| w.end);

    json!({
        "heroSection": {
            "title": conference.short_name,
            "subtitle": conference.tagline.clone().unwrap_or_default(),
            "description": format!(
                "Join the {} at {}, {} on {}.",
                conference.name,
                venue.name,
                venue.city,
                resolver.event_dates_label()
            ),
            "ctaText": "Register Now",
            "backgroundImage": "/hero-bg.jpg"
        },
        "aboutSection": {
            "title": format!("About {}", conference.short_name),
            "description": format!(
                "The {} proudly presents {}, bringing together leading stem cell and regenerative medicine \
                 professionals to share knowledge, innovations, and best practices.",
                conference.organization_name, conference.short_name
            ),
            "highlights": [
                "Expert speakers from around the world",
                "Live Orthobiologics Workshop at NIMS",
                "Latest research presentations",
                "Networking opportunities"
            ]
        },
        "venueInfo": {
            "name": venue.name,
            "address": format!("{}, {}, {}", venue.city, venue.state, venue.country),
            "mapUrl": venue.google_maps_link.clone().or_else(|| venue.map_url.clone()),
            "facilities": venue.facilities
        },
        "keyDates": {
            "conferenceStart": conference.event_date.start,
            "conferenceEnd": conference.event_date.end,
            "workshopDate": conference.event_date.start,
            "registrationDeadline": deadline
        }
    })
}

fn report_settings() -> Value {
    json!({
        "exportFormats": ["csv", "excel", "pdf"],
        "defaultFormat": "csv",
        "includeFields": {
            "registrations": [
                "registrationId", "name", "email", "phone", "institution",
                "registrationType", "registrationDate", "paymentStatus", "amount", "utrNumber"
            ],
            "payments": [
                "registrationId", "amount", "currency", "method", "status",
                "transactionDate", "utrNumber", "verifiedBy"
            ],
            "workshops": ["workshopName", "participantName", "email", "registrationDate", "paymentStatus"]
        },
        "filters": {
            "dateRange": true,
            "registrationType": true,
            "paymentStatus": true,
            "verificationStatus": true
        }
    })
}

fn bulk_email_settings(resolver: &Resolver<'_>) -> Value {
    let short_name = &resolver.conference().short_name;
    json!({
        "enabled": true,
        "maxRecipientsPerBatch": 50,
        "delayBetweenBatches": 2000,
        "maxEmailsPerDay": 1000,
        "allowedSenders": ["admin", "moderator"],
        "templates": {
            "welcome": { "subject": format!("Welcome to {}", short_name), "enabled": true },
            "reminder": { "subject": resolver.email_subject("Conference Reminder"), "enabled": true },
            "update": { "subject": resolver.email_subject("Important Update"), "enabled": true },
            "cancellation": { "subject": resolver.email_subject("Conference Update"), "enabled": true }
        },
        "recipientFilters": [
            "all_registered", "paid_only", "pending_payment",
            "postgraduates", "consultants", "workshop_participants"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExportFormat, TierKey};

    fn writes() -> Vec<SeedWrite> {
        default_writes(&ConferenceDefinition::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_default_writes_cover_every_known_pair() {
        let pairs: Vec<(String, String)> = writes()
            .iter()
            .map(|w| (w.config_type().to_string(), w.key().to_string()))
            .collect();
        let expected: Vec<(String, String)> = ConfigKey::ALL
            .iter()
            .map(|k| (k.config_type().to_string(), k.key().to_string()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_registration_categories_mirror_regular_tier() {
        let writes = writes();
        let (SeedWrite::Replace(ConfigValue::PricingTiers(tiers)), SeedWrite::Replace(ConfigValue::RegistrationCategories(mirror))) =
            (&writes[0], &writes[1])
        else {
            panic!("unexpected seed order");
        };
        assert_eq!(&tiers.regular.categories, mirror);
        assert_eq!(tiers.price(TierKey::EarlyBird, "postgraduate").unwrap().amount, 2500);
        assert_eq!(tiers.price(TierKey::Onsite, "consultant").unwrap().currency, "INR");
        assert_eq!(tiers.workshops[0].price, 3500);
    }

    #[test]
    fn test_email_patch_uses_derived_subjects() {
        let writes = writes();
        let SeedWrite::Merge { key, patch } = &writes[3] else {
            panic!("email settings must be merged");
        };
        assert_eq!(*key, ConfigKey::EmailSettings);
        assert_eq!(patch["templates"]["payment"]["subject"], "Payment Confirmation - ISCSGCON 2026");
        assert_eq!(patch["templates"]["bulkEmail"]["enabled"], true);
    }

    #[test]
    fn test_website_content_derived_from_definition() {
        let writes = writes();
        let SeedWrite::Replace(ConfigValue::WebsiteContent(content)) = &writes[4] else {
            panic!("unexpected seed order");
        };
        assert_eq!(content.hero_section.title, "ISCSGCON 2026");
        assert_eq!(
            content.hero_section.description,
            "Join the 8th International Conference on Stem Cells at Taj Deccan, Hyderabad on March 14-15, 2026."
        );
        assert_eq!(content.venue_info.address, "Hyderabad, Telangana, India");
        assert_eq!(content.key_dates.registration_deadline.unwrap().to_string(), "2026-03-13");
    }

    #[test]
    fn test_report_and_bulk_email_defaults() {
        let writes = writes();
        let SeedWrite::Replace(ConfigValue::ReportSettings(reports)) = &writes[5] else {
            panic!("unexpected seed order");
        };
        assert_eq!(reports.default_format, ExportFormat::Csv);

        let SeedWrite::Replace(ConfigValue::BulkEmailSettings(bulk)) = &writes[6] else {
            panic!("unexpected seed order");
        };
        assert_eq!(bulk.max_recipients_per_batch, 50);
        assert_eq!(bulk.templates["welcome"].subject, "Welcome to ISCSGCON 2026");
    }
}
