// ============================================================================
// Conference API - Conference Handlers
// File: crates/conference-api/src/handlers/conference.rs
// ============================================================================
//! Read-only conference queries (summary, status, categories, tracks, pricing)

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use conference_core::domain::{AbstractTrack, DateWindow, RegistrationCategory};
use conference_core::services::{CategoryPricing, ConferenceStatus};
use conference_shared::{today_utc, utils::parse_date};

use crate::response::{bad_request, not_found, ok, ErrorResponse, HandlerResult};
use crate::state::AppState;

/// `?date=YYYY-MM-DD`; today (UTC) when absent.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    fn resolve(&self) -> Result<NaiveDate, ErrorResponse> {
        match self.date.as_deref() {
            None => Ok(today_utc()),
            Some(raw) => parse_date(raw).ok_or_else(|| bad_request("date must be formatted as YYYY-MM-DD")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSummary {
    pub name: String,
    pub short_name: String,
    pub organization_name: String,
    pub tagline: Option<String>,
    pub event_date: DateWindow,
    pub event_dates_label: String,
    pub venue: VenueSummary,
    pub contact_email: String,
    pub admin_email: Option<String>,
    pub registration_prefix: String,
    pub currency: String,
    pub max_abstract_file_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct VenueSummary {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub category: String,
    pub category_label: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub pricing: CategoryPricing,
}

/// Summary handler - GET /api/v1/conference
pub async fn summary(State(state): State<AppState>) -> HandlerResult<ConferenceSummary> {
    let resolver = state.conference.resolver();
    let conference = resolver.conference();

    ok(ConferenceSummary {
        name: conference.name.clone(),
        short_name: conference.short_name.clone(),
        organization_name: conference.organization_name.clone(),
        tagline: conference.tagline.clone(),
        event_date: conference.event_date,
        event_dates_label: resolver.event_dates_label(),
        venue: VenueSummary {
            name: conference.venue.name.clone(),
            city: conference.venue.city.clone(),
            state: conference.venue.state.clone(),
            country: conference.venue.country.clone(),
        },
        contact_email: conference.contact.email.clone(),
        admin_email: resolver.admin_email().ok(),
        registration_prefix: resolver.registration_prefix(),
        currency: conference.payment.currency.clone(),
        max_abstract_file_bytes: resolver.max_abstract_file_bytes(),
    })
}

/// Status handler - GET /api/v1/conference/status
pub async fn status(State(state): State<AppState>, Query(query): Query<DateQuery>) -> HandlerResult<ConferenceStatus> {
    let date = query.resolve()?;
    ok(state.conference.status(date).await)
}

/// Categories handler - GET /api/v1/conference/categories
pub async fn categories(State(state): State<AppState>) -> HandlerResult<Vec<RegistrationCategory>> {
    ok(state.conference.conference().registration.categories.clone())
}

/// Category handler - GET /api/v1/conference/categories/{key}
pub async fn category(State(state): State<AppState>, Path(key): Path<String>) -> HandlerResult<RegistrationCategory> {
    match state.conference.resolver().category(&key) {
        Some(category) => ok(category.clone()),
        None => Err(not_found(&format!("Unknown registration category: {}", key))),
    }
}

/// Tracks handler - GET /api/v1/conference/tracks
pub async fn tracks(State(state): State<AppState>) -> HandlerResult<Vec<AbstractTrack>> {
    ok(state.conference.resolver().enabled_tracks().cloned().collect())
}

/// Pricing handler - GET /api/v1/conference/pricing/{category}
pub async fn pricing(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<PricingView> {
    let date = query.resolve()?;

    let resolver = state.conference.resolver();
    if !resolver.is_valid_category_key(&category) {
        return Err(not_found(&format!("Unknown registration category: {}", category)));
    }

    let pricing = state.conference.pricing(&category, date).await;
    debug!("Pricing for {} on {}: tier {} ({:?})", category, date, pricing.tier, pricing.source);

    ok(PricingView {
        category_label: resolver.category_label(&category),
        category,
        date,
        pricing,
    })
}
