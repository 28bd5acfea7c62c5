// ============================================================================
// Conference Core - Resolution Engine
// File: crates/conference-core/src/services/resolver.rs
// ============================================================================
//! Pure date-window and key resolution over a conference definition.
//!
//! All dates are calendar dates in UTC. Windows include both ends.

use chrono::{Datelike, NaiveDate};

use conference_shared::constants::{ADMIN_MAILBOX, BYTES_PER_MB};
use conference_shared::types::today_utc;
use conference_shared::utils::{email_domain, strip_whitespace};

use crate::domain::{
    resolve_tier, AbstractTrack, ConferenceDefinition, RegistrationCategory, SubmissionStage, TierKey,
};
use crate::error::DomainError;

/// Borrowing view that answers time- and key-dependent questions.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    conference: &'a ConferenceDefinition,
}

impl<'a> Resolver<'a> {
    pub fn new(conference: &'a ConferenceDefinition) -> Self {
        Self { conference }
    }

    pub fn conference(&self) -> &'a ConferenceDefinition {
        self.conference
    }

    // ---------------------------------------------------------------------
    // Time windows
    // ---------------------------------------------------------------------

    /// Tier from the static payment tiers.
    pub fn current_pricing_tier(&self, today: NaiveDate) -> TierKey {
        resolve_tier(&self.conference.payment.tiers, today)
    }

    pub fn current_pricing_tier_today(&self) -> TierKey {
        self.current_pricing_tier(today_utc())
    }

    /// Display label of a static tier, or its key when the tier is not declared.
    pub fn tier_label(&self, key: TierKey) -> String {
        self.conference
            .payment
            .tiers
            .get(key)
            .map(|tier| tier.label.clone())
            .unwrap_or_else(|| key.as_str().to_string())
    }

    pub fn is_registration_open(&self, today: NaiveDate) -> bool {
        let registration = &self.conference.registration;
        if !registration.enabled {
            return false;
        }
        registration.window().map_or(true, |window| window.contains(today))
    }

    pub fn is_registration_open_today(&self) -> bool {
        self.is_registration_open(today_utc())
    }

    pub fn is_abstract_submission_open(&self, today: NaiveDate) -> bool {
        let abstracts = &self.conference.abstracts;
        if !abstracts.enabled {
            return false;
        }
        match &abstracts.submission_window {
            Some(submission) if submission.enabled => submission.window().contains(today),
            _ => true,
        }
    }

    pub fn is_abstract_submission_open_today(&self) -> bool {
        self.is_abstract_submission_open(today_utc())
    }

    /// Days from `today` to the first event day; negative once it has started.
    pub fn days_until_event(&self, today: NaiveDate) -> i64 {
        (self.conference.event_date.start - today).num_days()
    }

    pub fn is_event_in_progress(&self, today: NaiveDate) -> bool {
        self.conference.event_date.contains(today)
    }

    // ---------------------------------------------------------------------
    // Registration categories
    // ---------------------------------------------------------------------

    pub fn category(&self, key: &str) -> Option<&'a RegistrationCategory> {
        self.conference.registration.categories.iter().find(|c| c.key == key)
    }

    /// Label for `key`, or `key` itself when no such category exists.
    pub fn category_label(&self, key: &str) -> String {
        self.category(key)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    /// Keys in declared order.
    pub fn category_keys(&self) -> Vec<&'a str> {
        self.conference
            .registration
            .categories
            .iter()
            .map(|c| c.key.as_str())
            .collect()
    }

    pub fn is_valid_category_key(&self, key: &str) -> bool {
        self.category_keys().iter().any(|k| *k == key)
    }

    // ---------------------------------------------------------------------
    // Abstract tracks
    // ---------------------------------------------------------------------

    pub fn track(&self, key: &str) -> Option<&'a AbstractTrack> {
        self.conference.abstracts.tracks.iter().find(|t| t.key == key)
    }

    /// Label for `key`, or `key` itself when no such track exists.
    pub fn track_label(&self, key: &str) -> String {
        self.track(key)
            .map(|t| t.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    /// Enabled tracks in declared order.
    pub fn enabled_tracks(&self) -> impl Iterator<Item = &'a AbstractTrack> {
        self.conference.abstracts.tracks.iter().filter(|t| t.enabled)
    }

    pub fn track_keys(&self) -> Vec<&'a str> {
        self.enabled_tracks().map(|t| t.key.as_str()).collect()
    }

    /// Disabled tracks do not accept submissions and are not valid.
    pub fn is_valid_track_key(&self, key: &str) -> bool {
        self.enabled_tracks().any(|t| t.key == key)
    }

    pub fn allows_abstract_file(&self, stage: SubmissionStage, mime_type: &str) -> bool {
        let allowed = match stage {
            SubmissionStage::Initial => &self.conference.abstracts.allowed_initial_file_types,
            SubmissionStage::Final => &self.conference.abstracts.allowed_final_file_types,
        };
        allowed.iter().any(|t| t.eq_ignore_ascii_case(mime_type.trim()))
    }

    pub fn max_abstract_file_bytes(&self) -> u64 {
        u64::from(self.conference.abstracts.max_file_size_mb) * BYTES_PER_MB
    }

    // ---------------------------------------------------------------------
    // Derived identifiers
    // ---------------------------------------------------------------------

    /// Explicit prefix when set and non-empty, else the short name without whitespace.
    pub fn registration_prefix(&self) -> String {
        match self.conference.registration_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => prefix.to_string(),
            _ => strip_whitespace(&self.conference.short_name),
        }
    }

    /// `admin@` on the domain of the contact email.
    pub fn admin_email(&self) -> Result<String, DomainError> {
        let contact = &self.conference.contact.email;
        let domain = email_domain(contact).ok_or_else(|| DomainError::MalformedEmail(contact.clone()))?;
        Ok(format!("{}@{}", ADMIN_MAILBOX, domain))
    }

    pub fn email_subject(&self, label: &str) -> String {
        format!("{} - {}", label, self.conference.short_name)
    }

    /// e.g. `March 14-15, 2026`, or `March 31 - April 1, 2026` across months.
    pub fn event_dates_label(&self) -> String {
        let window = self.conference.event_date;
        let (start, end) = (window.start, window.end);
        if start == end {
            start.format("%B %-d, %Y").to_string()
        } else if (start.year(), start.month()) == (end.year(), end.month()) {
            format!("{}-{}", start.format("%B %-d"), end.format("%-d, %Y"))
        } else if start.year() == end.year() {
            format!("{} - {}", start.format("%B %-d"), end.format("%B %-d, %Y"))
        } else {
            format!("{} - {}", start.format("%B %-d, %Y"), end.format("%B %-d, %Y"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn conference() -> ConferenceDefinition {
        ConferenceDefinition::builtin().unwrap()
    }

    /// Tier windows used by the seeded pricing record.
    fn seeded_windows(conference: &mut ConferenceDefinition) {
        let tiers = &mut conference.payment.tiers;
        let early_bird = tiers.early_bird.as_mut().unwrap();
        early_bird.start_date = date(2025, 12, 1);
        early_bird.end_date = date(2026, 2, 28);
        tiers.regular.start_date = date(2026, 3, 1);
        tiers.regular.end_date = date(2026, 3, 13);
        let onsite = tiers.onsite.as_mut().unwrap();
        onsite.start_date = date(2026, 3, 14);
        onsite.end_date = date(2026, 3, 15);
    }

    #[test]
    fn test_end_to_end_tier_scenario() {
        let mut conference = conference();
        seeded_windows(&mut conference);
        let resolver = Resolver::new(&conference);

        assert_eq!(resolver.current_pricing_tier(date(2026, 1, 15)), TierKey::EarlyBird);
        assert_eq!(resolver.current_pricing_tier(date(2026, 3, 5)), TierKey::Regular);
        assert_eq!(resolver.current_pricing_tier(date(2026, 3, 14)), TierKey::Onsite);
        assert_eq!(resolver.current_pricing_tier(date(2026, 3, 20)), TierKey::Regular);
    }

    #[test]
    fn test_tier_end_date_is_inclusive() {
        let mut conference = conference();
        seeded_windows(&mut conference);
        let resolver = Resolver::new(&conference);

        assert_eq!(resolver.current_pricing_tier(date(2026, 2, 28)), TierKey::EarlyBird);
        assert_eq!(resolver.current_pricing_tier(date(2026, 3, 13)), TierKey::Regular);
        assert_eq!(resolver.current_pricing_tier(date(2026, 3, 15)), TierKey::Onsite);
    }

    #[test]
    fn test_overlapping_tiers_prefer_early_bird() {
        let mut conference = conference();
        conference.payment.tiers.regular.start_date = date(2025, 6, 1);
        let resolver = Resolver::new(&conference);
        assert_eq!(resolver.current_pricing_tier(date(2025, 7, 1)), TierKey::EarlyBird);
    }

    #[test]
    fn test_tier_labels() {
        let mut conference = conference();
        let resolver = Resolver::new(&conference);
        assert_eq!(resolver.tier_label(TierKey::Onsite), "Late / Spot Registration");

        conference.payment.tiers.onsite = None;
        let resolver = Resolver::new(&conference);
        assert_eq!(resolver.tier_label(TierKey::Onsite), "onsite");
    }

    #[test]
    fn test_registration_disabled_is_closed() {
        let mut conference = conference();
        conference.registration.enabled = false;
        let resolver = Resolver::new(&conference);
        assert!(!resolver.is_registration_open(date(2025, 10, 1)));
        conference.registration.start_date = None;
        conference.registration.end_date = None;
        let resolver = Resolver::new(&conference);
        assert!(!resolver.is_registration_open(date(2025, 10, 1)));
    }

    #[test]
    fn test_registration_without_dates_is_open() {
        let mut conference = conference();
        conference.registration.start_date = None;
        conference.registration.end_date = None;
        let resolver = Resolver::new(&conference);
        assert!(resolver.is_registration_open(date(1999, 1, 1)));
        assert!(resolver.is_registration_open(date(2099, 12, 31)));
    }

    #[test]
    fn test_registration_window_bounds() {
        let conference = conference();
        let resolver = Resolver::new(&conference);
        assert!(!resolver.is_registration_open(date(2025, 5, 31)));
        assert!(resolver.is_registration_open(date(2025, 6, 1)));
        assert!(resolver.is_registration_open(date(2026, 3, 13)));
        assert!(!resolver.is_registration_open(date(2026, 3, 14)));
    }

    #[test]
    fn test_abstract_submission_window() {
        let mut conference = conference();
        {
            let resolver = Resolver::new(&conference);
            assert!(resolver.is_abstract_submission_open(date(2026, 2, 28)));
            assert!(!resolver.is_abstract_submission_open(date(2026, 3, 1)));
        }

        conference.abstracts.submission_window.as_mut().unwrap().enabled = false;
        {
            let resolver = Resolver::new(&conference);
            assert!(resolver.is_abstract_submission_open(date(2030, 1, 1)));
        }

        conference.abstracts.enabled = false;
        let resolver = Resolver::new(&conference);
        assert!(!resolver.is_abstract_submission_open(date(2025, 9, 1)));
    }

    #[test]
    fn test_missing_submission_window_is_open() {
        let mut conference = conference();
        conference.abstracts.submission_window = None;
        let resolver = Resolver::new(&conference);
        assert!(resolver.is_abstract_submission_open(date(2030, 1, 1)));
    }

    #[test]
    fn test_category_lookup() {
        let conference = conference();
        let resolver = Resolver::new(&conference);

        assert_eq!(resolver.category_label("iscsg-member"), "ISCSG Member");
        assert_eq!(
            resolver.category_keys(),
            vec!["iscsg-member", "consultant", "postgraduate", "international", "complimentary"]
        );
        for key in resolver.category_keys() {
            assert!(resolver.is_valid_category_key(key));
        }
        assert!(!resolver.is_valid_category_key("student"));
        assert!(resolver.category("iscsg-member").unwrap().requires_membership);
    }

    #[test]
    fn test_unknown_category_label_is_key_and_idempotent() {
        let conference = conference();
        let resolver = Resolver::new(&conference);
        let once = resolver.category_label("legacy-delegate");
        assert_eq!(once, "legacy-delegate");
        assert_eq!(resolver.category_label(&once), once);
    }

    #[test]
    fn test_track_lookup() {
        let mut conference = conference();
        conference.abstracts.tracks[9].enabled = false;
        let resolver = Resolver::new(&conference);

        assert_eq!(resolver.track_label("ent"), "ENT");
        assert_eq!(resolver.track_label("cardiology"), "cardiology");
        assert!(resolver.is_valid_track_key("orthopedics"));
        assert!(!resolver.is_valid_track_key("e-poster"));
        assert_eq!(resolver.track_label("e-poster"), "E-Poster");
        assert_eq!(resolver.track_keys().len(), 9);
    }

    #[test]
    fn test_registration_prefix() {
        let mut conference = conference();
        assert_eq!(Resolver::new(&conference).registration_prefix(), "ISCSG2026");

        conference.registration_prefix = Some(String::new());
        assert_eq!(Resolver::new(&conference).registration_prefix(), "ISCSGCON2026");

        conference.registration_prefix = Some("  ".into());
        assert_eq!(Resolver::new(&conference).registration_prefix(), "  ");

        conference.registration_prefix = None;
        assert_eq!(Resolver::new(&conference).registration_prefix(), "ISCSGCON2026");
    }

    #[test]
    fn test_admin_email() {
        let mut conference = conference();
        assert_eq!(
            Resolver::new(&conference).admin_email().unwrap(),
            "admin@iscsgcon2026hyderabad.com"
        );

        conference.contact.email = "info.iscsgcon".into();
        let err = Resolver::new(&conference).admin_email().unwrap_err();
        assert_eq!(err, DomainError::MalformedEmail("info.iscsgcon".into()));
    }

    #[test]
    fn test_email_subject() {
        let conference = conference();
        assert_eq!(
            Resolver::new(&conference).email_subject("Registration Confirmation"),
            "Registration Confirmation - ISCSGCON 2026"
        );
    }

    #[test]
    fn test_abstract_files() {
        let conference = conference();
        let resolver = Resolver::new(&conference);
        assert!(resolver.allows_abstract_file(SubmissionStage::Initial, "application/msword"));
        assert!(!resolver.allows_abstract_file(SubmissionStage::Final, "application/msword"));
        assert!(!resolver.allows_abstract_file(SubmissionStage::Initial, "application/pdf"));
        assert_eq!(resolver.max_abstract_file_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_event_countdown() {
        let conference = conference();
        let resolver = Resolver::new(&conference);
        assert_eq!(resolver.days_until_event(date(2026, 3, 4)), 10);
        assert_eq!(resolver.days_until_event(date(2026, 3, 15)), -1);
        assert!(resolver.is_event_in_progress(date(2026, 3, 15)));
        assert!(!resolver.is_event_in_progress(date(2026, 3, 16)));
    }

    #[test]
    fn test_event_dates_label() {
        let mut conference = conference();
        assert_eq!(Resolver::new(&conference).event_dates_label(), "March 14-15, 2026");

        conference.event_date = DateWindow::new(date(2026, 3, 31), date(2026, 4, 1));
        assert_eq!(Resolver::new(&conference).event_dates_label(), "March 31 - April 1, 2026");

        conference.event_date = DateWindow::new(date(2026, 3, 14), date(2026, 3, 14));
        assert_eq!(Resolver::new(&conference).event_dates_label(), "March 14, 2026");
    }
}
