use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tokio::task::JoinSet;

use conference_core::domain::{ConferenceDefinition, NewConfiguration, TierKey};
use conference_core::repositories::ConfigurationRepository;
use conference_core::services::{ConferenceService, PricingSource, SeedAction, SeedMode, SeedService};
use conference_infrastructure::InMemoryConfigurationRepository;

fn conference() -> Arc<ConferenceDefinition> {
    Arc::new(ConferenceDefinition::builtin().expect("built-in definition"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn seeding_twice_leaves_one_identical_record_per_pair() {
    let repo = Arc::new(InMemoryConfigurationRepository::new());
    let seeder = SeedService::new(conference(), repo.clone());

    seeder.seed(SeedMode::Reset).await.unwrap();
    let first = repo.list_all().await.unwrap();

    seeder.seed(SeedMode::Reset).await.unwrap();
    let second = repo.list_all().await.unwrap();

    assert_eq!(first.len(), 7);
    assert_eq!(second.len(), 7);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!((&a.config_type, &a.key), (&b.config_type, &b.key));
        assert_eq!(a.id, b.id);
        assert_eq!(a.value, b.value);
        assert_eq!(a.created_at, b.created_at);
        assert!(b.updated_at >= a.updated_at);
        assert!(b.is_active);
    }
}

#[tokio::test]
async fn seeding_keeps_unrelated_email_settings() {
    let repo = Arc::new(InMemoryConfigurationRepository::new());
    repo.upsert(&NewConfiguration {
        config_type: "settings".into(),
        key: "email_settings".into(),
        value: json!({
            "fromAddress": "noreply@example.org",
            "templates": { "registration": { "enabled": false, "body": "custom" } }
        }),
        is_active: true,
        created_by: "operator".into(),
    })
    .await
    .unwrap();

    SeedService::new(conference(), repo.clone())
        .seed(SeedMode::Reset)
        .await
        .unwrap();

    let settings = repo.find("settings", "email_settings").await.unwrap().unwrap();
    assert_eq!(settings.created_by, "operator");
    assert_eq!(settings.value["fromAddress"], "noreply@example.org");
    assert_eq!(settings.value["templates"]["registration"]["enabled"], true);
    assert_eq!(settings.value["templates"]["registration"]["body"], "custom");
    assert_eq!(
        settings.value["templates"]["registration"]["subject"],
        "Application Received - ISCSGCON 2026"
    );
}

#[tokio::test]
async fn merge_mode_preserves_disabled_records() {
    let repo = Arc::new(InMemoryConfigurationRepository::new());
    let seeder = SeedService::new(conference(), repo.clone());
    seeder.seed(SeedMode::Reset).await.unwrap();

    // An operator switches the stored pricing off and edits it.
    let edited = NewConfiguration {
        config_type: "pricing".into(),
        key: "pricing_tiers".into(),
        value: json!({ "regular": { "name": "Edited", "startDate": "2026-01-01", "endDate": "2026-01-02", "categories": {} } }),
        is_active: false,
        created_by: "operator".into(),
    };
    repo.upsert(&edited).await.unwrap();

    let report = seeder.seed(SeedMode::Merge).await.unwrap();
    let skipped: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| o.action == SeedAction::SkippedDisabled)
        .map(|o| o.key.as_str())
        .collect();
    assert_eq!(skipped, vec!["pricing_tiers"]);

    let stored = repo.find("pricing", "pricing_tiers").await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.value["regular"]["name"], "Edited");

    // Reset mode restores the default and re-enables it.
    seeder.seed(SeedMode::Reset).await.unwrap();
    let restored = repo.find("pricing", "pricing_tiers").await.unwrap().unwrap();
    assert!(restored.is_active);
    assert_eq!(restored.value["regular"]["name"], "Regular Registration");
}

#[tokio::test]
async fn seeded_pricing_drives_tier_resolution() {
    let repo = Arc::new(InMemoryConfigurationRepository::new());
    let conference = conference();
    SeedService::new(conference.clone(), repo.clone())
        .seed(SeedMode::Reset)
        .await
        .unwrap();

    let service = ConferenceService::new(conference, repo);
    assert_eq!(service.current_pricing_tier(date(2026, 1, 15)).await, TierKey::EarlyBird);
    assert_eq!(service.current_pricing_tier(date(2026, 3, 5)).await, TierKey::Regular);
    assert_eq!(service.current_pricing_tier(date(2026, 3, 14)).await, TierKey::Onsite);
    assert_eq!(service.current_pricing_tier(date(2026, 3, 20)).await, TierKey::Regular);

    let status = service.status(date(2026, 1, 15)).await;
    assert_eq!(status.pricing_source, PricingSource::Store);
    assert_eq!(status.pricing_tier_label, "Early Bird Registration");

    let (tier, price) = service.current_price("postgraduate", date(2026, 3, 14)).await.unwrap();
    assert_eq!(tier, TierKey::Onsite);
    assert_eq!(price.amount, 2500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_seeding_creates_no_duplicates() {
    let repo = Arc::new(InMemoryConfigurationRepository::new());

    let mut seeders = JoinSet::new();
    for i in 0..6 {
        let seeder = SeedService::new(conference(), repo.clone()).with_created_by(format!("seeder-{}", i));
        let mode = if i % 2 == 0 { SeedMode::Reset } else { SeedMode::Merge };
        seeders.spawn(async move { seeder.seed(mode).await });
    }
    while let Some(joined) = seeders.join_next().await {
        joined.expect("seeder task").expect("seeding");
    }

    let records = repo.list_all().await.unwrap();
    assert_eq!(records.len(), 7);

    let pairs: HashSet<_> = records.iter().map(|r| (r.config_type.clone(), r.key.clone())).collect();
    let ids: HashSet<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(pairs.len(), 7);
    assert_eq!(ids.len(), 7);

    for record in &records {
        let found = repo.find(&record.config_type, &record.key).await.unwrap().unwrap();
        assert_eq!(found.id, record.id);
    }
}
