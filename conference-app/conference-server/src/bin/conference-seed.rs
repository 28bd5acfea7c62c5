use std::sync::Arc;

use clap::Parser;
use tracing::info;

use conference_core::services::{SeedMode, SeedService};
use conference_server::{connect_store, load_definition};
use conference_shared::config::{AppConfig, LogFormat};
use conference_shared::constants::DEFAULT_CREATED_BY;
use conference_shared::telemetry::init_telemetry;
use conference_shared::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "conference-seed",
    version,
    about = "Writes the default conference configuration records"
)]
struct Args {
    /// Leave records that have been disabled untouched instead of resetting them
    #[arg(long)]
    merge: bool,

    /// Recorded as the creator of new records
    #[arg(long, default_value = DEFAULT_CREATED_BY)]
    created_by: String,

    /// JSON conference definition (overrides conference.definition_path)
    #[arg(long)]
    definition: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().map_err(AppError::from)?;
    let mut log = config.log.clone();
    log.format = LogFormat::Plain;
    let _log_guard = init_telemetry(&log);

    let definition_path = args.definition.or(config.conference.definition_path.clone());
    let definition = load_definition(definition_path.as_deref())?;
    let repo = Arc::new(connect_store(&config.database).await?);

    let mode = if args.merge { SeedMode::Merge } else { SeedMode::Reset };
    let seeder = SeedService::new(definition, repo).with_created_by(args.created_by);

    let report = seeder.seed(mode).await?;
    info!(
        "Seeding finished: {} written, {} skipped",
        report.written(),
        report.skipped()
    );

    info!("Configuration summary:");
    for record in seeder.summary().await? {
        let state = if record.is_active { "active" } else { "disabled" };
        info!("  [{}] {}:{}", state, record.config_type, record.key);
    }

    Ok(())
}
