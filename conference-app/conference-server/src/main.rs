use std::net::{IpAddr, SocketAddr};

use tracing::info;

use conference_api::{router, AppState};
use conference_server::{build_conference_service, load_definition};
use conference_shared::config::AppConfig;
use conference_shared::telemetry::init_telemetry;
use conference_shared::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration and telemetry
    let config = AppConfig::load().map_err(AppError::from)?;
    let _log_guard = init_telemetry(&config.log);

    info!("{} starting ({})...", config.app.name, config.app.env);

    // 2. Conference definition and store
    let definition = load_definition(config.conference.definition_path.as_deref())?;
    let service = build_conference_service(definition, &config.database).await;

    // 3. Router
    let app = router(AppState::new(service));

    // 4. Bind address
    let host: IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // 5. Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
