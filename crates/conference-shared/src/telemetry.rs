//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LogSettings};

/// Installs the global subscriber. `RUST_LOG` wins over `settings.level`.
///
/// The returned guard flushes the file appender and must be held until exit.
pub fn init_telemetry(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, format!("{}.log", settings.file_prefix));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);
    match settings.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Plain => registry.with(fmt::layer().with_target(false)).init(),
    }

    guard
}
