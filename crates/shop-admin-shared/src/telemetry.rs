//! Telemetry setup
//!
//! The terminal is owned by the TUI, so events go to a daily-rolling file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::AppError;

/// Installs the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes the background writer.
pub fn init_telemetry(settings: &LoggingSettings) -> Result<WorkerGuard, AppError> {
    std::fs::create_dir_all(&settings.directory)?;

    let appender = tracing_appender::rolling::daily(&settings.directory, &settings.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));
    let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if settings.json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    installed.map_err(|e| AppError::InternalError(format!("Telemetry init failed: {}", e)))?;

    Ok(guard)
}
