use std::path::Path;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Installs the global subscriber. Logs go to a file as JSON lines so they
/// never draw over the terminal UI. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let level: LevelFilter = config
        .get(ConfigKey::LogLevel)
        .parse()
        .with_context(|| format!("invalid log level '{}'", config.get(ConfigKey::LogLevel)))?;

    let log_file = Path::new(config.get(ConfigKey::LogFile));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("log-file '{}' has no file name", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!("failed to install the log subscriber: {err}"))?;

    return Ok(guard);
}
