use std::any::Any;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};

static ACTIVE_LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

pub const LOG_ENV: &str = "STOCKBOARD_LOG";
pub const DEFAULT_DIRECTIVES: &str = "error,stockboard=debug";

/// Platform log directory, `None` when no home can be resolved
pub fn default_log_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir().map(|home| home.join("Library/Logs/Stockboard"))
    }
    #[cfg(target_os = "windows")]
    {
        dirs::data_local_dir().map(|dir| dir.join("Stockboard\\Logs"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        dirs::data_local_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
            .map(|dir| dir.join("stockboard/logs"))
    }
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("stockboard").join("logs")
}

#[must_use]
pub fn active_log_dir() -> PathBuf {
    ACTIVE_LOG_DIR
        .get()
        .cloned()
        .or_else(default_log_dir)
        .unwrap_or_else(fallback_log_dir)
}

/// Filter directives from `STOCKBOARD_LOG`, or the default
pub fn directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_ENV)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn local_offset() -> time::UtcOffset {
    time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC)
}

/// Install the file subscriber; keep the returned guard alive until exit
pub fn init() -> Result<impl Any> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let log_dir = match default_log_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => dir,
        _ => {
            let fallback = fallback_log_dir();
            _ = std::fs::create_dir_all(&fallback);
            fallback
        }
    };

    _ = ACTIVE_LOG_DIR.set(log_dir.clone());

    let writer = RollingFileAppender::builder()
        .filename_prefix("stockboard")
        .filename_suffix("log")
        .max_log_files(5)
        .rotation(Rotation::DAILY)
        .build(&log_dir)
        .with_context(|| format!("failed to open log directory {}", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(writer);

    let timer = fmt::time::OffsetTime::new(
        local_offset(),
        time::format_description::well_known::Rfc3339,
    );
    let file_line = cfg!(debug_assertions);

    let subscriber = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_thread_ids(true)
        .with_file(file_line)
        .with_line_number(file_line)
        .with_writer(writer);

    let dirs = directives(|key| std::env::var(key).ok());
    let subscriber = subscriber.with_filter(tracing_subscriber::EnvFilter::new(dirs));

    tracing_subscriber::registry().with(subscriber).init();
    Ok(guard)
}
