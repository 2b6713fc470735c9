use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

pub const DEFAULT_LEVEL: &str = "info";

/// Where log lines go when `logging.file` is unset.
pub fn log_file_path(settings: &LoggingSettings) -> PathBuf {
    settings
        .file
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("recital.log"))
}

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(settings.level.as_deref().unwrap_or(DEFAULT_LEVEL))
    })
}

/// Install the global subscriber, writing to a file so the terminal status
/// line stays clean. Logging is disabled if the file cannot be opened.
pub fn init(settings: &LoggingSettings) {
    let path = log_file_path(settings);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!(
                "recital: cannot open log file {}, logging disabled: {e}",
                path.display()
            );
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
