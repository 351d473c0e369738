//! Tracing setup
//!
//! The terminal belongs to the dashboard (and stdout to print mode), so events
//! go to a log file. `RUST_LOG` wins over the configured level.

use crate::settings::LoggingSettings;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "raton=info";

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Filter directive: `RUST_LOG`, then the settings, then the default
fn filter_directive(settings: &LoggingSettings) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .or_else(|| settings.level.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.into())
}

/// Install the global subscriber. Returns the log file in use, if any; when
/// the file cannot be opened events are dropped.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.log_path();
    let file = path.as_deref().and_then(|p| open_log(p).ok());
    let opened = file.is_some();

    let file_layer = file.map(|f| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(f))
    });

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(settings)))
        .with(file_layer)
        .try_init();

    if opened {
        path
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_used_without_env() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LoggingSettings {
            level: Some("raton=trace".into()),
            file: None,
        };
        assert_eq!(filter_directive(&settings), "raton=trace");
        assert_eq!(filter_directive(&LoggingSettings::default()), DEFAULT_FILTER);
    }

    #[test]
    fn log_dir_is_created() {
        let dir = std::env::temp_dir().join(format!("raton-log-{}", std::process::id()));
        let path = dir.join("nested").join("raton.log");
        assert!(open_log(&path).is_ok());
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
