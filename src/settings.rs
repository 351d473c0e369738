use crate::colors::Theme;
use crate::dataset::DatasetSource;
use crate::error::SettingsError;
use crate::teeth::TeethAccumulator;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub counters: CounterSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatasetSettings {
    pub url: Option<String>,
    pub path: Option<PathBuf>, // Local CSV, wins over `url`
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CounterSettings {
    pub teeth_per_day: Option<f64>,
    pub cavity_fraction: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub theme: Option<String>, // pastel, ansi, mono
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>, // EnvFilter directive, e.g. "raton=debug"
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Settings from the default location. A missing file means defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raton")
            .join("config.toml")
    }
}

impl DatasetSettings {
    pub fn source(&self) -> DatasetSource {
        match (&self.path, &self.url) {
            (Some(path), _) => DatasetSource::File(path.clone()),
            (None, Some(url)) => DatasetSource::parse(url),
            (None, None) => DatasetSource::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl CounterSettings {
    pub fn accumulator(&self) -> TeethAccumulator {
        let defaults = TeethAccumulator::default();
        TeethAccumulator::new(
            self.teeth_per_day.unwrap_or(defaults.per_day),
            self.cavity_fraction.unwrap_or(defaults.cavity_fraction),
        )
    }
}

impl DisplaySettings {
    /// Configured theme; unknown names fall back to pastel
    pub fn theme(&self) -> Theme {
        match self.theme.as_deref() {
            None => Theme::Pastel,
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = name, "unknown theme, using pastel");
                Theme::Pastel
            }),
        }
    }
}

impl LoggingSettings {
    pub fn log_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("raton").join("raton.log")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teeth::{CAVITY_FRACTION, TEETH_PER_DAY};

    #[test]
    fn empty_file_gives_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.dataset.source(), DatasetSource::default());
        assert_eq!(settings.dataset.timeout(), Duration::from_secs(10));
        assert_eq!(settings.display.theme(), Theme::Pastel);

        let acc = settings.counters.accumulator();
        assert_eq!(acc.per_day, TEETH_PER_DAY);
        assert_eq!(acc.cavity_fraction, CAVITY_FRACTION);
    }

    #[test]
    fn sections_are_read() {
        let settings: Settings = toml::from_str(
            r#"
            [dataset]
            url = "https://example.org/teeth.csv"
            timeout_secs = 3

            [counters]
            teeth_per_day = 1000.0
            cavity_fraction = 0.5

            [display]
            theme = "mono"

            [logging]
            level = "raton=debug"
            file = "/tmp/raton-test.log"
            "#,
        )
        .unwrap();

        assert_eq!(
            settings.dataset.source(),
            DatasetSource::Url("https://example.org/teeth.csv".into())
        );
        assert_eq!(settings.dataset.timeout(), Duration::from_secs(3));
        assert_eq!(settings.counters.accumulator().per_day, 1000.0);
        assert_eq!(settings.counters.accumulator().cavity_fraction, 0.5);
        assert_eq!(settings.display.theme(), Theme::Mono);
        assert_eq!(settings.logging.level.as_deref(), Some("raton=debug"));
        assert_eq!(settings.logging.log_path(), Some(PathBuf::from("/tmp/raton-test.log")));
    }

    #[test]
    fn local_path_wins_over_url() {
        let settings: Settings = toml::from_str(
            r#"
            [dataset]
            url = "https://example.org/teeth.csv"
            path = "data/teeth.csv"
            "#,
        )
        .unwrap();
        assert_eq!(settings.dataset.source(), DatasetSource::File("data/teeth.csv".into()));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("raton-no-such-dir").join("config.toml");
        assert!(Settings::load_from(&path).is_ok());
    }

    #[test]
    fn bad_toml_is_reported() {
        let path = std::env::temp_dir().join(format!("raton-bad-{}.toml", std::process::id()));
        fs::write(&path, "[counters]\nteeth_per_day = \"lots\"\n").unwrap();
        let result = Settings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let display = DisplaySettings { theme: Some("sepia".into()) };
        assert_eq!(display.theme(), Theme::Pastel);
    }
}
