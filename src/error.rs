use std::path::PathBuf;
use thiserror::Error;

/// Why the dataset could not be loaded. The dashboard never shows these; every
/// variant leaves the lookup views on their loading placeholder.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("no usable rows")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `--at` was not an RFC 3339 instant
#[derive(Debug, Error)]
#[error("invalid instant `{input}` (expected RFC 3339, e.g. 2025-01-01T00:00:00Z): {source}")]
pub struct AtParseError {
    pub input: String,
    source: chrono::ParseError,
}

impl AtParseError {
    pub fn new(input: &str, source: chrono::ParseError) -> Self {
        Self {
            input: input.to_string(),
            source,
        }
    }
}
