//! Teeth-per-time-zone dataset
//!
//! A CSV published from a spreadsheet with at least the columns `huso`
//! (UTC offset in hours, possibly fractional) and `cant_total_dientes`
//! (quantity, possibly with `,` thousands separators). It is read once, in the
//! background, and never changes afterwards.

use crate::error::DatasetError;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQiIrCmmqMbArDPdqpCohU9NYGtUqCLk4Wk5oV_Ock4LRhC4IfseyKuOc7IKXUawQ9DQTREfrSRQr7y/pub?gid=1842497142&single=true&output=csv";

const OFFSET_COLUMN: &str = "huso";
const QUANTITY_COLUMN: &str = "cant_total_dientes";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimezoneRow {
    pub utc_offset: f64,
    pub quantity: f64,
}

/// Rows in the order the source listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<TimezoneRow>,
}

impl Dataset {
    pub fn new(rows: Vec<TimezoneRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TimezoneRow] {
        &self.rows
    }

    /// Copy ordered by offset, for the chart axis
    pub fn sorted_by_offset(&self) -> Vec<TimezoneRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a.utc_offset.total_cmp(&b.utc_offset));
        rows
    }
}

/// Where the CSV comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    /// `http(s)://...` is a URL, anything else a local path
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DatasetSource::Url(s.to_string())
        } else {
            DatasetSource::File(PathBuf::from(s))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Url(url) => url.clone(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Url(DEFAULT_CSV_URL.to_string())
    }
}

/// Parse the CSV body. Rows whose offset is missing or not a number, or whose
/// quantity is not a positive number, are dropped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let offset_col = column(OFFSET_COLUMN)?;
    let quantity_col = column(QUANTITY_COLUMN)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    // Byte records: a mangled name in some other column only costs that row
    for record in reader.byte_records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |col: usize| record.get(col).and_then(|bytes| std::str::from_utf8(bytes).ok());
        let offset = field(offset_col).and_then(parse_offset);
        let quantity = field(quantity_col).and_then(parse_quantity);

        match (offset, quantity) {
            (Some(utc_offset), Some(quantity)) if quantity > 0.0 => {
                rows.push(TimezoneRow { utc_offset, quantity });
            }
            _ => skipped += 1,
        }
    }

    tracing::debug!(rows = rows.len(), skipped, "parsed dataset");

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(Dataset::new(rows))
}

fn parse_offset(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `"1,234,567"` -> 1234567.0
fn parse_quantity(field: &str) -> Option<f64> {
    let cleaned: String = field.chars().filter(|&c| c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read and parse the dataset, blocking.
pub fn fetch(source: &DatasetSource, timeout: Duration) -> Result<Dataset, DatasetError> {
    match source {
        DatasetSource::Url(url) => {
            let response = ureq::get(url)
                .timeout(timeout)
                .call()
                .map_err(Box::new)?;
            parse_csv(response.into_reader())
        }
        DatasetSource::File(path) => parse_csv(File::open(path)?),
    }
}

/// What the lookup views can see of the dataset
#[derive(Debug, Clone, Default)]
pub enum DatasetState {
    #[default]
    Loading,
    Ready(Dataset),
    /// Fetch or parse failed; shown exactly like `Loading`
    Unavailable,
}

impl DatasetState {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            DatasetState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }
}

/// One-shot background fetch, polled from the UI loop
pub struct DatasetLoader {
    source: DatasetSource,
    timeout: Duration,
    receiver: Option<Receiver<Result<Dataset, DatasetError>>>,
    state: DatasetState,
}

impl DatasetLoader {
    /// Start fetching right away (non-blocking)
    pub fn spawn(source: DatasetSource, timeout: Duration) -> Self {
        let mut loader = Self {
            source,
            timeout,
            receiver: None,
            state: DatasetState::Loading,
        };
        loader.request();
        loader
    }

    fn request(&mut self) {
        let (tx, rx) = mpsc::channel();
        let source = self.source.clone();
        let timeout = self.timeout;

        tracing::info!(source = %source.describe(), "fetching dataset");
        thread::spawn(move || {
            // The loader may be gone by the time we finish
            let _ = tx.send(fetch(&source, timeout));
        });

        self.receiver = Some(rx);
    }

    /// Fetch again, keeping the current data visible until the new copy lands
    pub fn reload(&mut self) {
        if self.receiver.is_none() {
            self.request();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Pick up a finished fetch, if any
    pub fn poll(&mut self) -> &DatasetState {
        let Some(rx) = &self.receiver else {
            return &self.state;
        };

        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                tracing::info!(rows = dataset.rows().len(), "dataset loaded");
                self.state = DatasetState::Ready(dataset);
                self.receiver = None;
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "dataset unavailable");
                if self.state.dataset().is_none() {
                    self.state = DatasetState::Unavailable;
                }
                self.receiver = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("dataset loader thread exited without a result");
                if self.state.dataset().is_none() {
                    self.state = DatasetState::Unavailable;
                }
                self.receiver = None;
            }
        }

        &self.state
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }
}
