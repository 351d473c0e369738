mod band;
mod clock;
mod colors;
mod config;
mod dashboard;
mod dataset;
mod error;
mod format;
mod help;
mod layout;
mod logging;
mod lookup;
mod scheduler;
mod settings;
mod teeth;
mod terminal;
mod views;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use config::{DashboardConfig, Screen, ViewType};
use dataset::DatasetSource;
use error::AtParseError;
use settings::Settings;
use std::io;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "raton")]
#[command(author = "Ratón Pérez Viz")]
#[command(version = "0.1.0")]
#[command(about = "raton: follow the Ratón Pérez around the world, one midnight at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that reads the dataset
#[derive(Args)]
struct SourceArgs {
    /// Freeze the clock at this instant (RFC 3339, e.g. 2025-01-01T00:00:00Z)
    #[arg(long, value_parser = parse_at)]
    at: Option<DateTime<Utc>>,

    /// Dataset CSV: an http(s) URL or a local file
    #[arg(short, long)]
    source: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full dashboard: counters, visited children, map and chart
    Dashboard {
        /// Print one frame to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Longest wait for input between redraws (seconds)
        #[arg(short, long, default_value = "0.25")]
        time: f32,

        #[command(flatten)]
        common: SourceArgs,
    },

    /// Show a single panel full screen (teeth, cavities, visiting, map, chart)
    View {
        /// Panel: teeth, cavities, visiting, map, chart
        #[arg(short = 'T', long, default_value = "teeth")]
        view_type: String,

        /// Print one frame to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Longest wait for input between redraws (seconds)
        #[arg(short, long, default_value = "0.25")]
        time: f32,

        #[command(flatten)]
        common: SourceArgs,
    },

    /// Print the zone at midnight, its band and the children there
    Zone {
        #[command(flatten)]
        common: SourceArgs,
    },
}

fn parse_at(s: &str) -> Result<DateTime<Utc>, AtParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AtParseError::new(s, e))
}

/// Settings first, flags on top
fn base_config(settings: &Settings, args: SourceArgs) -> DashboardConfig {
    DashboardConfig {
        at: args.at,
        source: args
            .source
            .as_deref()
            .map(DatasetSource::parse)
            .unwrap_or_else(|| settings.dataset.source()),
        timeout: settings.dataset.timeout(),
        theme: settings.display.theme(),
        accumulator: settings.counters.accumulator(),
        ..DashboardConfig::default()
    }
}

fn poll_interval(secs: f32) -> Duration {
    if !secs.is_finite() {
        return DashboardConfig::default().poll;
    }
    Duration::from_secs_f32(secs.clamp(0.01, 5.0))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let log_file = logging::init(&settings.logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_file, "raton starting");
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "settings ignored, using defaults");
    }

    match cli.command {
        Commands::Dashboard { print, time, common } => {
            let config = DashboardConfig {
                print,
                poll: poll_interval(time),
                ..base_config(&settings, common)
            };
            dashboard::run(config)?;
        }
        Commands::View {
            view_type,
            print,
            time,
            common,
        } => {
            let view = match ViewType::from_name(&view_type) {
                Some(view) => view,
                None => {
                    eprintln!("Unknown view type: {}. Using teeth.", view_type);
                    eprintln!("Available: {}", ViewType::NAMES);
                    ViewType::Teeth
                }
            };
            let config = DashboardConfig {
                screen: Screen::Single(view),
                print,
                poll: poll_interval(time),
                ..base_config(&settings, common)
            };
            dashboard::run(config)?;
        }
        Commands::Zone { common } => {
            let config = base_config(&settings, common);
            let dataset = dashboard::load_now(&config);
            let now = config.at.unwrap_or_else(Utc::now);
            print!("{}", dashboard::zone_report(now, &dataset, &config.accumulator));
        }
    }

    Ok(())
}
