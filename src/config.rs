use crate::colors::Theme;
use crate::dataset::DatasetSource;
use crate::teeth::TeethAccumulator;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Panels that can run on their own
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ViewType {
    Teeth,    // Teeth collected this year
    Cavities, // 5% of them
    Visited,  // Children being visited right now
    Map,      // World map with the midnight band
    Chart,    // Children per time zone
}

impl ViewType {
    pub const NAMES: &'static str = "teeth, cavities, visiting, map, chart";

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "teeth" | "dientes" | "counter" => Some(ViewType::Teeth),
            "cavities" | "caries" => Some(ViewType::Cavities),
            "visiting" | "visited" | "children" | "ninos" | "niños" => Some(ViewType::Visited),
            "map" | "mapa" => Some(ViewType::Map),
            "chart" | "bars" | "grafico" => Some(ViewType::Chart),
            _ => None,
        }
    }
}

/// What fills the screen
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Screen {
    Dashboard,
    Single(ViewType),
}

/// Everything a dashboard run needs, settings and flags merged
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub screen: Screen,
    /// Render one frame to stdout and exit
    pub print: bool,
    /// Frozen instant instead of the wall clock
    pub at: Option<DateTime<Utc>>,
    pub source: DatasetSource,
    pub timeout: Duration,
    /// Longest wait for input between redraws
    pub poll: Duration,
    pub theme: Theme,
    pub accumulator: TeethAccumulator,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            screen: Screen::Dashboard,
            print: false,
            at: None,
            source: DatasetSource::default(),
            timeout: Duration::from_secs(10),
            poll: Duration::from_millis(250),
            theme: Theme::Pastel,
            accumulator: TeethAccumulator::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_names() {
        assert_eq!(ViewType::from_name("visiting"), Some(ViewType::Visited));
        assert_eq!(ViewType::from_name("MAP"), Some(ViewType::Map));
        assert_eq!(ViewType::from_name("caries"), Some(ViewType::Cavities));
        assert_eq!(ViewType::from_name("globe"), None);
    }

    #[test]
    fn every_listed_name_parses() {
        for name in ViewType::NAMES.split(", ") {
            assert!(ViewType::from_name(name).is_some(), "{}", name);
        }
    }
}
