//! Dashboard panels
//!
//! Each panel recomputes what it shows on every tick: the instant and the
//! (static) dataset are all it needs. Only the map keeps its marker scatter
//! until the zone changes.

pub mod chart;
pub mod counter;
pub mod digits;
pub mod map;
pub mod visited;
pub mod world;

use crate::colors::{Accent, Palette};
use crate::config::ViewType;
use crate::dataset::DatasetState;
use crate::layout::Rect;
use crate::teeth::{elapsed_days, TeethAccumulator};
use crate::terminal::Canvas;
use chrono::{DateTime, FixedOffset, Utc};
use std::time::Duration;

pub use chart::TimezoneBarChart;
pub use counter::{CounterKind, CounterView};
pub use map::TimeZoneMap;
pub use visited::ChildrenVisited;

/// What a panel gets on each tick
pub struct TickContext<'a> {
    pub now: DateTime<Utc>,
    /// Same instant in the viewer's zone, for wall-clock labels
    pub local: DateTime<FixedOffset>,
    /// Days since the viewer's Jan 1 midnight; counters run off this
    pub year_days: f64,
    pub dataset: &'a DatasetState,
}

impl<'a> TickContext<'a> {
    pub fn new(now: DateTime<Utc>, local: DateTime<FixedOffset>, dataset: &'a DatasetState) -> Self {
        Self {
            now,
            local,
            year_days: elapsed_days(&local),
            dataset,
        }
    }

    /// Override the year position, for zones whose offset changes during the year
    pub fn with_year_days(mut self, days: f64) -> Self {
        self.year_days = days;
        self
    }

    /// Context whose local zone is UTC
    #[cfg(test)]
    pub fn utc(now: DateTime<Utc>, dataset: &'a DatasetState) -> Self {
        Self::new(now, now.fixed_offset(), dataset)
    }
}

pub trait View {
    fn title(&self) -> &str;

    fn accent(&self) -> Accent;

    /// How often the panel wants a tick
    fn period(&self) -> Duration;

    fn tick(&mut self, ctx: &TickContext);

    /// Draw into the inner area of the panel's box
    fn render(&self, canvas: &mut Canvas, area: Rect, palette: &Palette);
}

/// Build the panel for a view type
pub fn build(view: ViewType, accumulator: TeethAccumulator) -> Box<dyn View> {
    match view {
        ViewType::Teeth => Box::new(CounterView::new(CounterKind::Teeth, accumulator)),
        ViewType::Cavities => Box::new(CounterView::new(CounterKind::Cavities, accumulator)),
        ViewType::Visited => Box::new(ChildrenVisited::new()),
        ViewType::Map => Box::new(TimeZoneMap::new()),
        ViewType::Chart => Box::new(TimezoneBarChart::new()),
    }
}
