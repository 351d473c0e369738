//! The dashboard: panels laid out on one screen, driven by a shared scheduler
//!
//! ```text
//!            🐭 El Ratón Pérez 🐭
//!   Descubre la magia de los dientes de leche
//! ╭── teeth ──────────╮╭── visited ─────────╮
//! ╰───────────────────╯╰────────────────────╯
//! ╭── map ────────────────────────────────────╮
//! ╰───────────────────────────────────────────╯
//! ╭── chart ──────────────────────────────────╮
//! ╰───────────────────────────────────────────╯
//! ╭── cavities ───────────────────────────────╮
//! ╰───────────────────────────────────────────╯
//!                   footer
//! ```

use crate::band::ZoneBand;
use crate::clock::{format_offset, midnight_offset, Clock, FixedClock, SystemClock};
use crate::colors::{Accent, Palette};
use crate::config::{DashboardConfig, Screen, ViewType};
use crate::dataset::{fetch, DatasetLoader, DatasetState};
use crate::format::group_es;
use crate::teeth::{elapsed_days, TeethAccumulator};
use crate::help::{render_help_overlay, DASHBOARD_HELP};
use crate::layout::{Panel, Rect};
use crate::lookup::lookup;
use crate::scheduler::{Scheduler, SubscriberId};
use crate::terminal::{str_width, Canvas, Terminal};
use crate::views::{self, TickContext, View};
use chrono::{DateTime, FixedOffset, Local, Utc};
use crossterm::event::{KeyCode, KeyModifiers};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const HEADER: &str = "🐭 El Ratón Pérez 🐭";
const SUBTITLE: &str = "Descubre la magia de los dientes de leche";
const FOOTER: &str = "✨ Hecho con amor para todos los niños que esperan al Ratón Pérez ✨";
const PAUSED: &str = "⏸ pausa";

/// Below this height the header and footer are left out
const MIN_HEIGHT_FOR_CHROME: u16 = 16;

/// Print-mode frame when stdout is not a (big enough) terminal
const PRINT_SIZE: (u16, u16) = (100, 48);

/// Panel order on the full dashboard
const DASHBOARD_VIEWS: [ViewType; 5] = [
    ViewType::Teeth,
    ViewType::Visited,
    ViewType::Map,
    ViewType::Chart,
    ViewType::Cavities,
];

/// What a key press asks of the loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Redraw,
    Reload,
    Quit,
}

pub struct Dashboard {
    screen: Screen,
    views: Vec<Box<dyn View>>,
    subscribers: Vec<SubscriberId>,
    scheduler: Scheduler,
    palette: Palette,
    /// Viewer's zone; `None` follows the system local zone
    zone: Option<FixedOffset>,
    paused: bool,
    show_help: bool,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig, now: Instant) -> Self {
        let kinds: Vec<ViewType> = match config.screen {
            Screen::Dashboard => DASHBOARD_VIEWS.to_vec(),
            Screen::Single(view) => vec![view],
        };

        let mut scheduler = Scheduler::new();
        let mut views = Vec::with_capacity(kinds.len());
        let mut subscribers = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let view = views::build(kind, config.accumulator);
            subscribers.push(scheduler.subscribe(view.period(), now));
            views.push(view);
        }

        Self {
            screen: config.screen,
            views,
            subscribers,
            scheduler,
            palette: Palette::new(config.theme),
            zone: None,
            paused: false,
            show_help: false,
        }
    }

    /// Count the year from midnight in `zone` instead of the system zone
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[cfg(test)]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The instant as the views see it. Without a fixed zone the year starts
    /// at the system zone's real Jan 1 midnight, whatever offset applies today.
    fn context<'a>(&self, utc: DateTime<Utc>, dataset: &'a DatasetState) -> TickContext<'a> {
        match self.zone {
            Some(zone) => TickContext::new(utc, utc.with_timezone(&zone), dataset),
            None => {
                let local = utc.with_timezone(&Local);
                TickContext::new(utc, local.fixed_offset(), dataset).with_year_days(elapsed_days(&local))
            }
        }
    }

    /// Tick the views whose period has come. Returns true if any did.
    pub fn tick_due(&mut self, now: Instant, utc: DateTime<Utc>, dataset: &DatasetState) -> bool {
        let due = self.scheduler.due(now);
        if self.paused || due.is_empty() {
            return false;
        }
        let ctx = self.context(utc, dataset);
        for (view, id) in self.views.iter_mut().zip(&self.subscribers) {
            if due.contains(id) {
                view.tick(&ctx);
            }
        }
        true
    }

    /// Tick every view now, regardless of schedule
    pub fn tick_all(&mut self, utc: DateTime<Utc>, dataset: &DatasetState) {
        let ctx = self.context(utc, dataset);
        for view in &mut self.views {
            view.tick(&ctx);
        }
    }

    /// How long the loop may wait before something is due
    pub fn until_next(&self, now: Instant, max: Duration) -> Duration {
        if self.paused {
            max
        } else {
            self.scheduler.until_next(now, max)
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Action {
        if self.palette.handle_key(code) {
            return Action::Redraw;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                if !self.paused {
                    self.scheduler.wake_all(now);
                }
                Action::Redraw
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                Action::Redraw
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Reload,
            _ => Action::None,
        }
    }

    pub fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let (width, height) = canvas.size();
        let screen = Rect::new(0, 0, width, height);

        match self.screen {
            Screen::Single(_) => {
                if let Some(view) = self.views.first() {
                    self.draw_panel(canvas, view.as_ref(), screen);
                }
            }
            Screen::Dashboard => self.render_dashboard(canvas, screen),
        }

        if self.paused {
            let x = width as i32 - str_width(PAUSED) as i32 - 1;
            canvas.set_str(x, 0, PAUSED, Some(self.palette.muted()), true);
        }
        if self.show_help {
            render_help_overlay(canvas, DASHBOARD_HELP);
        }
    }

    fn render_dashboard(&self, canvas: &mut Canvas, screen: Rect) {
        let header = self.palette.panel(Accent::Header);
        let cx = screen.w as i32 / 2;

        let body = if screen.h >= MIN_HEIGHT_FOR_CHROME {
            canvas.set_str_centered(cx, 0, HEADER, Some(header.title), true);
            canvas.set_str_centered(cx, 1, SUBTITLE, Some(header.caption), false);
            canvas.set_str_centered(cx, screen.bottom() - 1, FOOTER, Some(header.value), false);
            Rect::new(screen.x, 2, screen.w, screen.h - 3)
        } else {
            screen
        };

        let rows = body.split_rows(&[3, 4, 4, 3]);
        let top = rows[0].split_cols(&[1, 1]);
        let areas = [top[0], top[1], rows[1], rows[2], rows[3]];

        for (view, area) in self.views.iter().zip(areas) {
            self.draw_panel(canvas, view.as_ref(), area);
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas, view: &dyn View, area: Rect) {
        let colors = self.palette.panel(view.accent());
        let inner = Panel::new(area, view.title(), colors.title, colors.border).draw(canvas);
        view.render(canvas, inner, &self.palette);
    }
}

fn clock_for(config: &DashboardConfig) -> Box<dyn Clock> {
    match config.at {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    }
}

/// Fetch in the foreground, for one-shot commands
pub fn load_now(config: &DashboardConfig) -> DatasetState {
    match fetch(&config.source, config.timeout) {
        Ok(dataset) => {
            tracing::info!(rows = dataset.rows().len(), "dataset loaded");
            DatasetState::Ready(dataset)
        }
        Err(e) => {
            tracing::warn!(source = %config.source.describe(), error = %e, "dataset unavailable");
            DatasetState::Unavailable
        }
    }
}

/// One frame of the dashboard at `now`
pub fn frame(config: &DashboardConfig, now: DateTime<Utc>, dataset: &DatasetState, size: (u16, u16), zone: Option<FixedOffset>) -> Canvas {
    let mut dashboard = Dashboard::new(config, Instant::now());
    if let Some(zone) = zone {
        dashboard = dashboard.with_zone(zone);
    }
    dashboard.tick_all(now, dataset);

    let mut canvas = Canvas::new(size.0, size.1);
    dashboard.render(&mut canvas);
    canvas
}

/// Print a single frame to stdout
pub fn print(config: &DashboardConfig) -> io::Result<()> {
    let dataset = load_now(config);
    let now = clock_for(config).now();
    let size = crossterm::terminal::size()
        .ok()
        .filter(|&(w, h)| w >= 40 && h >= MIN_HEIGHT_FOR_CHROME)
        .unwrap_or(PRINT_SIZE);

    let canvas = frame(config, now, &dataset, size, None);
    let mut out = io::stdout().lock();
    out.write_all(canvas.to_ansi().as_bytes())?;
    out.flush()
}

/// Interactive full-screen loop
pub fn run(config: DashboardConfig) -> io::Result<()> {
    if config.print {
        return print(&config);
    }

    let clock = clock_for(&config);
    let mut loader = DatasetLoader::spawn(config.source.clone(), config.timeout);
    let mut term = Terminal::new()?;
    let mut dashboard = Dashboard::new(&config, Instant::now());
    let mut dirty = true;

    tracing::info!(screen = ?config.screen, frozen = config.at.is_some(), "dashboard started");

    loop {
        let now = Instant::now();
        if term.sync_size()? {
            dirty = true;
        }

        let was_pending = loader.is_pending();
        loader.poll();
        if was_pending && !loader.is_pending() {
            // New data: refresh everything right away
            dashboard.tick_all(clock.now(), loader.state());
            dirty = true;
        }

        if dashboard.tick_due(now, clock.now(), loader.state()) {
            dirty = true;
        }

        if dirty {
            dashboard.render(term.canvas());
            term.present()?;
            dirty = false;
        }

        let wait = dashboard.until_next(Instant::now(), config.poll);
        if let Some((code, mods)) = term.wait_key(wait)? {
            if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
                break;
            }
            match dashboard.handle_key(code, Instant::now()) {
                Action::Quit => break,
                Action::Reload => {
                    tracing::info!("reload requested");
                    loader.reload();
                }
                Action::Redraw => dirty = true,
                Action::None => {}
            }
        }
    }

    tracing::info!("dashboard stopped");
    Ok(())
}

/// Plain-text answer to "where is the mouse right now"
pub fn zone_report(now: DateTime<Utc>, dataset: &DatasetState, accumulator: &TeethAccumulator) -> String {
    let offset = midnight_offset(now);
    let band = ZoneBand::for_offset(offset);

    let children = match dataset.dataset().and_then(|d| lookup(d.rows(), offset)) {
        Some(row) => format!("{} (fila {})", group_es(row.quantity), format_offset(row.utc_offset)),
        None => "sin datos".to_string(),
    };

    let local = now.with_timezone(&Local);

    format!(
        "Hora UTC:          {}\n\
         Huso a medianoche: {}\n\
         Franja:            {}° .. {}° (centro {}°)\n\
         Niños visitados:   {}\n\
         Dientes este año:  {} ({} cariados)\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        format_offset(offset as f64),
        band.left,
        band.right,
        band.center,
        children,
        group_es(accumulator.collected(&local)),
        group_es(accumulator.cavities(&local)),
    )
}
