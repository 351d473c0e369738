//! Children per time zone as vertical bars, the midnight zone lit up

use super::{TickContext, View};
use crate::clock::{format_offset, midnight_offset};
use crate::colors::{draw_loading, Accent, Palette};
use crate::dataset::TimezoneRow;
use crate::format::compact;
use crate::layout::{draw_vbar, Rect};
use crate::lookup::is_current_bar;
use crate::scheduler::SLOW_TICK;
use crate::terminal::{str_width, Canvas};
use std::time::Duration;

/// Columns for the y-axis labels, axis line excluded
const AXIS_W: u16 = 6;
const MARKER: &str = "🐭 Visitando ahora";

pub struct TimezoneBarChart {
    rows: Vec<TimezoneRow>,
    target: i32,
}

impl TimezoneBarChart {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            target: 0,
        }
    }

    /// Bars in drawing order
    #[cfg(test)]
    pub fn rows(&self) -> &[TimezoneRow] {
        &self.rows
    }

    /// Indices of the bars drawn highlighted
    pub fn current_bars(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| is_current_bar(row.utc_offset, self.target))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for TimezoneBarChart {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TimezoneBarChart {
    fn title(&self) -> &str {
        "📊 Niños por Huso Horario 📊"
    }

    fn accent(&self) -> Accent {
        Accent::Chart
    }

    fn period(&self) -> Duration {
        SLOW_TICK
    }

    fn tick(&mut self, ctx: &TickContext) {
        self.target = midnight_offset(ctx.now);
        self.rows = ctx
            .dataset
            .dataset()
            .map(|d| d.sorted_by_offset())
            .unwrap_or_default();
    }

    fn render(&self, canvas: &mut Canvas, area: Rect, palette: &Palette) {
        if area.is_empty() {
            return;
        }
        let colors = palette.panel(Accent::Chart);
        if self.rows.is_empty() {
            draw_loading(canvas, area.x, area.y, area.w, area.h, colors.caption);
            return;
        }
        // marker row, at least one bar row, x labels
        if area.h < 3 || area.w <= AXIS_W + 1 {
            return;
        }

        let plot_top = area.y + 1;
        let label_y = area.bottom() - 1;
        let base_y = label_y - 1;
        let plot_h = (base_y - plot_top + 1) as f64;

        let max = self.rows.iter().map(|r| r.quantity).fold(0.0, f64::max);

        // y axis
        let axis_x = area.x + AXIS_W as i32;
        for y in plot_top..=base_y {
            canvas.set(axis_x, y, '│', Some(palette.muted()), false);
        }
        let mid_y = plot_top + (plot_h as i32) / 2;
        let ticks = [(plot_top, compact(max)), (mid_y, compact(max / 2.0)), (base_y, "0".to_string())];
        for (y, label) in &ticks {
            let label: String = label.chars().take(AXIS_W as usize).collect();
            canvas.set_str(area.x, *y, &format!("{:>w$}", label, w = AXIS_W as usize), Some(colors.caption), false);
        }

        // bars
        let x0 = axis_x + 1;
        let plot_w = (area.right() - x0).max(0) as usize;
        let visible = self.rows.len().min(plot_w);
        if visible == 0 {
            return;
        }
        let slot = plot_w / visible;
        let bar_w = if slot >= 2 { slot - 1 } else { 1 };

        // Too many bars for the panel: show a window around the midnight zone
        let current_bars = self.current_bars();
        let start = current_bars
            .first()
            .map(|&c| c.saturating_sub(visible / 2).min(self.rows.len() - visible))
            .unwrap_or(0);

        let mut label_end = x0;
        let mut marker_drawn = false;
        for (i, row) in self.rows[start..start + visible].iter().enumerate() {
            let x = x0 + (i * slot) as i32;
            let center = x + bar_w as i32 / 2;
            let current = current_bars.contains(&(start + i));
            let height = if max > 0.0 { row.quantity / max * plot_h } else { 0.0 };

            if current {
                draw_vbar(canvas, x, base_y, bar_w as u16, height, palette.highlight_edge(), true);
            } else {
                draw_vbar(canvas, x, base_y, bar_w as u16, height, palette.bar(), false);
            }

            // Labels that would run into the previous one are skipped
            let label = format_offset(row.utc_offset);
            let lx = center - (str_width(&label) / 2) as i32;
            if lx >= label_end {
                let color = if current { colors.value } else { colors.caption };
                label_end = lx + canvas.set_str(lx, label_y, &label, Some(color), current) as i32 + 1;
            }

            if current && !marker_drawn {
                let w = str_width(MARKER) as i32;
                let mx = (center - w / 2).min(area.right() - w).max(area.x);
                canvas.set_str(mx, area.y, MARKER, Some(colors.value), true);
                marker_drawn = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, DatasetState};
    use chrono::{TimeZone, Utc};

    fn row(utc_offset: f64, quantity: f64) -> TimezoneRow {
        TimezoneRow { utc_offset, quantity }
    }

    fn ticked(state: &DatasetState, hour: u32) -> TimezoneBarChart {
        let mut chart = TimezoneBarChart::new();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap();
        chart.tick(&TickContext::utc(now, state));
        chart
    }

    fn sample() -> DatasetState {
        DatasetState::Ready(Dataset::new(vec![row(3.5, 200.0), row(-5.0, 100.0), row(0.0, 50.0)]))
    }

    #[test]
    fn bars_sorted_by_offset() {
        let chart = ticked(&sample(), 12);
        let offsets: Vec<f64> = chart.rows().iter().map(|r| r.utc_offset).collect();
        assert_eq!(offsets, vec![-5.0, 0.0, 3.5]);
    }

    #[test]
    fn half_hour_zone_lights_for_both_neighbours() {
        // 20:00 UTC: midnight at +4
        assert_eq!(ticked(&sample(), 20).current_bars(), vec![2]);
        // 21:00 UTC: midnight at +3
        assert_eq!(ticked(&sample(), 21).current_bars(), vec![2]);
        // 05:00 UTC: midnight at -5
        assert_eq!(ticked(&sample(), 5).current_bars(), vec![0]);
        // 10:00 UTC: -10, nothing there
        assert!(ticked(&sample(), 10).current_bars().is_empty());
    }

    #[test]
    fn renders_axis_bars_and_marker() {
        let chart = ticked(&sample(), 20);
        let palette = Palette::default();
        let mut canvas = Canvas::new(40, 10);
        chart.render(&mut canvas, Rect::new(0, 0, 40, 10), &palette);

        assert!(canvas.row_text(0).contains(MARKER));
        assert!(canvas.row_text(1).starts_with("   200│"));
        assert!(canvas.row_text(5).starts_with("   100│"));
        assert!(canvas.row_text(8).starts_with("     0│"));

        // tallest bar is the highlighted one and fills the plot
        let top = canvas.get(29, 1).copied().unwrap_or_default();
        assert_eq!(top.ch, '█');
        assert_eq!(top.fg, Some(palette.highlight_edge()));

        // half-height bar for -5 in the plain bar color
        assert_eq!(canvas.get(7, 4).map(|c| c.ch), Some(' '));
        assert_eq!(canvas.get(7, 8).and_then(|c| c.fg), Some(palette.bar()));

        let labels = canvas.row_text(9);
        assert!(labels.contains("UTC-5"));
        assert!(labels.contains("UTC+0"));
        assert!(labels.contains("UTC+3.5"));
    }

    #[test]
    fn narrow_panel_keeps_midnight_bar_in_view() {
        let rows = (-12..=12).map(|h| row(h as f64, 10.0)).collect();
        let state = DatasetState::Ready(Dataset::new(rows));
        // 13:00 UTC: midnight at +11, second to last bar
        let chart = ticked(&state, 13);
        assert_eq!(chart.current_bars(), vec![23]);

        let palette = Palette::default();
        let mut canvas = Canvas::new(30, 10);
        chart.render(&mut canvas, Rect::new(0, 0, 30, 10), &palette);

        // 23 one-column slots: bars 2..25, so +11 lands at column 7 + 21
        assert!(canvas.row_text(0).contains(MARKER));
        let bar = canvas.get(28, 8).copied().unwrap_or_default();
        assert_eq!(bar.ch, '█');
        assert_eq!(bar.fg, Some(palette.highlight_edge()));
        assert_eq!(canvas.get(29, 8).and_then(|c| c.fg), Some(palette.bar()));
    }

    #[test]
    fn loading_placeholder_without_data() {
        let chart = ticked(&DatasetState::Loading, 0);
        let mut canvas = Canvas::new(30, 6);
        chart.render(&mut canvas, Rect::new(0, 0, 30, 6), &Palette::default());
        assert_eq!(canvas.row_text(3).trim(), "Cargando datos...");
    }

    #[test]
    fn empty_dataset_shows_placeholder() {
        let state = DatasetState::Ready(Dataset::new(Vec::new()));
        let chart = ticked(&state, 0);
        assert!(chart.rows().is_empty());
    }
}
