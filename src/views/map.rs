//! Flat world map with the midnight zone highlighted
//!
//! Equirectangular projection in braille dots, recentered on the current band
//! every tick so the highlighted zone sits in the middle of the panel.

use super::world::CONTINENTS;
use super::{TickContext, View};
use crate::band::{wrap_lon, ZoneBand, LAT_LIMIT};
use crate::clock::{format_offset, midnight_offset};
use crate::colors::{Accent, Palette};
use crate::layout::Rect;
use crate::scheduler::SLOW_TICK;
use crate::terminal::Canvas;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Visible latitudes
const LAT_TOP: f64 = 80.0;
const LAT_BOTTOM: f64 = -65.0;

const MARKER_COUNT: usize = 12;
/// Markers blink on a three-second cycle
const PULSE_SECS: i64 = 3;

// Braille dot bits for a 2x4 cell, indexed [row][col]
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

struct Marker {
    lon: f64,
    lat: f64,
    phase: i64,
}

pub struct TimeZoneMap {
    band: ZoneBand,
    markers: Vec<Marker>,
    /// Offset the markers were scattered for
    scattered_for: Option<i32>,
    clock_secs: i64,
}

impl TimeZoneMap {
    pub fn new() -> Self {
        Self {
            band: ZoneBand::for_offset(0),
            markers: Vec::new(),
            scattered_for: None,
            clock_secs: 0,
        }
    }

    #[cfg(test)]
    pub fn band(&self) -> ZoneBand {
        self.band
    }

    #[cfg(test)]
    pub fn markers(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.markers.iter().map(|m| (m.lon, m.lat))
    }

    /// Fraction across/down the map for a point, centered on the band
    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = (wrap_lon(lon - self.band.center) + 180.0) / 360.0;
        let y = (LAT_TOP - lat) / (LAT_TOP - LAT_BOTTOM);
        (x, y)
    }

    /// Longitude under the middle of column `col` of `width`
    fn column_lon(&self, col: u16, width: u16) -> f64 {
        let frac = (col as f64 + 0.5) / width as f64;
        wrap_lon(self.band.center + frac * 360.0 - 180.0)
    }

    fn land_dots(&self, dot_w: usize, dot_h: usize) -> Vec<Vec<bool>> {
        let mut dots = vec![vec![false; dot_w]; dot_h];
        let mut plot = |lon: f64, lat: f64| {
            let (fx, fy) = self.project(lon, lat);
            if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
                return;
            }
            let bx = (fx * dot_w as f64) as usize;
            let by = (fy * dot_h as f64) as usize;
            if bx < dot_w && by < dot_h {
                dots[by][bx] = true;
            }
        };

        for outline in CONTINENTS {
            for pair in outline.windows(2) {
                let (lon1, lat1) = (pair[0].0 as f64, pair[0].1 as f64);
                let (lon2, lat2) = (pair[1].0 as f64, pair[1].1 as f64);

                // Edges that cross the seam of the recentered map would
                // smear across the whole panel
                let (x1, _) = self.project(lon1, lat1);
                let (x2, _) = self.project(lon2, lat2);
                if (x1 - x2).abs() > 0.5 {
                    continue;
                }

                let span = (lon2 - lon1).abs().max((lat2 - lat1).abs());
                let steps = ((span / 360.0 * dot_w as f64) * 2.0).ceil().max(1.0) as usize;
                for t in 0..=steps {
                    let f = t as f64 / steps as f64;
                    plot(lon1 + (lon2 - lon1) * f, lat1 + (lat2 - lat1) * f);
                }
            }
        }
        dots
    }

    fn draw_map(&self, canvas: &mut Canvas, area: Rect, palette: &Palette) {
        let (w, h) = (area.w, area.h);
        let dots = self.land_dots(w as usize * 2, h as usize * 4);

        let band_cols: Vec<bool> = (0..w).map(|c| self.band.contains_lon(self.column_lon(c, w))).collect();
        // Narrow panels may have no column center inside the band: mark the middle
        let middle = w as usize / 2;
        let edge_left = band_cols.iter().position(|&b| b).unwrap_or(middle);
        let edge_right = band_cols.iter().rposition(|&b| b).unwrap_or(middle);

        for cy in 0..h as usize {
            let row_lat = LAT_TOP - (cy as f64 + 0.5) / h as f64 * (LAT_TOP - LAT_BOTTOM);
            let band_row = row_lat.abs() <= LAT_LIMIT;
            for cx in 0..w as usize {
                let mut bits = 0u8;
                for (row, row_bits) in DOT_BITS.iter().enumerate() {
                    for (col, bit) in row_bits.iter().enumerate() {
                        if dots[cy * 4 + row][cx * 2 + col] {
                            bits |= bit;
                        }
                    }
                }

                let in_band = band_row && band_cols[cx];
                let on_edge = band_row && (cx == edge_left || cx == edge_right);
                let (x, y) = (area.x + cx as i32, area.y + cy as i32);

                if bits != 0 {
                    let ch = char::from_u32(0x2800 + bits as u32).unwrap_or('⣿');
                    if in_band {
                        canvas.set(x, y, ch, Some(palette.highlight_edge()), true);
                    } else {
                        canvas.set(x, y, ch, Some(palette.land()), false);
                    }
                } else if on_edge {
                    canvas.set(x, y, '│', Some(palette.highlight_edge()), false);
                } else if in_band {
                    canvas.set(x, y, '░', Some(palette.highlight()), false);
                }
            }
        }

        for marker in &self.markers {
            let (fx, fy) = self.project(marker.lon, marker.lat);
            if !(0.0..1.0).contains(&fy) {
                continue;
            }
            let x = area.x + (fx * w as f64) as i32;
            let y = area.y + (fy * h as f64) as i32;
            if (self.clock_secs + marker.phase).rem_euclid(PULSE_SECS) == 0 {
                canvas.set(x, y, '•', Some(palette.highlight_edge()), false);
            } else {
                canvas.set(x, y, '🦷', None, false);
            }
        }
    }
}

impl Default for TimeZoneMap {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TimeZoneMap {
    fn title(&self) -> &str {
        "🗺 Ruta del Ratón Pérez 🗺"
    }

    fn accent(&self) -> Accent {
        Accent::Map
    }

    fn period(&self) -> Duration {
        SLOW_TICK
    }

    fn tick(&mut self, ctx: &TickContext) {
        let offset = midnight_offset(ctx.now);
        self.band = ZoneBand::for_offset(offset);
        self.clock_secs = ctx.now.timestamp();

        if self.scattered_for != Some(offset) {
            // Same hour, same scatter: a frozen instant always draws the same map
            let hour = ctx.now.timestamp().div_euclid(3600) as u64;
            let mut rng = StdRng::seed_from_u64(hour);
            self.markers = self
                .band
                .scatter(&mut rng, MARKER_COUNT)
                .into_iter()
                .map(|(lon, lat)| Marker {
                    lon,
                    lat,
                    phase: rng.gen_range(0..PULSE_SECS),
                })
                .collect();
            self.scattered_for = Some(offset);
        }
    }

    fn render(&self, canvas: &mut Canvas, area: Rect, palette: &Palette) {
        if area.is_empty() {
            return;
        }
        let colors = palette.panel(Accent::Map);
        let header = format!("Huso horario actual: {}", format_offset(self.band.offset as f64));
        canvas.set_str_centered(area.x + area.w as i32 / 2, area.y, &header, Some(colors.caption), false);

        let map_area = Rect::new(area.x, area.y + 1, area.w, area.h.saturating_sub(1));
        if !map_area.is_empty() {
            self.draw_map(canvas, map_area, palette);
        }
    }
}
