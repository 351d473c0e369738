//! Teeth and cavity counters

use super::{digits, TickContext, View};
use crate::colors::{Accent, Palette};
use crate::format::group_es;
use crate::layout::Rect;
use crate::scheduler::FAST_TICK;
use crate::teeth::TeethAccumulator;
use crate::terminal::{str_width, Canvas};
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CounterKind {
    /// Everything collected since Jan 1
    Teeth,
    /// The share with cavities
    Cavities,
}

impl CounterKind {
    fn title(self) -> &'static str {
        match self {
            CounterKind::Teeth => "🦷 Dientes Recogidos Este Año 🦷",
            CounterKind::Cavities => "🦷 Dientes Cariados Este Año 🦷",
        }
    }

    fn caption(self) -> &'static str {
        match self {
            CounterKind::Teeth => "El Ratón Pérez está trabajando sin descanso...",
            CounterKind::Cavities => "El 5% de los dientes recogidos necesitan atención especial...",
        }
    }
}

pub struct CounterView {
    kind: CounterKind,
    accumulator: TeethAccumulator,
    value: f64,
}

impl CounterView {
    pub fn new(kind: CounterKind, accumulator: TeethAccumulator) -> Self {
        Self {
            kind,
            accumulator,
            value: 0.0,
        }
    }

    #[cfg(test)]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl View for CounterView {
    fn title(&self) -> &str {
        self.kind.title()
    }

    fn accent(&self) -> Accent {
        match self.kind {
            CounterKind::Teeth => Accent::Teeth,
            CounterKind::Cavities => Accent::Cavities,
        }
    }

    fn period(&self) -> Duration {
        FAST_TICK
    }

    fn tick(&mut self, ctx: &TickContext) {
        self.value = match self.kind {
            CounterKind::Teeth => self.accumulator.collected_over(ctx.year_days),
            CounterKind::Cavities => self.accumulator.cavities_over(ctx.year_days),
        };
    }

    fn render(&self, canvas: &mut Canvas, area: Rect, palette: &Palette) {
        if area.is_empty() {
            return;
        }
        let colors = palette.panel(self.accent());
        let text = group_es(self.value);
        let cx = area.x + area.w as i32 / 2;

        let big = digits::width(&text) <= area.w as usize && area.h as usize > digits::HEIGHT;
        let block_h = if big { digits::HEIGHT } else { 1 };
        // number plus a blank line and the caption
        let content_h = block_h + 2;
        let top = area.y + (area.h as usize).saturating_sub(content_h) as i32 / 2;

        if big {
            digits::draw_centered(canvas, cx, top, &text, colors.value);
        } else {
            canvas.set_str_centered(cx, top, &text, Some(colors.value), true);
        }

        let caption = self.kind.caption();
        if str_width(caption) <= area.w as usize {
            let y = top + block_h as i32 + 1;
            if y < area.bottom() {
                canvas.set_str_centered(cx, y, caption, Some(colors.caption), false);
            }
        }
    }
}
