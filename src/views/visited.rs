//! How many children the mouse is visiting right now

use super::{digits, TickContext, View};
use crate::clock::{format_offset, midnight_offset};
use crate::colors::{draw_loading, Accent, Palette};
use crate::format::group_es;
use crate::layout::Rect;
use crate::lookup::lookup_quantity;
use crate::scheduler::SLOW_TICK;
use crate::terminal::Canvas;
use chrono::{DateTime, FixedOffset};
use std::time::Duration;

pub struct ChildrenVisited {
    offset: i32,
    children: Option<f64>,
    time_label: String,
}

impl ChildrenVisited {
    pub fn new() -> Self {
        Self {
            offset: 0,
            children: None,
            time_label: String::new(),
        }
    }

    pub fn children(&self) -> Option<f64> {
        self.children
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }
}

impl Default for ChildrenVisited {
    fn default() -> Self {
        Self::new()
    }
}

/// `14:05 UTC+2`
fn local_time_label(local: &DateTime<FixedOffset>) -> String {
    let hours = local.offset().local_minus_utc() as f64 / 3600.0;
    format!("{} {}", local.format("%H:%M"), format_offset(hours))
}

impl View for ChildrenVisited {
    fn title(&self) -> &str {
        "🐭 Niños que Visita Ahora 🐭"
    }

    fn accent(&self) -> Accent {
        Accent::Visited
    }

    fn period(&self) -> Duration {
        SLOW_TICK
    }

    fn tick(&mut self, ctx: &TickContext) {
        self.offset = midnight_offset(ctx.now);
        self.time_label = local_time_label(&ctx.local);
        // One child per tooth
        self.children = ctx
            .dataset
            .dataset()
            .and_then(|d| lookup_quantity(d.rows(), self.offset));
    }

    fn render(&self, canvas: &mut Canvas, area: Rect, palette: &Palette) {
        if area.is_empty() {
            return;
        }
        let colors = palette.panel(Accent::Visited);

        let Some(children) = self.children else {
            draw_loading(canvas, area.x, area.y, area.w, area.h, colors.caption);
            return;
        };

        let text = group_es(children);
        let cx = area.x + area.w as i32 / 2;
        let big = digits::width(&text) <= area.w as usize && area.h as usize > digits::HEIGHT + 2;
        let block_h = if big { digits::HEIGHT } else { 1 };
        let content_h = block_h + 3;
        let top = area.y + (area.h as usize).saturating_sub(content_h) as i32 / 2;

        if big {
            digits::draw_centered(canvas, cx, top, &text, colors.value);
        } else {
            canvas.set_str_centered(cx, top, &text, Some(colors.value), true);
        }

        let mut y = top + block_h as i32 + 1;
        let lines = [
            format!("Hora actual: {}", self.time_label),
            format!("Visitando huso horario {}", format_offset(self.offset as f64)),
        ];
        for line in &lines {
            if y >= area.bottom() {
                break;
            }
            canvas.set_str_centered(cx, y, line, Some(colors.caption), false);
            y += 1;
        }
    }
}
