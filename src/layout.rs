use crate::terminal::{str_width, Canvas};
use crossterm::style::Color;

// Box drawing characters (rounded)
pub const BOX_TL: char = '╭';
pub const BOX_TR: char = '╮';
pub const BOX_BL: char = '╰';
pub const BOX_BR: char = '╯';
pub const BOX_H: char = '─';
pub const BOX_V: char = '│';
pub const BOX_TITLE_L: char = '┤';
pub const BOX_TITLE_R: char = '├';

/// Partial blocks for bar tops (1/8 increments)
pub const VBLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Area inside a one-cell border
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x + 1,
            self.y + 1,
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }

    /// Stack rows by relative weight; the last row takes the rounding slack
    pub fn split_rows(&self, weights: &[u16]) -> Vec<Rect> {
        split(self.h, weights)
            .into_iter()
            .map(|(start, len)| Rect::new(self.x, self.y + start as i32, self.w, len))
            .collect()
    }

    /// Side by side by relative weight
    pub fn split_cols(&self, weights: &[u16]) -> Vec<Rect> {
        split(self.w, weights)
            .into_iter()
            .map(|(start, len)| Rect::new(self.x + start as i32, self.y, len, self.h))
            .collect()
    }
}

fn split(total: u16, weights: &[u16]) -> Vec<(u16, u16)> {
    let sum: u32 = weights.iter().map(|&w| w as u32).sum();
    if sum == 0 {
        return weights.iter().map(|_| (0, 0)).collect();
    }
    let mut out = Vec::with_capacity(weights.len());
    let mut start = 0u16;
    for (i, &w) in weights.iter().enumerate() {
        let len = if i + 1 == weights.len() {
            total - start
        } else {
            (total as u32 * w as u32 / sum) as u16
        };
        out.push((start, len));
        start += len;
    }
    out
}

/// A bordered box with a centered title
pub struct Panel<'a> {
    pub area: Rect,
    pub title: &'a str,
    pub title_color: Color,
    pub border_color: Color,
}

impl<'a> Panel<'a> {
    pub fn new(area: Rect, title: &'a str, title_color: Color, border_color: Color) -> Self {
        Self {
            area,
            title,
            title_color,
            border_color,
        }
    }

    /// Draw the border and title, returning the inner area
    pub fn draw(&self, canvas: &mut Canvas) -> Rect {
        let Rect { x, y, w, h } = self.area;
        if w < 2 || h < 2 {
            return Rect::new(x, y, 0, 0);
        }
        let (w, h) = (w as i32, h as i32);
        let bc = Some(self.border_color);

        canvas.set(x, y, BOX_TL, bc, false);
        for i in 1..w - 1 {
            canvas.set(x + i, y, BOX_H, bc, false);
        }
        canvas.set(x + w - 1, y, BOX_TR, bc, false);

        for i in 1..h - 1 {
            canvas.set(x, y + i, BOX_V, bc, false);
            canvas.set(x + w - 1, y + i, BOX_V, bc, false);
        }

        canvas.set(x, y + h - 1, BOX_BL, bc, false);
        for i in 1..w - 1 {
            canvas.set(x + i, y + h - 1, BOX_H, bc, false);
        }
        canvas.set(x + w - 1, y + h - 1, BOX_BR, bc, false);

        // "┤ title ├" only if it fits
        let title_w = str_width(self.title) as i32;
        if !self.title.is_empty() && title_w + 4 <= w - 2 {
            let tx = x + 1 + (w - 2 - (title_w + 4)) / 2;
            canvas.set(tx, y, BOX_TITLE_L, bc, false);
            canvas.set(tx + 1, y, ' ', None, false);
            canvas.set_str(tx + 2, y, self.title, Some(self.title_color), true);
            canvas.set(tx + 2 + title_w, y, ' ', None, false);
            canvas.set(tx + 3 + title_w, y, BOX_TITLE_R, bc, false);
        }

        self.area.inner()
    }
}

/// Vertical bar growing up from `base_y`, `height` in cells (fractional)
pub fn draw_vbar(canvas: &mut Canvas, x: i32, base_y: i32, width: u16, height: f64, color: Color, bold: bool) {
    if height <= 0.0 {
        return;
    }
    let full = height.floor() as i32;
    let partial = ((height - full as f64) * 8.0) as usize;

    for dy in 0..full {
        for dx in 0..width as i32 {
            canvas.set(x + dx, base_y - dy, VBLOCKS[8], Some(color), bold);
        }
    }
    if partial > 0 {
        for dx in 0..width as i32 {
            canvas.set(x + dx, base_y - full, VBLOCKS[partial], Some(color), bold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_the_whole_height() {
        let r = Rect::new(0, 0, 80, 25);
        let rows = r.split_rows(&[1, 2, 2]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Rect::new(0, 0, 80, 5));
        assert_eq!(rows[1], Rect::new(0, 5, 80, 10));
        assert_eq!(rows[2].y, 15);
        assert_eq!(rows[2].bottom(), 25);
    }

    #[test]
    fn cols_take_slack_at_the_end() {
        let r = Rect::new(2, 1, 11, 4);
        let cols = r.split_cols(&[1, 1]);
        assert_eq!(cols[0], Rect::new(2, 1, 5, 4));
        assert_eq!(cols[1], Rect::new(7, 1, 6, 4));
    }

    #[test]
    fn inner_of_tiny_rect_is_empty() {
        assert!(Rect::new(0, 0, 1, 1).inner().is_empty());
    }

    #[test]
    fn panel_draws_border_and_title() {
        let mut c = Canvas::new(20, 3);
        let inner = Panel::new(Rect::new(0, 0, 20, 3), "Hola", Color::White, Color::Grey).draw(&mut c);
        assert_eq!(inner, Rect::new(1, 1, 18, 1));
        assert_eq!(c.row_text(0), "╭─────┤ Hola ├─────╮");
        assert_eq!(c.row_text(1), "│                  │");
        assert_eq!(c.row_text(2), "╰──────────────────╯");
    }

    #[test]
    fn long_title_is_left_out() {
        let mut c = Canvas::new(8, 3);
        Panel::new(Rect::new(0, 0, 8, 3), "Demasiado largo", Color::White, Color::Grey).draw(&mut c);
        assert_eq!(c.row_text(0), "╭──────╮");
    }

    #[test]
    fn vbar_partial_top() {
        let mut c = Canvas::new(1, 3);
        draw_vbar(&mut c, 0, 2, 1, 1.5, Color::Blue, false);
        assert_eq!(c.row_text(2), "█");
        assert_eq!(c.row_text(1), "▄");
        assert_eq!(c.row_text(0), "");
    }
}
