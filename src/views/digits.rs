//! Compact 3-line block digits for the counters

use crate::terminal::Canvas;
use crossterm::style::Color;

const DIGITS: [[&str; 3]; 10] = [
    ["█▀█", "█ █", "▀▀▀"],  // 0
    [" ▀█", "  █", "  ▀"],  // 1
    ["▀▀█", "█▀▀", "▀▀▀"],  // 2
    ["▀▀█", " ▀█", "▀▀▀"],  // 3
    ["█ █", "▀▀█", "  ▀"],  // 4
    ["█▀▀", "▀▀█", "▀▀▀"],  // 5
    ["█▀▀", "█▀█", "▀▀▀"],  // 6
    ["▀▀█", "  █", "  ▀"],  // 7
    ["█▀█", "█▀█", "▀▀▀"],  // 8
    ["█▀█", "▀▀█", "▀▀▀"],  // 9
];

/// Thousands separator
const DOT: [&str; 3] = [" ", " ", "▀"];

pub const HEIGHT: usize = 3;
const SPACING: usize = 1;

fn glyph(ch: char) -> Option<&'static [&'static str; 3]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        '.' => Some(&DOT),
        _ => None,
    }
}

fn glyph_width(ch: char) -> usize {
    glyph(ch).map_or(0, |g| g[0].chars().count())
}

/// Columns `text` needs in block digits. Unknown characters are skipped.
pub fn width(text: &str) -> usize {
    let widths: Vec<usize> = text.chars().map(glyph_width).filter(|&w| w > 0).collect();
    if widths.is_empty() {
        return 0;
    }
    widths.iter().sum::<usize>() + SPACING * (widths.len() - 1)
}

/// Draw `text` centered on `cx`, top row at `y`
pub fn draw_centered(canvas: &mut Canvas, cx: i32, y: i32, text: &str, color: Color) {
    let mut x = cx - (width(text) / 2) as i32;
    for ch in text.chars() {
        let Some(pattern) = glyph(ch) else { continue };
        for (row, line) in pattern.iter().enumerate() {
            for (col, pch) in line.chars().enumerate() {
                if pch != ' ' {
                    canvas.set(x + col as i32, y + row as i32, pch, Some(color), false);
                }
            }
        }
        x += (glyph_width(ch) + SPACING) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_include_spacing() {
        assert_eq!(width("8"), 3);
        assert_eq!(width("12"), 7);
        assert_eq!(width("1.234"), 3 * 4 + 1 + 4);
        assert_eq!(width(""), 0);
    }

    #[test]
    fn draws_three_rows() {
        let mut c = Canvas::new(7, 3);
        draw_centered(&mut c, 3, 0, "10", Color::White);
        assert_eq!(c.row_text(0), " ▀█ █▀█");
        assert_eq!(c.row_text(1), "  █ █ █");
        assert_eq!(c.row_text(2), "  ▀ ▀▀▀");
    }
}
