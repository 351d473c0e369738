use crate::terminal::{str_width, Canvas};
use crossterm::style::Color;

pub const DASHBOARD_HELP: &str = "\
EL RATÓN PÉREZ
─────────────────
r      Reload dataset
c      Cycle colors
Space  Pause/resume
───────────────────────
q/Esc  Quit
?      Close help";

/// Render a centered help box over whatever is on the canvas
pub fn render_help_overlay(canvas: &mut Canvas, help_text: &str) {
    if help_text.is_empty() {
        return;
    }
    let (width, height) = canvas.size();

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| str_width(l)).max().unwrap_or(0);
    let box_width = max_width + 4;
    let box_height = lines.len() + 2;

    let start_x = (width as usize).saturating_sub(box_width) as i32 / 2;
    let start_y = (height as usize).saturating_sub(box_height) as i32 / 2;
    let right = start_x + box_width as i32 - 1;
    let bottom = start_y + box_height as i32 - 1;

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    canvas.set(start_x, start_y, '┌', border, false);
    canvas.set(right, start_y, '┐', border, false);
    canvas.set(start_x, bottom, '└', border, false);
    canvas.set(right, bottom, '┘', border, false);
    for x in start_x + 1..right {
        canvas.set(x, start_y, '─', border, false);
        canvas.set(x, bottom, '─', border, false);
    }

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i as i32;
        canvas.set(start_x, y, '│', border, false);
        let padding = max_width.saturating_sub(str_width(line));
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        canvas.set_str(start_x + 1, y, &padded, text, false);
        canvas.set(right, y, '│', border, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_is_centered_box() {
        let mut c = Canvas::new(12, 6);
        render_help_overlay(&mut c, "ab\ncd");
        assert_eq!(c.row_text(0), "");
        assert_eq!(c.row_text(1), "   ┌────┐");
        assert_eq!(c.row_text(2), "   │ ab │");
        assert_eq!(c.row_text(3), "   │ cd │");
        assert_eq!(c.row_text(4), "   └────┘");
        assert_eq!(c.row_text(5), "");
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut c = Canvas::new(4, 2);
        render_help_overlay(&mut c, "");
        assert_eq!(c.row_text(0), "");
    }
}
