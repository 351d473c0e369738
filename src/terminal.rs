use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Marks the second column of a double-width glyph
const CONTINUATION: char = '\0';

/// A single cell of the frame
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// Columns a glyph occupies. Only the emoji the panels use are double width;
/// braille and box drawing are single.
pub fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1F300..=0x1FAFF | 0x2728 => 2,
        _ => 1,
    }
}

/// Columns a string occupies
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Off-screen frame. Everything draws here; [`Terminal`] copies it to the tty
/// and print mode turns it into ANSI text.
#[derive(Clone, PartialEq, Debug)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a glyph; out-of-bounds writes are dropped. A wide glyph that would
    /// be cut by the right edge is not drawn.
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        let wide = char_width(ch) == 2;
        if wide && self.index(x + 1, y).is_none() {
            return;
        }
        let Some(i) = self.index(x, y) else { return };
        self.cells[i] = Cell { ch, fg, bold };
        if wide {
            self.cells[i + 1] = Cell { ch: CONTINUATION, fg, bold };
        }
    }

    /// Draw a string left to right; returns the columns it took
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) -> usize {
        let mut col = x;
        for ch in s.chars() {
            self.set(col, y, ch, fg, bold);
            col += char_width(ch) as i32;
        }
        (col - x) as usize
    }

    /// Draw a string centered on column `cx`
    pub fn set_str_centered(&mut self, cx: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        let x = cx - (str_width(s) / 2) as i32;
        self.set_str(x, y, s, fg, bold);
    }

    /// Visible text of a row, trailing blanks removed
    #[cfg(test)]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row = &self.cells[start..start + self.width as usize];
        let text: String = row
            .iter()
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect();
        text.trim_end().to_string()
    }

    /// Frame as text with ANSI colors, one line per row
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            let start = y as usize * self.width as usize;
            let row = &self.cells[start..start + self.width as usize];
            let last = row.iter().rposition(|c| c.ch != ' ').map_or(0, |p| p + 1);
            // Escapes only where the style changes, so runs of text stay whole
            let mut current = (None, false);
            for cell in &row[..last] {
                if cell.ch == CONTINUATION {
                    continue;
                }
                if (cell.fg, cell.bold) != current {
                    if current != (None, false) {
                        out.push_str("\x1b[0m");
                    }
                    if cell.bold {
                        out.push_str("\x1b[1m");
                    }
                    if let Some(color) = cell.fg {
                        out.push_str(&ansi_fg(color));
                    }
                    current = (cell.fg, cell.bold);
                }
                out.push(cell.ch);
            }
            if current != (None, false) {
                out.push_str("\x1b[0m");
            }
            out.push('\n');
        }
        out
    }
}

/// SGR sequence for a foreground color
fn ansi_fg(color: Color) -> String {
    let mut s = String::new();
    let _ = match color {
        Color::Rgb { r, g, b } => write!(s, "\x1b[38;2;{};{};{}m", r, g, b),
        Color::AnsiValue(v) => write!(s, "\x1b[38;5;{}m", v),
        Color::Black => write!(s, "\x1b[30m"),
        Color::DarkRed => write!(s, "\x1b[31m"),
        Color::DarkGreen => write!(s, "\x1b[32m"),
        Color::DarkYellow => write!(s, "\x1b[33m"),
        Color::DarkBlue => write!(s, "\x1b[34m"),
        Color::DarkMagenta => write!(s, "\x1b[35m"),
        Color::DarkCyan => write!(s, "\x1b[36m"),
        Color::Grey => write!(s, "\x1b[37m"),
        Color::DarkGrey => write!(s, "\x1b[90m"),
        Color::Red => write!(s, "\x1b[91m"),
        Color::Green => write!(s, "\x1b[92m"),
        Color::Yellow => write!(s, "\x1b[93m"),
        Color::Blue => write!(s, "\x1b[94m"),
        Color::Magenta => write!(s, "\x1b[95m"),
        Color::Cyan => write!(s, "\x1b[96m"),
        Color::White => write!(s, "\x1b[97m"),
        _ => Ok(()),
    };
    s
}

/// Full-screen tty session. Raw mode and the alternate screen are restored
/// on drop.
pub struct Terminal {
    canvas: Canvas,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self {
            canvas: Canvas::new(width, height),
        })
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Follow terminal resizes. Returns true when the size changed.
    pub fn sync_size(&mut self) -> io::Result<bool> {
        let (w, h) = size()?;
        if (w, h) == self.canvas.size() {
            return Ok(false);
        }
        self.canvas.resize(w, h);
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(true)
    }

    /// Copy the canvas to the screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        let (width, height) = self.canvas.size();

        for y in 0..height {
            queue!(out, MoveTo(0, y))?;
            let mut current: Option<(Option<Color>, bool)> = None;

            for x in 0..width {
                let Some(cell) = self.canvas.get(x as i32, y as i32) else { continue };
                if cell.ch == CONTINUATION {
                    continue;
                }
                if current != Some((cell.fg, cell.bold)) {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                    if cell.bold {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if let Some(color) = cell.fg {
                        queue!(out, SetForegroundColor(color))?;
                    }
                    current = Some((cell.fg, cell.bold));
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }

    /// Wait up to `timeout` for a key press
    pub fn wait_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(Some((key.code, key.modifiers)));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut c = Canvas::new(4, 2);
        c.set(-1, 0, 'x', None, false);
        c.set(4, 0, 'x', None, false);
        c.set(0, 2, 'x', None, false);
        assert_eq!(c.row_text(0), "");
        assert_eq!(c.row_text(1), "");
    }

    #[test]
    fn set_str_clips_at_edge() {
        let mut c = Canvas::new(5, 1);
        c.set_str(2, 0, "hello", None, false);
        assert_eq!(c.row_text(0), "  hel");
    }

    #[test]
    fn wide_glyph_takes_two_columns() {
        let mut c = Canvas::new(6, 1);
        let w = c.set_str(0, 0, "🦷ab", None, false);
        assert_eq!(w, 4);
        assert_eq!(c.row_text(0), "🦷ab");
        assert_eq!(c.get(2, 0).map(|cell| cell.ch), Some('a'));
    }

    #[test]
    fn wide_glyph_not_split_at_edge() {
        let mut c = Canvas::new(3, 1);
        c.set_str(2, 0, "🐭", None, false);
        assert_eq!(c.row_text(0), "");
    }

    #[test]
    fn centered_text() {
        let mut c = Canvas::new(9, 1);
        c.set_str_centered(4, 0, "abc", None, false);
        assert_eq!(c.row_text(0), "   abc");
    }

    #[test]
    fn ansi_output_colors_cells() {
        let mut c = Canvas::new(3, 2);
        c.set(0, 0, 'a', Some(Color::Red), true);
        c.set(1, 1, 'b', None, false);
        assert_eq!(c.to_ansi(), "\x1b[1m\x1b[91ma\x1b[0m\n b\n");
    }

    #[test]
    fn ansi_output_keeps_runs_together() {
        let mut c = Canvas::new(6, 1);
        c.set_str(0, 0, "UTC-5", Some(Color::Green), false);
        assert_eq!(c.to_ansi(), "\x1b[92mUTC-5\x1b[0m\n");
    }

    #[test]
    fn clear_resets_cells() {
        let mut c = Canvas::new(2, 1);
        c.set(0, 0, 'z', Some(Color::Blue), false);
        c.clear();
        assert_eq!(c.get(0, 0), Some(&Cell::default()));
    }

    #[test]
    fn widths() {
        assert_eq!(str_width("UTC+3"), 5);
        assert_eq!(str_width("🐭 ratón"), 8);
        assert_eq!(char_width('⣿'), 1);
        assert_eq!(char_width('✨'), 2);
    }
}
