use crossterm::event::KeyCode;
use crossterm::style::Color;

use crate::terminal::Canvas;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Theme {
    /// Truecolor pastels
    Pastel,
    /// 16-color fallback
    Ansi,
    Mono,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pastel" | "rgb" => Some(Theme::Pastel),
            "ansi" | "16" => Some(Theme::Ansi),
            "mono" | "none" => Some(Theme::Mono),
            _ => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Theme::Pastel => Theme::Ansi,
            Theme::Ansi => Theme::Mono,
            Theme::Mono => Theme::Pastel,
        }
    }
}

/// Which panel is asking, each has its own tint
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Accent {
    Header,
    Teeth,
    Visited,
    Map,
    Chart,
    Cavities,
}

#[derive(Clone, Copy, Debug)]
pub struct PanelColors {
    pub border: Color,
    pub title: Color,
    pub value: Color,
    pub caption: Color,
}

/// Current theme plus the key handling to change it
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub theme: Theme,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// `c` cycles themes. Returns true if the key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('c') => {
                self.theme = self.theme.next();
                true
            }
            _ => false,
        }
    }

    pub fn panel(&self, accent: Accent) -> PanelColors {
        match self.theme {
            Theme::Pastel => match accent {
                Accent::Header => PanelColors {
                    border: rgb(249, 168, 212),
                    title: rgb(192, 132, 252),
                    value: rgb(244, 114, 182),
                    caption: rgb(219, 39, 119),
                },
                Accent::Teeth => PanelColors {
                    border: rgb(251, 207, 232),
                    title: rgb(190, 24, 93),
                    value: rgb(126, 34, 206),
                    caption: rgb(219, 39, 119),
                },
                Accent::Visited => PanelColors {
                    border: rgb(191, 219, 254),
                    title: rgb(30, 64, 175),
                    value: rgb(14, 116, 144),
                    caption: rgb(37, 99, 235),
                },
                Accent::Map => PanelColors {
                    border: rgb(254, 240, 138),
                    title: rgb(154, 52, 18),
                    value: rgb(234, 88, 12),
                    caption: rgb(234, 88, 12),
                },
                Accent::Chart => PanelColors {
                    border: rgb(187, 247, 208),
                    title: rgb(22, 101, 52),
                    value: rgb(167, 139, 250),
                    caption: rgb(22, 163, 74),
                },
                Accent::Cavities => PanelColors {
                    border: rgb(254, 215, 170),
                    title: rgb(154, 52, 18),
                    value: rgb(185, 28, 28),
                    caption: rgb(234, 88, 12),
                },
            },
            Theme::Ansi => {
                let (border, value) = match accent {
                    Accent::Header => (Color::Magenta, Color::Magenta),
                    Accent::Teeth => (Color::DarkMagenta, Color::Magenta),
                    Accent::Visited => (Color::DarkBlue, Color::Cyan),
                    Accent::Map => (Color::DarkYellow, Color::Yellow),
                    Accent::Chart => (Color::DarkGreen, Color::Blue),
                    Accent::Cavities => (Color::DarkRed, Color::Red),
                };
                PanelColors {
                    border,
                    title: Color::White,
                    value,
                    caption: Color::Grey,
                }
            }
            Theme::Mono => PanelColors {
                border: Color::DarkGrey,
                title: Color::White,
                value: Color::White,
                caption: Color::Grey,
            },
        }
    }

    /// Fill for the current zone (band, highlighted bar)
    pub fn highlight(&self) -> Color {
        match self.theme {
            Theme::Pastel => rgb(255, 107, 157),
            Theme::Ansi => Color::Magenta,
            Theme::Mono => Color::White,
        }
    }

    /// Outline/marker for the current zone
    pub fn highlight_edge(&self) -> Color {
        match self.theme {
            Theme::Pastel => rgb(255, 23, 68),
            Theme::Ansi => Color::Red,
            Theme::Mono => Color::White,
        }
    }

    /// Regular chart bars
    pub fn bar(&self) -> Color {
        match self.theme {
            Theme::Pastel => rgb(167, 139, 250),
            Theme::Ansi => Color::Blue,
            Theme::Mono => Color::Grey,
        }
    }

    pub fn land(&self) -> Color {
        match self.theme {
            Theme::Pastel => rgb(120, 113, 108),
            Theme::Ansi => Color::Grey,
            Theme::Mono => Color::Grey,
        }
    }

    /// Grid lines and axes
    pub fn muted(&self) -> Color {
        match self.theme {
            Theme::Pastel => rgb(203, 213, 225),
            Theme::Ansi | Theme::Mono => Color::DarkGrey,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Theme::Pastel)
    }
}

/// Placeholder shown while the dataset is loading (or never arrives)
pub const LOADING_TEXT: &str = "Cargando datos...";

/// Draw the loading placeholder centered in an area
pub fn draw_loading(canvas: &mut Canvas, x: i32, y: i32, w: u16, h: u16, color: Color) {
    let cx = x + w as i32 / 2;
    let cy = y + h as i32 / 2;
    canvas.set_str_centered(cx, cy, LOADING_TEXT, Some(color), false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_cycles_themes() {
        let mut p = Palette::default();
        assert!(p.handle_key(KeyCode::Char('c')));
        assert_eq!(p.theme, Theme::Ansi);
        p.handle_key(KeyCode::Char('c'));
        assert_eq!(p.theme, Theme::Mono);
        p.handle_key(KeyCode::Char('c'));
        assert_eq!(p.theme, Theme::Pastel);
        assert!(!p.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn theme_names() {
        assert_eq!(Theme::from_name("Pastel"), Some(Theme::Pastel));
        assert_eq!(Theme::from_name("16"), Some(Theme::Ansi));
        assert_eq!(Theme::from_name("mono"), Some(Theme::Mono));
        assert_eq!(Theme::from_name("sepia"), None);
    }

    #[test]
    fn mono_has_no_rgb() {
        let p = Palette::new(Theme::Mono);
        for accent in [Accent::Header, Accent::Teeth, Accent::Map] {
            assert!(!matches!(p.panel(accent).value, Color::Rgb { .. }));
        }
    }
}
