use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};

use crate::config::Config;

/// One of the two fixed palettes selected by the `dark_theme` setting.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub selection_bg: Color,
    pub muted: Color,
    pub accent: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(0xf0, 0xf0, 0xf0),
            fg: Color::Black,
            selection_bg: Color::Rgb(0xcc, 0xe7, 0xff),
            muted: Color::DarkGray,
            accent: Color::Blue,
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x33, 0x33, 0x33),
            fg: Color::White,
            selection_bg: Color::Rgb(0x55, 0x55, 0x55),
            muted: Color::Gray,
            accent: Color::Cyan,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.dark_theme {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Highlight the widget that owns the keyboard.
pub fn focus_style(is_focused: bool, theme: &Theme) -> Style {
    if is_focused {
        theme.base().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        theme.base()
    }
}

/// Table rows scale with the configured font size at a 2.2 ratio, in
/// terminal cells. The font size is not range-checked on load, so the math
/// saturates instead of trusting it.
pub fn row_height(font_size: u16) -> u16 {
    let cells = u32::from(font_size) * 22 / 100;
    cells.clamp(1, u32::from(u16::MAX)) as u16
}

/// Column widths follow the font size; the description column gets the
/// widest share.
pub fn column_widths(font_size: u16) -> [Constraint; 5] {
    let extra = font_size;
    [
        Constraint::Length(12_u16.saturating_add(extra)),
        Constraint::Length(10 + extra / 2),
        Constraint::Length(8 + extra / 2),
        Constraint::Length(9 + extra / 2),
        Constraint::Min(12_u16.saturating_add(extra.saturating_mul(3))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_height_scales_with_font_size() {
        assert_eq!(row_height(8), 1);
        assert_eq!(row_height(10), 2);
        assert_eq!(row_height(20), 4);
    }

    #[test]
    fn row_height_never_collapses() {
        assert_eq!(row_height(1), 1);
    }
}
