pub mod dialogs;
pub mod main_screen;
pub mod style;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::Widget;

use crate::app::{App, AppMode};
use crate::ui::style::Theme;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = Theme::from_config(&self.config);
        main_screen::render_main(&mut *self, &theme, area, buf);
        match &self.mode {
            AppMode::Main => {}
            AppMode::Settings(draft) => dialogs::render_settings(draft, &theme, area, buf),
            AppMode::Annotations(text) => dialogs::render_annotations(text, &theme, area, buf),
        }
        if let Some(popup) = &self.popup {
            dialogs::render_popup(popup, &theme, area, buf);
        }
    }
}

/// Center a fixed-size overlay inside `area`.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [mid] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(mid);
    mid
}
