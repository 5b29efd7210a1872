use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use crate::app::{Popup, PopupKind, SettingsDraft};
use crate::config::{FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::ui::centered_rect;
use crate::ui::style::Theme;

/// The settings dialog: theme toggle and font size, applied on Enter.
pub fn render_settings(draft: &SettingsDraft, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(46, 7, area);
    Clear.render(popup_area, buf);

    let checkbox = if draft.dark_theme { "x" } else { " " };
    let lines = vec![
        Line::from(format!(" [{checkbox}] Tema Escuro")),
        Line::from(format!(
            " Tamanho da Fonte: {}   ({FONT_SIZE_MIN}-{FONT_SIZE_MAX})",
            draft.font_size
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Espaço: tema · ↑/↓: fonte · Enter: Aplicar · Esc: cancelar",
            theme.base().fg(theme.muted),
        )),
    ];

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title("Configurações")
                .border_type(BorderType::Rounded)
                .border_style(theme.base().fg(theme.accent)),
        )
        .style(theme.base())
        .render(popup_area, buf);
}

/// The annotations dialog: a free-text editor over the persisted blob.
pub fn render_annotations(text: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let width = area.width.saturating_sub(8).clamp(20, 64);
    let height = area.height.saturating_sub(4).clamp(8, 16);
    let popup_area = centered_rect(width, height, area);
    Clear.render(popup_area, buf);

    Paragraph::new(format!("{text}█"))
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title("Anotações")
                .title_bottom(Line::from(" Ctrl+S: Salvar · Esc: cancelar ").right_aligned())
                .border_type(BorderType::Rounded)
                .border_style(theme.base().fg(theme.accent)),
        )
        .style(theme.base())
        .render(popup_area, buf);
}

/// Blocking error/confirmation message, dismissed with Enter or Esc.
pub fn render_popup(popup: &Popup, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let width = area.width.saturating_sub(8).clamp(24, 60);
    let popup_area = centered_rect(width, 7, area);
    Clear.render(popup_area, buf);

    let border_color = match popup.kind {
        PopupKind::Info => Color::Green,
        PopupKind::Error => Color::Red,
    };
    let lines = vec![
        Line::from(""),
        Line::from(popup.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("Enter: OK", theme.base().fg(theme.muted))),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .title(Span::styled(
                    popup.title(),
                    Style::default()
                        .fg(border_color)
                        .add_modifier(Modifier::BOLD),
                ))
                .border_type(BorderType::Rounded)
                .border_style(theme.base().fg(border_color)),
        )
        .style(theme.base())
        .render(popup_area, buf);
}
