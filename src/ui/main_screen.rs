use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Cell, Paragraph, Row, StatefulWidget, Table, Tabs, Widget,
    },
};

use crate::app::{App, Focus, QuestTab};
use crate::quest::Quest;
use crate::ui::style::{self, focus_style, Theme};

/// Renders the whole main screen: player header, create form, the quest
/// tables and the key hints. Everything is rebuilt from the model on each
/// draw.
pub fn render_main(app: &mut App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, theme.base());

    let [player_area, form_area, quests_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(area);

    render_player(app, theme, player_area, buf);
    render_form(app, theme, form_area, buf);
    render_quests(app, theme, quests_area, buf);
    render_footer(app, theme, footer_area, buf);
}

fn render_player(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled(
            format!("Nível: {}", app.player.level()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::raw(format!("EXP: {}", app.player.total_exp)),
        Span::raw("    "),
        Span::raw(format!("Moedas: {}", app.player.total_coins)),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .title("Tarefas")
                .border_type(BorderType::Rounded)
                .border_style(theme.base()),
        )
        .style(theme.base())
        .render(area, buf);
}

fn render_form(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let fields = [
        (Focus::Name, "Nome da Quest: ", &app.form.name),
        (Focus::Difficulty, "Dificuldade (0-10): ", &app.form.difficulty),
        (Focus::Exp, "Recompensa EXP: ", &app.form.exp_reward),
        (Focus::Coins, "Recompensa Moedas: ", &app.form.coin_reward),
        (Focus::Description, "Descrição: ", &app.form.description),
    ];

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(focus, label, value)| {
            let focused = app.focus == *focus;
            let cursor = if focused { "█" } else { "" };
            Line::from(vec![
                Span::styled(*label, theme.base().fg(theme.muted)),
                Span::styled(format!("{value}{cursor}"), focus_style(focused, theme)),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "Enter: Criar Quest",
        theme.base().fg(theme.muted),
    )));

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title("Criar Quest")
                .border_type(BorderType::Rounded)
                .border_style(focus_style(app.focus.in_form(), theme)),
        )
        .style(theme.base())
        .render(area, buf);
}

fn render_quests(app: &mut App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let [tabs_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);

    let active_count = app.active_quests().len();
    let history_count = app.completed_quests().len();

    Tabs::new(vec![
        format!("Quests Ativas ({active_count})"),
        format!("Histórico ({history_count})"),
    ])
    .select(match app.tab {
        QuestTab::Active => 0,
        QuestTab::History => 1,
    })
    .style(theme.base().fg(theme.muted))
    .highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .render(tabs_area, buf);

    let font_size = app.config.font_size;
    let height = style::row_height(font_size);
    let quests = match app.tab {
        QuestTab::Active => app.active_quests(),
        QuestTab::History => app.completed_quests(),
    };
    let rows: Vec<Row> = quests
        .iter()
        .map(|quest| quest_row(quest, height, theme))
        .collect();

    let header = Row::new(
        ["Nome", "Dificuldade", "EXP", "Moedas", "Descrição"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    );

    let table = Table::new(rows, style::column_widths(font_size))
        .header(header)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(focus_style(app.focus == Focus::Quests, theme)),
        )
        .style(theme.base())
        .row_highlight_style(theme.selection())
        .highlight_symbol(">> ");

    let state = match app.tab {
        QuestTab::Active => &mut app.active_state,
        QuestTab::History => &mut app.history_state,
    };
    StatefulWidget::render(table, table_area, buf, state);
}

fn quest_row<'a>(quest: &Quest, height: u16, theme: &Theme) -> Row<'a> {
    Row::new(vec![
        Cell::from(quest.name.clone()),
        Cell::from(quest.difficulty.to_string()),
        Cell::from(quest.exp_reward.to_string()),
        Cell::from(quest.coin_reward.to_string()),
        Cell::from(quest.description.clone()),
    ])
    .height(height)
    .style(theme.base())
}

fn render_footer(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let hint = if app.focus.in_form() {
        "Tab: próximo campo · Enter: Criar Quest · Esc: tabelas"
    } else {
        "c: completar · d: excluir · s: configurações · a: anotações · n: nova quest · ←/→: abas · q: sair"
    };
    Paragraph::new(hint)
        .style(theme.base().fg(theme.muted))
        .alignment(Alignment::Center)
        .render(area, buf);
}
