pub mod components;
pub mod keymap;

mod panels;
mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Focus};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

const FORM_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Info bar
            Constraint::Length(3),           // Totals
            Constraint::Min(8),              // Table + chart
            Constraint::Length(FORM_HEIGHT), // Form
            Constraint::Length(1),           // Status
            Constraint::Length(1),           // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    panels::summary::render(frame, layout[1], state, &theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[2]);
    panels::transactions::render(frame, body[0], state, &theme);
    panels::expenses::render(frame, body[1], state, &theme);

    panels::form::render(frame, layout[3], state, &theme);
    components::status::render(frame, layout[4], state.view.status.as_ref(), &theme);
    render_hint_bar(frame, layout[5], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (sync, sync_style) = if state.loading {
        ("loading", Style::default().fg(theme.warning))
    } else {
        ("idle", Style::default().fg(theme.dim))
    };

    let line = Line::from(vec![
        Span::styled("Sheet", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.endpoint)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(sync, sync_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_hint_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = match state.focus {
        Focus::Table => &[
            ("r", "reload"),
            ("a", "add"),
            ("↑↓", "scroll"),
            ("←→", "slice"),
            ("q", "quit"),
        ],
        Focus::Form => &[
            ("Tab", "next"),
            ("Enter", "save"),
            ("←→", "type"),
            ("Esc", "back"),
            ("Ctrl+C", "quit"),
        ],
    };

    let mut parts = Vec::with_capacity(hints.len() * 3);
    for (index, (key, label)) in hints.iter().enumerate() {
        if index > 0 {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(*key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(format!(" {label}")));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
