use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, pie::PieChart},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let inner = Card::new("Expenses by category", theme).render_frame(frame, area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let Some(chart) = state.view.chart.chart() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Waiting for data…",
                Style::default().fg(theme.dim),
            ))),
            layout[0],
        );
        return;
    };

    frame.render_widget(
        PieChart::new(chart, theme).highlighted(state.view.tooltip),
        layout[0],
    );

    if let Some(tooltip) = state.view.tooltip_text() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                tooltip,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ))),
            layout[1],
        );
    }
}
