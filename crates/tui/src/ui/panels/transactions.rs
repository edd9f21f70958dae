use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, Focus},
    ui::{
        components::{card::Card, money::amount_color},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let view = &state.view;
    let inner = Card::new("Transactions", theme)
        .badge(view.rows.len().to_string())
        .focused(state.focus == Focus::Table)
        .render_frame(frame, area);

    if view.rows.is_empty() {
        let text = if state.loading {
            "Loading…"
        } else {
            "No transactions."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(theme.dim),
            ))),
            inner,
        );
        return;
    }

    let header = Row::new(["Date", "Type", "Category", "Description", "Amount"])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));

    let symbol = view.currency_symbol();
    let rows = view.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.date.as_str()),
            Cell::from(row.kind.as_str()),
            Cell::from(row.category.as_str()),
            Cell::from(row.description.as_str()),
            Cell::from(
                Line::from(format!("{symbol}{}", row.amount.format_grouped()))
                    .right_aligned(),
            )
            .style(Style::default().fg(amount_color(row.amount, theme))),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Percentage(25),
            Constraint::Min(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .style(Style::default().fg(theme.text))
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(view.selected));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
