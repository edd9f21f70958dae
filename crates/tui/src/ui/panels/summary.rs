use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::styled_total},
        theme::Theme,
    },
};

/// Income, expense and balance side by side.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let totals = &state.view.totals;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let cards = [
        ("Income", &totals.income, totals.totals.income),
        ("Expense", &totals.expense, totals.totals.expense),
        ("Balance", &totals.balance, totals.totals.balance),
    ];
    for ((title, text, amount), column) in cards.into_iter().zip(columns.iter()) {
        let inner = Card::new(title, theme).render_frame(frame, *column);
        frame.render_widget(
            Paragraph::new(styled_total(text, amount, theme)).alignment(Alignment::Center),
            inner,
        );
    }
}
