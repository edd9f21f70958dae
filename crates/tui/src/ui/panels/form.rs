use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Focus, form::FormField},
    ui::{components::card::Card, theme::Theme},
};

const LABEL_WIDTH: usize = 12;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Form;
    let mut card = Card::new("Add transaction", theme).focused(focused);
    if state.saving {
        card = card.badge("saving…");
    }
    let inner = card.render_frame(frame, area);

    let form = &state.form;
    let lines: Vec<Line<'_>> = FormField::ALL
        .iter()
        .map(|&field| {
            let active = focused && form.focus == field;
            let label_style = if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let mut value = form.value(field).to_string();
            if field == FormField::Type {
                value = format!("< {value} >");
            } else if active {
                value.push('▏');
            }

            Line::from(vec![
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
