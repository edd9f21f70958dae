use engine::Amount;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Color for an amount: green above zero, red below, error color for `NaN`.
pub fn amount_color(amount: Amount, theme: &Theme) -> ratatui::style::Color {
    match amount.money() {
        Some(money) if money.is_positive() => theme.positive,
        Some(money) if money.is_negative() => theme.negative,
        Some(_) => theme.text,
        None => theme.error,
    }
}

/// A total as shown in the summary bar, e.g. `Balance: $50.00`, colored by sign.
#[must_use]
pub fn styled_total(text: &str, amount: Amount, theme: &Theme) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(amount_color(amount, theme))
            .add_modifier(Modifier::BOLD),
    )
}
