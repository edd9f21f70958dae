use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::view::{StatusLevel, StatusMessage},
    ui::theme::Theme,
};

/// Single-line status slot under the form.
pub fn render(frame: &mut Frame<'_>, area: Rect, status: Option<&StatusMessage>, theme: &Theme) {
    let Some(status) = status else {
        return;
    };

    let (icon, color) = match status.level {
        StatusLevel::Pending => ("⏳", theme.warning),
        StatusLevel::Success => ("✅", theme.positive),
        StatusLevel::Error => ("❌", theme.error),
    };

    let line = Line::from(vec![
        Span::raw(format!("{icon} ")),
        Span::styled(status.text.as_str(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
