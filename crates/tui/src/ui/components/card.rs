use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::ui::theme::Theme;

/// Rounded, titled panel. Every section of the dashboard sits in one.
///
/// An optional badge follows the title, e.g. the row count of the table or
/// `saving…` on the form while a submission is in flight.
pub struct Card<'a> {
    title: &'a str,
    badge: Option<String>,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            badge: None,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    fn title_line(&self) -> Line<'static> {
        let mut title_style = Style::default().fg(self.theme.accent);
        if self.focused {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![Span::styled(format!(" {} ", self.title), title_style)];
        if let Some(badge) = &self.badge {
            spans.push(Span::styled(
                format!("[{badge}] "),
                Style::default().fg(self.theme.dim),
            ));
        }
        Line::from(spans)
    }

    /// Draws the frame and returns the area left inside it.
    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let block = Block::default()
            .title(self.title_line())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}
