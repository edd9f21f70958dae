use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::{components::chart::ExpenseChart, theme::Theme};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const LEGEND_MIN_WIDTH: u16 = 12;
const LEGEND_MAX_WIDTH: u16 = 28;

/// Draws an [`ExpenseChart`]: the pie on the left, the legend on the right.
///
/// Slices run clockwise from twelve o'clock in category order.
pub struct PieChart<'a> {
    chart: &'a ExpenseChart,
    highlighted: Option<usize>,
    theme: &'a Theme,
}

impl<'a> PieChart<'a> {
    pub fn new(chart: &'a ExpenseChart, theme: &'a Theme) -> Self {
        Self {
            chart,
            highlighted: None,
            theme,
        }
    }

    /// Emphasize one slice (the tooltip target) in the legend.
    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    fn legend_width(&self, area: Rect) -> u16 {
        let widest = self
            .chart
            .labels()
            .iter()
            .map(|label| label.chars().count() as u16 + 2)
            .max()
            .unwrap_or(0);
        widest
            .clamp(LEGEND_MIN_WIDTH, LEGEND_MAX_WIDTH)
            .min(area.width / 2)
    }

    fn render_pie(&self, area: Rect, buf: &mut Buffer) {
        let slices = self.chart.slices();
        if slices.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let center_x = f64::from(area.width) / 2.0;
        let center_y = f64::from(area.height) / 2.0;
        let radius = center_y.min(center_x / CELL_ASPECT);

        for row in 0..area.height {
            for col in 0..area.width {
                let dx = (f64::from(col) + 0.5 - center_x) / CELL_ASPECT;
                let dy = f64::from(row) + 0.5 - center_y;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }

                // 0 at twelve o'clock, growing clockwise.
                let turn = dx.atan2(-dy).rem_euclid(TAU) / TAU;
                let Some(slice) = slices.iter().find(|s| turn >= s.start && turn < s.end) else {
                    continue;
                };

                let mut style = Style::default().fg(slice.color);
                if self.highlighted.is_some_and(|h| h != slice.index) {
                    style = style.add_modifier(Modifier::DIM);
                }
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("█").set_style(style);
                }
            }
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line<'_>> = self
            .chart
            .labels()
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let mut text_style = Style::default().fg(self.theme.text);
                if self.highlighted == Some(index) {
                    text_style = text_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(ExpenseChart::color(index))),
                    Span::styled(label.as_str(), text_style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

impl Widget for PieChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.chart.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No expenses yet.",
                Style::default().fg(self.theme.dim),
            )))
            .render(area, buf);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(self.legend_width(area)),
            ])
            .split(area);

        self.render_pie(layout[0], buf);
        self.render_legend(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use engine::{Amount, Money};

    use super::*;
    use crate::ui::components::chart::PALETTE;

    #[test]
    fn single_slice_fills_the_pie_with_first_color() {
        let chart = ExpenseChart::new(
            vec!["Food".into()],
            vec![Amount::Value(Money::new(500))],
            "$",
        );
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);

        PieChart::new(&chart, &theme).render(area, &mut buf);

        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "█")
            .count();
        assert!(painted > 0);
        assert!(
            buf.content()
                .iter()
                .filter(|cell| cell.symbol() == "█")
                .all(|cell| cell.fg == PALETTE[0])
        );
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let chart = ExpenseChart::new(Vec::new(), Vec::new(), "$");
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);

        PieChart::new(&chart, &theme).render(area, &mut buf);

        let first_row: String = (0..16u16)
            .map(|x| buf[(x, 0u16)].symbol().to_string())
            .collect();
        assert_eq!(first_row, "No expenses yet.");
    }
}
