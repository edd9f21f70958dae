//! The expense pie chart instance.
//!
//! An [`ExpenseChart`] is built once with its labels and values and is then
//! updated in place: callers replace the label and data arrays and call
//! [`ExpenseChart::update`]. [`PieChart`](super::pie::PieChart) draws whatever
//! the instance currently holds.

use std::sync::atomic::{AtomicU64, Ordering};

use engine::Amount;
use ratatui::style::Color;

/// Slice colors, applied by slice index and wrapping after the tenth category.
pub const PALETTE: [Color; 10] = [
    Color::Rgb(37, 99, 235),
    Color::Rgb(34, 197, 94),
    Color::Rgb(239, 68, 68),
    Color::Rgb(245, 158, 11),
    Color::Rgb(139, 92, 246),
    Color::Rgb(16, 185, 129),
    Color::Rgb(217, 70, 239),
    Color::Rgb(14, 165, 233),
    Color::Rgb(249, 115, 22),
    Color::Rgb(99, 102, 241),
];

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(u64);

/// One drawable wedge: `[start, end)` as fractions of the full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub color: Color,
}

#[derive(Debug)]
pub struct ExpenseChart {
    id: ChartId,
    labels: Vec<String>,
    values: Vec<Amount>,
    currency_symbol: String,
    revision: u64,
}

impl ExpenseChart {
    pub fn new(labels: Vec<String>, values: Vec<Amount>, currency_symbol: &str) -> Self {
        let id = ChartId(NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(chart = id.0, slices = labels.len(), "expense chart created");
        Self {
            id,
            labels,
            values,
            currency_symbol: currency_symbol.to_string(),
            revision: 1,
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }

    pub fn labels_mut(&mut self) -> &mut Vec<String> {
        &mut self.labels
    }

    pub fn values_mut(&mut self) -> &mut Vec<Amount> {
        &mut self.values
    }

    /// Marks the current arrays as the ones to draw.
    pub fn update(&mut self) {
        self.revision += 1;
        tracing::trace!(chart = self.id.0, revision = self.revision, "expense chart updated");
    }

    /// Number of times the chart has been (re)drawn from fresh data.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn color(index: usize) -> Color {
        PALETTE[index % PALETTE.len()]
    }

    /// Hover text for one slice: `Food: $1,234.50`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index).copied().unwrap_or(Amount::Invalid);
        Some(format!(
            "{label}: {}{}",
            self.currency_symbol,
            value.format_grouped()
        ))
    }

    /// Wedges for the positive, valid values. Zero, negative and `NaN` values
    /// keep their legend entry but take no room in the pie.
    pub fn slices(&self) -> Vec<Slice> {
        let weights: Vec<f64> = self
            .values
            .iter()
            .map(|value| match value.money() {
                Some(money) if money.is_positive() => money.as_major(),
                _ => 0.0,
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut slices = Vec::new();
        let mut start = 0.0;
        for (index, weight) in weights.into_iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let end = start + weight / total;
            slices.push(Slice {
                index,
                start,
                end,
                color: Self::color(index),
            });
            start = end;
        }
        if let Some(last) = slices.last_mut() {
            last.end = 1.0;
        }
        slices
    }
}

#[cfg(test)]
mod tests {
    use engine::Money;

    use super::*;

    fn cents(value: i64) -> Amount {
        Amount::Value(Money::new(value))
    }

    #[test]
    fn every_instance_has_its_own_id() {
        let a = ExpenseChart::new(Vec::new(), Vec::new(), "$");
        let b = ExpenseChart::new(Vec::new(), Vec::new(), "$");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn palette_wraps_after_ten() {
        assert_eq!(ExpenseChart::color(0), PALETTE[0]);
        assert_eq!(ExpenseChart::color(10), PALETTE[0]);
        assert_eq!(ExpenseChart::color(13), PALETTE[3]);
    }

    #[test]
    fn tooltip_shows_grouped_amount() {
        let chart = ExpenseChart::new(vec!["Rent".to_string()], vec![cents(123_450)], "$");
        assert_eq!(chart.tooltip(0).as_deref(), Some("Rent: $1,234.50"));
        assert_eq!(chart.tooltip(1), None);
    }

    #[test]
    fn slices_cover_the_turn_and_skip_unusable_values() {
        let chart = ExpenseChart::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![cents(300), cents(0), Amount::Invalid, cents(100)],
            "$",
        );

        let slices = chart.slices();

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].index, 0);
        assert!((slices[0].end - 0.75).abs() < 1e-9);
        assert_eq!(slices[1].index, 3);
        assert_eq!(slices[1].color, PALETTE[3]);
        assert_eq!(slices[1].end, 1.0);
    }

    #[test]
    fn update_bumps_revision_in_place() {
        let mut chart = ExpenseChart::new(vec!["A".into()], vec![cents(1)], "$");
        let id = chart.id();

        *chart.labels_mut() = vec!["B".into()];
        *chart.values_mut() = vec![cents(2)];
        chart.update();

        assert_eq!(chart.id(), id);
        assert_eq!(chart.revision(), 2);
        assert_eq!(chart.labels(), ["B".to_string()]);
    }
}
