//! What the dashboard shows, kept in sync with the last successful load.
//!
//! Every load replaces the table rows and the totals wholesale. The pie chart
//! is the exception: one [`ExpenseChart`] is created on the first render and
//! from then on only has its arrays swapped and `update()` called.

use api_types::transaction::TransactionRecord;
use engine::{CategoryBreakdown, DateConvention, DisplayRow, Totals, aggregate};

use crate::ui::components::chart::ExpenseChart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Holder of the single live chart instance.
///
/// Empty until the first render; afterwards every render mutates the same
/// instance. Only [`ChartSlot::teardown`] empties it again.
#[derive(Debug, Default)]
pub struct ChartSlot {
    chart: Option<ExpenseChart>,
    constructed: usize,
}

impl ChartSlot {
    pub fn sync(&mut self, categories: &CategoryBreakdown, currency_symbol: &str) {
        match self.chart.as_mut() {
            Some(chart) => {
                *chart.labels_mut() = categories.labels();
                *chart.values_mut() = categories.values();
                chart.update();
            }
            None => {
                self.chart = Some(ExpenseChart::new(
                    categories.labels(),
                    categories.values(),
                    currency_symbol,
                ));
                self.constructed += 1;
            }
        }
    }

    pub fn chart(&self) -> Option<&ExpenseChart> {
        self.chart.as_ref()
    }

    /// Instances built over the slot's lifetime.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Drops the live instance, as if the drawing surface went away; the
    /// next render builds a new one.
    pub fn teardown(&mut self) {
        if let Some(chart) = self.chart.take() {
            tracing::debug!(chart = ?chart.id(), "expense chart torn down");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalsView {
    pub totals: Totals,
    pub income: String,
    pub expense: String,
    pub balance: String,
}

#[derive(Debug)]
pub struct ViewState {
    pub rows: Vec<DisplayRow>,
    pub selected: usize,
    pub totals: TotalsView,
    pub chart: ChartSlot,
    /// Slice whose tooltip is showing.
    pub tooltip: Option<usize>,
    pub status: Option<StatusMessage>,
    currency_symbol: String,
    convention: DateConvention,
}

impl ViewState {
    pub fn new(currency_symbol: &str, convention: DateConvention) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            selected: 0,
            totals: TotalsView::default(),
            chart: ChartSlot::default(),
            tooltip: None,
            status: None,
            currency_symbol: currency_symbol.to_string(),
            convention,
        };
        view.render_totals(&Totals::default());
        view
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Aggregates a fresh load and pushes it into table, totals and chart.
    pub fn apply_records(&mut self, records: &[TransactionRecord]) {
        let result = aggregate(records, self.convention);
        if result.totals.invalid_amounts > 0 {
            tracing::warn!(
                rows = result.totals.invalid_amounts,
                "rows with a non-numeric amount; totals will show NaN"
            );
        }

        self.render_table(result.rows);
        self.render_totals(&result.totals);
        self.render_chart(&result.categories);
    }

    pub fn render_table(&mut self, rows: Vec<DisplayRow>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn render_totals(&mut self, totals: &Totals) {
        let symbol = &self.currency_symbol;
        self.totals = TotalsView {
            totals: *totals,
            income: format!("Income: {symbol}{}", totals.income),
            expense: format!("Expense: {symbol}{}", totals.expense),
            balance: format!("Balance: {symbol}{}", totals.balance),
        };
    }

    pub fn render_chart(&mut self, categories: &CategoryBreakdown) {
        self.chart.sync(categories, &self.currency_symbol);
        self.tooltip = match (self.tooltip, categories.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => None,
        };
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.rows.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the tooltip to the next slice, wrapping around.
    pub fn tooltip_next(&mut self) {
        let len = self.chart.chart().map_or(0, ExpenseChart::len);
        if len == 0 {
            return;
        }
        self.tooltip = Some(self.tooltip.map_or(0, |i| (i + 1) % len));
    }

    pub fn tooltip_prev(&mut self) {
        let len = self.chart.chart().map_or(0, ExpenseChart::len);
        if len == 0 {
            return;
        }
        self.tooltip = Some(self.tooltip.map_or(len - 1, |i| (i + len - 1) % len));
    }

    pub fn tooltip_text(&self) -> Option<String> {
        let index = self.tooltip?;
        self.chart.chart()?.tooltip(index)
    }
}

#[cfg(test)]
mod tests {
    use engine::Amount;
    use serde_json::{Value, json};

    use super::*;

    fn records(value: Value) -> Vec<TransactionRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn view() -> ViewState {
        ViewState::new("$", DateConvention::Utc)
    }

    #[test]
    fn first_render_creates_exactly_one_chart() {
        let mut view = view();
        assert!(view.chart.chart().is_none());

        view.apply_records(&records(json!([
            { "type": "expense", "category": "Food", "amount": 10 }
        ])));

        assert_eq!(view.chart.constructed(), 1);
        assert_eq!(view.chart.chart().unwrap().labels(), ["Food".to_string()]);
    }

    #[test]
    fn later_renders_mutate_the_same_instance() {
        let mut view = view();
        view.apply_records(&records(json!([
            { "type": "expense", "category": "Food", "amount": 10 }
        ])));
        let first = view.chart.chart().unwrap();
        let id = first.id();
        let address = first as *const ExpenseChart;

        view.apply_records(&records(json!([
            { "type": "expense", "category": "Rent", "amount": 900 },
            { "type": "expense", "category": "Food", "amount": 15 }
        ])));
        view.apply_records(&records(json!([
            { "type": "expense", "category": "Rent", "amount": 900 },
            { "type": "expense", "category": "Food", "amount": 15 }
        ])));

        let chart = view.chart.chart().unwrap();
        assert_eq!(chart.id(), id);
        assert!(std::ptr::eq(chart, address));
        assert_eq!(chart.revision(), 3);
        assert_eq!(view.chart.constructed(), 1);
        assert_eq!(chart.labels(), ["Rent".to_string(), "Food".to_string()]);
    }

    #[test]
    fn teardown_lets_the_next_render_rebuild() {
        let mut view = view();
        view.render_chart(&CategoryBreakdown::default());
        let id = view.chart.chart().unwrap().id();

        view.chart.teardown();
        view.render_chart(&CategoryBreakdown::default());

        assert_eq!(view.chart.constructed(), 2);
        assert_ne!(view.chart.chart().unwrap().id(), id);
    }

    #[test]
    fn totals_are_fixed_two_decimals_with_symbol() {
        let mut view = view();
        view.apply_records(&records(json!([
            { "type": "Income", "amount": 1234.5, "category": "Salary" },
            { "type": "expense", "amount": 40, "category": "Food" },
            { "type": "Expense", "amount": 10, "category": "Food" }
        ])));

        assert_eq!(view.totals.income, "Income: $1234.50");
        assert_eq!(view.totals.expense, "Expense: $50.00");
        assert_eq!(view.totals.balance, "Balance: $1184.50");
    }

    #[test]
    fn empty_view_shows_zero_totals() {
        let view = view();
        assert_eq!(view.totals.balance, "Balance: $0.00");
        assert!(view.rows.is_empty());
    }

    #[test]
    fn table_is_replaced_and_selection_clamped() {
        let mut view = view();
        view.apply_records(&records(json!([
            { "type": "expense", "amount": 1 },
            { "type": "expense", "amount": 2 },
            { "type": "expense", "amount": 3 }
        ])));
        view.select_next();
        view.select_next();
        assert_eq!(view.selected, 2);

        view.apply_records(&records(json!([
            { "type": "income", "amount": 9 }
        ])));

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.selected, 0);
        assert_eq!(view.rows[0].amount, Amount::Value(engine::Money::new(900)));
    }

    #[test]
    fn tooltip_cycles_over_slices() {
        let mut view = view();
        view.apply_records(&records(json!([
            { "type": "expense", "category": "Food", "amount": 10 },
            { "type": "expense", "category": "Rent", "amount": 1000 }
        ])));

        view.tooltip_next();
        assert_eq!(view.tooltip_text().as_deref(), Some("Food: $10.00"));
        view.tooltip_next();
        assert_eq!(view.tooltip_text().as_deref(), Some("Rent: $1,000.00"));
        view.tooltip_next();
        assert_eq!(view.tooltip, Some(0));
        view.tooltip_prev();
        assert_eq!(view.tooltip, Some(1));
    }
}
