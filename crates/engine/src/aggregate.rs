//! Sheet rows → table rows, totals and the expense-by-category breakdown.

use std::collections::HashMap;

use api_types::transaction::TransactionRecord;

use crate::{Amount, DateConvention, FlowDirection};

/// Bucket for expenses whose category cell is blank or missing.
pub const UNCATEGORIZED: &str = "Other";

/// One table row. Text cells are shown as the sheet holds them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub date: String,
    /// Raw `type` cell.
    pub kind: String,
    pub direction: FlowDirection,
    /// Raw `category` cell; unlike the breakdown, a blank stays blank here.
    pub category: String,
    pub description: String,
    pub amount: Amount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Amount,
    pub expense: Amount,
    /// Always `income - expense`.
    pub balance: Amount,
    /// Rows whose amount could not be read as a number.
    pub invalid_amounts: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub label: String,
    pub amount: Amount,
}

/// Expense sums per category, in the order each category was first seen.
///
/// The order is what the chart draws slices and assigns colors by.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn add(&mut self, label: &str, amount: Amount) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].amount += amount,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    label: label.to_string(),
                    amount,
                });
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<Amount> {
        self.index.get(label).map(|&i| self.entries[i].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|entry| entry.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<Amount> {
        self.iter().map(|entry| entry.amount).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over every category.
    pub fn total(&self) -> Amount {
        self.iter().map(|entry| entry.amount).sum()
    }
}

/// Everything derived from one load. Rebuilt from scratch every time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub rows: Vec<DisplayRow>,
    pub totals: Totals,
    pub categories: CategoryBreakdown,
}

/// Folds the sheet rows, in order, into an [`Aggregate`].
///
/// Amounts are taken as magnitudes: the `type` cell alone decides whether a
/// row counts toward income or expense. Only expenses feed the breakdown.
pub fn aggregate(records: &[TransactionRecord], convention: DateConvention) -> Aggregate {
    let mut rows = Vec::with_capacity(records.len());
    let mut income = Amount::ZERO;
    let mut expense = Amount::ZERO;
    let mut invalid_amounts = 0;
    let mut categories = CategoryBreakdown::default();

    for record in records {
        let amount = Amount::coerce(record.amount.as_ref());
        if !amount.is_valid() {
            invalid_amounts += 1;
        }

        let direction = FlowDirection::classify(record.kind.as_deref());
        match direction {
            FlowDirection::Income => income += amount,
            FlowDirection::Expense => {
                expense += amount;
                let label = record
                    .category
                    .as_deref()
                    .filter(|category| !category.is_empty())
                    .unwrap_or(UNCATEGORIZED);
                categories.add(label, amount);
            }
        }

        rows.push(DisplayRow {
            date: convention.display_date(record.date.as_deref(), record.timestamp.as_deref()),
            kind: record.kind.clone().unwrap_or_default(),
            direction,
            category: record.category.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            amount,
        });
    }

    Aggregate {
        rows,
        totals: Totals {
            income,
            expense,
            balance: income - expense,
            invalid_amounts,
        },
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Money;

    #[test]
    fn breakdown_keeps_first_seen_order() {
        let mut breakdown = CategoryBreakdown::default();
        breakdown.add("Rent", Amount::Value(Money::new(100)));
        breakdown.add("Food", Amount::Value(Money::new(20)));
        breakdown.add("Rent", Amount::Value(Money::new(5)));

        assert_eq!(breakdown.labels(), vec!["Rent", "Food"]);
        assert_eq!(
            breakdown.values(),
            vec![Amount::Value(Money::new(105)), Amount::Value(Money::new(20))]
        );
        assert_eq!(breakdown.total(), Amount::Value(Money::new(125)));
        assert_eq!(breakdown.get("Travel"), None);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let result = aggregate(&[], DateConvention::Utc);

        assert!(result.rows.is_empty());
        assert!(result.categories.is_empty());
        assert_eq!(result.totals.income, Amount::ZERO);
        assert_eq!(result.totals.expense, Amount::ZERO);
        assert_eq!(result.totals.balance, Amount::ZERO);
    }
}
