/// Direction of a sheet row.
///
/// The sheet's `type` column is free text. Only a case-insensitive `income`
/// counts as income; every other value, including a blank or missing cell, is
/// treated as an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    Income,
    Expense,
}

impl FlowDirection {
    pub fn classify(kind: Option<&str>) -> Self {
        match kind {
            Some(kind) if kind.to_lowercase() == "income" => Self::Income,
            _ => Self::Expense,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The other direction; used by the form's type toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}
