use std::{
    fmt,
    ops::{Add, AddAssign, Sub},
};

use serde_json::Value;

use crate::Money;

/// A sheet amount after numeric coercion.
///
/// Coercion never fails outright: a cell that is not a number becomes
/// [`Amount::Invalid`], and `Invalid` is absorbing under addition and
/// subtraction, so one bad row turns the total it lands in into `NaN`
/// instead of silently dropping out of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Amount {
    Value(Money),
    Invalid,
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Amount {
    pub const ZERO: Amount = Amount::Value(Money::ZERO);

    /// Coerces a raw JSON cell.
    ///
    /// | cell                 | result            |
    /// |----------------------|-------------------|
    /// | missing              | `Invalid`         |
    /// | `null`               | `0`               |
    /// | `true` / `false`     | `1` / `0`         |
    /// | number               | the number        |
    /// | string               | see [`Amount::parse_text`] |
    /// | `[]`                 | `0`               |
    /// | one-element array    | its element, read as text |
    /// | longer array, object | `Invalid`         |
    ///
    /// Infinite values have no representation and come out `Invalid`, so an
    /// `Infinity` cell shows as `NaN` rather than `Infinity`.
    pub fn coerce(raw: Option<&Value>) -> Self {
        match raw {
            None => Self::Invalid,
            Some(Value::Null) => Self::ZERO,
            Some(Value::Bool(b)) => Self::Value(Money::new(if *b { 100 } else { 0 })),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Invalid, Self::from_number),
            Some(Value::String(s)) => Self::parse_text(s),
            Some(Value::Array(items)) => Self::coerce_array(items),
            Some(Value::Object(_)) => Self::Invalid,
        }
    }

    /// An array converts through its comma-joined text, so only `[]` and
    /// single elements that read as numbers survive.
    fn coerce_array(items: &[Value]) -> Self {
        match items {
            [] | [Value::Null] => Self::ZERO,
            [Value::Number(n)] => n.as_f64().map_or(Self::Invalid, Self::from_number),
            [Value::String(s)] => Self::parse_text(s),
            [Value::Array(inner)] => Self::coerce_array(inner),
            _ => Self::Invalid,
        }
    }

    /// Whole-string numeric parse: surrounding whitespace is ignored, a blank
    /// string is `0`, anything else must be a complete decimal literal or an
    /// unsigned `0x`/`0o`/`0b` integer.
    pub fn parse_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::ZERO;
        }
        if let Some(value) = parse_radix_literal(trimmed) {
            return value.map_or(Self::Invalid, |n| Self::from_number(n as f64));
        }
        // `f64::from_str` also takes `inf` and `nan`; both end up `Invalid`.
        trimmed
            .parse::<f64>()
            .map_or(Self::Invalid, Self::from_number)
    }

    pub fn from_number(value: f64) -> Self {
        Money::from_major(value).map_or(Self::Invalid, Self::Value)
    }

    #[must_use]
    pub fn money(self) -> Option<Money> {
        match self {
            Self::Value(money) => Some(money),
            Self::Invalid => None,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Table/tooltip rendering: `1,234.56`, or `NaN`.
    #[must_use]
    pub fn format_grouped(self) -> String {
        match self {
            Self::Value(money) => money.format_grouped(),
            Self::Invalid => "NaN".to_string(),
        }
    }
}

/// `Some` when `text` carries a radix prefix; the inner `None` marks bad digits.
fn parse_radix_literal(text: &str) -> Option<Option<i64>> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.starts_with(['+', '-']) {
        return Some(None);
    }
    Some(i64::from_str_radix(digits, radix).ok())
}

/// Totals rendering: `1234.56`, or `NaN`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(money) => fmt::Display::fmt(money, f),
            Self::Invalid => f.write_str("NaN"),
        }
    }
}

impl From<Money> for Amount {
    fn from(value: Money) -> Self {
        Self::Value(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        match (self, rhs) {
            (Self::Value(a), Self::Value(b)) => a.checked_add(b).map_or(Self::Invalid, Self::Value),
            _ => Self::Invalid,
        }
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        match (self, rhs) {
            (Self::Value(a), Self::Value(b)) => a.checked_sub(b).map_or(Self::Invalid, Self::Value),
            _ => Self::Invalid,
        }
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, amount| acc + amount)
    }
}
