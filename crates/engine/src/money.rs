use std::{
    fmt,
    ops::{Add, Sub},
};

/// Signed money amount in **millionths** of the major unit.
///
/// The sheet stores plain decimals. They are kept at six decimal places so
/// sums stay exact; rounding to cents happens only when the value is shown.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(1_234_56);
/// assert_eq!(amount.micros(), 1_234_560_000);
/// assert_eq!(amount.to_string(), "1234.56");
/// assert_eq!(amount.format_grouped(), "1,234.56");
///
/// let tenth_of_a_cent = Money::from_major(0.001).unwrap();
/// assert_eq!(tenth_of_a_cent.to_string(), "0.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

const MICROS_PER_UNIT: i64 = 1_000_000;
const MICROS_PER_CENT: i64 = 10_000;

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents * MICROS_PER_CENT)
    }

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Converts a major-unit decimal (`12.5`) to millionths, rounding half
    /// away from zero.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit.
    #[must_use]
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let micros = (value * MICROS_PER_UNIT as f64).round();
        if micros.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(micros as i64))
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Whole cents, rounded half away from zero. Only for display.
    #[must_use]
    pub const fn rounded_cents(self) -> i64 {
        let whole = self.0 / MICROS_PER_CENT;
        let rest = self.0 % MICROS_PER_CENT;
        if rest * 2 >= MICROS_PER_CENT {
            whole + 1
        } else if rest * 2 <= -MICROS_PER_CENT {
            whole - 1
        } else {
            whole
        }
    }

    /// Returns the value in major units, for drawing.
    #[must_use]
    pub fn as_major(self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Sign, whole units and the two-digit cents part after rounding.
    fn display_parts(self) -> (&'static str, u64, u64) {
        let cents = self.rounded_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        (sign, abs / 100, abs % 100)
    }

    /// Two decimals with `,` thousands separators: `-1,234,567.89`.
    #[must_use]
    pub fn format_grouped(self) -> String {
        let (sign, units, cents) = self.display_parts();
        let units = units.to_string();

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("{sign}{grouped}.{cents:02}")
    }
}

/// Two fixed decimals, no grouping: `-1234.56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, units, cents) = self.display_parts();
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
        assert_eq!(Money::new(123_456_789).to_string(), "1234567.89");
    }

    #[test]
    fn grouped_inserts_thousands_separators() {
        assert_eq!(Money::new(0).format_grouped(), "0.00");
        assert_eq!(Money::new(99_999).format_grouped(), "999.99");
        assert_eq!(Money::new(100_000).format_grouped(), "1,000.00");
        assert_eq!(Money::new(123_456_789).format_grouped(), "1,234,567.89");
        assert_eq!(Money::new(-12_345_600).format_grouped(), "-123,456.00");
    }

    #[test]
    fn from_major_keeps_sub_cent_precision() {
        assert_eq!(Money::from_major(10.0), Some(Money::new(1000)));
        assert_eq!(Money::from_major(0.125), Some(Money::from_micros(125_000)));
        assert_eq!(Money::from_major(1.005), Some(Money::from_micros(1_005_000)));
        assert_eq!(Money::from_major(-2.5), Some(Money::new(-250)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
        assert_eq!(Money::from_major(1e300), None);
    }

    #[test]
    fn display_rounds_half_away_from_zero() {
        assert_eq!(Money::from_micros(1_005_000).to_string(), "1.01");
        assert_eq!(Money::from_micros(1_004_999).to_string(), "1.00");
        assert_eq!(Money::from_micros(-1_005_000).to_string(), "-1.01");
        assert_eq!(Money::from_micros(-4_000).to_string(), "0.00");
        assert_eq!(Money::from_micros(999_995_000).format_grouped(), "1,000.00");
    }
}
