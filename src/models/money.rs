//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. The backend stores amounts as decimal numbers, so the [`decimal`]
//! serde helper converts at the wire boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Default currency prefix used by `Display`
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a decimal value, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 cent range.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal value (for the wire format)
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "10,50", "-10.50", "$10.50", "10" and "1,234.50".
    /// A lone comma is a decimal separator; when both `.` and `,` appear the
    /// commas are thousands separators. More than two decimal places is an
    /// error.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let parsed = ParsedAmount::read(s)?;
        if parsed.fraction_digits > 2 {
            return Err(MoneyParseError::TooManyDecimals(s.trim().to_string()));
        }
        Ok(parsed.value())
    }

    /// Parse like [`Money::parse`], rounding sub-cent input up to the next cent
    pub fn parse_ceil(s: &str) -> Result<Self, MoneyParseError> {
        let parsed = ParsedAmount::read(s)?;
        let value = parsed.value();
        Ok(if parsed.has_remainder && !parsed.negative {
            Self(value.0.saturating_add(1))
        } else {
            value
        })
    }

    /// Parse like [`Money::parse`], rounding sub-cent input down to the cent
    pub fn parse_floor(s: &str) -> Result<Self, MoneyParseError> {
        let parsed = ParsedAmount::read(s)?;
        let value = parsed.value();
        Ok(if parsed.has_remainder && parsed.negative {
            Self(value.0.saturating_sub(1))
        } else {
            value
        })
    }

    /// Format with a currency symbol, two decimals and grouped thousands
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let abs = self.0.unsigned_abs();
        let units = group_thousands(abs / 100);
        let cents = abs % 100;
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, units, cents)
        } else {
            format!("{}{}.{:02}", symbol, units, cents)
        }
    }
}

/// User input split into sign, whole cents and what lies past the cent
struct ParsedAmount {
    negative: bool,
    cents: i64,
    fraction_digits: usize,
    has_remainder: bool,
}

impl ParsedAmount {
    fn read(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };
        let rest = rest.strip_prefix(DEFAULT_CURRENCY_SYMBOL).unwrap_or(rest);

        let normalized = if rest.contains('.') && rest.contains(',') {
            rest.replace(',', "")
        } else {
            rest.replace(',', ".")
        };

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let (kept, remainder) = fraction.split_at(fraction.len().min(2));
        let fraction_cents: i64 = match kept.len() {
            0 => 0,
            1 => kept.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => kept.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self {
            negative,
            cents,
            fraction_digits: fraction.len(),
            has_remainder: remainder.bytes().any(|b| b != b'0'),
        })
    }

    /// Signed value with the digits past the cent dropped
    fn value(&self) -> Money {
        Money(if self.negative { -self.cents } else { self.cents })
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    TooManyDecimals(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooManyDecimals(s) => {
                write!(f, "At most two decimal places allowed: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// Serde adapter storing `Money` as a decimal number (`12.5`)
///
/// The backend's numeric column may also come back as a string (`"12.50"`),
/// which is accepted on read.
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Number(value) => Money::from_decimal(value)
                .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", value))),
            Wire::Text(text) => Money::parse(&text).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(1234.5), Some(Money::from_cents(123450)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(123450).to_string(), "$1,234.50");
        assert_eq!(Money::from_cents(100000000).to_string(), "$1,000,000.00");
        assert_eq!(Money::from_cents(99999).to_string(), "$999.99");
        assert_eq!(Money::from_cents(-123456789).to_string(), "-$1,234,567.89");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(123450).format_with_symbol("€"), "€1,234.50");
        assert_eq!(Money::from_cents(-5).format_with_symbol("R$ "), "-R$ 0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 10);
        assert_eq!(huge + Money::from_cents(100), Money::from_cents(i64::MAX));

        let mut running = huge;
        running += huge;
        assert_eq!(running.cents(), i64::MAX);

        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
    }

    #[test]
    fn test_parse_rejects_sub_cent_input() {
        assert_eq!(
            Money::parse("0.001"),
            Err(MoneyParseError::TooManyDecimals("0.001".into()))
        );
        assert!(matches!(
            Money::parse("14,999"),
            Err(MoneyParseError::TooManyDecimals(_))
        ));
    }

    #[test]
    fn test_parse_rounding() {
        assert_eq!(Money::parse_ceil("14.999").unwrap().cents(), 1500);
        assert_eq!(Money::parse_floor("14.999").unwrap().cents(), 1499);
        assert_eq!(Money::parse_ceil("14.990").unwrap().cents(), 1499);
        assert_eq!(Money::parse_floor("14.99").unwrap().cents(), 1499);
        assert_eq!(Money::parse_ceil("-1.005").unwrap().cents(), -100);
        assert_eq!(Money::parse_floor("-1.005").unwrap().cents(), -101);
        assert!(Money::parse_ceil("abc").is_err());
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(Money::parse("4,50").unwrap().cents(), 450);
        assert_eq!(Money::parse("4.50").unwrap().cents(), 450);
        assert_eq!(Money::parse("1,234.50").unwrap().cents(), 123450);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("+5").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, Money::from_cents(1000));
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        #[serde(with = "decimal")]
        amount: Money,
    }

    #[test]
    fn test_decimal_wire_format() {
        let row = Row {
            amount: Money::from_cents(1250),
        };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"amount":12.5}"#);

        let from_number: Row = serde_json::from_str(r#"{"amount":12.5}"#).unwrap();
        assert_eq!(from_number, row);

        let from_text: Row = serde_json::from_str(r#"{"amount":"12.50"}"#).unwrap();
        assert_eq!(from_text, row);
    }
}
