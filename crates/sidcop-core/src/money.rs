//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The invoice API sends amounts as JSON numbers:                         │
//! │    1234.56 * 100 = 123455.99999999999  ❌ "con 55/100" on paper!        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Round ONCE at the JSON boundary, then every split into               │
//! │    lempiras + centavos is exact integer math                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sidcop_core::money::Money;
//!
//! let price = Money::from_cents(2000); // L20.00
//! let parsed: Money = "1,234.56".parse().unwrap();
//! assert_eq!(parsed.cents(), 123456);
//! assert_eq!((price + parsed).cents(), 125456);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (1/100 of a lempira).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde as decimal number**: The API speaks `95.0`, not `9500`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  InvoiceLine.unit_price ──► "Precio" column                            │
/// │  InvoiceLine.subtotal ────► "Total" column                             │
/// │                                                                         │
/// │  InvoiceTotals.* ─────────► totals block (8 rows)                      │
/// │  InvoiceTotals.total ─────► "Total: L95.00" + words line               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use sidcop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents L10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (lempiras and centavos).
    ///
    /// ## Example
    /// ```rust
    /// use sidcop_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // L10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -L5.50 (credit)
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -L5.50, not -L4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount received from JSON, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities, and values outside the `i64` cent range.
    /// This is the ONLY place a float becomes money.
    ///
    /// ## Example
    /// ```rust
    /// use sidcop_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(1234.56), Some(Money::from_cents(123456)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (lempiras) portion.
    ///
    /// ## Example
    /// ```rust
    /// use sidcop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value. `i64::MIN` cents saturates to `i64::MAX`.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies money by a (possibly fractional) quantity, rounding to the cent.
    ///
    /// Quantities on invoices can be fractional (1.5 kg), so this takes `f64`
    /// and rounds the product once. A non-finite quantity yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use sidcop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2000); // L20.00
    /// assert_eq!(unit_price.multiply_quantity(3.0).cents(), 6000);
    /// assert_eq!(unit_price.multiply_quantity(1.5).cents(), 3000);
    /// ```
    pub fn multiply_quantity(&self, qty: f64) -> Self {
        let cents = (self.0 as f64 * qty).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Money::zero();
        }
        Money(cents as i64)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses amounts the way operators and the API write them.
///
/// Accepts an optional sign, `,` thousands separators, and at most two
/// decimals: `"95"`, `"95.5"`, `"1,234.56"`, `"-5.50"`.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidAmount(s.to_string());

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits.as_str(), ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid());
        }
        if minor_str.len() > 2
            || !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_str.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(n) => Money::from_decimal(n)
                .ok_or_else(|| serde::de::Error::custom("amount out of range")),
            RawAmount::Text(s) => s.parse().map_err(serde::de::Error::custom),
            RawAmount::Other(_) => Err(serde::de::Error::custom("expected a number or string")),
        }
    }
}

/// Wire shapes an amount can take in API payloads.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// `deserialize_with` helper for `Option<Money>` fields.
///
/// Anything that is not a usable amount becomes `None` instead of failing the
/// whole invoice. The label then prints zero for that row.
pub mod lenient {
    use super::{Money, RawAmount};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        let raw = Option::<RawAmount>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawAmount::Number(n)) => Money::from_decimal(n),
            Some(RawAmount::Text(s)) => s.parse().ok(),
            Some(RawAmount::Other(_)) | None => None,
        })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`95.00`, `-5.50`).
///
/// ## Note
/// This is for logs. Printed amounts go through
/// [`crate::format::format_currency`], which adds the symbol and grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` cent bounds. Amounts come from untrusted JSON and
/// label generation must not panic on them.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_once() {
        // 1234.56 * 100 is 123455.99999999999 in binary floating point
        assert_eq!(Money::from_decimal(1234.56), Some(Money::from_cents(123456)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(1e300), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("95".parse::<Money>().unwrap().cents(), 9500);
        assert_eq!("95.5".parse::<Money>().unwrap().cents(), 9550);
        assert_eq!(" 1,234.56 ".parse::<Money>().unwrap().cents(), 123456);
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);

        let huge = Money::from_cents(9_000_000_000_000_000_000);
        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total, max);

        assert_eq!(min.abs(), max);
        assert_eq!(Money::from_cents(-550).abs().cents(), 550);
    }

    #[test]
    fn test_from_decimal_near_bounds() {
        // 2^63 cents does not fit in i64
        assert_eq!(Money::from_decimal(92_233_720_368_547_758.08), None);
        assert_eq!(
            Money::from_decimal(-92_233_720_368_547_758.08),
            Some(Money::from_cents(i64::MIN))
        );
        assert_eq!(Money::from_decimal(1e17), None);
        assert_eq!(
            Money::from_decimal(900_000_000_000_000.0),
            Some(Money::from_cents(90_000_000_000_000_000))
        );
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2.0), Money::zero());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3.0).cents(), 897);
        assert_eq!(unit_price.multiply_quantity(0.5).cents(), 150);
        assert_eq!(unit_price.multiply_quantity(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("95.0").unwrap();
        assert_eq!(from_number.cents(), 9500);

        let from_int: Money = serde_json::from_str("35").unwrap();
        assert_eq!(from_int.cents(), 3500);

        let from_text: Money = serde_json::from_str("\"1,234.56\"").unwrap();
        assert_eq!(from_text.cents(), 123456);

        assert!(serde_json::from_str::<Money>("true").is_err());
        assert_eq!(serde_json::to_string(&Money::from_cents(9500)).unwrap(), "95.0");
    }

    #[test]
    fn test_lenient_option() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "lenient::deserialize")]
            amount: Option<Money>,
        }

        let parse = |json: &str| serde_json::from_str::<Row>(json).unwrap().amount;

        assert_eq!(parse(r#"{"amount": 12.5}"#), Some(Money::from_cents(1250)));
        assert_eq!(parse(r#"{"amount": "12.50"}"#), Some(Money::from_cents(1250)));
        assert_eq!(parse(r#"{"amount": null}"#), None);
        assert_eq!(parse(r#"{"amount": "n/a"}"#), None);
        assert_eq!(parse(r#"{"amount": {"value": 1}}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}
