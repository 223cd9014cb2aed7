//! # Field Formatters
//!
//! Date, time, currency and quantity rendering for es-HN labels.
//!
//! Every function here is total: `None`, empty strings and garbage input
//! produce a deterministic fallback instead of an error. Date fallbacks use
//! the `now` the caller passes in, so output is reproducible under test.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sidcop_core::format::{format_currency, format_date};
//! use sidcop_core::Money;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! assert_eq!(format_date(Some("not a date"), now, -360), "14/03/2026");
//! assert_eq!(format_currency(Money::from_cents(123456), "L"), "L1,234.56");
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

use crate::money::Money;

// =============================================================================
// Get-With-Default
// =============================================================================

/// Returns the trimmed value, or `fallback` when it is missing or blank.
///
/// This is the one helper every text read in the label goes through.
#[inline]
pub fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

// =============================================================================
// Dates & Times
// =============================================================================

/// Naive layouts the API has been seen to send.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a timestamp into local wall-clock time.
///
/// Offset-carrying timestamps (`...Z`, `...-06:00`) are shifted to
/// `utc_offset_minutes`. Naive timestamps are taken as already local.
/// Date-only inputs land at midnight.
pub fn parse_timestamp(input: &str, utc_offset_minutes: i32) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        let local = local_offset(utc_offset_minutes);
        return Some(with_offset.with_timezone(&local).naive_local());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Current wall-clock time at the given offset from UTC.
pub fn local_now(utc_offset_minutes: i32) -> NaiveDateTime {
    Utc::now()
        .with_timezone(&local_offset(utc_offset_minutes))
        .naive_local()
}

/// Offset for the given minutes, falling back to UTC when out of range.
fn local_offset(utc_offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

fn resolve(input: Option<&str>, now: NaiveDateTime, utc_offset_minutes: i32) -> NaiveDateTime {
    input
        .and_then(|s| parse_timestamp(s, utc_offset_minutes))
        .unwrap_or(now)
}

/// `DD/MM/YYYY`, falling back to `now` when the input is absent or malformed.
pub fn format_date(input: Option<&str>, now: NaiveDateTime, utc_offset_minutes: i32) -> String {
    resolve(input, now, utc_offset_minutes)
        .format("%d/%m/%Y")
        .to_string()
}

/// `hh:mm AM`/`hh:mm PM`, falling back to `now`.
pub fn format_time(input: Option<&str>, now: NaiveDateTime, utc_offset_minutes: i32) -> String {
    resolve(input, now, utc_offset_minutes)
        .format("%I:%M %p")
        .to_string()
}

/// `DD/MM/YYYY` when the input parses, otherwise the fallback text.
///
/// Used for the emission deadline, where printing "today" would be a lie.
pub fn format_date_or(input: Option<&str>, fallback: &str, utc_offset_minutes: i32) -> String {
    input
        .and_then(|s| parse_timestamp(s, utc_offset_minutes))
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| fallback.to_string())
}

// =============================================================================
// Currency & Quantity
// =============================================================================

/// es-HN currency: symbol, `,` thousands, `.` decimals, two places.
///
/// ## Example
/// ```rust
/// use sidcop_core::{format::format_currency, Money};
///
/// assert_eq!(format_currency(Money::from_cents(9500), "L"), "L95.00");
/// assert_eq!(format_currency(Money::from_cents(-550), "L"), "-L5.50");
/// assert_eq!(format_currency(Money::from_cents(123456789), "L"), "L1,234,567.89");
/// ```
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let major = group_thousands(amount.dollars().unsigned_abs());
    format!("{}{}{}.{:02}", sign, symbol, major, amount.cents_part())
}

/// Quantity column: `3`, `1.50`, and `0` for missing or non-finite input.
pub fn format_quantity(quantity: Option<f64>) -> String {
    match quantity {
        // -0.0 would otherwise print as "-0"
        Some(q) if q == 0.0 => "0".to_string(),
        Some(q) if q.is_finite() => {
            if q.fract() == 0.0 {
                format!("{:.0}", q)
            } else {
                format!("{:.2}", q)
            }
        }
        _ => "0".to_string(),
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HN: i32 = -360;

    fn frozen_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(15, 45, 0)
            .unwrap()
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(Some("SIDCOP S.A."), "X"), "SIDCOP S.A.");
        assert_eq!(text_or(Some("  padded  "), "X"), "padded");
        assert_eq!(text_or(Some("   "), "X"), "X");
        assert_eq!(text_or(None, "X"), "X");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2026-01-05T08:15:00", HN), Some(expected));
        assert_eq!(parse_timestamp("2026-01-05T08:15:00.123", HN).map(|d| d.date()), Some(expected.date()));
        assert_eq!(parse_timestamp("2026-01-05 08:15:00", HN), Some(expected));
        // 14:15 UTC is 08:15 in Tegucigalpa
        assert_eq!(parse_timestamp("2026-01-05T14:15:00Z", HN), Some(expected));
        assert_eq!(parse_timestamp("2026-01-05T08:15:00-06:00", HN), Some(expected));
        assert_eq!(
            parse_timestamp("05/01/2026", HN),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("", HN), None);
        assert_eq!(parse_timestamp("yesterday", HN), None);
        assert_eq!(parse_timestamp("2026-13-45", HN), None);
    }

    #[test]
    fn test_date_time_fallback_to_now() {
        let now = frozen_now();
        assert_eq!(format_date(None, now, HN), "14/03/2026");
        assert_eq!(format_date(Some("garbage"), now, HN), "14/03/2026");
        assert_eq!(format_time(None, now, HN), "03:45 PM");
        assert_eq!(format_time(Some(""), now, HN), "03:45 PM");

        assert_eq!(format_date(Some("2025-12-31T23:59:00"), now, HN), "31/12/2025");
        assert_eq!(format_time(Some("2025-12-31T09:05:00"), now, HN), "09:05 AM");
    }

    #[test]
    fn test_format_date_or() {
        assert_eq!(format_date_or(Some("2026-12-31"), "N/A", HN), "31/12/2026");
        assert_eq!(format_date_or(Some("pronto"), "N/A", HN), "N/A");
        assert_eq!(format_date_or(None, "N/A", HN), "N/A");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::zero(), "L"), "L0.00");
        assert_eq!(format_currency(Money::from_cents(9500), "L"), "L95.00");
        assert_eq!(format_currency(Money::from_cents(100000), "L"), "L1,000.00");
        assert_eq!(format_currency(Money::from_cents(-123456), "L"), "-L1,234.56");
        assert_eq!(format_currency(Money::from_cents(5), "$"), "$0.05");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Some(3.0)), "3");
        assert_eq!(format_quantity(Some(1.5)), "1.50");
        assert_eq!(format_quantity(Some(f64::NAN)), "0");
        assert_eq!(format_quantity(None), "0");
    }

    #[test]
    fn test_format_quantity_beyond_integer_range() {
        assert_eq!(format_quantity(Some(1e20)), "100000000000000000000");
        assert_eq!(format_quantity(Some(-2.0)), "-2");
        assert_eq!(format_quantity(Some(-0.0)), "0");
    }
}
