//! # Amount in Words
//!
//! Spanish (Honduras) spelling of invoice totals, as required on the legal
//! "Son: ..." line.
//!
//! ## Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  L 1,234.56                                                             │
//! │      │                                                                  │
//! │      ├── integer 1234 ──► thousands = 1 ─────────► "mil"                │
//! │      │                    remainder 234 ─┬─► 200 ► "doscientos"         │
//! │      │                                   └─► 34 ─► "treinta y cuatro"   │
//! │      │                                                                  │
//! │      └── cents 56 ─────────────────────────────► "con 56/100"           │
//! │                                                                         │
//! │  "mil doscientos treinta y cuatro con 56/100"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tens above twenty always compose with " y " ("veinte y uno"), never the
//! contracted "veintiuno". Teens and hundreds are irregular and come from
//! fixed tables.

use crate::money::Money;

const UNITS: [&str; 10] = [
    "", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 10] = [
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
];

const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

const MILLION: u64 = 1_000_000;
const THOUSAND: u64 = 1_000;

/// Spells out an amount: integer part in words, cents as `con NN/100`.
///
/// ## Example
/// ```rust
/// use sidcop_core::{words::to_words, Money};
///
/// assert_eq!(to_words(Money::from_cents(9500)), "noventa y cinco");
/// assert_eq!(to_words(Money::from_cents(123456)), "mil doscientos treinta y cuatro con 56/100");
/// ```
pub fn to_words(amount: Money) -> String {
    let magnitude = amount.cents().unsigned_abs();
    let integer = magnitude / 100;
    let cents = magnitude % 100;

    let mut words = integer_to_words(integer);
    if cents > 0 {
        words.push_str(&format!(" con {:02}/100", cents));
    }
    if amount.is_negative() {
        words.insert_str(0, "menos ");
    }

    words.trim().to_string()
}

/// Integer part only. Recurses once per magnitude group.
fn integer_to_words(n: u64) -> String {
    match n {
        0 => return "cero".to_string(),
        100 => return "cien".to_string(),
        1000 => return "mil".to_string(),
        _ => {}
    }

    let mut out = String::new();
    let mut rest = n;

    if rest >= MILLION {
        let millions = rest / MILLION;
        if millions == 1 {
            out.push_str("un millón ");
        } else {
            out.push_str(&integer_to_words(millions));
            out.push_str(" millones ");
        }
        rest %= MILLION;
    }

    if rest >= THOUSAND {
        let thousands = rest / THOUSAND;
        if thousands == 1 {
            out.push_str("mil ");
        } else {
            out.push_str(&integer_to_words(thousands));
            out.push_str(" mil ");
        }
        rest %= THOUSAND;
    }

    out.push_str(&below_thousand(rest));
    out.trim_end().to_string()
}

/// 0..=999 (0 renders as empty so "mil" stays "mil").
fn below_thousand(n: u64) -> String {
    if n == 100 {
        return "cien".to_string();
    }

    let hundreds = HUNDREDS[(n / 100) as usize];
    let tens = tens_and_units(n % 100);

    match (hundreds.is_empty(), tens.is_empty()) {
        (true, _) => tens,
        (false, true) => hundreds.to_string(),
        (false, false) => format!("{} {}", hundreds, tens),
    }
}

fn tens_and_units(n: u64) -> String {
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} y {}", TENS[n / 10], UNITS[n % 10]),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(lempiras: i64) -> String {
        to_words(Money::from_major_minor(lempiras, 0))
    }

    #[test]
    fn test_base_cases() {
        assert_eq!(words(0), "cero");
        assert_eq!(words(100), "cien");
        assert_eq!(words(1000), "mil");
    }

    #[test]
    fn test_units_and_teens() {
        assert_eq!(words(1), "uno");
        assert_eq!(words(9), "nueve");
        assert_eq!(words(10), "diez");
        assert_eq!(words(15), "quince");
        assert_eq!(words(16), "dieciséis");
        assert_eq!(words(19), "diecinueve");
    }

    #[test]
    fn test_tens_compose_with_y_above_twenty() {
        assert_eq!(words(20), "veinte");
        assert_eq!(words(21), "veinte y uno");
        assert_eq!(words(29), "veinte y nueve");
        assert_eq!(words(30), "treinta");
        assert_eq!(words(32), "treinta y dos");
        assert_eq!(words(95), "noventa y cinco");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(words(101), "ciento uno");
        assert_eq!(words(115), "ciento quince");
        assert_eq!(words(200), "doscientos");
        assert_eq!(words(555), "quinientos cincuenta y cinco");
        assert_eq!(words(999), "novecientos noventa y nueve");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(words(1001), "mil uno");
        assert_eq!(words(1100), "mil cien");
        assert_eq!(words(2000), "dos mil");
        assert_eq!(words(21000), "veinte y uno mil");
        assert_eq!(words(100_000), "cien mil");
        assert_eq!(words(999_999), "novecientos noventa y nueve mil novecientos noventa y nueve");
    }

    #[test]
    fn test_millions() {
        assert_eq!(words(1_000_000), "un millón");
        assert_eq!(words(2_500_000), "dos millones quinientos mil");
        assert_eq!(words(1_000_001), "un millón uno");
    }

    #[test]
    fn test_cents_suffix() {
        assert_eq!(
            to_words(Money::from_cents(123456)),
            "mil doscientos treinta y cuatro con 56/100"
        );
        assert_eq!(to_words(Money::from_cents(10005)), "cien con 05/100");
        assert_eq!(to_words(Money::from_cents(50)), "cero con 50/100");
        assert_eq!(to_words(Money::from_cents(9500)), "noventa y cinco");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(to_words(Money::from_cents(-550)), "menos cinco con 50/100");
    }

    #[test]
    fn test_representable_extremes() {
        // 92,233,720,368,547,758.07
        let largest = to_words(Money::from_cents(i64::MAX));
        assert!(largest.starts_with("noventa y dos mil doscientos treinta y tres millones"));
        assert!(largest.ends_with("setecientos cincuenta y ocho con 07/100"));

        // -92,233,720,368,547,758.08
        let smallest = to_words(Money::from_cents(i64::MIN));
        assert!(smallest.starts_with("menos noventa y dos mil"));
        assert!(smallest.ends_with("setecientos cincuenta y ocho con 08/100"));
    }
}
