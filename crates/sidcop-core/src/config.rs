//! # Label Configuration
//!
//! Per-deployment settings for label generation.
//!
//! Coordinates are NOT configurable: they are constants of the label layout
//! in [`crate::layout`]. What varies between deployments is wording, the
//! currency, the wrap heuristic and the local clock.
//!
//! ## Configuration File Format
//! ```toml
//! # label.toml
//! [label]
//! chars_per_line = 18
//! company_fallback = "SIDCOP"
//! currency_symbol = "L"
//! currency_name = "Lempiras"
//! legal_phrase = "Son:"
//! promo_message = "¡Gracias por su compra!"
//! utc_offset_minutes = -360
//! ```
//!
//! Loading the file and applying environment overrides happens in the CLI
//! crate; this crate only defines the shape and the defaults.

use serde::{Deserialize, Serialize};

use crate::layout::DEFAULT_CHARS_PER_LINE;

/// Settings consumed by [`crate::label::LabelBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Characters that fit on one row of the description column.
    #[serde(default = "default_chars_per_line")]
    pub chars_per_line: u32,

    /// Printed when the invoice carries no company name.
    #[serde(default = "default_company_fallback")]
    pub company_fallback: String,

    /// Prefix for every amount (`L95.00`).
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Suffix of the amount-in-words line.
    #[serde(default = "default_currency_name")]
    pub currency_name: String,

    /// Prefix of the amount-in-words line.
    #[serde(default = "default_legal_phrase")]
    pub legal_phrase: String,

    /// Last line of the label.
    #[serde(default = "default_promo_message")]
    pub promo_message: String,

    /// Local offset from UTC used for "now" and for offset-carrying dates.
    /// Honduras is UTC-6 all year.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_chars_per_line() -> u32 {
    DEFAULT_CHARS_PER_LINE
}

fn default_company_fallback() -> String {
    "SIDCOP".to_string()
}

fn default_currency_symbol() -> String {
    "L".to_string()
}

fn default_currency_name() -> String {
    "Lempiras".to_string()
}

fn default_legal_phrase() -> String {
    "Son:".to_string()
}

fn default_promo_message() -> String {
    "¡Gracias por su compra!".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    -360
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            chars_per_line: default_chars_per_line(),
            company_fallback: default_company_fallback(),
            currency_symbol: default_currency_symbol(),
            currency_name: default_currency_name(),
            legal_phrase: default_legal_phrase(),
            promo_message: default_promo_message(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LabelConfig::default();
        assert_eq!(config.chars_per_line, 18);
        assert_eq!(config.company_fallback, "SIDCOP");
        assert_eq!(config.utc_offset_minutes, -360);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LabelConfig = toml::from_str("chars_per_line = 22").unwrap();
        assert_eq!(config.chars_per_line, 22);
        assert_eq!(config.currency_name, "Lempiras");
    }
}
