//! # Validation Module
//!
//! Invoice audit and configuration checks.
//!
//! ## Two Very Different Strictness Levels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Invoice data (audit_invoice)                                          │
//! │  ├── Reports missing/odd fields as findings                            │
//! │  └── NEVER blocks printing: the label degrades to fallbacks            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Label builder logs findings (tracing) and prints anyway               │
//! │                                                                         │
//! │  Deployment config (validate_label_config)                             │
//! │  └── Fatal: a bad config is rejected before any label is built         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sidcop_core::validation::{audit_invoice, validate_label_config};
//! use sidcop_core::{InvoiceDocument, LabelConfig};
//!
//! let findings = audit_invoice(&InvoiceDocument::default(), -360);
//! assert!(!findings.is_empty()); // every required field is missing
//!
//! assert!(validate_label_config(&LabelConfig::default()).is_ok());
//! ```

use crate::config::LabelConfig;
use crate::error::ValidationError;
use crate::format::{parse_timestamp, text_or};
use crate::money::Money;
use crate::types::InvoiceDocument;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Widest description column the printer can hold at the smallest font.
pub const MAX_CHARS_PER_LINE: u32 = 80;

/// UTC-14:00 .. UTC+14:00.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

// =============================================================================
// Invoice Audit
// =============================================================================

/// Lists every field the label will have to replace with a fallback, plus
/// totals that do not add up.
///
/// ## Findings
/// - `number`, `authorization.cai`, `customer.name`, `totals.total`,
///   `issue_date` missing
/// - `issue_date` present but unparseable
/// - negative item quantity or unit price
/// - total different from `Σ line totals − discount + ISV 15% + ISV 18%`
///   (only checked when both the total and at least one item exist)
pub fn audit_invoice(invoice: &InvoiceDocument, utc_offset_minutes: i32) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let required = [
        ("number", invoice.number.as_deref()),
        ("authorization.cai", invoice.authorization.cai.as_deref()),
        ("customer.name", invoice.customer.name.as_deref()),
    ];
    for (field, value) in required {
        if text_or(value, "").is_empty() {
            findings.push(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    match invoice.issue_date.as_deref() {
        Some(raw) if parse_timestamp(raw, utc_offset_minutes).is_none() => {
            findings.push(ValidationError::InvalidFormat {
                field: "issue_date".to_string(),
                reason: format!("unrecognized date '{}'", raw),
            });
        }
        Some(_) => {}
        None => findings.push(ValidationError::Required {
            field: "issue_date".to_string(),
        }),
    }

    for (index, item) in invoice.items.iter().enumerate() {
        if item.quantity.is_some_and(|q| q < 0.0) {
            findings.push(ValidationError::MustBePositive {
                field: format!("items[{}].quantity", index),
            });
        }
        if item.unit_price.is_some_and(|p| p.is_negative()) {
            findings.push(ValidationError::MustBePositive {
                field: format!("items[{}].unit_price", index),
            });
        }
    }

    let totals = &invoice.totals;
    match totals.total {
        None => findings.push(ValidationError::Required {
            field: "totals.total".to_string(),
        }),
        Some(total) if !invoice.items.is_empty() => {
            let lines: Money = invoice.items.iter().map(|item| item.line_total()).sum();
            let expected = lines - totals.discount.unwrap_or_default()
                + totals.tax_15.unwrap_or_default()
                + totals.tax_18.unwrap_or_default();
            if expected != total {
                findings.push(ValidationError::Inconsistent {
                    field: "totals.total".to_string(),
                    expected: expected.to_string(),
                    actual: total.to_string(),
                });
            }
        }
        Some(_) => {}
    }

    findings
}

// =============================================================================
// Config Validation
// =============================================================================

/// Rejects configurations that would produce an unreadable label.
///
/// ## Rules
/// - `chars_per_line` in `1..=80`
/// - `currency_symbol` and `currency_name` not blank
/// - `utc_offset_minutes` within ±14 hours
pub fn validate_label_config(config: &LabelConfig) -> ValidationResult<()> {
    if config.chars_per_line == 0 || config.chars_per_line > MAX_CHARS_PER_LINE {
        return Err(ValidationError::OutOfRange {
            field: "chars_per_line".to_string(),
            min: 1,
            max: MAX_CHARS_PER_LINE as i64,
        });
    }

    if config.currency_symbol.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency_symbol".to_string(),
        });
    }

    if config.currency_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency_name".to_string(),
        });
    }

    if config.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(ValidationError::OutOfRange {
            field: "utc_offset_minutes".to_string(),
            min: -(MAX_UTC_OFFSET_MINUTES as i64),
            max: MAX_UTC_OFFSET_MINUTES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceLine;

    fn complete_invoice() -> InvoiceDocument {
        let mut invoice = InvoiceDocument {
            number: Some("000-001-01-00000042".to_string()),
            issue_date: Some("2026-03-14T09:30:00".to_string()),
            items: vec![
                InvoiceLine::new("Coca Cola 600ml", 3.0, Money::from_cents(2000)),
                InvoiceLine::new("Pan Blanco", 1.0, Money::from_cents(3500)),
            ],
            ..InvoiceDocument::default()
        };
        invoice.authorization.cai = Some("ABC-123".to_string());
        invoice.customer.name = Some("Pulpería Lupita".to_string());
        invoice.totals.total = Some(Money::from_cents(9500));
        invoice
    }

    #[test]
    fn test_complete_invoice_has_no_findings() {
        assert!(audit_invoice(&complete_invoice(), -360).is_empty());
    }

    #[test]
    fn test_empty_invoice_reports_required_fields() {
        let findings = audit_invoice(&InvoiceDocument::default(), -360);
        let fields: Vec<String> = findings
            .iter()
            .filter_map(|f| match f {
                ValidationError::Required { field } => Some(field.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            fields,
            vec!["number", "authorization.cai", "customer.name", "issue_date", "totals.total"]
        );
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let mut invoice = complete_invoice();
        invoice.number = Some("   ".to_string());
        let findings = audit_invoice(&invoice, -360);
        assert_eq!(
            findings,
            vec![ValidationError::Required {
                field: "number".to_string()
            }]
        );
    }

    #[test]
    fn test_unparseable_date() {
        let mut invoice = complete_invoice();
        invoice.issue_date = Some("ayer".to_string());
        let findings = audit_invoice(&invoice, -360);
        assert!(matches!(
            &findings[..],
            [ValidationError::InvalidFormat { field, .. }] if field == "issue_date"
        ));
    }

    #[test]
    fn test_negative_item_values() {
        let mut invoice = complete_invoice();
        invoice.items[0].quantity = Some(-1.0);
        invoice.items[1].unit_price = Some(Money::from_cents(-100));
        let findings = audit_invoice(&invoice, -360);
        assert!(findings.contains(&ValidationError::MustBePositive {
            field: "items[0].quantity".to_string()
        }));
        assert!(findings.contains(&ValidationError::MustBePositive {
            field: "items[1].unit_price".to_string()
        }));
    }

    #[test]
    fn test_inconsistent_total() {
        let mut invoice = complete_invoice();
        invoice.totals.total = Some(Money::from_cents(9000));
        let findings = audit_invoice(&invoice, -360);
        assert_eq!(
            findings,
            vec![ValidationError::Inconsistent {
                field: "totals.total".to_string(),
                expected: "95.00".to_string(),
                actual: "90.00".to_string(),
            }]
        );
    }

    #[test]
    fn test_total_accounts_for_discount_and_tax() {
        let mut invoice = complete_invoice();
        invoice.totals.discount = Some(Money::from_cents(500));
        invoice.totals.tax_15 = Some(Money::from_cents(1350));
        invoice.totals.total = Some(Money::from_cents(10350));
        assert!(audit_invoice(&invoice, -360).is_empty());
    }

    #[test]
    fn test_total_check_saturates_on_huge_lines() {
        let mut invoice = complete_invoice();
        let mut line = InvoiceLine::new("Contenedor", 1.0, Money::from_cents(0));
        line.subtotal = Some(Money::from_cents(9_000_000_000_000_000_000));
        invoice.items = vec![line.clone(), line];
        invoice.totals.total = Some(Money::from_cents(100));

        let findings = audit_invoice(&invoice, -360);
        assert_eq!(
            findings,
            vec![ValidationError::Inconsistent {
                field: "totals.total".to_string(),
                expected: Money::from_cents(i64::MAX).to_string(),
                actual: "1.00".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_label_config() {
        assert!(validate_label_config(&LabelConfig::default()).is_ok());

        let zero_width = LabelConfig {
            chars_per_line: 0,
            ..LabelConfig::default()
        };
        assert!(validate_label_config(&zero_width).is_err());

        let blank_currency = LabelConfig {
            currency_name: " ".to_string(),
            ..LabelConfig::default()
        };
        assert_eq!(
            validate_label_config(&blank_currency),
            Err(ValidationError::Required {
                field: "currency_name".to_string()
            })
        );

        let far_offset = LabelConfig {
            utc_offset_minutes: 15 * 60,
            ..LabelConfig::default()
        };
        assert!(validate_label_config(&far_offset).is_err());
    }
}
