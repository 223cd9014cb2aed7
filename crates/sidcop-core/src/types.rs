//! # Domain Types
//!
//! The invoice record the label generator consumes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        InvoiceDocument                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CompanyInfo    │   │AuthorizationInfo│   │  CustomerInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, address  │   │  cai            │   │  id, name       │       │
//! │  │  tax_id (RTN)   │   │  range_start/end│   │  tax_id (RTN)   │       │
//! │  │  phones, email  │   │  deadline       │   │  phone, address │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │ InvoiceTotals   │   │  items: Vec<InvoiceLine> (input order)  │     │
//! │  │  subtotal, ISV  │   │  description, code, quantity,           │     │
//! │  │  exempt, total  │   │  unit_price, subtotal                   │     │
//! │  └─────────────────┘   └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Everything Is Optional
//! The API that resolves invoices is not trusted to be complete. Every scalar
//! is an `Option` and every nested record has `#[serde(default)]`, so `{}` is
//! a valid (if very plain) invoice. The label builder supplies a fallback at
//! each read site.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Company
// =============================================================================

/// The issuing company, printed in the label header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    /// RTN of the issuer.
    pub tax_id: Option<String>,
    pub phones: Vec<String>,
    pub email: Option<String>,
    /// Logo used by the PDF report. Thermal labels print a fixed graphic.
    pub logo_url: Option<String>,
}

// =============================================================================
// Fiscal Authorization
// =============================================================================

/// Print authorization (CAI) data required on every Honduran invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorizationInfo {
    pub cai: Option<String>,
    /// First invoice number of the authorized range.
    pub range_start: Option<String>,
    /// Last invoice number of the authorized range.
    pub range_end: Option<String>,
    /// Emission deadline ("fecha límite de emisión").
    pub deadline: Option<String>,
    pub authorized_by: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    /// Exact delivery/billing address.
    pub address: Option<String>,
}

// =============================================================================
// Totals
// =============================================================================

/// Monetary totals, already computed by the API.
///
/// The generator prints these as given. It does not recompute taxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceTotals {
    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub subtotal: Option<Money>,

    /// ISV at 15%.
    #[serde(rename = "tax15", deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub tax_15: Option<Money>,

    /// ISV at 18%.
    #[serde(rename = "tax18", deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub tax_18: Option<Money>,

    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub exempt: Option<Money>,

    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub exonerated: Option<Money>,

    /// Base taxed at 15%.
    #[serde(rename = "taxed15", deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub taxed_15: Option<Money>,

    /// Base taxed at 18%.
    #[serde(rename = "taxed18", deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub taxed_18: Option<Money>,

    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub discount: Option<Money>,

    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub total: Option<Money>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub description: Option<String>,

    /// Barcode or product code, printed under the description when present.
    pub code: Option<String>,

    /// Fractional quantities are allowed (weighed goods).
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: Option<f64>,

    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub unit_price: Option<Money>,

    /// Line subtotal. When absent the builder uses `unit_price × quantity`.
    #[serde(deserialize_with = "money::lenient::deserialize")]
    #[ts(type = "number | null")]
    pub subtotal: Option<Money>,
}

impl InvoiceLine {
    /// Convenience constructor for a plain line without a code.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: Money) -> Self {
        InvoiceLine {
            description: Some(description.into()),
            code: None,
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            subtotal: Some(unit_price.multiply_quantity(quantity)),
        }
    }

    /// Sets the secondary code line.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the line subtotal, falling back to `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        match self.subtotal {
            Some(subtotal) => subtotal,
            None => self
                .unit_price
                .unwrap_or_default()
                .multiply_quantity(self.quantity.unwrap_or(0.0)),
        }
    }
}

// =============================================================================
// Invoice Document
// =============================================================================

/// A fully resolved, denormalized invoice.
///
/// ## Example
/// ```rust
/// use sidcop_core::InvoiceDocument;
///
/// let invoice = InvoiceDocument::from_json(r#"{"number": "000-001-01-00000042"}"#).unwrap();
/// assert_eq!(invoice.number.as_deref(), Some("000-001-01-00000042"));
/// assert!(invoice.items.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceDocument {
    pub company: CompanyInfo,

    /// Invoice number (e.g. `000-001-01-00000042`).
    pub number: Option<String>,

    /// Document type label (e.g. "FACTURA").
    pub document_type: Option<String>,

    /// Sale type label (e.g. "CONTADO", "CRÉDITO").
    pub sale_type: Option<String>,

    /// Issue timestamp as sent by the API.
    pub issue_date: Option<String>,

    pub authorization: AuthorizationInfo,
    pub customer: CustomerInfo,

    /// Seller display name.
    pub seller: Option<String>,

    /// Branch display name.
    pub branch: Option<String>,

    pub totals: InvoiceTotals,

    /// Line items in print order.
    pub items: Vec<InvoiceLine>,
}

impl InvoiceDocument {
    /// Parses an invoice from the API's JSON shape.
    ///
    /// Only structurally broken JSON fails. Wrong-typed amounts become `None`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Accepts `3`, `1.5`, `"3"`, or `null`; anything else is treated as absent.
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawQuantity>::deserialize(deserializer)? {
        Some(RawQuantity::Number(n)) if n.is_finite() => Some(n),
        Some(RawQuantity::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_valid_invoice() {
        let invoice = InvoiceDocument::from_json("{}").unwrap();
        assert_eq!(invoice, InvoiceDocument::default());
    }

    #[test]
    fn test_nulls_are_accepted() {
        let invoice = InvoiceDocument::from_json(
            r#"{"company": {"name": null, "phones": []}, "totals": {"total": null}, "items": []}"#,
        )
        .unwrap();
        assert!(invoice.company.name.is_none());
        assert!(invoice.totals.total.is_none());
    }

    #[test]
    fn test_api_shape() {
        let json = r#"{
            "company": {"name": "Distribuidora X", "taxId": "08011999000001", "phones": ["2222-0000"]},
            "number": "000-001-01-00000042",
            "issueDate": "2026-03-14T09:30:00",
            "authorization": {"cai": "ABC-123", "rangeStart": "000-001-01-00000001"},
            "customer": {"name": "Pulpería Lupita", "taxId": "08019000123456"},
            "totals": {"subtotal": 95.0, "tax15": "0.00", "taxed15": 0, "total": 95},
            "items": [
                {"description": "Coca Cola 600ml", "code": "7501055300", "quantity": 3, "unitPrice": 20.0, "subtotal": 60.0},
                {"description": "Pan Blanco", "quantity": "1", "unitPrice": "35.00"}
            ]
        }"#;

        let invoice = InvoiceDocument::from_json(json).unwrap();
        assert_eq!(invoice.company.tax_id.as_deref(), Some("08011999000001"));
        assert_eq!(invoice.authorization.cai.as_deref(), Some("ABC-123"));
        assert_eq!(invoice.totals.total, Some(Money::from_cents(9500)));
        assert_eq!(invoice.totals.tax_15, Some(Money::zero()));
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[1].quantity, Some(1.0));
        assert_eq!(invoice.items[1].line_total(), Money::from_cents(3500));
    }

    #[test]
    fn test_bad_amounts_degrade_to_none() {
        let invoice = InvoiceDocument::from_json(
            r#"{"totals": {"total": "noventa"}, "items": [{"quantity": "tres", "unitPrice": true}]}"#,
        )
        .unwrap();
        assert!(invoice.totals.total.is_none());
        assert!(invoice.items[0].quantity.is_none());
        assert!(invoice.items[0].unit_price.is_none());
        assert_eq!(invoice.items[0].line_total(), Money::zero());
    }

    #[test]
    fn test_line_total_prefers_subtotal() {
        let mut line = InvoiceLine::new("Pan Blanco", 2.0, Money::from_cents(3500));
        assert_eq!(line.line_total(), Money::from_cents(7000));

        line.subtotal = Some(Money::from_cents(6500));
        assert_eq!(line.line_total(), Money::from_cents(6500));
    }
}
