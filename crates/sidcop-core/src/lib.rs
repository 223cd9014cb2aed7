//! # sidcop-core: Invoice Label Generation for SIDCOP
//!
//! This crate turns a sales invoice into ZPL markup for a 72 mm thermal
//! label printer. Everything here is a pure function of its inputs: no file,
//! network or printer access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SIDCOP Label Pipeline                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 sidcop-label (CLI)                              │   │
//! │  │    config file + env ──► JSON invoice ──► ZPL to stdout/file    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sidcop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   words   │  │  layout   │  │   label   │  │   │
//! │  │   │  Invoice  │  │ "noventa  │  │  cursor   │  │  builder  │  │   │
//! │  │   │   Money   │  │ y cinco"  │  │ estimator │  │    zpl    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PRINTER • DETERMINISTIC FOR A GIVEN `now`        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Invoice document (company, authorization, customer, items, totals)
//! - [`money`] - Money type with integer arithmetic and lenient parsing
//! - [`format`] - Dates, currency and quantity as printed
//! - [`words`] - Spanish amount-in-words
//! - [`layout`] - Coordinates, line estimator, vertical cursor
//! - [`zpl`] - ZPL command builder and field escaping
//! - [`label`] - The label builder itself
//! - [`validation`] - Invoice audit and config checks
//! - [`config`] - Per-deployment wording and currency
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Never refuse to print**: missing data becomes a placeholder, not an error
//! 2. **Integer Money**: all amounts are cents (i64)
//! 3. **Monotonic layout**: the Y cursor only moves down, and the declared
//!    label length covers every field
//! 4. **Explicit Errors**: where something can fail, the error is typed
//!
//! ## Example Usage
//!
//! ```rust
//! use sidcop_core::{generate_label_markup, InvoiceDocument};
//!
//! let invoice = InvoiceDocument::from_json(r#"{
//!     "number": "000-001-01-00000042",
//!     "items": [{ "description": "Coca Cola 600ml", "quantity": 3, "unitPrice": 20 }],
//!     "totals": { "total": 60 }
//! }"#).unwrap();
//!
//! let zpl = generate_label_markup(&invoice);
//! assert!(zpl.contains("Total: L60.00"));
//! assert!(zpl.contains("Son: sesenta Lempiras"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod format;
pub mod label;
pub mod layout;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;
pub mod zpl;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::LabelConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use label::{generate_label_markup, LabelBuilder, LabelMarkup};
pub use layout::estimate_lines;
pub use money::Money;
pub use types::*;
pub use words::to_words;
