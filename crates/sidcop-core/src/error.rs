//! # Error Types
//!
//! Domain-specific error types for sidcop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sidcop-core errors (this file)                                        │
//! │  ├── CoreError        - Amount parsing, config rejection               │
//! │  └── ValidationError  - Audit findings, config rule violations         │
//! │                                                                         │
//! │  sidcop-label errors (CLI crate)                                       │
//! │  └── CliError         - I/O, JSON, TOML, arguments                     │
//! │                                                                         │
//! │  Label generation itself has NO error type: it degrades, never fails   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to an operator-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors raised at the edges of the crate.
///
/// The generator never returns these. They come from parsing amounts that
/// callers supply as text, and from rejecting a [`crate::LabelConfig`]
/// (as `Validation`).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - `"abc".parse::<Money>()`
    /// - More than two decimal places (`"1.999"`)
    /// - Amount beyond the `i64` cent range
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Validation findings.
///
/// For invoices these are informational: the audit reports them and the
/// label is still printed with fallbacks. For configuration they are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two values that should agree do not.
    #[error("{field} is {actual}, expected {expected}")]
    Inconsistent {
        field: String,
        expected: String,
        actual: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
