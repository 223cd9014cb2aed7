//! # CLI Error Types
//!
//! Everything that can stop `sidcop-label` before a label is written.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Input       │  │  Configuration  │  │       Arguments         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  ConfigLoad     │  │  InvalidArgument        │ │
//! │  │  Json           │  │  InvalidConfig  │  │  Core (bad --words)     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Label generation itself cannot fail, so nothing here comes from the
//! builder.

use sidcop_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Reading the invoice or writing the label failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The invoice is not valid JSON.
    #[error("Invalid invoice JSON: {0}")]
    Json(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The config file exists but could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoad(String),

    /// The config parsed but its values are unusable.
    #[error("Invalid label configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Argument Errors
    // =========================================================================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoad(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CliError::from(json), CliError::Json(_)));

        let toml = toml::from_str::<toml::Table>("label = ").unwrap_err();
        assert!(matches!(CliError::from(toml), CliError::ConfigLoad(_)));

        let core = CoreError::InvalidAmount("abc".to_string());
        assert_eq!(CliError::from(core).to_string(), "Invalid amount: 'abc'");
    }
}
