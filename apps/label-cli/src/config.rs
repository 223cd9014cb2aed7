//! # CLI Configuration
//!
//! Loads the [`LabelConfig`] used for this run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SIDCOP_CURRENCY_NAME=Lempiras                                      │
//! │     SIDCOP_CHARS_PER_LINE=20                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/label/label.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.sidcop.label/label.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     18 chars/line, "L", "Lempiras", UTC-6                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # label.toml
//! [label]
//! company_fallback = "Distribuidora SIDCOP"
//! promo_message = "¡Vuelva pronto!"
//! chars_per_line = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sidcop_core::validation::validate_label_config;
use sidcop_core::{CoreError, LabelConfig};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_CHARS_PER_LINE: &str = "SIDCOP_CHARS_PER_LINE";
pub const ENV_COMPANY_NAME: &str = "SIDCOP_COMPANY_NAME";
pub const ENV_CURRENCY_SYMBOL: &str = "SIDCOP_CURRENCY_SYMBOL";
pub const ENV_CURRENCY_NAME: &str = "SIDCOP_CURRENCY_NAME";
pub const ENV_PROMO_MESSAGE: &str = "SIDCOP_PROMO_MESSAGE";
pub const ENV_UTC_OFFSET_MINUTES: &str = "SIDCOP_UTC_OFFSET_MINUTES";

/// Contents of `label.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub label: LabelConfig,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist and parse. The platform default
    /// file is optional: when it is missing, unreadable or malformed the
    /// defaults are used. Environment overrides and validation apply in
    /// both cases and their errors are always returned.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (label.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// [`CliConfig::load`] with an injectable environment.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_layers(config_path, Self::default_config_path(), env)
    }

    fn load_layers<F>(
        config_path: Option<PathBuf>,
        default_path: Option<PathBuf>,
        env: F,
    ) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::read_file(&path)?,
            None => match default_path {
                Some(path) if path.exists() => Self::read_file(&path).unwrap_or_else(|e| {
                    warn!(?path, error = %e, "Ignoring unusable default label config");
                    Self::default()
                }),
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => {
                    debug!("No config directory on this platform, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading label config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks the label settings against the printer's limits.
    pub fn validate(&self) -> CliResult<()> {
        validate_label_config(&self.label).map_err(CoreError::from)?;
        Ok(())
    }

    /// Applies `SIDCOP_*` overrides.
    ///
    /// Numeric values that do not parse are rejected rather than ignored:
    /// a half-applied override prints a wrong label.
    pub fn apply_overrides<F>(&mut self, env: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let label = &mut self.label;

        if let Some(value) = env(ENV_CHARS_PER_LINE) {
            label.chars_per_line = parse_number(ENV_CHARS_PER_LINE, &value)?;
            debug!(chars_per_line = label.chars_per_line, "Overriding chars per line from environment");
        }

        if let Some(value) = env(ENV_UTC_OFFSET_MINUTES) {
            label.utc_offset_minutes = parse_number(ENV_UTC_OFFSET_MINUTES, &value)?;
            debug!(utc_offset_minutes = label.utc_offset_minutes, "Overriding UTC offset from environment");
        }

        if let Some(name) = env(ENV_COMPANY_NAME) {
            debug!(company = %name, "Overriding company fallback from environment");
            label.company_fallback = name;
        }

        if let Some(symbol) = env(ENV_CURRENCY_SYMBOL) {
            label.currency_symbol = symbol;
        }

        if let Some(name) = env(ENV_CURRENCY_NAME) {
            label.currency_name = name;
        }

        if let Some(message) = env(ENV_PROMO_MESSAGE) {
            label.promo_message = message;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sidcop", "label")
            .map(|dirs| dirs.config_dir().join("label.toml"))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> CliResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidConfig(format!("{} must be a number, got '{}'", key, value)))
}
