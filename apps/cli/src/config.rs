//! # Configuration
//!
//! Display and settlement settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BILLSPLIT_*`, e.g. `BILLSPLIT_CURRENCY_CODE`)
//! 2. Config file (`--config <path>`, `BILLSPLIT_CONFIG`, or the platform
//!    config dir, e.g. `~/.config/billsplit/config.toml`)
//! 3. Defaults (this file): Indian rupees
//!
//! ## Example `config.toml`
//! ```toml
//! currency_code = "USD"
//! currency_symbol = "$"
//! digit_grouping = "western"
//! payment_note = "Dinner at Luigi's"
//! ```

use std::path::{Path, PathBuf};

use billsplit_core::currency::{CurrencyFormat, DigitGrouping};
use billsplit_core::settlement::{SettlementOptions, DEFAULT_PAYMENT_NOTE};
use billsplit_core::Money;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BILLSPLIT_CONFIG";

/// Prefix for per-key environment overrides.
const ENV_PREFIX: &str = "BILLSPLIT";

/// Most currencies use 2; none in practice use more than 4.
const MAX_DECIMALS: u32 = 4;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// ISO 4217 code, also sent in payment requests.
    pub currency_code: String,

    /// Symbol shown before amounts.
    pub currency_symbol: String,

    /// Fractional digits shown.
    pub currency_decimals: u32,

    pub digit_grouping: DigitGrouping,

    /// Transaction note on UPI requests.
    pub payment_note: String,

    /// Shares below this are not chased for payment.
    pub min_payable: Decimal,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            digit_grouping: DigitGrouping::Indian,
            payment_note: DEFAULT_PAYMENT_NOTE.to_string(),
            min_payable: Decimal::new(1, 2),
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file and the
    /// environment.
    ///
    /// An explicitly named file must exist; the platform default may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;

        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        match explicit {
            Some(path) => {
                debug!(path = %path.display(), "Using config file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    debug!(path = %path.display(), "Checking default config file");
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        finish(builder)
    }

    /// Loads configuration from TOML text layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        finish(builder)
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let code = self.currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                key: "currency_code",
                reason: "must be a 3-letter ISO 4217 code".to_string(),
            });
        }

        if self.currency_decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: "currency_decimals",
                reason: format!("must be at most {}", MAX_DECIMALS),
            });
        }

        if self.min_payable.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                key: "min_payable",
                reason: "must not be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Display settings for the core formatter.
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            code: self.currency_code.trim().to_uppercase(),
            symbol: self.currency_symbol.clone(),
            decimals: self.currency_decimals,
            grouping: self.digit_grouping,
        }
    }

    /// Settlement rules for the core settlement builder.
    pub fn settlement_options(&self) -> SettlementOptions {
        SettlementOptions {
            currency: self.currency_code.trim().to_uppercase(),
            note: self.payment_note.clone(),
            min_payable: Money::new(self.min_payable),
        }
    }
}

/// Platform config file location.
///
/// - **Linux**: `~/.config/billsplit/config.toml`
/// - **macOS**: `~/Library/Application Support/com.billsplit.billsplit/config.toml`
/// - **Windows**: `%APPDATA%\billsplit\billsplit\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "billsplit", "billsplit")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let d = AppConfig::default();
    Ok(Config::builder()
        .set_default("currency_code", d.currency_code)?
        .set_default("currency_symbol", d.currency_symbol)?
        .set_default("currency_decimals", i64::from(d.currency_decimals))?
        .set_default("digit_grouping", "indian")?
        .set_default("payment_note", d.payment_note)?
        .set_default("min_payable", d.min_payable.to_string())?)
}

fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.currency_format(), CurrencyFormat::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            currency_code = "usd"
            currency_symbol = "$"
            digit_grouping = "western"
            min_payable = "0.50"
            "#,
        )
        .unwrap();

        let format = config.currency_format();
        assert_eq!(format.code, "USD");
        assert_eq!(format.grouping, DigitGrouping::Western);
        assert_eq!(format.format(Money::from_major(1234)), "$1,234.00");
        assert_eq!(
            config.settlement_options().min_payable,
            "0.5".parse().unwrap()
        );
        // Untouched keys keep their defaults
        assert_eq!(config.payment_note, DEFAULT_PAYMENT_NOTE);
    }

    #[test]
    fn test_invalid_currency_code() {
        let err = AppConfig::from_toml_str(r#"currency_code = "RUPEE""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "currency_code",
                ..
            }
        ));
    }

    #[test]
    fn test_too_many_decimals() {
        let err = AppConfig::from_toml_str("currency_decimals = 9").unwrap_err();
        assert!(err.to_string().contains("currency_decimals"));
    }

    #[test]
    fn test_negative_min_payable() {
        let err = AppConfig::from_toml_str(r#"min_payable = "-1""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "min_payable", .. }));
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = std::env::temp_dir().join(format!("billsplit-env-{}.toml", std::process::id()));
        std::fs::write(&path, "currency_code = \"USD\"\npayment_note = \"From file\"\n").unwrap();

        // Only this test loads with these keys set
        std::env::set_var("BILLSPLIT_PAYMENT_NOTE", "Team lunch");
        std::env::set_var("BILLSPLIT_CURRENCY_SYMBOL", "US$");
        let loaded = AppConfig::load(Some(&path));
        std::env::remove_var("BILLSPLIT_PAYMENT_NOTE");
        std::env::remove_var("BILLSPLIT_CURRENCY_SYMBOL");
        std::fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.payment_note, "Team lunch");
        assert_eq!(config.currency_symbol, "US$");
        assert_eq!(config.settlement_options().note, "Team lunch");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here/billsplit.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
