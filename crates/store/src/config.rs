//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BASKET_DATA_DIR` - directory for persisted state (default: `.greenbasket`)
//! - `BASKET_CATALOG` - path to the catalog JSON file (default: `catalog.json`)
//! - `BASKET_TAX_RATE` - checkout tax rate as a decimal fraction (default: `0.07`)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the four persisted record files.
    pub data_dir: PathBuf,
    /// Path to the catalog JSON file.
    pub catalog_path: PathBuf,
    /// Checkout tax rate as a decimal fraction (e.g., `0.07` for 7%).
    ///
    /// An explicit configuration value rather than a literal in checkout
    /// arithmetic.
    pub tax_rate: Decimal,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    /// Every variable has a default, so loading only fails on values that
    /// do not parse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `BASKET_TAX_RATE` is not a
    /// valid decimal.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("BASKET_DATA_DIR", ".greenbasket"));
        let catalog_path = PathBuf::from(get_env_or_default("BASKET_CATALOG", "catalog.json"));
        let tax_rate = get_env_or_default("BASKET_TAX_RATE", "0.07")
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar("BASKET_TAX_RATE".to_string(), e.to_string()))?;

        Ok(Self {
            data_dir,
            catalog_path,
            tax_rate,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".greenbasket"),
            catalog_path: PathBuf::from("catalog.json"),
            tax_rate: Decimal::new(7, 2),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
