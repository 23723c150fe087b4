//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GAMEVERSE_CART_FILE` - Where the cart is persisted (default: `gameverse-cart.json`)
//! - `GAMEVERSE_CATALOG_FILE` - JSON catalog to load instead of the built-in one
//! - `GAMEVERSE_TAX_RATE` - Sales tax as a fraction (default: 0.10)
//! - `GAMEVERSE_CURRENCY` - Display currency: USD, EUR, GBP, CAD or AUD (default: USD)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gameverse_core::{Catalog, CatalogError, CurrencyCode, DEFAULT_TAX_RATE};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_CART_FILE: &str = "gameverse-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read catalog file {0}: {1}")]
    CatalogRead(PathBuf, std::io::Error),
    #[error("Invalid catalog file {0}: {1}")]
    CatalogInvalid(PathBuf, CatalogError),
    #[error("Built-in catalog is invalid: {0}")]
    BuiltinCatalog(CatalogError),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameverseConfig {
    /// File backing the cart's key-value store
    pub cart_file: PathBuf,
    /// Optional catalog override
    pub catalog_file: Option<PathBuf>,
    /// Sales tax rate applied to the subtotal
    pub tax_rate: Decimal,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
}

impl Default for GameverseConfig {
    fn default() -> Self {
        Self {
            cart_file: PathBuf::from(DEFAULT_CART_FILE),
            catalog_file: None,
            tax_rate: DEFAULT_TAX_RATE,
            currency: CurrencyCode::default(),
        }
    }
}

impl GameverseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cart_file = lookup("GAMEVERSE_CART_FILE").map_or(defaults.cart_file, PathBuf::from);
        let catalog_file = lookup("GAMEVERSE_CATALOG_FILE").map(PathBuf::from);

        let tax_rate = match lookup("GAMEVERSE_TAX_RATE") {
            Some(raw) => parse_tax_rate(&raw)?,
            None => defaults.tax_rate,
        };

        let currency = match lookup("GAMEVERSE_CURRENCY") {
            Some(raw) => raw
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("GAMEVERSE_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        Ok(Self {
            cart_file,
            catalog_file,
            tax_rate,
            currency,
        })
    }

    /// Load the configured catalog, falling back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog file cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Arc<Catalog>, ConfigError> {
        let catalog = match &self.catalog_file {
            Some(path) => read_catalog(path)?,
            None => Catalog::builtin().map_err(ConfigError::BuiltinCatalog)?,
        };
        tracing::debug!(items = catalog.len(), "Catalog loaded");
        Ok(Arc::new(catalog))
    }
}

fn read_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::CatalogRead(path.to_path_buf(), e))?;
    Catalog::from_json(&json).map_err(|e| ConfigError::CatalogInvalid(path.to_path_buf(), e))
}

/// Parse a tax rate fraction within `0..=1`.
fn parse_tax_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("GAMEVERSE_TAX_RATE".to_string(), reason);

    let rate = raw.trim().parse::<Decimal>().map_err(|e| invalid(format!("{e}")))?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(format!("must be between 0 and 1 (got {rate})")));
    }
    Ok(rate)
}
