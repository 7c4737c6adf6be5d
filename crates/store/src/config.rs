//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVENTORY_BASE_URL` - Base URL of the inventory REST API
//!   (e.g., `http://localhost:3333`)
//!
//! ## Optional
//! - `CART_STORAGE_PATH` - Path of the cart snapshot file (default: `cart.json`)
//! - `CART_CHECK_STOCK_ON_FIRST_ADD` - Require stock for the first unit of a
//!   product too (default: `false`; see [`CartPolicy`])

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Behavioral switches for the cart store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartPolicy {
    /// Check stock availability on the first add of a product.
    ///
    /// Off by default: the first unit of a never-before-seen product is
    /// allowed regardless of stock, and only increments are validated. Turn
    /// this on to subject the first unit to the same `stock >= 1` rule.
    pub check_stock_on_first_add: bool,
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Inventory REST API configuration.
    pub inventory: InventoryConfig,
    /// Where the cart snapshot file lives.
    pub storage_path: PathBuf,
    /// Behavioral switches.
    pub policy: CartPolicy,
}

/// Inventory REST API configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory API.
    pub base_url: Url,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("INVENTORY_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("INVENTORY_BASE_URL".to_string(), e.to_string())
        })?;

        let storage_path = PathBuf::from(get_env_or_default("CART_STORAGE_PATH", "cart.json"));

        let check_stock_on_first_add = parse_bool(
            "CART_CHECK_STOCK_ON_FIRST_ADD",
            &get_env_or_default("CART_CHECK_STOCK_ON_FIRST_ADD", "false"),
        )?;

        Ok(Self {
            inventory: InventoryConfig { base_url },
            storage_path,
            policy: CartPolicy {
                check_stock_on_first_add,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean environment variable value.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
