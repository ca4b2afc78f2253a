//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFRONT_DATA_DIR` - Directory for file storage (default: `.shopfront`)
//! - `SHOPFRONT_STORAGE` - Storage backend, `file` or `memory` (default: `file`)
//! - `SHOPFRONT_CURRENCY` - Display currency code (default: `USD`)
//! - `SHOPFRONT_LOGIN_DELAY_MS` - Simulated sign-in latency (default: 0)
//! - `SHOPFRONT_PERSIST_CART` - Persist cart and wishlist (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use shopfront_core::CurrencyCode;

const DEFAULT_DATA_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend the app persists through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// One file per key under the data directory.
    #[default]
    File,
    /// Process-local map; nothing survives exit.
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `file` or `memory`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopfrontConfig {
    /// Directory used by the file storage backend
    pub data_dir: PathBuf,
    /// Storage backend selection
    pub storage: StorageKind,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Artificial latency applied to simulated sign-in and registration
    pub login_delay: Duration,
    /// Whether cart and wishlist are persisted across restarts
    pub persist_cart: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl Default for ShopfrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage: StorageKind::default(),
            currency: CurrencyCode::default(),
            login_delay: Duration::ZERO,
            persist_cart: true,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ShopfrontConfig {
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

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("SHOPFRONT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let storage = parse_or(&lookup, "SHOPFRONT_STORAGE", defaults.storage)?;
        let currency = parse_or(&lookup, "SHOPFRONT_CURRENCY", defaults.currency)?;
        let login_delay_ms: u64 = parse_or(&lookup, "SHOPFRONT_LOGIN_DELAY_MS", 0)?;
        let persist_cart = match lookup("SHOPFRONT_PERSIST_CART") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| invalid("SHOPFRONT_PERSIST_CART", "expected true or false"))?,
            None => defaults.persist_cart,
        };

        Ok(Self {
            data_dir,
            storage,
            currency,
            login_delay: Duration::from_millis(login_delay_ms),
            persist_cart,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.into())
}

/// Parse a variable if set, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| invalid(key, e.to_string()))
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ShopfrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShopfrontConfig::default());
        assert!(config.persist_cart);
        assert_eq!(config.storage, StorageKind::File);
    }

    #[test]
    fn test_overrides() {
        let config = ShopfrontConfig::from_lookup(lookup(&[
            ("SHOPFRONT_DATA_DIR", "/tmp/shop"),
            ("SHOPFRONT_STORAGE", "memory"),
            ("SHOPFRONT_CURRENCY", "eur"),
            ("SHOPFRONT_LOGIN_DELAY_MS", "1500"),
            ("SHOPFRONT_PERSIST_CART", "off"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.login_delay, Duration::from_millis(1500));
        assert!(!config.persist_cart);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = ShopfrontConfig::from_lookup(lookup(&[("SHOPFRONT_LOGIN_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("SHOPFRONT_LOGIN_DELAY_MS"));

        let err = ShopfrontConfig::from_lookup(lookup(&[("SHOPFRONT_STORAGE", "s3")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOPFRONT_STORAGE"));

        let result = ShopfrontConfig::from_lookup(lookup(&[("SHOPFRONT_PERSIST_CART", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sentry_dsn_is_none() {
        let config = ShopfrontConfig::from_lookup(lookup(&[("SENTRY_DSN", "")])).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
