//! Best-effort key-value storage adapter.
//!
//! Wraps a platform persistence API behind a uniform get/set/remove
//! interface. Every operation is best-effort: backend failures are caught at
//! this boundary, logged, and reported as `None`/`false`. Callers treat a
//! missing value as "use the default" and never propagate storage errors.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - In-process map, used by tests and ephemeral sessions
//! - [`FileStorage`] - One file per key under a data directory
//!
//! # Keys
//!
//! All keys the storefront writes are listed in [`keys`]. Structured values
//! are stored as JSON strings via [`KeyValueStore::get_json`] and
//! [`KeyValueStore::set_json`].

mod file;
mod memory;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys used across the storefront.
pub mod keys {
    /// Key for the simulated session token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the signed-in user's profile (JSON).
    pub const USER_DATA: &str = "user_data";

    /// Key for the interface language code.
    pub const LANGUAGE: &str = "language";

    /// Key for the appearance mode (`light`, `dark`, `system`).
    pub const THEME_MODE: &str = "theme_mode";

    /// Key for the accent color scheme id.
    pub const COLOR_SCHEME: &str = "color_scheme";

    /// Key for the cart lines (JSON).
    pub const CART: &str = "cart";

    /// Key for the wishlist entries (JSON).
    pub const WISHLIST: &str = "wishlist";

    /// Every key above, for bulk operations such as "reset app data".
    pub const ALL: [&str; 7] = [
        AUTH_TOKEN,
        USER_DATA,
        LANGUAGE,
        THEME_MODE,
        COLOR_SCHEME,
        CART,
        WISHLIST,
    ];
}

/// Asynchronous, best-effort string key-value store.
///
/// Implementations must never return an error or panic: failures are logged
/// with `tracing::warn!` and surface as `None` (reads) or `false` (writes).
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Option<String>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Returns `true` when the backend accepted the write.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = bool> + Send;

    /// Delete the value stored under `key`.
    ///
    /// Returns `true` when the key is absent afterwards (including when it
    /// never existed).
    fn remove(&self, key: &str) -> impl Future<Output = bool> + Send;

    /// Read and decode a JSON value.
    ///
    /// A value that fails to decode is logged and treated as absent.
    fn get_json<T>(&self, key: &str) -> impl Future<Output = Option<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let raw = self.get(key).await?;
            match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding undecodable stored value");
                    None
                }
            }
        }
    }

    /// Encode `value` as JSON and store it.
    fn set_json<T>(&self, key: &str, value: &T) -> impl Future<Output = bool> + Send
    where
        T: Serialize + Sync,
    {
        async move {
            match serde_json::to_string(value) {
                Ok(raw) => self.set(key, &raw).await,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Failed to encode value for storage");
                    false
                }
            }
        }
    }
}

/// Returns true if `key` is safe to use as a storage key on every backend.
///
/// Keys are limited to ASCII letters, digits, `_`, `-` and `.`, must not be
/// empty, and must not start with a dot.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_keys_are_valid() {
        for key in keys::ALL {
            assert!(is_valid_key(key), "{key} should be a valid key");
        }
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key(".hidden"));
        assert!(!is_valid_key("has space"));
        assert!(!is_valid_key("nested/key"));
    }
}
