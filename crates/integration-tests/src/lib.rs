//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Each test gets its own temporary data directory, so tests run in parallel
//! and leave nothing behind.
//!
//! # Test Categories
//!
//! - `storage_contract` - Behavior every storage backend must share
//! - `shopping_flow` - Browse, cart, wishlist and checkout across restarts
//! - `account_and_preferences` - Sessions and display settings across restarts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use tempfile::TempDir;

use shopfront_storefront::config::ShopfrontConfig;
use shopfront_storefront::seed::bundled_products;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::FileStorage;

/// A scratch data directory that can start the app any number of times.
pub struct TestContext {
    dir: TempDir,
    pub config: ShopfrontConfig,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if a temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = ShopfrontConfig {
            data_dir: dir.path().join("data"),
            ..ShopfrontConfig::default()
        };
        Self { dir, config }
    }

    /// Root of the scratch directory.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.config.data_dir)
    }

    /// Start the app against this context's data directory, as a fresh
    /// process would.
    ///
    /// # Panics
    ///
    /// Panics if the bundled seed data is invalid.
    #[allow(clippy::expect_used)]
    pub async fn launch(&self) -> AppState<FileStorage> {
        let products = bundled_products().expect("Bundled seed should be valid");
        AppState::bootstrap(self.config.clone(), self.storage(), products).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
