//! Static product seed data.
//!
//! The catalog is populated once at startup. The bundled seed lives in
//! `data/products.json` and is compiled into the binary; a client may point
//! at a different JSON file with the same shape instead.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use shopfront_core::ProductId;

use crate::models::{Product, ProductError, ProductSeed};

const BUNDLED_PRODUCTS: &str = include_str!("../data/products.json");

/// Errors raised while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The seed is not a JSON array of product records.
    #[error("malformed seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed product validation.
    #[error("record {index}: {source}")]
    InvalidProduct {
        index: usize,
        #[source]
        source: ProductError,
    },

    /// Two records share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// Parse and validate a JSON array of product records.
///
/// # Errors
///
/// Returns [`SeedError`] on malformed JSON, an invalid record, or a repeated
/// id.
pub fn parse_products(json: &str) -> Result<Vec<Product>, SeedError> {
    let seeds: Vec<ProductSeed> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(seeds.len());
    let mut products = Vec::with_capacity(seeds.len());

    for (index, seed) in seeds.into_iter().enumerate() {
        let product =
            Product::try_from(seed).map_err(|source| SeedError::InvalidProduct { index, source })?;
        if !seen.insert(product.id().clone()) {
            return Err(SeedError::DuplicateId(product.id().clone()));
        }
        products.push(product);
    }

    tracing::debug!(count = products.len(), "Parsed product seed");
    Ok(products)
}

/// The products bundled with the app.
///
/// # Errors
///
/// Returns [`SeedError`] if the bundled file is invalid.
pub fn bundled_products() -> Result<Vec<Product>, SeedError> {
    parse_products(BUNDLED_PRODUCTS)
}

/// Load products from a JSON file.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or is invalid.
pub async fn load_products(path: &Path) -> Result<Vec<Product>, SeedError> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_products(&json)
}
