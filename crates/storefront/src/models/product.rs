//! Product domain type.
//!
//! Products are created once from seed data through [`Product::try_from`]
//! (or the builder-style constructors) and never mutated afterwards.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::ProductId;

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// Reasons a product record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The identifier is blank.
    #[error("product id cannot be empty")]
    EmptyId,

    /// The display name is blank.
    #[error("product {0}: name cannot be empty")]
    EmptyName(ProductId),

    /// The unit price is zero or negative.
    #[error("product {0}: price must be positive")]
    NonPositivePrice(ProductId),

    /// The original (pre-discount) price is below the current price.
    #[error("product {0}: original price must be at least the price")]
    OriginalBelowPrice(ProductId),

    /// The rating is outside `0.0..=5.0` or not a number.
    #[error("product {0}: rating must be between 0 and 5")]
    RatingOutOfRange(ProductId),
}

/// Raw product record as it appears in seed data.
///
/// Required fields: `id`, `name`, `price`, `image`, `rating`, `reviews`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSeed {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    pub rating: f32,
    pub reviews: u32,
    #[serde(default)]
    pub badge: Option<String>,
    pub image: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    original_price: Option<Decimal>,
    category: Option<String>,
    stock: Option<u32>,
    rating: f32,
    reviews: u32,
    badge: Option<String>,
    image: String,
}

impl Product {
    /// Create a product with the required fields and no rating.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if the id or name is blank or the price is
    /// not positive.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let id = id.into();
        let name = name.into();
        if id.as_str().trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName(id));
        }
        if price <= Decimal::ZERO {
            return Err(ProductError::NonPositivePrice(id));
        }
        Ok(Self {
            id,
            name,
            price,
            original_price: None,
            category: None,
            stock: None,
            rating: 0.0,
            reviews: 0,
            badge: None,
            image: image.into(),
        })
    }

    /// Set the pre-discount price.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::OriginalBelowPrice`] if `original` is below
    /// the current price.
    pub fn with_original_price(mut self, original: Decimal) -> Result<Self, ProductError> {
        if original < self.price {
            return Err(ProductError::OriginalBelowPrice(self.id));
        }
        self.original_price = Some(original);
        Ok(self)
    }

    /// Set the rating and review count.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::RatingOutOfRange`] if `rating` is not within
    /// `0.0..=5.0`.
    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Result<Self, ProductError> {
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ProductError::RatingOutOfRange(self.id));
        }
        self.rating = rating;
        self.reviews = reviews;
        Ok(self)
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the tracked stock count.
    #[must_use]
    pub const fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Set the promotional badge text.
    #[must_use]
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn original_price(&self) -> Option<Decimal> {
        self.original_price
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Tracked stock count; `None` means stock is not tracked.
    #[must_use]
    pub const fn stock(&self) -> Option<u32> {
        self.stock
    }

    #[must_use]
    pub const fn rating(&self) -> f32 {
        self.rating
    }

    #[must_use]
    pub const fn reviews(&self) -> u32 {
        self.reviews
    }

    #[must_use]
    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Untracked stock counts as available.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock.is_none_or(|count| count > 0)
    }

    /// Whole-percent discount relative to the original price, if any.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price.filter(|o| *o > self.price)?;
        let pct = (original - self.price) / original * Decimal::ONE_HUNDRED;
        pct.round().to_u32()
    }
}

impl TryFrom<ProductSeed> for Product {
    type Error = ProductError;

    fn try_from(seed: ProductSeed) -> Result<Self, Self::Error> {
        let mut product = Self::new(seed.id, seed.name, seed.price, seed.image)?
            .with_rating(seed.rating, seed.reviews)?;
        if let Some(original) = seed.original_price {
            product = product.with_original_price(original)?;
        }
        if let Some(category) = seed.category {
            product = product.with_category(category);
        }
        if let Some(stock) = seed.stock {
            product = product.with_stock(stock);
        }
        if let Some(badge) = seed.badge {
            product = product.with_badge(badge);
        }
        Ok(product)
    }
}
