//! Wishlist state and reducer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::ProductId;

use super::product::Product;

/// A saved product with the display data needed to render it without a
/// catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub image: String,
    pub rating: f32,
    pub reviews: u32,
    pub category: Option<String>,
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id().clone(),
            name: product.name().to_owned(),
            price: product.price(),
            original_price: product.original_price(),
            image: product.image().to_owned(),
            rating: product.rating(),
            reviews: product.reviews(),
            category: product.category().map(str::to_owned),
        }
    }
}

/// Mutations accepted by [`Wishlist::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    /// Add the entry if absent, remove it if present.
    Toggle(WishlistEntry),
    Remove { product_id: ProductId },
    Clear,
}

/// Saved products, unique by product id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WishlistEntry>", into = "Vec<WishlistEntry>")]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild from persisted entries, keeping the first of any duplicates.
    #[must_use]
    pub fn from_entries(entries: Vec<WishlistEntry>) -> Self {
        let mut wishlist = Self::new();
        for entry in entries {
            if !wishlist.contains(&entry.product_id) {
                wishlist.entries.push(entry);
            }
        }
        wishlist
    }

    /// Pure reducer.
    #[must_use]
    pub fn reduce(mut self, action: WishlistAction) -> Self {
        self.apply(action);
        self
    }

    pub fn apply(&mut self, action: WishlistAction) {
        match action {
            WishlistAction::Toggle(entry) => {
                self.toggle(entry);
            }
            WishlistAction::Remove { product_id } => self.remove(&product_id),
            WishlistAction::Clear => self.clear(),
        }
    }

    /// Add if absent, remove if present. Returns true if the entry is saved
    /// afterwards.
    pub fn toggle(&mut self, entry: WishlistEntry) -> bool {
        if self.contains(&entry.product_id) {
            self.remove(&entry.product_id);
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.entries.retain(|e| &e.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.product_id == product_id)
    }

    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<WishlistEntry>> for Wishlist {
    fn from(entries: Vec<WishlistEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Wishlist> for Vec<WishlistEntry> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.entries
    }
}
