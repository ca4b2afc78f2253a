//! Cart service.
//!
//! Owns the [`Cart`] state, routes every mutation through the reducer, and
//! writes the resulting lines to storage after each change.

use tracing::instrument;

use shopfront_core::ProductId;

use crate::models::{Cart, CartAction, Product};
use crate::storage::{KeyValueStore, keys};

/// Cart state plus its persistence.
#[derive(Debug)]
pub struct CartService<S> {
    cart: Cart,
    storage: S,
    persist: bool,
}

impl<S: KeyValueStore> CartService<S> {
    /// Create an empty cart.
    ///
    /// With `persist = false` the cart lives only in memory and storage is
    /// never touched.
    pub const fn new(storage: S, persist: bool) -> Self {
        Self {
            cart: Cart::new(),
            storage,
            persist,
        }
    }

    /// Restore the persisted cart, or start empty if nothing usable is stored.
    pub async fn restore(storage: S, persist: bool) -> Self {
        let cart = if persist {
            storage
                .get_json::<Cart>(keys::CART)
                .await
                .unwrap_or_default()
        } else {
            Cart::new()
        };
        tracing::debug!(lines = cart.lines().len(), "Cart restored");
        Self {
            cart,
            storage,
            persist,
        }
    }

    /// Current cart state.
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Apply an action and persist the result.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: CartAction) {
        self.cart = std::mem::take(&mut self.cart).reduce(action);
        tracing::debug!(items = self.cart.item_count(), "Cart updated");
        self.save().await;
    }

    pub async fn add(&mut self, product: &Product, quantity: u32) {
        self.dispatch(CartAction::Add {
            product: product.clone(),
            quantity,
        })
        .await;
    }

    pub async fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        self.dispatch(CartAction::SetQuantity {
            product_id: product_id.clone(),
            quantity,
        })
        .await;
    }

    pub async fn increment(&mut self, product_id: &ProductId) {
        if let Some(quantity) = self.cart.quantity_of(product_id) {
            self.set_quantity(product_id, quantity.saturating_add(1))
                .await;
        }
    }

    pub async fn decrement(&mut self, product_id: &ProductId) {
        if let Some(quantity) = self.cart.quantity_of(product_id) {
            self.set_quantity(product_id, quantity.saturating_sub(1))
                .await;
        }
    }

    pub async fn remove(&mut self, product_id: &ProductId) {
        self.dispatch(CartAction::Remove {
            product_id: product_id.clone(),
        })
        .await;
    }

    pub async fn clear(&mut self) {
        self.dispatch(CartAction::Clear).await;
    }

    /// Write the current lines to storage. An empty cart removes the key.
    async fn save(&self) -> bool {
        if !self.persist {
            return true;
        }
        let saved = if self.cart.is_empty() {
            self.storage.remove(keys::CART).await
        } else {
            self.storage.set_json(keys::CART, &self.cart).await
        };
        if !saved {
            tracing::warn!("Cart changes were not persisted");
        }
        saved
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, id.to_uppercase(), Decimal::from(price), "img").unwrap()
    }

    #[tokio::test]
    async fn test_changes_survive_restore() {
        let storage = MemoryStorage::new();
        let mut service = CartService::new(storage.clone(), true);
        service.add(&product("p1", 120), 2).await;
        service.add(&product("p2", 5), 1).await;
        service.increment(&ProductId::new("p2")).await;

        let restored = CartService::restore(storage, true).await;
        assert_eq!(restored.cart(), service.cart());
        assert_eq!(restored.cart().item_count(), 4);
        assert_eq!(restored.cart().subtotal(), Decimal::from(250));
    }

    #[tokio::test]
    async fn test_emptying_removes_storage_key() {
        let storage = MemoryStorage::new();
        let mut service = CartService::new(storage.clone(), true);
        service.add(&product("p1", 120), 2).await;
        assert!(storage.get(keys::CART).await.is_some());

        service.remove(&ProductId::new("p1")).await;
        assert!(service.cart().is_empty());
        assert!(storage.get(keys::CART).await.is_none());
    }

    #[tokio::test]
    async fn test_non_persistent_cart_never_writes() {
        let storage = MemoryStorage::new();
        let mut service = CartService::new(storage.clone(), false);
        service.add(&product("p1", 1), 1).await;
        assert!(storage.is_empty());

        storage.set(keys::CART, "[]").await;
        let restored = CartService::restore(storage, false).await;
        assert!(restored.cart().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_storage_restores_empty() {
        let storage = MemoryStorage::new();
        storage.set(keys::CART, "{oops").await;
        let service = CartService::restore(storage, true).await;
        assert!(service.cart().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_line() {
        let mut service = CartService::new(MemoryStorage::new(), true);
        service.add(&product("p1", 1), 1).await;
        service.decrement(&ProductId::new("p1")).await;
        assert!(service.cart().is_empty());
    }

    #[tokio::test]
    async fn test_restore_repairs_stored_lines() {
        let storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                r#"[{"product_id":"p1","name":"P1","price":"3","image":"img","quantity":0},
                    {"product_id":"p1","name":"P1","price":"3","image":"img","quantity":1}]"#,
            )
            .await;
        let mut service = CartService::restore(storage, true).await;
        assert_eq!(service.cart().lines().len(), 1);

        service.decrement(&ProductId::new("p1")).await;
        service.decrement(&ProductId::new("p1")).await;
        assert!(service.cart().is_empty());
    }
}
