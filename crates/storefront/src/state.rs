//! Application state.
//!
//! `AppState` is the composition root: it owns the configuration, the storage
//! handle and one instance of every store, and wires the cross-store flows
//! (add by id, wishlist to cart, checkout).

use rust_decimal::Decimal;

use shopfront_core::{Price, ProductId};

use crate::config::ShopfrontConfig;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{Catalog, CatalogAction, OrderConfirmation, Product};
use crate::services::{
    AuthService, CartService, CheckoutService, PreferenceService, WishlistService,
};
use crate::storage::{KeyValueStore, keys};
use crate::validation::ShippingForm;

/// Every store plus the storage they share.
#[derive(Debug)]
pub struct AppState<S> {
    config: ShopfrontConfig,
    storage: S,
    catalog: Catalog,
    cart: CartService<S>,
    wishlist: WishlistService<S>,
    preferences: PreferenceService<S>,
    auth: AuthService<S>,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Load the catalog and restore all persisted state.
    pub async fn bootstrap(config: ShopfrontConfig, storage: S, products: Vec<Product>) -> Self {
        let catalog = Catalog::new().reduce(CatalogAction::SetAll(products));
        let cart = CartService::restore(storage.clone(), config.persist_cart).await;
        let wishlist = WishlistService::restore(storage.clone(), config.persist_cart).await;
        let preferences = PreferenceService::load(storage.clone()).await;
        let auth = AuthService::restore(storage.clone(), config.login_delay).await;

        tracing::info!(
            products = catalog.len(),
            cart_items = cart.cart().item_count(),
            saved = wishlist.wishlist().len(),
            signed_in = auth.is_authenticated(),
            "Storefront state ready"
        );

        Self {
            config,
            storage,
            catalog,
            cart,
            wishlist,
            preferences,
            auth,
        }
    }

    pub const fn config(&self) -> &ShopfrontConfig {
        &self.config
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn cart(&self) -> &CartService<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartService<S> {
        &mut self.cart
    }

    pub const fn wishlist(&self) -> &WishlistService<S> {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistService<S> {
        &mut self.wishlist
    }

    pub const fn preferences(&self) -> &PreferenceService<S> {
        &self.preferences
    }

    pub const fn preferences_mut(&mut self) -> &mut PreferenceService<S> {
        &mut self.preferences
    }

    pub const fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthService<S> {
        &mut self.auth
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the catalog has no such product.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .select_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Add a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product id.
    pub async fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<()> {
        let product = self.product(id)?.clone();
        self.cart.add(&product, quantity).await;
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", id.as_str())]),
        );
        Ok(())
    }

    /// Toggle a catalog product on the wishlist. Returns whether it is saved
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product id.
    pub async fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self.product(id)?.clone();
        Ok(self.wishlist.toggle(&product).await)
    }

    /// Move a saved product into the cart. Returns `false` if it was not on
    /// the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product id.
    pub async fn move_to_cart(&mut self, id: &ProductId) -> Result<bool> {
        let product = self.product(id)?.clone();
        Ok(self.wishlist.move_to_cart(&product, &mut self.cart).await)
    }

    /// Place an order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` for invalid shipping details or an empty
    /// cart.
    pub async fn place_order(&mut self, form: &ShippingForm) -> Result<OrderConfirmation> {
        let order = CheckoutService::new(&mut self.cart).place_order(form).await?;
        Ok(order)
    }

    /// Format an amount in the configured currency.
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.config.currency)
    }

    /// Wipe everything the app persisted and reset all stores to their
    /// initial state. The catalog is kept.
    pub async fn reset_app_data(&mut self) {
        self.auth.logout().await;
        self.cart.clear().await;
        self.wishlist.clear().await;
        self.preferences.reset().await;
        for key in keys::ALL {
            self.storage.remove(key).await;
        }
        tracing::info!("App data reset");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::ThemeMode;

    use super::*;
    use crate::seed::bundled_products;
    use crate::storage::MemoryStorage;

    async fn state(storage: MemoryStorage) -> AppState<MemoryStorage> {
        AppState::bootstrap(
            ShopfrontConfig::default(),
            storage,
            bundled_products().unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let mut state = state(MemoryStorage::new()).await;
        let err = state
            .add_to_cart(&ProductId::new("nope"), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(err.is_user_error());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_everything() {
        let storage = MemoryStorage::new();
        let mut first = state(storage.clone()).await;
        first.add_to_cart(&ProductId::new("p1"), 2).await.unwrap();
        first.toggle_wishlist(&ProductId::new("p2")).await.unwrap();
        first.preferences_mut().set_mode(ThemeMode::Dark).await;

        let second = state(storage).await;
        assert_eq!(second.cart().cart().item_count(), 2);
        assert!(second.wishlist().wishlist().contains(&ProductId::new("p2")));
        assert_eq!(second.preferences().mode(), ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_reset_app_data() {
        let storage = MemoryStorage::new();
        let mut state = state(storage.clone()).await;
        state.add_to_cart(&ProductId::new("p1"), 1).await.unwrap();
        state.preferences_mut().set_mode(ThemeMode::Light).await;

        state.reset_app_data().await;
        assert!(storage.is_empty());
        assert!(state.cart().cart().is_empty());
        assert_eq!(state.catalog().len(), bundled_products().unwrap().len());
    }

    #[tokio::test]
    async fn test_price_uses_configured_currency() {
        let config = ShopfrontConfig {
            currency: shopfront_core::CurrencyCode::GBP,
            ..ShopfrontConfig::default()
        };
        let state = AppState::bootstrap(config, MemoryStorage::new(), Vec::new()).await;
        assert_eq!(state.price(Decimal::new(1999, 2)).display(), "£19.99");
    }
}
