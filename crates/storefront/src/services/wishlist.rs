//! Wishlist service.

use tracing::instrument;

use shopfront_core::ProductId;

use crate::models::{Product, Wishlist, WishlistAction, WishlistEntry};
use crate::storage::{KeyValueStore, keys};

use super::cart::CartService;

/// Wishlist state plus its persistence.
#[derive(Debug)]
pub struct WishlistService<S> {
    wishlist: Wishlist,
    storage: S,
    persist: bool,
}

impl<S: KeyValueStore> WishlistService<S> {
    pub const fn new(storage: S, persist: bool) -> Self {
        Self {
            wishlist: Wishlist::new(),
            storage,
            persist,
        }
    }

    /// Restore persisted entries, or start empty.
    pub async fn restore(storage: S, persist: bool) -> Self {
        let wishlist = if persist {
            storage
                .get_json::<Wishlist>(keys::WISHLIST)
                .await
                .unwrap_or_default()
        } else {
            Wishlist::new()
        };
        Self {
            wishlist,
            storage,
            persist,
        }
    }

    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: WishlistAction) {
        self.wishlist = std::mem::take(&mut self.wishlist).reduce(action);
        tracing::debug!(saved = self.wishlist.len(), "Wishlist updated");
        self.save().await;
    }

    /// Heart button: save if absent, unsave if present. Returns whether the
    /// product is saved afterwards.
    pub async fn toggle(&mut self, product: &Product) -> bool {
        self.dispatch(WishlistAction::Toggle(WishlistEntry::from(product)))
            .await;
        self.wishlist.contains(product.id())
    }

    pub async fn remove(&mut self, product_id: &ProductId) {
        self.dispatch(WishlistAction::Remove {
            product_id: product_id.clone(),
        })
        .await;
    }

    pub async fn clear(&mut self) {
        self.dispatch(WishlistAction::Clear).await;
    }

    /// Add one unit of a saved product to the cart and drop it from the
    /// wishlist. Products that are not saved are left alone.
    pub async fn move_to_cart(&mut self, product: &Product, cart: &mut CartService<S>) -> bool {
        if !self.wishlist.contains(product.id()) {
            return false;
        }
        cart.add(product, 1).await;
        self.remove(product.id()).await;
        true
    }

    async fn save(&self) -> bool {
        if !self.persist {
            return true;
        }
        let saved = if self.wishlist.is_empty() {
            self.storage.remove(keys::WISHLIST).await
        } else {
            self.storage.set_json(keys::WISHLIST, &self.wishlist).await
        };
        if !saved {
            tracing::warn!("Wishlist changes were not persisted");
        }
        saved
    }
}
