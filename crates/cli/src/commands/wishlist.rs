//! Wishlist commands.

use clap::Subcommand;

use shopfront_core::ProductId;
use shopfront_storefront::error::Result;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;

use crate::output;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product ID
        id: ProductId,
    },
    /// Unsave a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Unsave everything
    Clear,
    /// Add one of a saved product to the cart and unsave it
    MoveToCart {
        /// Product ID
        id: ProductId,
    },
}

pub async fn run<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    action: WishlistAction,
) -> Result<()> {
    match action {
        WishlistAction::Show => show(state),
        WishlistAction::Toggle { id } => {
            if state.toggle_wishlist(&id).await? {
                output::done(format!("Saved {id}"));
            } else {
                output::done(format!("Removed {id} from wishlist"));
            }
        }
        WishlistAction::Remove { id } => {
            state.wishlist_mut().remove(&id).await;
            output::done(format!("Removed {id} from wishlist"));
        }
        WishlistAction::Clear => {
            state.wishlist_mut().clear().await;
            output::done("Wishlist cleared");
        }
        WishlistAction::MoveToCart { id } => {
            if state.move_to_cart(&id).await? {
                output::done(format!("Moved {id} to cart"));
            } else {
                output::line(format!("{id} is not on your wishlist."));
            }
        }
    }
    Ok(())
}

fn show<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let wishlist = state.wishlist().wishlist();
    if wishlist.is_empty() {
        output::line("Your wishlist is empty.");
        return;
    }

    let rows: Vec<[String; 4]> = wishlist
        .entries()
        .iter()
        .map(|entry| {
            [
                entry.product_id.to_string(),
                entry.name.clone(),
                state.price(entry.price).display(),
                entry.category.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output::table(["ID", "NAME", "PRICE", "CATEGORY"], &rows);
}
