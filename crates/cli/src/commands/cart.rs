//! Cart commands.

use clap::Subcommand;

use shopfront_core::ProductId;
use shopfront_storefront::error::{AppError, Result};
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;

use crate::output;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: ProductId,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity; 0 removes it
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

pub async fn run<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    action: CartAction,
) -> Result<()> {
    match action {
        CartAction::Show => show(state),
        CartAction::Add { id, quantity } => {
            state.add_to_cart(&id, quantity).await?;
            output::done(format!("Added {quantity} × {id}"));
            show(state);
        }
        CartAction::Set { id, quantity } => {
            if !state.cart().cart().contains(&id) {
                return Err(AppError::NotFound(format!("cart line {id}")));
            }
            state.cart_mut().set_quantity(&id, quantity).await;
            show(state);
        }
        CartAction::Remove { id } => {
            state.cart_mut().remove(&id).await;
            output::done(format!("Removed {id}"));
        }
        CartAction::Clear => {
            state.cart_mut().clear().await;
            output::done("Cart cleared");
        }
    }
    Ok(())
}

pub fn show<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let cart = state.cart().cart();
    if cart.is_empty() {
        output::line("Your cart is empty.");
        return;
    }

    let rows: Vec<[String; 4]> = cart
        .lines()
        .iter()
        .map(|line| {
            [
                line.product_id.to_string(),
                line.name.clone(),
                line.quantity.to_string(),
                state.price(line.line_total()).display(),
            ]
        })
        .collect();
    output::table(["ID", "NAME", "QTY", "TOTAL"], &rows);
    output::line("");
    output::line(format!(
        "{} items, subtotal {}",
        cart.item_count(),
        state.price(cart.subtotal()).display()
    ));
}
