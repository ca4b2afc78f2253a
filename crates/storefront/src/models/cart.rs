//! Cart state and reducer.
//!
//! The cart is an ordered list of [`CartLine`]s with at most one line per
//! product id. Totals are derived on read and never stored, so they cannot
//! drift from the lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::ProductId;

use super::product::Product;

/// One line item: a product snapshot and a quantity.
///
/// Name, price and image are copied from the product when the line is
/// created; later catalog changes do not affect an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Mutations accepted by [`Cart::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` of a product, merging into an existing line.
    Add { product: Product, quantity: u32 },
    /// Replace a line's quantity; zero removes the line.
    SetQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    /// Delete a line if present.
    Remove { product_id: ProductId },
    /// Empty the cart.
    Clear,
}

/// Shopping cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from persisted lines, restoring the line invariants.
    ///
    /// Lines with a zero quantity are dropped and duplicate product ids are
    /// merged into the first occurrence.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.position(&line.product_id) {
                Some(idx) => {
                    if let Some(existing) = cart.lines.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Pure reducer: consume the state, apply `action`, return the new state.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.apply(action);
        self
    }

    /// Apply `action` in place. Every action is total; invalid targets are
    /// no-ops.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { product, quantity } => self.add(&product, quantity),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Remove { product_id } => self.remove(&product_id),
            CartAction::Clear => self.clear(),
        }
    }

    /// Add `quantity` units of `product`. Adding zero is a no-op.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.line_mut(product.id()) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id().clone(),
            name: product.name().to_owned(),
            price: product.price(),
            image: product.image().to_owned(),
            quantity,
        });
    }

    /// Replace the quantity of an existing line; zero removes it.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Stepper "+": one more of an existing line.
    pub fn increment(&mut self, product_id: &ProductId) {
        if let Some(qty) = self.quantity_of(product_id) {
            self.set_quantity(product_id, qty.saturating_add(1));
        }
    }

    /// Stepper "−": one fewer, removing the line when it reaches zero.
    pub fn decrement(&mut self, product_id: &ProductId) {
        if let Some(qty) = self.quantity_of(product_id) {
            self.set_quantity(product_id, qty.saturating_sub(1));
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some()
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.line(product_id).map(|l| l.quantity)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.product_id == product_id)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
