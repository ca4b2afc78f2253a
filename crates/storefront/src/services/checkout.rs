//! Checkout service.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use shopfront_core::OrderId;

use crate::error::add_breadcrumb;
use crate::models::OrderConfirmation;
use crate::storage::KeyValueStore;
use crate::validation::{FieldErrors, ShippingForm};

use super::cart::CartService;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The shipping form failed validation.
    #[error("invalid shipping details: {0}")]
    Validation(#[from] FieldErrors),

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Places an order from the current cart.
///
/// There is no payment step; a valid form and a non-empty cart always
/// succeed.
#[derive(Debug)]
pub struct CheckoutService<'a, S> {
    cart: &'a mut CartService<S>,
}

impl<'a, S: KeyValueStore> CheckoutService<'a, S> {
    pub const fn new(cart: &'a mut CartService<S>) -> Self {
        Self { cart }
    }

    /// Validate shipping details, snapshot the cart into an order, then
    /// clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` for bad shipping details and
    /// `CheckoutError::EmptyCart` when there is nothing to buy. The cart is
    /// untouched on error.
    #[instrument(skip(self, form))]
    pub async fn place_order(
        self,
        form: &ShippingForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let shipping = form.validate()?;
        let cart = self.cart.cart();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = OrderConfirmation {
            id: OrderId::new(Uuid::new_v4().to_string()),
            placed_at: Utc::now(),
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            shipping,
        };
        self.cart.clear().await;

        let items = order.item_count.to_string();
        add_breadcrumb(
            "checkout",
            "Placed order",
            Some(&[("order_id", order.id.as_str()), ("items", items.as_str())]),
        );
        tracing::info!(
            order_id = %order.id,
            items = order.item_count,
            subtotal = %order.subtotal,
            "Order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Product;
    use crate::storage::{MemoryStorage, keys};

    fn shipping() -> ShippingForm {
        ShippingForm {
            full_name: "Ada Lovelace".into(),
            address_line: "12 St James's Square".into(),
            city: "London".into(),
            postal_code: "SW1Y 4JH".into(),
            phone: "+44 20 7946 0000".into(),
            email: String::new(),
        }
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartService::new(storage.clone(), true);
        let mug = Product::new("p1", "Mug", Decimal::new(1250, 2), "mug.png").unwrap();
        cart.add(&mug, 2).await;

        let order = CheckoutService::new(&mut cart)
            .place_order(&shipping())
            .await
            .unwrap();
        assert_eq!(order.item_count, 2);
        assert_eq!(order.subtotal, Decimal::from(25));
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.shipping.city, "London");
        assert!(cart.cart().is_empty());
        assert!(storage.get(keys::CART).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let mut cart = CartService::new(MemoryStorage::new(), true);
        let err = CheckoutService::new(&mut cart)
            .place_order(&shipping())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let mut cart = CartService::new(MemoryStorage::new(), true);
        let mug = Product::new("p1", "Mug", Decimal::ONE, "mug.png").unwrap();
        cart.add(&mug, 1).await;

        let form = ShippingForm {
            phone: "call me".into(),
            ..shipping()
        };
        let err = CheckoutService::new(&mut cart)
            .place_order(&form)
            .await
            .unwrap_err();
        let CheckoutError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.get("phone"),
            Some("Phone number must contain digits")
        );
        assert_eq!(cart.cart().item_count(), 1);
    }
}
