//! Order types produced by checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::{Email, OrderId};

use super::cart::CartLine;

/// A validated shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    /// Where the receipt goes, if the shopper gave one.
    pub email: Option<Email>,
}

/// Snapshot of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub shipping: ShippingAddress,
}
