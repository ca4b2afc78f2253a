//! Stateful services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart state, persisted after every change
//! - `wishlist` - Saved products, including move-to-cart
//! - `preferences` - Theme mode, color scheme and language
//! - `auth` - Simulated sign-in, registration and session restore
//! - `checkout` - Turns the cart into an order confirmation
//!
//! Services own their state and a handle to a [`KeyValueStore`]. Storage is
//! best-effort: a failed write is logged and the in-memory state stays
//! authoritative.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod preferences;
pub mod wishlist;

pub use auth::{AuthError, AuthService};
pub use cart::CartService;
pub use checkout::{CheckoutError, CheckoutService};
pub use preferences::PreferenceService;
pub use wishlist::WishlistService;
