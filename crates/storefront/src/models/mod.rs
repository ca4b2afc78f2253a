//! Domain models for the storefront.
//!
//! Every store is an explicit state type with a pure `reduce(state, action)`
//! reducer; the services in [`crate::services`] own an instance, dispatch
//! actions to it and persist the result.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod product;
pub mod session;
pub mod theme;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartAction, CartLine};
pub use catalog::{Catalog, CatalogAction, CatalogQuery, SortOrder};
pub use order::{OrderConfirmation, ShippingAddress};
pub use product::{Product, ProductError, ProductSeed};
pub use session::AuthSession;
pub use theme::{Appearance, Theme, ThemeColors};
pub use user::User;
pub use wishlist::{Wishlist, WishlistAction, WishlistEntry};
