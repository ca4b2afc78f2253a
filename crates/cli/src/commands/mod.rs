//! CLI subcommands, one module per store.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod prefs;
pub mod wishlist;
