//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types shared by every Shopfront component:
//! - `storefront` - Client state layer (catalog, cart, wishlist, preferences)
//! - `cli` - Command-line client that drives the state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
