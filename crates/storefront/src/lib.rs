//! Shopfront storefront state layer.
//!
//! Client-side state for a small e-commerce app: a product catalog seeded
//! from static data, a cart, a wishlist, theme and language preferences and
//! a simulated account session. Every store persists through a
//! [`storage::KeyValueStore`] so it survives a restart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;
pub mod validation;
