//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod preference;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use preference::{ColorSchemeId, Language, ParsePreferenceError, ThemeMode};
pub use price::{CurrencyCode, Price};
