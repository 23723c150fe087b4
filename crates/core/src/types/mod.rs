//! Core types for the GameVerse storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod genre;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use genre::{Genre, UnknownGenre};
pub use id::ItemId;
pub use price::{CurrencyCode, Price};
