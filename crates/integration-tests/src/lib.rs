//! Integration tests for GameVerse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gameverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Browsing and cart behaviour through the storefront controller
//! - `persistence` - Cart round trips and recovery from bad stored data
//! - `checkout_flow` - Order validation, placement and confirmation
//!
//! This library only provides shared fixtures.

use std::sync::Arc;

use gameverse_core::{CartManager, Catalog, KeyValueStore, MemoryStore, OrderFields, Storefront};
use secrecy::SecretString;

/// The built-in catalog, shared.
///
/// # Panics
///
/// Panics if the embedded catalog data is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("built-in catalog is valid"))
}

/// Storefront over the built-in catalog and a fresh in-memory store.
#[must_use]
pub fn storefront() -> Storefront<MemoryStore> {
    storefront_with(MemoryStore::new())
}

/// Storefront restoring its cart from `store`.
pub fn storefront_with<S: KeyValueStore>(store: S) -> Storefront<S> {
    Storefront::new(catalog(), CartManager::load(store))
}

/// A form that passes every validation rule.
#[must_use]
pub fn valid_order() -> OrderFields {
    OrderFields {
        name: "A".to_string(),
        email: "a@b.co".to_string(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        card_name: "A".to_string(),
        card_number: SecretString::from("4111111111111"),
        expiry: "09/27".to_string(),
        cvv: SecretString::from("123"),
    }
}
