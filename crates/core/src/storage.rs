//! Persistence boundary for the cart.
//!
//! The core only needs a synchronous string key-value store. [`CartStore`]
//! encodes the cart lines as JSON under a single fixed key and decodes them
//! at startup. Totals and filter state are never written.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartLine;

/// Errors from the persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// Stored cart data could not be decoded or breaks cart invariants.
    #[error("persisted cart is corrupt: {0}")]
    Corrupt(String),
    /// The cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(String),
}

/// Synchronous get/set string store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-process store. Contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the cart's durable encoding.
///
/// The encoding is a JSON array of `{id, title, price, image, quantity}`
/// records in display order. Prices are written as decimal strings; plain
/// JSON numbers are accepted when reading.
#[derive(Debug, Clone, Default)]
pub struct CartStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Key the cart is stored under.
    pub const KEY: &'static str = "gameversecart";

    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Write `lines` to the backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save(&mut self, lines: &[CartLine]) -> Result<(), StorageError> {
        let json = serde_json::to_string(lines).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.backend.set(Self::KEY, &json)
    }

    /// Read the stored cart, reporting exactly what went wrong.
    ///
    /// A missing entry is an empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be read and
    /// [`StorageError::Corrupt`] if the stored data is not a valid cart.
    pub fn try_load(&self) -> Result<Vec<CartLine>, StorageError> {
        let Some(raw) = self.backend.get(Self::KEY)? else {
            return Ok(Vec::new());
        };
        let lines: Vec<CartLine> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        check_invariants(&lines)?;
        Ok(lines)
    }

    /// Read the stored cart, falling back to an empty cart on any failure.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        match self.try_load() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding persisted cart");
                Vec::new()
            }
        }
    }
}

fn check_invariants(lines: &[CartLine]) -> Result<(), StorageError> {
    let mut seen = HashSet::with_capacity(lines.len());
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        if !seen.insert(line.id) {
            return Err(StorageError::Corrupt(format!("duplicate line for item {}", line.id)));
        }
        if line.quantity == 0 {
            return Err(StorageError::Corrupt(format!("zero quantity for item {}", line.id)));
        }
        if line.price < Decimal::ZERO {
            return Err(StorageError::Corrupt(format!("negative price for item {}", line.id)));
        }
        subtotal = line
            .price
            .checked_mul(Decimal::from(line.quantity))
            .and_then(|amount| subtotal.checked_add(amount))
            .ok_or_else(|| {
                StorageError::Corrupt(format!("amount for item {} is out of range", line.id))
            })?;
    }
    // Tax rates go up to 100%, so the total can reach twice the subtotal.
    if subtotal.checked_add(subtotal).is_none() {
        return Err(StorageError::Corrupt("cart total is out of range".to_string()));
    }
    Ok(())
}
