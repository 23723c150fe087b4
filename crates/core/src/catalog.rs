//! Read-only catalog of purchasable games.
//!
//! The catalog is loaded once at startup and never mutated. Callers share it
//! behind an `Arc` and look items up by [`ItemId`].

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Genre, ItemId};

/// Launch catalog compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Highest rating an item may carry.
const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Errors raised while building or querying a [`Catalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No item with this id exists.
    #[error("no catalog item with id {0}")]
    NotFound(ItemId),
    /// Two items share an id.
    #[error("duplicate catalog item id {0}")]
    DuplicateId(ItemId),
    /// An item has a price below zero.
    #[error("item {0} has a negative price")]
    NegativePrice(ItemId),
    /// An item's price is too large to total with tax.
    #[error("item {0} has a price out of range")]
    PriceOutOfRange(ItemId),
    /// An item's rating lies outside 0..=5.
    #[error("item {id} has rating {rating}, expected 0 to 5")]
    RatingOutOfRange {
        /// Offending item.
        id: ItemId,
        /// The rating as loaded.
        rating: Decimal,
    },
    /// The catalog source could not be decoded.
    #[error("invalid catalog data: {0}")]
    Parse(String),
}

/// A purchasable game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub genre: Genre,
    pub price: Decimal,
    pub description: String,
    pub rating: Decimal,
    /// Opaque image reference, passed through to the renderer untouched.
    pub image: String,
}

/// The full, immutable list of items, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from a list of items.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an id, a price is negative or too
    /// large to total with tax, or a rating falls outside `0..=5`.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if item.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(item.id));
            }
            if item.price.checked_mul(Decimal::TWO).is_none() {
                return Err(CatalogError::PriceOutOfRange(item.id));
            }
            if item.rating < Decimal::ZERO || item.rating > MAX_RATING {
                return Err(CatalogError::RatingOutOfRange {
                    id: item.id,
                    rating: item.rating,
                });
            }
        }
        Ok(Self { items })
    }

    /// Parse a catalog from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, or any error from
    /// [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<Item> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(items)
    }

    /// The launch catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All items in definition order.
    #[must_use]
    pub fn list_all(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no item has this id.
    pub fn find_by_id(&self, id: ItemId) -> Result<&Item, CatalogError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Distinct genres present in the catalog, in first-appearance order.
    #[must_use]
    pub fn genres(&self) -> Vec<Genre> {
        let mut genres = Vec::new();
        for item in &self.items {
            if !genres.contains(&item.genre) {
                genres.push(item.genre);
            }
        }
        genres
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
