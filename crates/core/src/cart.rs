//! Cart state and the operations that mutate it.
//!
//! [`CartManager`] exclusively owns the ordered line sequence. Every mutation
//! writes the lines through to its [`CartStore`]; totals are recomputed from
//! the lines on demand and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::storage::{CartStore, KeyValueStore, StorageError};
use crate::types::ItemId;

/// Sales tax applied when no other rate is configured (10%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// One catalog item's entry in the cart.
///
/// Title, price and image are snapshots taken when the line was created, so a
/// restored cart still renders if the catalog has changed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Derived monetary totals of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Totals for `lines` at `tax_rate`.
    ///
    /// Amounts saturate at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn compute(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal = lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let tax = subtotal.saturating_mul(tax_rate);
        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

/// Owns the cart lines and keeps them persisted.
///
/// The in-memory cart keeps a mutation even when the following write fails;
/// the write error is returned so the caller can tell the user.
#[derive(Debug)]
pub struct CartManager<S> {
    lines: Vec<CartLine>,
    tax_rate: Decimal,
    store: CartStore<S>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Empty cart at the default tax rate. Nothing is read from `store`.
    pub const fn new(store: S) -> Self {
        Self {
            lines: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
            store: CartStore::new(store),
        }
    }

    /// Restore the persisted cart from `store`.
    ///
    /// Missing or corrupt data yields an empty cart.
    pub fn load(store: S) -> Self {
        let store = CartStore::new(store);
        let lines = store.load();
        tracing::debug!(lines = lines.len(), "Restored cart");
        Self {
            lines,
            tax_rate: DEFAULT_TAX_RATE,
            store,
        }
    }

    /// Use `tax_rate` (e.g. `0.10` for 10%) instead of the default.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Add one unit of `id`.
    ///
    /// Increments the existing line if the item is already in the cart,
    /// otherwise appends a new line snapshotting the catalog entry. Returns
    /// the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in `catalog` (the cart is left
    /// untouched), or a storage error if the write fails.
    pub fn add_item(&mut self, catalog: &Catalog, id: ItemId) -> Result<u32> {
        let item = catalog.find_by_id(id)?;

        let quantity = if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine {
                id: item.id,
                title: item.title.clone(),
                price: item.price,
                image: item.image.clone(),
                quantity: 1,
            });
            1
        };

        tracing::debug!(item_id = %id, quantity, "Added item to cart");
        self.persist()?;
        Ok(quantity)
    }

    /// Remove the whole line for `id`, whatever its quantity.
    ///
    /// Returns `false` without touching storage if the item was not in the
    /// cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn remove_item(&mut self, id: ItemId) -> Result<bool, StorageError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() == before {
            return Ok(false);
        }

        tracing::debug!(item_id = %id, "Removed item from cart");
        self.persist()?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.lines.clear();
        tracing::debug!("Cleared cart");
        self.persist()
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Subtotal, tax and total for the current lines.
    #[must_use]
    pub fn compute_totals(&self) -> Totals {
        Totals::compute(&self.lines, self.tax_rate)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// The persistence layer backing this cart.
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.store.save(&self.lines).inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to persist cart");
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;
    use crate::error::Error;
    use crate::storage::MemoryStore;
    use crate::types::Genre;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            item(1, "GTA V", Genre::Action, 5999),
            item(2, "RDR2", Genre::Rpg, 4999),
            item(3, "Valhalla", Genre::Action, 7000),
        ])
        .unwrap()
    }

    fn id(n: i32) -> ItemId {
        ItemId::new(n)
    }

    #[test]
    fn test_add_appends_snapshot_line() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());

        assert_eq!(cart.add_item(&catalog, id(2)).unwrap(), 1);

        assert_eq!(cart.lines(), &[CartLine {
            id: id(2),
            title: "RDR2".to_string(),
            price: Decimal::new(4999, 2),
            image: "image/2.jpg".to_string(),
            quantity: 1,
        }]);
    }

    #[test]
    fn test_add_existing_increments_quantity() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());

        cart.add_item(&catalog, id(1)).unwrap();
        cart.add_item(&catalog, id(3)).unwrap();
        assert_eq!(cart.add_item(&catalog, id(1)).unwrap(), 2);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.line(id(1)).unwrap().quantity, 2);
        let order: Vec<ItemId> = cart.lines().iter().map(|l| l.id).collect();
        assert_eq!(order, vec![id(1), id(3)]);
    }

    #[test]
    fn test_add_unknown_item_is_not_found() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());

        let err = cart.add_item(&catalog, id(42)).unwrap_err();
        assert!(matches!(err, Error::NotFound(missing) if missing == id(42)));
        assert!(cart.is_empty());
        assert!(cart.store().backend().raw(CartStore::<MemoryStore>::KEY).is_none());
    }

    #[test]
    fn test_item_count_and_distinct_lines_over_many_adds() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());
        let sequence = [1, 2, 1, 3, 3, 3, 2, 1, 1];

        for n in sequence {
            cart.add_item(&catalog, id(n)).unwrap();
        }

        assert_eq!(cart.total_item_count(), sequence.len() as u64);
        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.line(id(1)).unwrap().quantity, 4);
        assert_eq!(cart.line(id(2)).unwrap().quantity, 2);
        assert_eq!(cart.line(id(3)).unwrap().quantity, 3);
    }

    #[test]
    fn test_remove_drops_whole_line() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());
        for n in [1, 1, 1, 2] {
            cart.add_item(&catalog, id(n)).unwrap();
        }

        assert!(cart.remove_item(id(1)).unwrap());

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 1);
        assert!(cart.line(id(1)).is_none());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());
        cart.add_item(&catalog, id(1)).unwrap();
        let before = cart.lines().to_vec();

        assert!(!cart.remove_item(id(3)).unwrap());
        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_totals() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new());
        for n in [1, 1, 2] {
            cart.add_item(&catalog, id(n)).unwrap();
        }

        let totals = cart.compute_totals();
        // 2 x 59.99 + 49.99
        assert_eq!(totals.subtotal, Decimal::new(16997, 2));
        assert_eq!(totals.tax, Decimal::new(16997, 3));
        assert_eq!(totals.total, totals.subtotal + totals.subtotal * DEFAULT_TAX_RATE);
        assert_eq!(cart.compute_totals(), totals);
    }

    #[test]
    fn test_totals_of_empty_cart_are_zero() {
        let cart = CartManager::new(MemoryStore::new());
        assert_eq!(cart.compute_totals(), Totals::default());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let lines = [CartLine {
            id: id(1),
            title: "Collector's Vault".to_string(),
            price: Decimal::MAX,
            image: String::new(),
            quantity: 2,
        }];

        let totals = Totals::compute(&lines, DEFAULT_TAX_RATE);
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn test_custom_tax_rate() {
        let catalog = catalog();
        let mut cart = CartManager::new(MemoryStore::new()).with_tax_rate(Decimal::new(25, 2));
        cart.add_item(&catalog, id(3)).unwrap();

        let totals = cart.compute_totals();
        assert_eq!(totals.tax, Decimal::new(1750, 2));
        assert_eq!(totals.total, Decimal::new(8750, 2));
    }

    #[test]
    fn test_mutations_write_through() {
        let catalog = catalog();
        let mut store = MemoryStore::new();

        {
            let mut cart = CartManager::new(&mut store);
            cart.add_item(&catalog, id(1)).unwrap();
            cart.add_item(&catalog, id(2)).unwrap();
            cart.add_item(&catalog, id(1)).unwrap();
            cart.remove_item(id(2)).unwrap();
        }

        let restored = CartManager::load(&mut store);
        assert_eq!(restored.line_count(), 1);
        assert_eq!(restored.line(id(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let catalog = catalog();
        let mut store = MemoryStore::new();

        {
            let mut cart = CartManager::new(&mut store);
            cart.add_item(&catalog, id(1)).unwrap();
            cart.clear().unwrap();
            assert!(cart.is_empty());
        }

        assert!(CartManager::load(&mut store).is_empty());
    }

    #[test]
    fn test_load_from_corrupt_store_is_empty() {
        let store = MemoryStore::with_entry(CartStore::<MemoryStore>::KEY, "[{broken");
        let cart = CartManager::load(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_survives_catalog_change() {
        let mut store = MemoryStore::new();
        {
            let mut cart = CartManager::new(&mut store);
            cart.add_item(&catalog(), id(2)).unwrap();
        }

        // A later catalog no longer carries the item; the line still renders.
        let cart = CartManager::load(&mut store);
        let line = cart.line(id(2)).unwrap();
        assert_eq!(line.title, "RDR2");
        assert_eq!(line.price, Decimal::new(4999, 2));
    }
}
