//! Catalog item identifiers.

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog item.
///
/// Cart lines refer to catalog items by this id rather than by owning a copy
/// of the item, so the id is the join key between the catalog, the cart and
/// the persisted cart encoding.
///
/// # Example
///
/// ```rust
/// # use gameverse_core::ItemId;
/// let id = ItemId::new(3);
/// assert_eq!(id.as_i32(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i32);

impl ItemId {
    /// Create a new ID from an i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for ItemId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
