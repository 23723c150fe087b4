//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! gameverse cart show
//! gameverse cart add 1
//! gameverse cart remove 1
//! gameverse cart clear
//! ```

use std::io::Write;

use gameverse_core::{Command, ItemId, KeyValueStore, Storefront};

use super::{CommandError, dispatch};
use crate::render::{self, Money};

/// Print the cart with its totals.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    money: Money,
) -> Result<(), CommandError> {
    render::cart(out, storefront.cart(), money)?;
    Ok(())
}

/// Add one unit of a game, then print the cart.
///
/// # Errors
///
/// Returns an error if the game does not exist or the cart cannot be saved.
pub fn add<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: ItemId,
    money: Money,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::AddToCart(id))?;
    show(storefront, out, money)
}

/// Remove a game's line entirely, then print the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: ItemId,
    money: Money,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::RemoveFromCart(id))?;
    show(storefront, out, money)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::ClearCart)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::{storefront, text};

    #[test]
    fn test_add_twice_then_remove() {
        let mut storefront = storefront();
        let mut out = Vec::new();

        add(&mut storefront, &mut out, ItemId::new(6), Money::default()).unwrap();
        add(&mut storefront, &mut out, ItemId::new(6), Money::default()).unwrap();
        assert_eq!(storefront.cart().line_count(), 1);
        let rendered = text(out);
        assert!(rendered.contains("Far Cry 5"));
        assert!(rendered.contains(" x2 "));

        let mut out = Vec::new();
        remove(&mut storefront, &mut out, ItemId::new(6), Money::default()).unwrap();
        let text = text(out);
        assert!(text.starts_with("• Far Cry 5 removed from cart\n"));
        assert!(text.contains("Your cart is empty"));
    }

    #[test]
    fn test_add_unknown_renders_error() {
        let mut storefront = storefront();
        let mut out = Vec::new();
        assert!(add(&mut storefront, &mut out, ItemId::new(0), Money::default()).is_err());
        assert_eq!(text(out), "✖ Game not found: 0\n");
    }

    #[test]
    fn test_clear() {
        let mut storefront = storefront();
        let mut out = Vec::new();
        add(&mut storefront, &mut out, ItemId::new(1), Money::default()).unwrap();
        clear(&mut storefront, &mut out).unwrap();
        assert!(storefront.cart().is_empty());
    }
}
