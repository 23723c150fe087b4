//! Browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # All games
//! gameverse games
//!
//! # Action games with "far" in the title
//! gameverse games --genre action --search far
//!
//! # Quick view of one game
//! gameverse game 3
//! ```

use std::io::Write;

use gameverse_core::{Command, GenreFilter, ItemId, KeyValueStore, Notice, Storefront};

use super::{CommandError, dispatch};
use crate::render::{self, Money};

/// List games passing the given filter.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    genre: GenreFilter,
    search: Option<String>,
    money: Money,
) -> Result<(), CommandError> {
    storefront.dispatch(Command::SetGenre(genre))?;
    if let Some(term) = search {
        storefront.dispatch(Command::SetSearch(term))?;
    }

    let visible = storefront.visible_items();
    tracing::debug!(
        visible = visible.len(),
        filtered = storefront.filter().is_active(),
        "Rendering games"
    );
    render::games(out, &visible, money)?;
    Ok(())
}

/// Show one game in detail.
///
/// # Errors
///
/// Returns an error if the game does not exist or output cannot be written.
pub fn show<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    id: ItemId,
    money: Money,
) -> Result<(), CommandError> {
    match storefront.item(id) {
        Ok(item) => {
            render::game(out, item, money)?;
            Ok(())
        }
        Err(err) => {
            render::notice(out, &Notice::from_error(&err))?;
            Err(err.into())
        }
    }
}

/// Add a game straight from its quick view.
///
/// # Errors
///
/// Returns an error if the game does not exist or the cart cannot be saved.
pub fn buy<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: ItemId,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::AddToCart(id))?;
    Ok(())
}
