//! Subcommand implementations.
//!
//! Each command drives a [`Storefront`] through [`Command`]s and renders the
//! result. Failures are rendered as error notices before being returned, so
//! the user always sees why a command did nothing.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

use std::io::{self, Write};

use gameverse_core::{Command, KeyValueStore, Notice, Storefront};
use thiserror::Error;

use crate::render;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] gameverse_core::Error),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Dispatch `command` and render its notice.
fn dispatch<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    command: Command,
) -> Result<Notice, CommandError> {
    match storefront.dispatch(command) {
        Ok(notice) => {
            render::notice(out, &notice)?;
            Ok(notice)
        }
        Err(err) => {
            render::notice(out, &Notice::from_error(&err))?;
            Err(err.into())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use gameverse_core::{CartManager, Catalog, MemoryStore, Storefront};

    #[allow(clippy::unwrap_used)]
    pub(crate) fn storefront() -> Storefront<MemoryStore> {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        Storefront::new(catalog, CartManager::new(MemoryStore::new()))
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}
