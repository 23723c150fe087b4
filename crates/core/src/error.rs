//! Crate-wide error type.
//!
//! Each module reports its own error enum; [`Error`] gathers them so the
//! controller and callers can use `?` across module boundaries. Every
//! variant is recoverable: the renderer shows it as a notification and the
//! session carries on.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::{CheckoutError, ValidationError};
use crate::filter::FilterError;
use crate::storage::StorageError;
use crate::types::ItemId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown item id.
    #[error("Game not found: {0}")]
    NotFound(ItemId),

    /// Catalog data failed to load or validate.
    #[error(transparent)]
    Catalog(CatalogError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Confirmation requested with no placed order.
    #[error("No order is awaiting confirmation")]
    NoPendingOrder,

    /// Sign-in attempted with an empty email or password.
    #[error("Please fill in all fields!")]
    MissingCredentials,
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::NotFound(id),
            other => Self::Catalog(other),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Checkout(CheckoutError::Validation(err))
    }
}

/// Result type alias for [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
