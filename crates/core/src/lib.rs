//! GameVerse Core - storefront state model.
//!
//! This crate holds everything a GameVerse front end needs to run a shopping
//! session, without any rendering:
//! - a read-only game catalog
//! - genre filter and title search over it
//! - a cart with derived totals, persisted through a key-value store
//! - checkout form validation and a two-step place/confirm order flow
//!
//! # Architecture
//!
//! All operations are synchronous and run to completion. The only external
//! collaborator is the [`KeyValueStore`] the cart is persisted to; the crate
//! reads no environment variables and owns no timers.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and genres
//! - [`catalog`] - The catalog and its items
//! - [`filter`] - Filter state and the visible-items predicate
//! - [`cart`] - Cart lines, totals and the cart manager
//! - [`storage`] - Persistence boundary
//! - [`checkout`] - Order validation and placement
//! - [`storefront`] - Command-driven session controller

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod filter;
pub mod storage;
pub mod storefront;
pub mod types;

pub use cart::{CartLine, CartManager, DEFAULT_TAX_RATE, Totals};
pub use catalog::{Catalog, CatalogError, Item};
pub use checkout::{
    CheckoutError, OrderField, OrderFields, OrderReceipt, PendingOrder, ValidationError,
};
pub use error::{Error, Result};
pub use filter::{FilterError, FilterState, GenreFilter, visible_items};
pub use storage::{CartStore, KeyValueStore, MemoryStore, StorageError};
pub use storefront::{Command, Notice, NoticeLevel, Storefront};
pub use types::*;
