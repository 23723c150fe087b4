//! Session controller tying catalog, cart, filter and checkout together.
//!
//! A renderer owns one [`Storefront`], reads state through its accessors and
//! changes state only by dispatching [`Command`]s. Each command returns a
//! [`Notice`] for the renderer's transient notification area.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use crate::cart::{CartManager, Totals};
use crate::catalog::{Catalog, Item};
use crate::checkout::{self, OrderFields, PendingOrder};
use crate::error::{Error, Result};
use crate::filter::{self, FilterState, GenreFilter};
use crate::storage::KeyValueStore;
use crate::types::ItemId;

/// Shown after an order is placed, before the cart is cleared.
pub const ORDER_PLACED_MESSAGE: &str = "Order Placed Successfully! Your games will be available \
     for download within 24 hours. Thank you for your purchase!";

/// A user action.
#[derive(Debug, Clone)]
pub enum Command {
    SetGenre(GenreFilter),
    SetSearch(String),
    AddToCart(ItemId),
    RemoveFromCart(ItemId),
    ClearCart,
    BeginCheckout,
    PlaceOrder(Box<OrderFields>),
    ConfirmOrder,
    CancelOrder,
    /// Greet a returning customer. No account state is kept.
    Login {
        email: String,
        password: SecretString,
    },
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message for the renderer to show briefly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Error notice carrying the error's user-facing text.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let message = match err {
            Error::Storage(_) => "Your cart could not be saved.".to_string(),
            other => other.to_string(),
        };
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }
}

/// One browsing session.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Arc<Catalog>,
    cart: CartManager<S>,
    filter: FilterState,
    pending: Option<PendingOrder>,
}

impl<S: KeyValueStore> Storefront<S> {
    pub fn new(catalog: Arc<Catalog>, cart: CartManager<S>) -> Self {
        Self {
            catalog,
            cart,
            filter: FilterState::default(),
            pending: None,
        }
    }

    /// Apply `command`.
    ///
    /// Any change to the cart discards a placed but unconfirmed order, since
    /// its snapshot no longer matches the cart.
    ///
    /// # Errors
    ///
    /// Returns the failure of the underlying operation. State is left as the
    /// operation left it; nothing is rolled back.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, command: Command) -> Result<Notice> {
        match command {
            Command::SetGenre(genre) => {
                self.filter.genre = genre;
                Ok(self.filter_notice())
            }
            Command::SetSearch(term) => {
                self.filter.set_search(term);
                Ok(self.filter_notice())
            }
            Command::AddToCart(id) => {
                let title = self.catalog.find_by_id(id)?.title.as_str();
                self.pending = None;
                self.cart.add_item(&self.catalog, id)?;
                Ok(Notice::success(format!("{title} added to cart!")))
            }
            Command::RemoveFromCart(id) => {
                let title = self.cart.line(id).map(|line| line.title.clone());
                if self.cart.remove_item(id)? {
                    self.pending = None;
                }
                Ok(title.map_or_else(
                    || Notice::info("That game is not in your cart."),
                    |title| Notice::info(format!("{title} removed from cart")),
                ))
            }
            Command::ClearCart => {
                self.pending = None;
                self.cart.clear()?;
                Ok(Notice::info("Your cart is empty"))
            }
            Command::BeginCheckout => {
                checkout::begin_checkout(&self.cart)?;
                Ok(Notice::info("Proceeding to checkout"))
            }
            Command::PlaceOrder(fields) => {
                let order = checkout::place_order(&self.cart, &fields)?;
                self.pending = Some(order);
                Ok(Notice::success(ORDER_PLACED_MESSAGE))
            }
            Command::ConfirmOrder => {
                let order = self.pending.take().ok_or(Error::NoPendingOrder)?;
                let receipt = order.confirm(&mut self.cart)?;
                Ok(Notice::success(format!(
                    "Thank you! A confirmation was sent to {}.",
                    receipt.email
                )))
            }
            Command::CancelOrder => {
                self.pending = None;
                Ok(Notice::info("Checkout cancelled"))
            }
            Command::Login { email, password } => {
                if email.is_empty() || password.expose_secret().is_empty() {
                    return Err(Error::MissingCredentials);
                }
                tracing::debug!("Signed in");
                Ok(Notice::success(format!("Welcome back, {email}!")))
            }
            Command::SignUp => Ok(Notice::info("Sign up feature coming soon!")),
        }
    }

    /// Items passing the current filter, in catalog order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&Item> {
        filter::visible_items(&self.catalog, &self.filter)
    }

    /// Look up a catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn item(&self, id: ItemId) -> Result<&Item> {
        Ok(self.catalog.find_by_id(id)?)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        self.cart.compute_totals()
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The order awaiting confirmation, if one was placed.
    #[must_use]
    pub const fn pending_order(&self) -> Option<&PendingOrder> {
        self.pending.as_ref()
    }

    fn filter_notice(&self) -> Notice {
        match self.visible_items().len() {
            0 => Notice::info("No games found matching your criteria."),
            1 => Notice::info("Showing 1 game"),
            n => Notice::info(format!("Showing {n} games")),
        }
    }
}
