//! Order form validation and the two-step checkout flow.
//!
//! Placing an order validates the buyer's fields and snapshots the cart into a
//! [`PendingOrder`]. The cart is only cleared when the caller confirms that
//! order, which lets the rendering layer show its success message first.
//! Abandoning checkout is simply never calling [`PendingOrder::confirm`].

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::cart::{CartLine, CartManager, Totals};
use crate::storage::{KeyValueStore, StorageError};
use crate::types::Email;

/// Minimum card number length once whitespace is removed.
const MIN_CARD_DIGITS: usize = 13;
/// Minimum CVV length.
const MIN_CVV_LENGTH: usize = 3;

/// `MM/YY`, ASCII digits only.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("Invalid regex"));

/// A field of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Name,
    Email,
    Address,
    City,
    Zip,
    CardName,
    CardNumber,
    Expiry,
    Cvv,
}

impl OrderField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "full name",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::Zip => "zip code",
            Self::CardName => "name on card",
            Self::CardNumber => "card number",
            Self::Expiry => "expiry date",
            Self::Cvv => "CVV",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why an order form was rejected. Only the first failing rule is reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields! Missing {0}.")]
    MissingField(OrderField),
    #[error("Please enter a valid email!")]
    InvalidEmail,
    #[error("Please enter a valid card number!")]
    InvalidCard,
    #[error("Please enter a valid expiry date (MM/YY)!")]
    InvalidExpiry,
    #[error("Please enter a valid CVV!")]
    InvalidCvv,
}

impl ValidationError {
    /// The form field the error refers to.
    #[must_use]
    pub const fn field(&self) -> OrderField {
        match self {
            Self::MissingField(field) => *field,
            Self::InvalidEmail => OrderField::Email,
            Self::InvalidCard => OrderField::CardNumber,
            Self::InvalidExpiry => OrderField::Expiry,
            Self::InvalidCvv => OrderField::Cvv,
        }
    }
}

/// Errors from the checkout flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Add games to your cart first!")]
    EmptyCart,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Buyer-entered checkout fields, exactly as typed.
///
/// Card number and CVV are kept secret and redacted from `Debug` output.
#[derive(Clone)]
pub struct OrderFields {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub card_name: String,
    pub card_number: SecretString,
    pub expiry: String,
    pub cvv: SecretString,
}

impl fmt::Debug for OrderFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderFields")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("zip", &self.zip)
            .field("card_name", &self.card_name)
            .field("card_number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl OrderFields {
    /// Fields in the order they are checked for presence.
    fn required(&self) -> [(OrderField, &str); 9] {
        [
            (OrderField::Name, self.name.as_str()),
            (OrderField::Email, self.email.as_str()),
            (OrderField::Address, self.address.as_str()),
            (OrderField::City, self.city.as_str()),
            (OrderField::Zip, self.zip.as_str()),
            (OrderField::CardName, self.card_name.as_str()),
            (OrderField::CardNumber, self.card_number.expose_secret()),
            (OrderField::Expiry, self.expiry.as_str()),
            (OrderField::Cvv, self.cvv.expose_secret()),
        ]
    }

    fn card_digits(&self) -> String {
        self.card_number
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Check the form, stopping at the first failing rule.
///
/// Rules, in order: every field present, email shaped like
/// `name@domain.tld`, card number at least 13 characters ignoring
/// whitespace, expiry `MM/YY`, CVV at least 3 characters.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(fields: &OrderFields) -> Result<(), ValidationError> {
    if let Some((field, _)) = fields.required().into_iter().find(|(_, v)| v.is_empty()) {
        return Err(ValidationError::MissingField(field));
    }

    if Email::parse(&fields.email).is_err() {
        return Err(ValidationError::InvalidEmail);
    }

    if fields.card_digits().chars().count() < MIN_CARD_DIGITS {
        return Err(ValidationError::InvalidCard);
    }

    if !EXPIRY_RE.is_match(&fields.expiry) {
        return Err(ValidationError::InvalidExpiry);
    }

    if fields.cvv.expose_secret().chars().count() < MIN_CVV_LENGTH {
        return Err(ValidationError::InvalidCvv);
    }

    Ok(())
}

/// Refuse to start checkout with nothing to buy.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn begin_checkout<S: KeyValueStore>(cart: &CartManager<S>) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(())
}

/// Validate `fields` and snapshot the cart into a pending order.
///
/// The cart itself is left untouched.
///
/// # Errors
///
/// Returns a [`ValidationError`] for a bad form, or
/// [`CheckoutError::EmptyCart`] if the form is valid but the cart is empty.
pub fn place_order<S: KeyValueStore>(
    cart: &CartManager<S>,
    fields: &OrderFields,
) -> Result<PendingOrder, CheckoutError> {
    validate(fields)?;
    begin_checkout(cart)?;

    let digits = fields.card_digits();
    let last4: String = digits
        .chars()
        .skip(digits.chars().count().saturating_sub(4))
        .collect();

    let order = PendingOrder {
        lines: cart.lines().to_vec(),
        totals: cart.compute_totals(),
        item_count: cart.total_item_count(),
        buyer: Buyer {
            name: fields.name.clone(),
            email: fields.email.clone(),
            address: fields.address.clone(),
            city: fields.city.clone(),
            zip: fields.zip.clone(),
        },
        card_last4: last4,
    };

    tracing::info!(
        lines = order.lines.len(),
        total = %order.totals.total,
        "Order placed, awaiting confirmation"
    );
    Ok(order)
}

/// Shipping and contact details of the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Buyer {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
}

/// A validated order whose cart has not been cleared yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingOrder {
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub item_count: u64,
    pub buyer: Buyer,
    /// Last four characters of the card number.
    pub card_last4: String,
}

impl PendingOrder {
    /// Card number masked for display.
    #[must_use]
    pub fn masked_card(&self) -> String {
        format!("**** {}", self.card_last4)
    }

    /// Finish the order: clear the cart and hand back a receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the emptied cart cannot be persisted.
    pub fn confirm<S: KeyValueStore>(
        self,
        cart: &mut CartManager<S>,
    ) -> Result<OrderReceipt, StorageError> {
        cart.clear()?;
        tracing::info!(total = %self.totals.total, "Order confirmed, cart cleared");
        Ok(OrderReceipt {
            item_count: self.item_count,
            total: self.totals.total,
            email: self.buyer.email,
        })
    }
}

/// What remains of an order once it is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub item_count: u64,
    pub total: Decimal,
    pub email: String,
}
