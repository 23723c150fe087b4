//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! gameverse checkout --name "Ada Lovelace" --email ada@example.com \
//!     --address "12 Analytical Way" --city London --zip NW1 \
//!     --card-name "A Lovelace" --card-number "4111 1111 1111 1111" \
//!     --expiry 09/27 --cvv 123
//! ```
//!
//! Missing flags are treated as empty fields, so validation reports them the
//! same way the order form does.

use std::io::Write;

use clap::Args;
use gameverse_core::{Command, KeyValueStore, OrderFields, Storefront};
use secrecy::SecretString;

use super::{CommandError, dispatch};
use crate::render::{self, Money};

/// Buyer details for an order.
#[derive(Args, Clone, Default)]
pub struct CheckoutArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,
    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,
    /// City
    #[arg(long, default_value = "")]
    pub city: String,
    /// Zip or postal code
    #[arg(long, default_value = "")]
    pub zip: String,
    /// Name on card
    #[arg(long, default_value = "")]
    pub card_name: String,
    /// Card number (spaces allowed)
    #[arg(long, default_value = "")]
    pub card_number: String,
    /// Expiry as MM/YY
    #[arg(long, default_value = "")]
    pub expiry: String,
    /// Card security code
    #[arg(long, default_value = "")]
    pub cvv: String,
}

impl From<CheckoutArgs> for OrderFields {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            address: args.address,
            city: args.city,
            zip: args.zip,
            card_name: args.card_name,
            card_number: SecretString::from(args.card_number),
            expiry: args.expiry,
            cvv: SecretString::from(args.cvv),
        }
    }
}

/// Place an order for the current cart and confirm it.
///
/// The order review is printed between placing and confirming; the cart is
/// only cleared by the confirmation.
///
/// # Errors
///
/// Returns an error if the cart is empty, the fields are invalid, or the
/// emptied cart cannot be saved.
pub fn run<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    args: CheckoutArgs,
    money: Money,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::BeginCheckout)?;
    dispatch(
        storefront,
        out,
        Command::PlaceOrder(Box::new(OrderFields::from(args))),
    )?;

    if let Some(order) = storefront.pending_order() {
        render::order_review(out, order, money)?;
    }

    dispatch(storefront, out, Command::ConfirmOrder)?;
    Ok(())
}
