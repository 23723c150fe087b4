//! Integration tests for checkout: validation order, placement and
//! confirmation.

use gameverse_core::checkout::validate;
use gameverse_core::{
    CheckoutError, Command, Error, ItemId, MemoryStore, OrderField, ValidationError,
};
use gameverse_integration_tests::{storefront, storefront_with, valid_order};
use secrecy::SecretString;

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_valid_order_passes() {
    assert_eq!(validate(&valid_order()), Ok(()));
}

#[test]
fn test_bad_email() {
    let mut fields = valid_order();
    fields.email = "bad".to_string();
    assert_eq!(validate(&fields), Err(ValidationError::InvalidEmail));
}

#[test]
fn test_twelve_digit_card() {
    let mut fields = valid_order();
    fields.card_number = SecretString::from("4111 1111 111");
    assert_eq!(validate(&fields), Err(ValidationError::InvalidCard));
}

#[test]
fn test_bad_expiry() {
    let mut fields = valid_order();
    fields.expiry = "13-25".to_string();
    assert_eq!(validate(&fields), Err(ValidationError::InvalidExpiry));
}

#[test]
fn test_first_failure_wins() {
    let mut fields = valid_order();
    fields.email = "bad".to_string();
    fields.expiry = "13-25".to_string();
    fields.cvv = SecretString::from("1");
    assert_eq!(validate(&fields), Err(ValidationError::InvalidEmail));

    fields.name = String::new();
    let err = validate(&fields).expect_err("name missing");
    assert_eq!(err, ValidationError::MissingField(OrderField::Name));
    assert_eq!(err.field(), OrderField::Name);
}

// =============================================================================
// Placement and confirmation
// =============================================================================

#[test]
fn test_checkout_with_empty_cart() {
    let mut store = storefront();
    assert_eq!(
        store.dispatch(Command::BeginCheckout),
        Err(Error::Checkout(CheckoutError::EmptyCart))
    );
}

#[test]
fn test_confirmed_order_clears_persisted_cart() {
    let mut backing = MemoryStore::new();
    {
        let mut store = storefront_with(&mut backing);
        store
            .dispatch(Command::AddToCart(ItemId::new(2)))
            .expect("item exists");
        store
            .dispatch(Command::PlaceOrder(Box::new(valid_order())))
            .expect("order is valid");

        // Success message shown; cart not yet cleared.
        assert_eq!(store.cart().line_count(), 1);

        store
            .dispatch(Command::ConfirmOrder)
            .expect("order confirms");
    }

    let store = storefront_with(&mut backing);
    assert!(store.cart().is_empty());
}

#[test]
fn test_abandoned_checkout_keeps_cart() {
    let mut backing = MemoryStore::new();
    {
        let mut store = storefront_with(&mut backing);
        store
            .dispatch(Command::AddToCart(ItemId::new(2)))
            .expect("item exists");
        store
            .dispatch(Command::PlaceOrder(Box::new(valid_order())))
            .expect("order is valid");
        // Session ends without confirmation.
    }

    let store = storefront_with(&mut backing);
    assert_eq!(store.cart().line_count(), 1);
    assert!(store.pending_order().is_none());
}
