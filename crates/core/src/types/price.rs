//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts stay as [`Decimal`] through every calculation. Rounding to two
//! places only happens in [`Price::display`], at the rendering boundary.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "$19.99").
    ///
    /// Rounds half away from zero to two decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.2}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2), CurrencyCode::USD)
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(usd(4000).display(), "$40.00");
        assert_eq!(
            Price::new(Decimal::from(70), CurrencyCode::USD).display(),
            "$70.00"
        );
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        // 10% tax on 59.99 is 5.999
        let tax = Price::new(Decimal::new(5999, 3), CurrencyCode::USD);
        assert_eq!(tax.display(), "$6.00");

        let half = Price::new(Decimal::new(1005, 3), CurrencyCode::USD);
        assert_eq!(half.display(), "$1.01");
    }

    #[test]
    fn test_display_uses_currency_symbol() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::GBP);
        assert_eq!(price.to_string(), "£19.99");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!(CurrencyCode::AUD.code(), "AUD");
        assert!("JPY".parse::<CurrencyCode>().is_err());
    }
}
