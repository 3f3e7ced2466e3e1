//! Type-safe price representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in minor currency units.
///
/// The catalog's `.js` endpoints return prices as integers in the smallest
/// currency unit (cents for USD), so that is the stored representation.
/// [`Price::amount`] exposes the decimal major-unit value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest currency unit (e.g., cents for USD).
    minor_units: i64,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a price from minor currency units.
    #[must_use]
    pub const fn from_minor_units(minor_units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            minor_units,
            currency_code,
        }
    }

    /// Amount in minor currency units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// The price's currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Decimal amount in major units (e.g., `19.99` for 1999 cents).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.minor_units, 2)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_roundtrip() {
        let price = Price::from_minor_units(1999, CurrencyCode::USD);
        assert_eq!(price.minor_units(), 1999);
        assert_eq!(price.currency_code(), CurrencyCode::USD);
    }

    #[test]
    fn test_amount_scales_to_major_units() {
        let price = Price::from_minor_units(1999, CurrencyCode::USD);
        assert_eq!(price.amount(), Decimal::new(1999, 2));
        assert_eq!(price.amount().to_string(), "19.99");
    }

    #[test]
    fn test_zero_amount() {
        let price = Price::from_minor_units(0, CurrencyCode::USD);
        assert_eq!(price.amount().to_string(), "0.00");
    }
}
