use std::fmt;

use rust_decimal::Decimal;

/// Errors from overriding a plan price
#[derive(Debug, Clone, PartialEq)]
pub enum PriceOverrideError {
    NegativeAmount {
        price_id: String,
        amount: Decimal,
    },
    /// More decimal places than the price's currency has
    TooPrecise {
        price_id: String,
        amount: Decimal,
        max_places: u32,
    },
}

impl fmt::Display for PriceOverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceOverrideError::NegativeAmount { price_id, amount } => {
                write!(
                    f,
                    "Override for price '{}' cannot be negative (got {})",
                    price_id, amount
                )
            }
            PriceOverrideError::TooPrecise {
                price_id,
                amount,
                max_places,
            } => {
                write!(
                    f,
                    "Override {} for price '{}' has more than {} decimal places",
                    amount, price_id, max_places
                )
            }
        }
    }
}

impl std::error::Error for PriceOverrideError {}
