//! Plan prices and per-subscription price overrides

mod overrides;
mod pricing_errors;

pub use overrides::*;
pub use pricing_errors::*;

use iso_currency::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::BillingPeriod;

/// A recurring price attached to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub billing_period: BillingPeriod,
    #[serde(default = "default_period_count")]
    pub billing_period_count: u32,
}

fn default_period_count() -> u32 {
    1
}

impl PlanPrice {
    pub fn new(id: &str, amount: Decimal, currency: Currency, billing_period: BillingPeriod) -> Self {
        Self {
            id: id.to_string(),
            display_name: String::new(),
            amount,
            currency,
            billing_period,
            billing_period_count: 1,
        }
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }
}

/// Prices of a plan that a subscription in `currency`, billed every
/// `period_count` × `period`, can use.
pub fn prices_for(
    prices: &[PlanPrice],
    currency: Currency,
    period: BillingPeriod,
    period_count: u32,
) -> Vec<&PlanPrice> {
    prices
        .iter()
        .filter(|price| {
            price.currency == currency
                && price.billing_period == period
                && price.billing_period_count == period_count
        })
        .collect()
}
