//! Local price overrides made while drafting a subscription
//!
//! Overrides live only in the draft. Before the draft is submitted they are
//! reconciled against the plan's current prices, so that overrides for
//! prices that disappeared (e.g. after switching plans) or that equal the
//! list price are not sent.

use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PlanPrice;
use super::pricing_errors::PriceOverrideError;

/// An overridden price as sent in a subscription-create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideLineItem {
    pub price_id: String,
    pub amount: Decimal,
}

/// Overridden amounts keyed by price id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceOverrides {
    amounts: BTreeMap<String, Decimal>,
}

impl PriceOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a price. Setting the list amount removes the override.
    pub fn set(&mut self, price: &PlanPrice, amount: Decimal) -> Result<(), PriceOverrideError> {
        check_amount(price, amount)?;

        if amount == price.amount {
            self.amounts.remove(&price.id);
        } else {
            self.amounts.insert(price.id.clone(), amount);
        }
        Ok(())
    }

    /// Drop the override of a price. Returns whether there was one.
    pub fn reset(&mut self, price_id: &str) -> bool {
        self.amounts.remove(price_id).is_some()
    }

    pub fn clear(&mut self) {
        self.amounts.clear();
    }

    pub fn get(&self, price_id: &str) -> Option<Decimal> {
        self.amounts.get(price_id).copied()
    }

    pub fn is_overridden(&self, price_id: &str) -> bool {
        self.amounts.contains_key(price_id)
    }

    /// The amount that will be charged for a price
    pub fn effective_amount(&self, price: &PlanPrice) -> Decimal {
        self.get(&price.id).unwrap_or(price.amount)
    }

    /// Line items for overrides that still apply to `prices`, in price order.
    ///
    /// Overrides for unknown prices or equal to the list amount are skipped.
    /// Kept amounts are checked again, since overrides read from JSON never
    /// went through `set`.
    pub fn reconcile(
        &self,
        prices: &[PlanPrice],
    ) -> Result<Vec<OverrideLineItem>, PriceOverrideError> {
        let mut items = Vec::new();
        for price in prices {
            let Some(amount) = self.get(&price.id) else {
                continue;
            };
            if amount == price.amount {
                continue;
            }
            check_amount(price, amount)?;
            items.push(OverrideLineItem {
                price_id: price.id.clone(),
                amount,
            });
        }
        Ok(items)
    }

    /// Forget overrides for prices not in `prices`. Returns the dropped price ids.
    pub fn prune(&mut self, prices: &[PlanPrice]) -> Vec<String> {
        let stale: Vec<String> = self
            .amounts
            .keys()
            .filter(|id| !prices.iter().any(|price| &price.id == *id))
            .cloned()
            .collect();

        for id in &stale {
            self.amounts.remove(id);
        }
        if !stale.is_empty() {
            debug!("Dropped {} stale price overrides", stale.len());
        }
        stale
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// An override must not be negative or finer than the currency's minor unit.
fn check_amount(price: &PlanPrice, amount: Decimal) -> Result<(), PriceOverrideError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceOverrideError::NegativeAmount {
            price_id: price.id.clone(),
            amount,
        });
    }

    if let Some(max_places) = price.currency.exponent().map(u32::from) {
        if amount.normalize().scale() > max_places {
            return Err(PriceOverrideError::TooPrecise {
                price_id: price.id.clone(),
                amount,
                max_places,
            });
        }
    }
    Ok(())
}
