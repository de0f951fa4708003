//! Subscription drafts and the create-subscription request
//!
//! A draft collects what the subscription form edits. Turning it into a
//! request validates it, picks the plan prices that match its currency and
//! billing period, computes the billing anchor and reconciles price
//! overrides.

use std::fmt;

use chrono::{DateTime, Utc};
use iso_currency::Currency;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::billing::{BillingPeriod, calculate_anchor};
use crate::pricing::{OverrideLineItem, PlanPrice, PriceOverrideError, PriceOverrides, prices_for};
use crate::query::format_instant;

/// How billing periods line up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    /// Periods start on the anniversary of the subscription start
    #[default]
    Anniversary,
    /// Periods start on calendar boundaries (1st of month, Monday, ...)
    Calendar,
}

/// Subscription form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub customer_id: String,
    pub plan_id: String,
    pub currency: Currency,
    pub billing_period: BillingPeriod,
    #[serde(default = "default_period_count")]
    pub billing_period_count: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub overrides: PriceOverrides,
}

fn default_period_count() -> u32 {
    1
}

/// Body of `POST /subscriptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub customer_id: String,
    pub plan_id: String,
    pub currency: String,
    pub billing_period: BillingPeriod,
    pub billing_period_count: u32,
    pub billing_cycle: BillingCycle,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub billing_anchor: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub override_line_items: Vec<OverrideLineItem>,
}

/// Reasons a draft cannot be submitted
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionError {
    MissingCustomer,
    MissingPlan,
    ZeroPeriodCount,
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    NoMatchingPrices {
        plan_id: String,
        currency: Currency,
        billing_period: BillingPeriod,
        billing_period_count: u32,
    },
    /// A kept price override is negative or too precise for its currency
    InvalidOverride(PriceOverrideError),
}

impl fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionError::MissingCustomer => write!(f, "A customer is required"),
            SubscriptionError::MissingPlan => write!(f, "A plan is required"),
            SubscriptionError::ZeroPeriodCount => {
                write!(f, "Billing period count must be at least 1")
            }
            SubscriptionError::EndBeforeStart { start, end } => write!(
                f,
                "End date {} must be after start date {}",
                format_instant(end),
                format_instant(start)
            ),
            SubscriptionError::NoMatchingPrices {
                plan_id,
                currency,
                billing_period,
                billing_period_count,
            } => {
                write!(f, "Plan '{}' has no {} prices billed ", plan_id, currency.code())?;
                if *billing_period_count == 1 {
                    write!(f, "{}", billing_period)
                } else {
                    write!(f, "every {} × {}", billing_period_count, billing_period)
                }
            }
            SubscriptionError::InvalidOverride(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubscriptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubscriptionError::InvalidOverride(e) => Some(e),
            _ => None,
        }
    }
}

impl SubscriptionDraft {
    pub fn new(
        customer_id: &str,
        plan_id: &str,
        currency: Currency,
        billing_period: BillingPeriod,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            plan_id: plan_id.to_string(),
            currency,
            billing_period,
            billing_period_count: 1,
            start_date,
            end_date: None,
            billing_cycle: BillingCycle::default(),
            overrides: PriceOverrides::new(),
        }
    }

    pub fn with_billing_cycle(mut self, billing_cycle: BillingCycle) -> Self {
        self.billing_cycle = billing_cycle;
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// The instant billing periods are aligned to
    pub fn billing_anchor(&self) -> DateTime<Utc> {
        match self.billing_cycle {
            BillingCycle::Anniversary => self.start_date,
            BillingCycle::Calendar => calculate_anchor(self.start_date, self.billing_period),
        }
    }

    /// Validate the draft against the plan's prices and build the request.
    pub fn to_request(
        &self,
        plan_prices: &[PlanPrice],
    ) -> Result<CreateSubscriptionRequest, SubscriptionError> {
        if self.customer_id.trim().is_empty() {
            return Err(SubscriptionError::MissingCustomer);
        }
        if self.plan_id.trim().is_empty() {
            return Err(SubscriptionError::MissingPlan);
        }
        if self.billing_period_count == 0 {
            return Err(SubscriptionError::ZeroPeriodCount);
        }
        if let Some(end) = self.end_date {
            if end <= self.start_date {
                return Err(SubscriptionError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        let prices: Vec<PlanPrice> = prices_for(
            plan_prices,
            self.currency,
            self.billing_period,
            self.billing_period_count,
        )
        .into_iter()
        .cloned()
        .collect();
        if prices.is_empty() {
            return Err(SubscriptionError::NoMatchingPrices {
                plan_id: self.plan_id.clone(),
                currency: self.currency,
                billing_period: self.billing_period,
                billing_period_count: self.billing_period_count,
            });
        }

        let override_line_items = self
            .overrides
            .reconcile(&prices)
            .map_err(SubscriptionError::InvalidOverride)?;
        if override_line_items.len() != self.overrides.len() {
            debug!(
                "Skipping {} overrides that no longer apply to plan '{}'",
                self.overrides.len() - override_line_items.len(),
                self.plan_id
            );
        }

        Ok(CreateSubscriptionRequest {
            customer_id: self.customer_id.trim().to_string(),
            plan_id: self.plan_id.trim().to_string(),
            currency: self.currency.code().to_lowercase(),
            billing_period: self.billing_period,
            billing_period_count: self.billing_period_count,
            billing_cycle: self.billing_cycle,
            start_date: format_instant(&self.start_date),
            end_date: self.end_date.as_ref().map(format_instant),
            billing_anchor: format_instant(&self.billing_anchor()),
            override_line_items,
        })
    }
}
