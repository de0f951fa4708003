//! Filter catalogs of the console's listing pages

use super::catalog::{FilterCatalog, FilterField};
use super::types::{DataType, FilterFieldType, FilterOperator};
use crate::billing::BillingPeriod;

/// Names of the pages with a filter catalog
pub const PAGE_NAMES: &[&str] = &[
    "customers",
    "subscriptions",
    "invoices",
    "events",
    "features",
    "plans",
    "credit_notes",
];

/// Look up a page's filter catalog by name (e.g. `"invoices"`).
pub fn page_catalog(name: &str) -> Option<FilterCatalog> {
    let normalized = name.trim().to_lowercase().replace('-', "_");
    match normalized.as_str() {
        "customers" => Some(customers()),
        "subscriptions" => Some(subscriptions()),
        "invoices" => Some(invoices()),
        "events" => Some(events()),
        "features" => Some(features()),
        "plans" => Some(plans()),
        "credit_notes" => Some(credit_notes()),
        _ => None,
    }
}

pub fn customers() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(FilterField::new("name", DataType::String))
        .with_field(FilterField::new("external_id", DataType::String).with_label("External ID"))
        .with_field(FilterField::new("email", DataType::String))
        .with_field(FilterField::new("created_at", DataType::Date))
}

pub fn subscriptions() -> FilterCatalog {
    let periods: Vec<(&str, &str)> = BillingPeriod::all()
        .iter()
        .map(|period| (period.code(), period_label(*period)))
        .collect();

    FilterCatalog::new()
        .with_field(FilterField::new("customer_id", DataType::String).with_label("Customer"))
        .with_field(FilterField::new("plan_id", DataType::String).with_label("Plan"))
        .with_field(
            FilterField::new("subscription_status", DataType::Array)
                .with_label("Status")
                .with_options(&[
                    ("active", "Active"),
                    ("trialing", "Trialing"),
                    ("paused", "Paused"),
                    ("cancelled", "Cancelled"),
                    ("incomplete", "Incomplete"),
                ]),
        )
        .with_field(FilterField::new("billing_period", DataType::Array).with_options(&periods))
        .with_field(FilterField::new("start_date", DataType::Date))
        .with_field(FilterField::new("created_at", DataType::Date))
}

pub fn invoices() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(
            FilterField::new("invoice_number", DataType::String)
                .with_operators(&[FilterOperator::Equals, FilterOperator::Contains]),
        )
        .with_field(FilterField::new("customer_id", DataType::String).with_label("Customer"))
        .with_field(
            FilterField::new("invoice_status", DataType::Array)
                .with_label("Status")
                .with_options(&[
                    ("draft", "Draft"),
                    ("finalized", "Finalized"),
                    ("voided", "Voided"),
                ]),
        )
        .with_field(
            FilterField::new("payment_status", DataType::Array).with_options(&[
                ("pending", "Pending"),
                ("succeeded", "Succeeded"),
                ("failed", "Failed"),
                ("refunded", "Refunded"),
            ]),
        )
        .with_field(FilterField::new("amount_due", DataType::Number))
        .with_field(FilterField::new("due_date", DataType::Date))
        .with_field(FilterField::new("created_at", DataType::Date))
}

pub fn events() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(
            FilterField::new("event_name", DataType::String)
                .with_operators(&[FilterOperator::Equals]),
        )
        .with_field(
            FilterField::new("external_customer_id", DataType::String)
                .with_label("External Customer ID")
                .with_operators(&[FilterOperator::Equals]),
        )
        .with_field(FilterField::new("timestamp", DataType::Date))
}

pub fn features() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(FilterField::new("name", DataType::String))
        .with_field(FilterField::new("lookup_key", DataType::String))
        .with_field(
            FilterField::new("type", DataType::Array).with_options(&[
                ("metered", "Metered"),
                ("boolean", "Boolean"),
                ("static", "Static"),
            ]),
        )
        .with_field(
            FilterField::new("is_archived", DataType::Boolean)
                .with_label("Archived")
                .with_field_type(FilterFieldType::Checkbox),
        )
        .with_field(FilterField::new("created_at", DataType::Date))
}

pub fn plans() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(FilterField::new("name", DataType::String))
        .with_field(FilterField::new("lookup_key", DataType::String))
        .with_field(FilterField::new("created_at", DataType::Date))
}

pub fn credit_notes() -> FilterCatalog {
    FilterCatalog::new()
        .with_field(FilterField::new("invoice_id", DataType::String).with_label("Invoice"))
        .with_field(
            FilterField::new("credit_note_status", DataType::Array)
                .with_label("Status")
                .with_options(&[
                    ("draft", "Draft"),
                    ("finalized", "Finalized"),
                    ("voided", "Voided"),
                ]),
        )
        .with_field(
            FilterField::new("credit_note_type", DataType::Array)
                .with_label("Type")
                .with_options(&[("refund", "Refund"), ("adjustment", "Adjustment")]),
        )
        .with_field(FilterField::new("total_amount", DataType::Number))
        .with_field(FilterField::new("created_at", DataType::Date))
}

fn period_label(period: BillingPeriod) -> &'static str {
    match period {
        BillingPeriod::Daily => "Daily",
        BillingPeriod::Weekly => "Weekly",
        BillingPeriod::Monthly => "Monthly",
        BillingPeriod::Quarterly => "Quarterly",
        BillingPeriod::HalfYearly => "Half-yearly",
        BillingPeriod::Annual => "Annual",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_resolves() {
        for name in PAGE_NAMES {
            let catalog = page_catalog(name).unwrap();
            assert!(!catalog.is_empty(), "{} has no fields", name);
        }
    }

    #[test]
    fn test_page_name_normalization() {
        assert!(page_catalog("Credit-Notes").is_some());
        assert!(page_catalog("wallets").is_none());
    }

    #[test]
    fn test_every_field_has_a_default_operator() {
        for name in PAGE_NAMES {
            for field in page_catalog(name).unwrap().fields() {
                assert!(
                    field.default_operator().is_some(),
                    "{}.{} has no operator",
                    name,
                    field.field
                );
            }
        }
    }

    #[test]
    fn test_subscription_billing_period_options() {
        let catalog = subscriptions();
        let field = catalog.get("billing_period").unwrap();
        assert_eq!(field.options.len(), 6);
        assert_eq!(field.options[4].value, "HALF_YEARLY");
        assert_eq!(field.label, "Billing Period");
    }

    #[test]
    fn test_events_exact_match_only() {
        let catalog = events();
        let field = catalog.get("event_name").unwrap();
        assert_eq!(field.default_operator(), Some(FilterOperator::Equals));
    }
}
