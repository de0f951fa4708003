use std::str::FromStr;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use flex_core::billing::BillingPeriod;
use flex_core::pricing::{PlanPrice, PriceOverrideError};
use flex_core::subscription::{BillingCycle, SubscriptionDraft, SubscriptionError};
use iso_currency::Currency;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn pro_plan() -> Vec<PlanPrice> {
    vec![
        PlanPrice::new("price_seat", dec("12.00"), Currency::USD, BillingPeriod::Monthly)
            .with_display_name("Seats"),
        PlanPrice::new("price_base", dec("49.00"), Currency::USD, BillingPeriod::Monthly)
            .with_display_name("Base fee"),
        PlanPrice::new("price_base_annual", dec("490"), Currency::USD, BillingPeriod::Annual),
        PlanPrice::new("price_base_eur", dec("45"), Currency::EUR, BillingPeriod::Monthly),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_from_json_to_request() {
        let json = r#"{
            "customer_id": "cust_42",
            "plan_id": "plan_pro",
            "currency": "USD",
            "billing_period": "MONTHLY",
            "start_date": "2024-03-20T09:00:00Z",
            "billing_cycle": "calendar",
            "overrides": { "price_base": "39.00", "price_removed": "1.00" }
        }"#;
        let draft: SubscriptionDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.billing_period_count, 1);

        let request = draft.to_request(&pro_plan()).unwrap();
        assert_eq!(request.billing_anchor, "2024-04-01T00:00:00Z");
        assert_eq!(request.start_date, "2024-03-20T09:00:00Z");
        assert_eq!(request.override_line_items.len(), 1);
        assert_eq!(request.override_line_items[0].price_id, "price_base");
        assert_eq!(request.override_line_items[0].amount, dec("39"));
    }

    #[test]
    fn test_overrides_survive_only_matching_prices() {
        let start = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap();
        let prices = pro_plan();
        let mut draft =
            SubscriptionDraft::new("cust_1", "plan_pro", Currency::USD, BillingPeriod::Monthly, start);

        draft.overrides.set(&prices[0], dec("10")).unwrap();
        draft.overrides.set(&prices[1], dec("40")).unwrap();
        assert_matches!(
            draft.overrides.set(&prices[1], dec("40.001")),
            Err(PriceOverrideError::TooPrecise { .. })
        );

        // Switching to annual billing leaves only the annual price in play
        draft.billing_period = BillingPeriod::Annual;
        let request = draft.to_request(&prices).unwrap();
        assert!(request.override_line_items.is_empty());
        assert_eq!(request.billing_anchor, "2024-05-05T00:00:00Z");
        assert_eq!(request.billing_cycle, BillingCycle::Anniversary);

        draft.billing_period = BillingPeriod::Monthly;
        let request = draft.to_request(&prices).unwrap();
        let ids: Vec<&str> = request
            .override_line_items
            .iter()
            .map(|item| item.price_id.as_str())
            .collect();
        assert_eq!(ids, vec!["price_seat", "price_base"]);
    }

    #[test]
    fn test_calendar_cycle_anchor_per_period() {
        let start = Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap();
        let prices = vec![PlanPrice::new(
            "price_q",
            dec("100"),
            Currency::USD,
            BillingPeriod::Quarterly,
        )];

        let request = SubscriptionDraft::new(
            "cust_1",
            "plan_q",
            Currency::USD,
            BillingPeriod::Quarterly,
            start,
        )
        .with_billing_cycle(BillingCycle::Calendar)
        .with_end_date(Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap())
        .to_request(&prices)
        .unwrap();

        assert_eq!(request.billing_anchor, "2024-07-01T00:00:00Z");
        assert_eq!(request.end_date.as_deref(), Some("2025-05-15T00:00:00Z"));
    }

    #[test]
    fn test_missing_plan_is_reported_first() {
        let start = Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap();
        let draft = SubscriptionDraft::new("cust_1", "", Currency::USD, BillingPeriod::Monthly, start);

        let err = draft.to_request(&[]).unwrap_err();
        assert_eq!(err, SubscriptionError::MissingPlan);
        assert_eq!(err.to_string(), "A plan is required");
    }
}
