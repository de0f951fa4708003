//! Billing period definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often a subscription is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Annual,
}

impl BillingPeriod {
    /// All billing periods, shortest first.
    pub fn all() -> [BillingPeriod; 6] {
        [
            BillingPeriod::Daily,
            BillingPeriod::Weekly,
            BillingPeriod::Monthly,
            BillingPeriod::Quarterly,
            BillingPeriod::HalfYearly,
            BillingPeriod::Annual,
        ]
    }

    /// The wire code of this period (e.g. `HALF_YEARLY`).
    pub fn code(&self) -> &'static str {
        match self {
            BillingPeriod::Daily => "DAILY",
            BillingPeriod::Weekly => "WEEKLY",
            BillingPeriod::Monthly => "MONTHLY",
            BillingPeriod::Quarterly => "QUARTERLY",
            BillingPeriod::HalfYearly => "HALF_YEARLY",
            BillingPeriod::Annual => "ANNUAL",
        }
    }

    /// Number of calendar months in one period, if the period is month-based.
    pub fn months(&self) -> Option<u32> {
        match self {
            BillingPeriod::Daily | BillingPeriod::Weekly => None,
            BillingPeriod::Monthly => Some(1),
            BillingPeriod::Quarterly => Some(3),
            BillingPeriod::HalfYearly => Some(6),
            BillingPeriod::Annual => Some(12),
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Returned when a string is not a known billing period code
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = BillingPeriod::all().iter().map(|p| p.code()).collect();
        write!(
            f,
            "Unknown billing period '{}'. Expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for PeriodParseError {}

impl FromStr for BillingPeriod {
    type Err = PeriodParseError;

    /// Parses a period code case-insensitively. Dashes and spaces are read as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        BillingPeriod::all()
            .into_iter()
            .find(|period| period.code() == normalized)
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("MONTHLY".parse::<BillingPeriod>(), Ok(BillingPeriod::Monthly));
        assert_eq!("half_yearly".parse::<BillingPeriod>(), Ok(BillingPeriod::HalfYearly));
        assert_eq!("half-yearly".parse::<BillingPeriod>(), Ok(BillingPeriod::HalfYearly));
        assert_eq!(" Annual ".parse::<BillingPeriod>(), Ok(BillingPeriod::Annual));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "FORTNIGHTLY".parse::<BillingPeriod>().unwrap_err();
        assert_eq!(err, PeriodParseError("FORTNIGHTLY".to_string()));
        assert!(err.to_string().contains("HALF_YEARLY"));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&BillingPeriod::HalfYearly).unwrap();
        assert_eq!(json, "\"HALF_YEARLY\"");

        let period: BillingPeriod = serde_json::from_str("\"QUARTERLY\"").unwrap();
        assert_eq!(period, BillingPeriod::Quarterly);
    }

    #[test]
    fn test_display_matches_code() {
        for period in BillingPeriod::all() {
            assert_eq!(period.to_string(), period.code());
        }
    }

    #[test]
    fn test_months() {
        assert_eq!(BillingPeriod::Weekly.months(), None);
        assert_eq!(BillingPeriod::Quarterly.months(), Some(3));
        assert_eq!(BillingPeriod::Annual.months(), Some(12));
    }
}
