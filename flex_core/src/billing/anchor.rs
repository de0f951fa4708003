//! Calendar-aligned billing anchor calculation
//!
//! An anchor is the midnight (UTC) that starts the next period-aligned
//! boundary after a subscription's start. The calculation always rolls
//! forward, even when the start already sits exactly on a boundary.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use log::warn;

use super::period::BillingPeriod;

/// Compute the next calendar-aligned billing anchor after `start`.
///
/// The result is at 00:00:00 UTC and strictly later than the calendar day of
/// `start`:
/// - `Daily`: the following day
/// - `Weekly`: the following Monday
/// - `Monthly`: the 1st of the next month
/// - `Quarterly`: the 1st of the next January, April, July or October
/// - `HalfYearly`: the 1st of the next January or July
/// - `Annual`: January 1st of the next year
///
/// At the very end of the representable calendar there is no next boundary
/// and `start` is returned.
pub fn calculate_anchor(start: DateTime<Utc>, period: BillingPeriod) -> DateTime<Utc> {
    let date = start.date_naive();

    let boundary = match period {
        BillingPeriod::Daily => date.succ_opt(),
        BillingPeriod::Weekly => {
            let days_until_monday = 7 - u64::from(date.weekday().num_days_from_monday());
            date.checked_add_days(Days::new(days_until_monday))
        }
        BillingPeriod::Monthly => first_of_next_block(date, 1),
        BillingPeriod::Quarterly => first_of_next_block(date, 3),
        BillingPeriod::HalfYearly => first_of_next_block(date, 6),
        BillingPeriod::Annual => first_of_next_block(date, 12),
    };

    match boundary {
        Some(day) => day.and_time(NaiveTime::MIN).and_utc(),
        None => {
            warn!("No {} boundary after {}, keeping start as anchor", period, start);
            start
        }
    }
}

/// Compute the anchor from a raw period code.
///
/// Codes that do not name a billing period leave `start` unchanged. That is
/// almost always a caller bug, so it is logged.
pub fn calculate_anchor_for_code(start: DateTime<Utc>, code: &str) -> DateTime<Utc> {
    match code.parse::<BillingPeriod>() {
        Ok(period) => calculate_anchor(start, period),
        Err(e) => {
            warn!("{}; using start {} as anchor", e, start);
            start
        }
    }
}

/// Successive billing boundaries after `start`, earliest first.
pub fn boundaries(start: DateTime<Utc>, period: BillingPeriod) -> Boundaries {
    Boundaries {
        current: start,
        period,
    }
}

/// The `n`-th boundary after `start` (1-based). `n == 0` returns `start`.
pub fn nth_boundary(start: DateTime<Utc>, period: BillingPeriod, n: usize) -> DateTime<Utc> {
    boundaries(start, period).take(n).last().unwrap_or(start)
}

/// Iterator over successive billing boundaries
#[derive(Debug, Clone)]
pub struct Boundaries {
    current: DateTime<Utc>,
    period: BillingPeriod,
}

impl Iterator for Boundaries {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = calculate_anchor(self.current, self.period);
        if next <= self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

/// First day of the next block of `months` months, where blocks start in January.
fn first_of_next_block(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let next_block_month0 = (date.month0() / months + 1) * months;
    let year = date.year().checked_add(i32::try_from(next_block_month0 / 12).ok()?)?;
    NaiveDate::from_ymd_opt(year, next_block_month0 % 12 + 1, 1)
}
