use chrono::{DateTime, Utc};
use flex_core::billing::{BillingPeriod, boundaries, calculate_anchor_for_code};
use flex_core::query::format_instant;
use serde::Serialize;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Serialize)]
struct AnchorOutput {
    start: String,
    period: String,
    anchor: String,
}

/// Prints the calendar anchor of a start date. Unknown period codes keep the start.
pub fn show_anchor(
    start: DateTime<Utc>,
    period_code: &str,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Computing billing anchor");
    if period_code.parse::<BillingPeriod>().is_err() {
        ui::warning(&format!(
            "'{}' is not a billing period, the anchor is the start date",
            period_code
        ));
    }

    let anchor = calculate_anchor_for_code(start, period_code);

    match output_format {
        OutputFormat::Pretty => {
            ui::pretty_output_instant("start", &start);
            ui::pretty_output_instant("anchor", &anchor);
        }
        OutputFormat::Json => ui::json_output(&AnchorOutput {
            start: format_instant(&start),
            period: period_code.to_string(),
            anchor: format_instant(&anchor),
        }),
    }
    Ok(())
}

/// Prints the next `count` billing boundaries after a start date.
pub fn list_periods(
    start: DateTime<Utc>,
    period: BillingPeriod,
    count: usize,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header(&format!("Listing {} boundaries", period));
    let found: Vec<DateTime<Utc>> = boundaries(start, period).take(count).collect();
    if found.len() < count {
        ui::warning(&format!(
            "Only {} of {} boundaries fit in the calendar",
            found.len(),
            count
        ));
    }

    match output_format {
        OutputFormat::Pretty => {
            for (i, boundary) in found.iter().enumerate() {
                ui::pretty_output_instant(&format!("#{}", i + 1), boundary);
            }
        }
        OutputFormat::Json => {
            let formatted: Vec<String> = found.iter().map(format_instant).collect();
            ui::json_output(&formatted);
        }
    }
    Ok(())
}
