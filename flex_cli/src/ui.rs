//! Terminal output helpers
//!
//! Status messages go to stderr so that stdout carries only command output.

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use flex_core::query::{FilterCatalog, SearchRequest, TypedBackendFilter, format_instant};
use flex_core::subscription::CreateSubscriptionRequest;
use iso_currency::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

/// How command output is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold().cyan());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

pub fn error_with_details(message: &str, details: &str) {
    error(message);
    eprintln!("  {}", style(details).dim());
}

pub fn debug(message: &str) {
    log::debug!("{}", message);
}

/// Print a value as pretty JSON on stdout.
pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

/// Print a value as one line of JSON on stdout.
pub fn json_line<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

pub fn pretty_output_instant(label: &str, instant: &DateTime<Utc>) {
    println!("{:>10}  {}", style(label).dim(), format_instant(instant));
}

pub fn pretty_output_catalog(catalog: &FilterCatalog) {
    for field in catalog.fields() {
        let operators: Vec<&str> = field.operators.iter().map(|op| op.code()).collect();
        println!(
            "{} {} {}",
            style(&field.field).bold(),
            style(format!("({})", field.label)).dim(),
            style(field.data_type).cyan()
        );
        println!("    operators: {}", operators.join(", "));
        if !field.options.is_empty() {
            let options: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
            println!("    options:   {}", options.join(", "));
        }
    }
}

pub fn pretty_output_request(request: &SearchRequest) {
    if request.filters.is_empty() {
        println!("{}", style("No filters").dim());
    }
    for filter in &request.filters {
        println!(
            "{} {} {}",
            style(&filter.field).bold(),
            style(filter.operator.code()).cyan(),
            filter_value_text(filter)
        );
    }
    for (i, sort) in request.sort.iter().enumerate() {
        println!("{} {}. {} {}", style("sort").dim(), i + 1, sort.field, sort.direction);
    }
    println!(
        "{} limit {} offset {}",
        style("page").dim(),
        request.limit,
        request.offset
    );
}

fn filter_value_text(filter: &TypedBackendFilter) -> String {
    let value = &filter.value;
    if let Some(s) = &value.string {
        format!("\"{}\"", s)
    } else if let Some(n) = value.number {
        n.to_string()
    } else if let Some(d) = &value.date {
        d.clone()
    } else if let Some(items) = &value.array {
        format!("[{}]", items.join(", "))
    } else if let Some(b) = value.boolean {
        b.to_string()
    } else {
        String::new()
    }
}

pub fn pretty_output_subscription(request: &CreateSubscriptionRequest, currency: Currency) {
    println!("{:>14}  {}", style("customer").dim(), request.customer_id);
    println!("{:>14}  {}", style("plan").dim(), request.plan_id);
    println!(
        "{:>14}  every {} × {}",
        style("billing").dim(),
        request.billing_period_count,
        request.billing_period
    );
    println!("{:>14}  {}", style("start").dim(), request.start_date);
    if let Some(end) = &request.end_date {
        println!("{:>14}  {}", style("end").dim(), end);
    }
    println!("{:>14}  {}", style("anchor").dim(), request.billing_anchor);
    for item in &request.override_line_items {
        println!(
            "{:>14}  {} {}",
            style("override").dim(),
            item.price_id,
            style(money(item.amount, currency)).green()
        );
    }
}

fn money(amount: Decimal, currency: Currency) -> String {
    let places = currency.exponent().map(u32::from).unwrap_or(2);
    format!("{} {}", amount.round_dp(places), currency.code())
}
