use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use flex_core::billing::BillingPeriod;
use flex_core::config::DEFAULT_PAGE_SIZE;

use super::ui::OutputFormat;

/// Defines the top-level interface for the Flex CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "flex")]
#[command(version, about = "Flex CLI: billing anchors and listing queries in the terminal.")]
pub struct FlexCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, env = "FLEX_FORMAT", default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: FlexCliCommand,
}

/// Defines the available subcommands of the Flex CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum FlexCliCommand {
    /// Compute the calendar billing anchor for a start date.
    Anchor {
        /// Start date (e.g. 2024-01-15 or 2024-01-15T10:30:00Z)
        #[arg(value_parser = parse_start)]
        start: DateTime<Utc>,
        /// Billing period code (e.g. MONTHLY). Unknown codes keep the start date.
        period: String,
    },
    /// List successive billing boundaries after a start date.
    Periods {
        /// Start date (e.g. 2024-01-15 or 2024-01-15T10:30:00Z)
        #[arg(value_parser = parse_start)]
        start: DateTime<Utc>,
        /// Billing period code (e.g. QUARTERLY)
        period: BillingPeriod,
        /// Number of boundaries to list
        #[arg(short, long, default_value_t = 12)]
        count: usize,
    },
    /// Show the filterable fields of a listing page.
    Catalog {
        /// Listing page (e.g. invoices)
        page: String,
    },
    /// Encode filter and sort rows from a JSON file into a search request.
    Encode {
        /// Listing page (e.g. invoices)
        page: String,
        /// JSON file with `filters` and `sort` rows
        file: PathBuf,
        /// Page number, starting at 1
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page_number: usize,
        /// Rows per page
        #[arg(short, long, env = "FLEX_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,
    },
    /// Read query edits from stdin, one JSON object per line, and print debounced search requests.
    Watch {
        /// Listing page (e.g. invoices)
        page: String,
        /// Quiet period before a search is sent, in milliseconds
        #[arg(short, long, env = "FLEX_DEBOUNCE_MS", default_value_t = 300)]
        debounce_ms: u64,
        /// Rows per page
        #[arg(short, long, env = "FLEX_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,
    },
    /// Build a create-subscription request from a JSON draft and plan prices.
    Subscription {
        /// JSON file with `draft` and `prices`
        file: PathBuf,
    },
}

/// Parse an RFC 3339 instant, or a plain date read as midnight UTC.
fn parse_start(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| format!("'{}' is not a date (YYYY-MM-DD) or RFC 3339 instant", value))
}
