mod cli;
mod commands;
mod errors;
mod ui;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use flex_core::config::EncoderConfig;
use flex_core::query::Pagination;

use cli::{FlexCli, FlexCliCommand};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = FlexCli::parse();
    initialize_logging(cli.verbose);

    let result = match cli.command {
        FlexCliCommand::Anchor { start, period } => {
            commands::show_anchor(start, &period, cli.format)
        }
        FlexCliCommand::Periods {
            start,
            period,
            count,
        } => commands::list_periods(start, period, count, cli.format),
        FlexCliCommand::Catalog { page } => commands::show_catalog(&page, cli.format),
        FlexCliCommand::Encode {
            page,
            file,
            page_number,
            limit,
        } => {
            let pagination = Pagination::new(page_number.max(1), limit.max(1));
            commands::encode_query(&page, &file, pagination, cli.format)
        }
        FlexCliCommand::Watch {
            page,
            debounce_ms,
            limit,
        } => {
            let config = EncoderConfig::default()
                .with_debounce(Duration::from_millis(debounce_ms))
                .with_page_size(limit);
            commands::watch_queries(&page, config, cli.format).await
        }
        FlexCliCommand::Subscription { file } => {
            commands::create_subscription(&file, cli.format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::debug(&format!("Exiting: {}", e));
            e.exit_code()
        }
    }
}

fn initialize_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}
