use std::path::Path;

use flex_core::pricing::PlanPrice;
use flex_core::subscription::{CreateSubscriptionRequest, SubscriptionDraft};
use serde::Deserialize;

use super::read_json_file;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Debug, Deserialize)]
struct SubscriptionInput {
    draft: SubscriptionDraft,
    #[serde(default)]
    prices: Vec<PlanPrice>,
}

/// Reads a draft and its plan's prices from `file` and builds the request.
pub fn build_subscription_request(
    file: &Path,
) -> Result<(SubscriptionDraft, CreateSubscriptionRequest), CliError> {
    let input: SubscriptionInput = read_json_file(file)?;
    let request = input.draft.to_request(&input.prices).map_err(|e| {
        ui::error(&e.to_string());
        CliError::SubscriptionError
    })?;
    Ok((input.draft, request))
}

/// Prints the create-subscription request for the draft in `file`.
pub fn create_subscription(file: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Building subscription request");
    let (draft, request) = build_subscription_request(file)?;
    ui::success(&format!(
        "Subscription for '{}' on plan '{}' with {} price overrides",
        request.customer_id,
        request.plan_id,
        request.override_line_items.len()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_subscription(&request, draft.currency),
        OutputFormat::Json => ui::json_output(&request),
    }
    Ok(())
}
