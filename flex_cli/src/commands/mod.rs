mod anchor;
mod catalog;
mod encode;
mod subscription;
mod watch;

pub use anchor::{list_periods, show_anchor};
pub use catalog::{load_catalog, show_catalog};
pub use encode::encode_query;
pub use subscription::create_subscription;
pub use watch::watch_queries;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::CliError;
use crate::ui;

/// Read and parse a JSON input file, reporting failures.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to read '{}'", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })?;

    serde_json::from_str(&source).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to parse '{}'", path.display()),
            &e.to_string(),
        );
        CliError::InputError
    })
}
