use flex_core::query::FilterCatalog;
use flex_core::query::pages::{PAGE_NAMES, page_catalog};

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Looks up a listing page's catalog, reporting unknown pages.
pub fn load_catalog(page: &str) -> Result<FilterCatalog, CliError> {
    page_catalog(page).ok_or_else(|| {
        ui::error_with_details(
            &format!("No listing page named '{}'", page),
            &format!("Known pages: {}", PAGE_NAMES.join(", ")),
        );
        CliError::UnknownPage
    })
}

/// Prints the filterable fields of a listing page.
pub fn show_catalog(page: &str, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Getting filter catalog");
    let catalog = load_catalog(page)?;
    ui::success(&format!("Page '{}' has {} filterable fields", page, catalog.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_catalog(&catalog),
        OutputFormat::Json => ui::json_output(&catalog),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog() {
        assert!(load_catalog("credit-notes").is_ok());
        assert_eq!(load_catalog("wallets").unwrap_err(), CliError::UnknownPage);
    }
}
