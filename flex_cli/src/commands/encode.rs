use std::path::Path;

use flex_core::query::{FilterRow, FilterRowState, Pagination, SearchRequest, SortOption};
use serde::Deserialize;

use super::{load_catalog, read_json_file};
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Filter and sort rows as saved by the console
#[derive(Debug, Deserialize)]
struct QueryInput {
    #[serde(default)]
    filters: Vec<FilterRowState>,
    #[serde(default)]
    sort: Vec<SortOption>,
}

/// Reads rows from `file` and encodes them for `page`.
pub fn build_search_request(
    page: &str,
    file: &Path,
    pagination: Pagination,
) -> Result<SearchRequest, CliError> {
    let catalog = load_catalog(page)?;
    let input: QueryInput = read_json_file(file)?;
    let rows: Vec<FilterRow> = input.filters.into_iter().map(FilterRow::from).collect();

    let request = SearchRequest::encode(&rows, &input.sort, &catalog, pagination);
    if request.filters.len() < rows.len() {
        ui::debug(&format!(
            "Dropped {} incomplete or invalid filter rows",
            rows.len() - request.filters.len()
        ));
    }
    Ok(request)
}

/// Prints the search request for the rows in `file`.
pub fn encode_query(
    page: &str,
    file: &Path,
    pagination: Pagination,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Encoding search request");
    let request = build_search_request(page, file, pagination)?;
    ui::success(&format!(
        "Encoded {} filters and {} sort keys",
        request.filters.len(),
        request.sort.len()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_request(&request),
        OutputFormat::Json => ui::json_output(&request),
    }
    Ok(())
}
