//! Watch command: drives a query session from edit events on stdin.

use flex_core::config::EncoderConfig;
use flex_core::query::{QueryEdit, QuerySession, SearchRequest};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::load_catalog;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

fn print_request(request: &SearchRequest, output_format: OutputFormat) {
    match output_format {
        OutputFormat::Pretty => {
            ui::header("Search");
            ui::pretty_output_request(request);
        }
        OutputFormat::Json => ui::json_line(request),
    }
}

/// Applies edits read from stdin and prints each debounced search request.
pub async fn watch_queries(
    page: &str,
    config: EncoderConfig,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    let catalog = load_catalog(page)?;
    ui::header(&format!(
        "Watching '{}' edits ({} ms debounce)",
        page,
        config.debounce.as_millis()
    ));

    let mut session = QuerySession::new(catalog, config, move |request| {
        print_request(&request, output_format)
    });

    let input = BufReader::new(tokio::io::stdin());
    if let Some(request) = drive_session(input, &mut session).await? {
        print_request(&request, output_format);
    }
    ui::debug("End of input, session closed");
    Ok(())
}

/// Applies one JSON edit per line of `input` until end of input, then closes
/// the session.
///
/// Malformed lines and rejected edits are reported and skipped. Returns the
/// request that was still waiting out its debounce window at end of input.
async fn drive_session<R>(
    input: R,
    session: &mut QuerySession,
) -> Result<Option<SearchRequest>, CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                ui::error_with_details("Failed to read edits", &e.to_string());
                session.close();
                return Err(CliError::InputError);
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let edit: QueryEdit = match serde_json::from_str(line) {
            Ok(edit) => edit,
            Err(e) => {
                ui::warning(&format!("Skipping malformed edit: {}", e));
                continue;
            }
        };

        match session.apply(edit) {
            Ok(Some(id)) => ui::success(&format!("Added filter '{}'", id)),
            Ok(None) => {}
            Err(e) => ui::warning(&e.to_string()),
        }
    }

    let pending = session.is_pending().then(|| session.request());
    session.close();
    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flex_core::query::pages;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recording_session() -> (QuerySession, Arc<Mutex<Vec<SearchRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let session = QuerySession::new(pages::invoices(), EncoderConfig::default(), move |r| {
            sink.lock().unwrap().push(r)
        });
        (session, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_search_is_flushed_at_end_of_input() {
        let (mut session, seen) = recording_session();
        let input: &[u8] = br#"{ "action": "add_filter" }
{ "action": "select_field", "id": "filter-1", "field": "invoice_status" }
{ "action": "set_value", "id": "filter-1", "value": ["draft"] }
"#;

        let flushed = drive_session(input, &mut session).await.unwrap().unwrap();
        assert_eq!(flushed.filters.len(), 1);
        assert_eq!(flushed.filters[0].field, "invoice_status");
        assert!(!session.is_pending());

        // The flushed request replaces the debounced one, which never fires
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_lines_are_skipped() {
        let (mut session, _seen) = recording_session();
        let input: &[u8] = br#"not json

{ "action": "remove_filter", "id": "filter-9" }
{ "action": "add_filter" }
"#;

        let flushed = drive_session(input, &mut session).await.unwrap();
        assert!(flushed.is_some());
        assert_eq!(session.filters().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_sends_nothing() {
        let (mut session, seen) = recording_session();
        let input: &[u8] = b"";

        assert_eq!(drive_session(input, &mut session).await.unwrap(), None);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
