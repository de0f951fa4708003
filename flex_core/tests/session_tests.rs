use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use flex_core::config::EncoderConfig;
use flex_core::query::pages;
use flex_core::query::{
    FilterOperator, FilterValue, QueryEdit, QueryError, QuerySession, SearchRequest,
    SortDirection, SortOption,
};

/// A session whose debounced requests are collected into a shared list.
fn recording_session(page_size: usize) -> (QuerySession, Arc<Mutex<Vec<SearchRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = EncoderConfig::default().with_page_size(page_size);
    let session = QuerySession::new(pages::invoices(), config, move |request| {
        sink.lock().unwrap().push(request);
    });
    (session, seen)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(301)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_refetch_once() {
        let (mut session, seen) = recording_session(25);

        let id = session.add_filter();
        session.select_field(&id, "invoice_number").unwrap();
        for partial in ["I", "IN", "INV", "INV-1"] {
            session
                .set_value(&id, FilterValue::String(partial.to_string()))
                .unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        settle().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].filters.len(), 1);
        assert_eq!(seen[0].filters[0].value.string.as_deref(), Some("INV-1"));
        assert_eq!(seen[0].limit, 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_reset_to_first_page() {
        let (mut session, seen) = recording_session(10);

        session.set_page(4);
        settle().await;
        assert_eq!(seen.lock().unwrap().last().unwrap().offset, 30);

        session.set_sorts(vec![SortOption::new("created_at", SortDirection::Desc)]);
        settle().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].offset, 0);
        assert_eq!(seen[1].sort.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_refetch() {
        let (mut session, seen) = recording_session(10);

        session.add_filter();
        assert!(session.is_pending());
        session.close();
        assert!(!session.is_pending());

        settle().await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_refetch() {
        let (mut session, seen) = recording_session(10);
        session.clear_filters();
        drop(session);

        settle().await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_json_edits() {
        let (mut session, seen) = recording_session(10);

        let id = session
            .apply(serde_json::from_str(r#"{ "action": "add_filter" }"#).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(id, "filter-1");

        let edits = [
            format!(r#"{{ "action": "select_field", "id": "{}", "field": "amount_due" }}"#, id),
            format!(r#"{{ "action": "set_operator", "id": "{}", "operator": "gt" }}"#, id),
            format!(r#"{{ "action": "set_value", "id": "{}", "value": 250 }}"#, id),
            r#"{ "action": "set_sort", "sort": [{ "field": "due_date" }] }"#.to_string(),
        ];
        for edit in &edits {
            let edit: QueryEdit = serde_json::from_str(edit).unwrap();
            assert_eq!(session.apply(edit).unwrap(), None);
        }

        settle().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let filter = &seen[0].filters[0];
        assert_eq!(filter.field, "amount_due");
        assert_eq!(filter.operator, FilterOperator::GreaterThan);
        assert_eq!(filter.value.number, Some(250.0));
        assert_eq!(seen[0].sort[0].direction, SortDirection::Asc);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_rejects_bad_edits() {
        let (mut session, _seen) = recording_session(10);
        let id = session.add_filter();

        assert_matches!(
            session.apply(QueryEdit::SetValue {
                id: id.clone(),
                value: serde_json::json!("x"),
            }),
            Err(QueryError::NoFieldSelected(_))
        );

        session.select_field(&id, "amount_due").unwrap();
        assert_matches!(
            session.apply(QueryEdit::SetValue {
                id: id.clone(),
                value: serde_json::json!("not a number"),
            }),
            Err(QueryError::InvalidValue { .. })
        );
        assert_matches!(
            session.set_operator(&id, FilterOperator::After),
            Err(QueryError::UnsupportedOperator { .. })
        );

        session.remove_filter(&id).unwrap();
        assert_matches!(
            session.apply(QueryEdit::ClearValue { id }),
            Err(QueryError::RowRemoved(_))
        );
        assert_matches!(
            session.apply(QueryEdit::RemoveFilter { id: "filter-99".to_string() }),
            Err(QueryError::UnknownRow(_))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_edit_of_a_removed_row_reports_removal() {
        let (mut session, _seen) = recording_session(10);
        let id = session.add_filter();
        session.select_field(&id, "amount_due").unwrap();
        session.remove_filter(&id).unwrap();

        let edits = [
            QueryEdit::SetValue {
                id: id.clone(),
                value: serde_json::json!(10),
            },
            QueryEdit::ClearValue { id: id.clone() },
            QueryEdit::SetOperator {
                id: id.clone(),
                operator: FilterOperator::GreaterThan,
            },
            QueryEdit::RemoveFilter { id: id.clone() },
        ];
        for edit in edits {
            assert_matches!(session.apply(edit), Err(QueryError::RowRemoved(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_reflects_current_state() {
        let (mut session, _seen) = recording_session(10);
        let id = session.add_filter();
        session.select_field(&id, "invoice_status").unwrap();
        session
            .set_value(&id, FilterValue::Array(vec!["draft".to_string()]))
            .unwrap();

        let request = session.request();
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].operator, FilterOperator::IsAnyOf);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_catalog_drops_unknown_rows() {
        let (mut session, seen) = recording_session(10);
        let kept = session.add_filter();
        session.select_field(&kept, "customer_id").unwrap();
        let dropped = session.add_filter();
        session.select_field(&dropped, "invoice_number").unwrap();

        let removed = session.set_catalog(pages::subscriptions());
        assert_eq!(removed, vec![dropped]);
        assert!(session.filters().get(&kept).is_some());

        settle().await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
