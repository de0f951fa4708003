//! Debounced query session of a listing page
//!
//! The session owns a page's filter rows, sort rows and pagination. Every
//! edit resets a debounce timer; when the timer fires, the state at that
//! moment is encoded into a `SearchRequest` and handed to the refetch sink.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::QueryError;
use super::catalog::FilterCatalog;
use super::filter::{FilterRow, FilterState, FilterValue};
use super::order::SortRow;
use super::search::{Pagination, SearchRequest};
use super::types::FilterOperator;
use crate::config::EncoderConfig;
use crate::debounce::Debouncer;

/// State captured at edit time and encoded when the debounce timer fires
struct Snapshot {
    catalog: Arc<FilterCatalog>,
    rows: Vec<FilterRow>,
    sorts: Vec<SortRow>,
    pagination: Pagination,
}

impl Snapshot {
    fn encode(&self) -> SearchRequest {
        SearchRequest::encode(&self.rows, &self.sorts, &self.catalog, self.pagination)
    }
}

/// A single edit to a page's query, as sent by a UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QueryEdit {
    AddFilter,
    SelectField { id: String, field: String },
    SetOperator { id: String, operator: FilterOperator },
    SetValue { id: String, value: serde_json::Value },
    ClearValue { id: String },
    RemoveFilter { id: String },
    ClearFilters,
    SetSort { sort: Vec<SortRow> },
    SetPage { page: usize },
}

/// Filter, sort and page state of one listing page
pub struct QuerySession {
    catalog: Arc<FilterCatalog>,
    filters: FilterState,
    sorts: Vec<SortRow>,
    pagination: Pagination,
    debouncer: Debouncer<Snapshot>,
}

impl QuerySession {
    /// Create a session. `on_search` receives each debounced request.
    ///
    /// Must be created and edited from within a tokio runtime.
    pub fn new<F>(catalog: FilterCatalog, config: EncoderConfig, on_search: F) -> Self
    where
        F: Fn(SearchRequest) + Send + Sync + 'static,
    {
        let debouncer = Debouncer::new(config.debounce, move |snapshot: Snapshot| {
            on_search(snapshot.encode())
        });

        Self {
            catalog: Arc::new(catalog),
            filters: FilterState::new(),
            sorts: Vec::new(),
            pagination: Pagination::new(1, config.page_size),
            debouncer,
        }
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sorts(&self) -> &[SortRow] {
        &self.sorts
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Encode the current state right away, without touching the timer.
    pub fn request(&self) -> SearchRequest {
        self.snapshot().encode()
    }

    pub fn add_filter(&mut self) -> String {
        let id = self.filters.add_row();
        self.filters_changed();
        id
    }

    pub fn select_field(&mut self, id: &str, field: &str) -> Result<(), QueryError> {
        self.filters.select_field(id, field, &self.catalog)?;
        self.filters_changed();
        Ok(())
    }

    pub fn set_operator(&mut self, id: &str, operator: FilterOperator) -> Result<(), QueryError> {
        self.filters.set_operator(id, operator, &self.catalog)?;
        self.filters_changed();
        Ok(())
    }

    pub fn set_value(&mut self, id: &str, value: FilterValue) -> Result<(), QueryError> {
        self.filters.set_value(id, value)?;
        self.filters_changed();
        Ok(())
    }

    pub fn clear_value(&mut self, id: &str) -> Result<(), QueryError> {
        self.filters.clear_value(id)?;
        self.filters_changed();
        Ok(())
    }

    pub fn remove_filter(&mut self, id: &str) -> Result<(), QueryError> {
        self.filters.remove_row(id)?;
        self.filters_changed();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.filters_changed();
    }

    pub fn set_sorts(&mut self, sorts: Vec<SortRow>) {
        self.sorts = sorts;
        self.filters_changed();
    }

    pub fn add_sort(&mut self, sort: SortRow) {
        self.sorts.push(sort);
        self.filters_changed();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = page.max(1);
        self.schedule();
    }

    /// Swap the catalog, dropping rows whose field it no longer has.
    /// Returns the ids of the dropped rows.
    pub fn set_catalog(&mut self, catalog: FilterCatalog) -> Vec<String> {
        let dropped = self.filters.retain_valid(&catalog);
        self.catalog = Arc::new(catalog);
        self.filters_changed();
        dropped
    }

    /// Apply one edit. Returns the new row id for `AddFilter`.
    pub fn apply(&mut self, edit: QueryEdit) -> Result<Option<String>, QueryError> {
        match edit {
            QueryEdit::AddFilter => return Ok(Some(self.add_filter())),
            QueryEdit::SelectField { id, field } => self.select_field(&id, &field)?,
            QueryEdit::SetOperator { id, operator } => self.set_operator(&id, operator)?,
            QueryEdit::SetValue { id, value } => {
                let row = self.filters.row(&id)?;
                let data_type = row.data_type();
                let value = FilterValue::from_json(data_type, &value).ok_or_else(|| {
                    QueryError::InvalidValue {
                        field: row.field.clone(),
                        data_type,
                    }
                })?;
                self.set_value(&id, value)?
            }
            QueryEdit::ClearValue { id } => self.clear_value(&id)?,
            QueryEdit::RemoveFilter { id } => self.remove_filter(&id)?,
            QueryEdit::ClearFilters => self.clear_filters(),
            QueryEdit::SetSort { sort } => self.set_sorts(sort),
            QueryEdit::SetPage { page } => self.set_page(page),
        }
        Ok(None)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancel any pending refetch. Nothing fires after this until the next edit.
    pub fn close(&mut self) {
        if self.debouncer.cancel() {
            debug!("Cancelled pending search on close");
        }
    }

    fn filters_changed(&mut self) {
        self.pagination = self.pagination.first_page();
        self.schedule();
    }

    fn schedule(&mut self) {
        let snapshot = self.snapshot();
        self.debouncer.push(snapshot);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            catalog: Arc::clone(&self.catalog),
            rows: self.filters.rows().to_vec(),
            sorts: self.sorts.clone(),
            pagination: self.pagination,
        }
    }
}

impl std::fmt::Debug for QuerySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySession")
            .field("filters", &self.filters)
            .field("sorts", &self.sorts)
            .field("pagination", &self.pagination)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}
