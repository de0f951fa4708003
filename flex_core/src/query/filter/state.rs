//! Per-page filter row state
//!
//! Rows move through `Empty -> FieldSelected -> Active`, fall back to
//! `FieldSelected` when their value is cleared, and end in `Removed`.

use log::debug;

use super::backend::TypedBackendFilter;
use super::sanitize::sanitize_filters;
use super::value::{FilterRow, FilterRowStatus, FilterValue};
use crate::query::QueryError;
use crate::query::catalog::{FilterCatalog, FilterField};
use crate::query::types::FilterOperator;

/// The filter rows owned by one listing page
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    rows: Vec<FilterRow>,
    removed: Vec<String>,
    next_id: usize,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from rows restored elsewhere (e.g. from a URL or saved view).
    /// Later rows replace earlier ones with the same id.
    pub fn from_rows<I: IntoIterator<Item = FilterRow>>(rows: I) -> Self {
        let mut state = FilterState::new();
        for row in rows {
            state.push_row(row);
        }
        state
    }

    /// Add an empty row and return its id
    pub fn add_row(&mut self) -> String {
        let id = self.next_free_id();
        self.rows.push(FilterRow::empty(&id));
        id
    }

    /// Insert a complete row, replacing any live row with the same id.
    pub fn push_row(&mut self, row: FilterRow) {
        self.removed.retain(|id| id != &row.id);
        match self.rows.iter_mut().find(|r| r.id == row.id) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Pick the field for a row. Resets the operator to the field default and empties the value.
    pub fn select_field(
        &mut self,
        id: &str,
        field: &str,
        catalog: &FilterCatalog,
    ) -> Result<(), QueryError> {
        let entry = catalog
            .get(field)
            .ok_or_else(|| QueryError::UnknownField(field.to_string()))?;
        let operator = entry
            .default_operator()
            .ok_or_else(|| QueryError::UnsupportedOperator {
                field: field.to_string(),
                operator: entry.data_type.default_operator(),
                supported: Vec::new(),
            })?;

        let row = self.row_mut(id)?;
        row.field = entry.field.clone();
        row.operator = operator;
        row.value = FilterValue::empty(entry.data_type);
        Ok(())
    }

    /// Change a row's operator. Only operators the field allows are accepted.
    pub fn set_operator(
        &mut self,
        id: &str,
        operator: FilterOperator,
        catalog: &FilterCatalog,
    ) -> Result<(), QueryError> {
        let row = self.row_mut(id)?;
        let entry = selected_entry(row, catalog)?;
        if !entry.allows(operator) {
            return Err(QueryError::UnsupportedOperator {
                field: entry.field.clone(),
                operator,
                supported: entry.operators.clone(),
            });
        }
        row.operator = operator;
        Ok(())
    }

    /// Set a row's value. The value kind must match the selected field.
    pub fn set_value(&mut self, id: &str, value: FilterValue) -> Result<(), QueryError> {
        let row = self.row_mut(id)?;
        if row.status() == FilterRowStatus::Empty {
            return Err(QueryError::NoFieldSelected(id.to_string()));
        }
        if value.data_type() != row.data_type() {
            return Err(QueryError::TypeMismatch {
                field: row.field.clone(),
                expected: row.data_type(),
                found: value.data_type(),
            });
        }
        row.value = value;
        Ok(())
    }

    /// Empty a row's value, keeping its field and operator
    pub fn clear_value(&mut self, id: &str) -> Result<(), QueryError> {
        let row = self.row_mut(id)?;
        row.value = FilterValue::empty(row.data_type());
        Ok(())
    }

    /// Remove a row. Removed rows cannot be edited again.
    pub fn remove_row(&mut self, id: &str) -> Result<FilterRow, QueryError> {
        self.row_mut(id)?;
        let index = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| QueryError::UnknownRow(id.to_string()))?;
        self.removed.push(id.to_string());
        Ok(self.rows.remove(index))
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.removed.extend(self.rows.drain(..).map(|row| row.id));
    }

    /// Drop rows whose field is no longer in the catalog. Returns the removed ids.
    pub fn retain_valid(&mut self, catalog: &FilterCatalog) -> Vec<String> {
        let (keep, drop): (Vec<FilterRow>, Vec<FilterRow>) =
            self.rows.drain(..).partition(|row| {
                row.status() == FilterRowStatus::Empty || catalog.contains(&row.field)
            });
        self.rows = keep;

        let dropped: Vec<String> = drop.into_iter().map(|row| row.id).collect();
        if !dropped.is_empty() {
            debug!("Removed {} filter rows with stale fields", dropped.len());
        }
        self.removed.extend(dropped.iter().cloned());
        dropped
    }

    pub fn status(&self, id: &str) -> Option<FilterRowStatus> {
        if self.removed.iter().any(|removed| removed == id) {
            return Some(FilterRowStatus::Removed);
        }
        self.get(id).map(FilterRow::status)
    }

    pub fn get(&self, id: &str) -> Option<&FilterRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    /// Rows that currently filter results
    pub fn active_rows(&self) -> Vec<&FilterRow> {
        self.rows
            .iter()
            .filter(|row| row.status() == FilterRowStatus::Active)
            .collect()
    }

    /// Backend filters for the current rows
    pub fn sanitized(&self, catalog: &FilterCatalog) -> Vec<TypedBackendFilter> {
        sanitize_filters(&self.rows, catalog)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A live row. Removed ids report `RowRemoved`, ids never seen `UnknownRow`.
    pub fn row(&self, id: &str) -> Result<&FilterRow, QueryError> {
        self.check_not_removed(id)?;
        self.get(id)
            .ok_or_else(|| QueryError::UnknownRow(id.to_string()))
    }

    fn check_not_removed(&self, id: &str) -> Result<(), QueryError> {
        if self.removed.iter().any(|removed| removed == id) {
            return Err(QueryError::RowRemoved(id.to_string()));
        }
        Ok(())
    }

    fn row_mut(&mut self, id: &str) -> Result<&mut FilterRow, QueryError> {
        self.check_not_removed(id)?;
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| QueryError::UnknownRow(id.to_string()))
    }

    fn next_free_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("filter-{}", self.next_id);
            let taken = self.rows.iter().any(|r| r.id == id) || self.removed.contains(&id);
            if !taken {
                return id;
            }
        }
    }
}

fn selected_entry<'a>(
    row: &FilterRow,
    catalog: &'a FilterCatalog,
) -> Result<&'a FilterField, QueryError> {
    if row.status() == FilterRowStatus::Empty {
        return Err(QueryError::NoFieldSelected(row.id.clone()));
    }
    catalog
        .get(&row.field)
        .ok_or_else(|| QueryError::UnknownField(row.field.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::DataType;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn catalog() -> FilterCatalog {
        FilterCatalog::new()
            .with_field(FilterField::new("email", DataType::String))
            .with_field(FilterField::new("created_at", DataType::Date))
            .with_field(FilterField::new("status", DataType::Array))
    }

    #[test]
    fn test_row_lifecycle() {
        let catalog = catalog();
        let mut state = FilterState::new();

        let id = state.add_row();
        assert_eq!(id, "filter-1");
        assert_eq!(state.status(&id), Some(FilterRowStatus::Empty));

        state.select_field(&id, "email", &catalog).unwrap();
        assert_eq!(state.status(&id), Some(FilterRowStatus::FieldSelected));
        assert_eq!(state.get(&id).unwrap().operator, FilterOperator::Contains);

        state
            .set_value(&id, FilterValue::String("acme".to_string()))
            .unwrap();
        assert_eq!(state.status(&id), Some(FilterRowStatus::Active));
        assert_eq!(state.sanitized(&catalog).len(), 1);

        state.clear_value(&id).unwrap();
        assert_eq!(state.status(&id), Some(FilterRowStatus::FieldSelected));
        assert!(state.sanitized(&catalog).is_empty());

        state.remove_row(&id).unwrap();
        assert_eq!(state.status(&id), Some(FilterRowStatus::Removed));
        assert!(state.is_empty());
    }

    #[test]
    fn test_removed_row_is_terminal() {
        let mut state = FilterState::new();
        let id = state.add_row();
        state.remove_row(&id).unwrap();

        assert_matches!(
            state.set_value(&id, FilterValue::String("x".to_string())),
            Err(QueryError::RowRemoved(_))
        );
        assert_matches!(state.remove_row(&id), Err(QueryError::RowRemoved(_)));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut state = FilterState::new();
        let first = state.add_row();
        state.remove_row(&first).unwrap();
        let second = state.add_row();
        assert_ne!(first, second);
    }

    #[test]
    fn test_select_unknown_field() {
        let mut state = FilterState::new();
        let id = state.add_row();
        assert_matches!(
            state.select_field(&id, "nickname", &catalog()),
            Err(QueryError::UnknownField(field)) if field == "nickname"
        );
    }

    #[test]
    fn test_unknown_row() {
        let mut state = FilterState::new();
        assert_matches!(state.clear_value("filter-42"), Err(QueryError::UnknownRow(_)));
    }

    #[test]
    fn test_set_value_requires_field() {
        let mut state = FilterState::new();
        let id = state.add_row();
        assert_matches!(
            state.set_value(&id, FilterValue::String("x".to_string())),
            Err(QueryError::NoFieldSelected(_))
        );
    }

    #[test]
    fn test_set_value_type_mismatch() {
        let catalog = catalog();
        let mut state = FilterState::new();
        let id = state.add_row();
        state.select_field(&id, "created_at", &catalog).unwrap();

        assert_matches!(
            state.set_value(&id, FilterValue::String("yesterday".to_string())),
            Err(QueryError::TypeMismatch { expected: DataType::Date, found: DataType::String, .. })
        );

        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        state.set_value(&id, FilterValue::Date(Some(date))).unwrap();
        assert_eq!(state.active_rows().len(), 1);
    }

    #[test]
    fn test_set_operator_checks_catalog() {
        let catalog = catalog();
        let mut state = FilterState::new();
        let id = state.add_row();
        state.select_field(&id, "status", &catalog).unwrap();

        state.set_operator(&id, FilterOperator::IsNotAnyOf, &catalog).unwrap();
        assert_eq!(state.get(&id).unwrap().operator, FilterOperator::IsNotAnyOf);

        assert_matches!(
            state.set_operator(&id, FilterOperator::After, &catalog),
            Err(QueryError::UnsupportedOperator { operator: FilterOperator::After, .. })
        );
    }

    #[test]
    fn test_retain_valid_drops_stale_fields() {
        let catalog = catalog();
        let mut state = FilterState::new();
        let stale = state.add_row();
        state.select_field(&stale, "email", &catalog).unwrap();
        let blank = state.add_row();

        let narrower = FilterCatalog::new().with_field(FilterField::new("status", DataType::Array));
        let dropped = state.retain_valid(&narrower);

        assert_eq!(dropped, vec![stale.clone()]);
        assert_eq!(state.status(&stale), Some(FilterRowStatus::Removed));
        assert_eq!(state.status(&blank), Some(FilterRowStatus::Empty));
    }

    #[test]
    fn test_from_rows_replaces_duplicates_and_avoids_ids() {
        let mut state = FilterState::from_rows(vec![
            FilterRow::new("filter-1", "email", FilterOperator::Contains, FilterValue::String("a".to_string())),
            FilterRow::new("filter-1", "email", FilterOperator::Equals, FilterValue::String("b".to_string())),
        ]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("filter-1").unwrap().operator, FilterOperator::Equals);
        assert_eq!(state.add_row(), "filter-2");
    }

    #[test]
    fn test_row_lookup_reports_removed_rows() {
        let mut state = FilterState::new();
        let id = state.add_row();
        assert!(state.row(&id).is_ok());

        state.remove_row(&id).unwrap();
        assert_matches!(state.row(&id), Err(QueryError::RowRemoved(_)));
        assert_matches!(state.row("filter-42"), Err(QueryError::UnknownRow(_)));
    }

    #[test]
    fn test_clear_removes_all() {
        let mut state = FilterState::new();
        let a = state.add_row();
        let b = state.add_row();
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.status(&a), Some(FilterRowStatus::Removed));
        assert_eq!(state.status(&b), Some(FilterRowStatus::Removed));
    }
}
