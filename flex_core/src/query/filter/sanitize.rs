//! Filter sanitization: UI rows to backend filters

use log::debug;

use super::backend::{BackendFilterValue, TypedBackendFilter};
use super::value::FilterRow;
use crate::query::catalog::FilterCatalog;

/// Turn UI filter rows into backend filters.
///
/// Rows are dropped, never rejected:
/// - the field is unknown to the catalog
/// - the value kind does not match the catalog's data type
/// - the value is empty
/// - the operator is not allowed and the field has no operator to fall back to
///
/// A disallowed operator is clamped to the field's default operator. Output
/// order follows input order.
pub fn sanitize_filters(rows: &[FilterRow], catalog: &FilterCatalog) -> Vec<TypedBackendFilter> {
    rows.iter()
        .filter_map(|row| sanitize_row(row, catalog))
        .collect()
}

fn sanitize_row(row: &FilterRow, catalog: &FilterCatalog) -> Option<TypedBackendFilter> {
    let Some(entry) = catalog.get(&row.field) else {
        debug!("Dropping filter '{}': unknown field '{}'", row.id, row.field);
        return None;
    };

    if row.data_type() != entry.data_type {
        debug!(
            "Dropping filter '{}': {} value on {} field '{}'",
            row.id,
            row.data_type(),
            entry.data_type,
            row.field
        );
        return None;
    }

    let Some(value) = BackendFilterValue::encode(&row.value) else {
        debug!("Dropping filter '{}': empty value", row.id);
        return None;
    };

    let Some(operator) = entry.clamp_operator(row.operator) else {
        debug!("Dropping filter '{}': field '{}' allows no operators", row.id, row.field);
        return None;
    };
    if operator != row.operator {
        debug!(
            "Clamping operator of filter '{}' from '{}' to '{}'",
            row.id, row.operator, operator
        );
    }

    Some(TypedBackendFilter {
        field: entry.field.clone(),
        operator,
        value,
    })
}
