//! Error types for editing filter state

use std::fmt;

use super::types::{DataType, FilterOperator};

/// Errors returned by filter row edits
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// No row with this id exists
    UnknownRow(String),
    /// The row was removed and can no longer be edited
    RowRemoved(String),
    /// The field is not in the page's catalog
    UnknownField(String),
    /// The row has no field selected yet
    NoFieldSelected(String),
    /// Operator is not allowed for the row's field
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        supported: Vec<FilterOperator>,
    },
    /// A raw value could not be read as the field's data type
    InvalidValue { field: String, data_type: DataType },
    /// Value kind doesn't match the field's data type
    TypeMismatch {
        field: String,
        expected: DataType,
        found: DataType,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownRow(id) => write!(f, "No filter row with id '{}'", id),
            QueryError::RowRemoved(id) => {
                write!(f, "Filter row '{}' was removed", id)
            }
            QueryError::UnknownField(field) => {
                write!(f, "Field '{}' cannot be filtered on this page", field)
            }
            QueryError::NoFieldSelected(id) => {
                write!(f, "Filter row '{}' has no field selected", id)
            }
            QueryError::UnsupportedOperator {
                field,
                operator,
                supported,
            } => {
                let supported: Vec<&str> = supported.iter().map(|op| op.code()).collect();
                write!(
                    f,
                    "Cannot use '{}' operator on field '{}'. Supported: {}",
                    operator,
                    field,
                    supported.join(", ")
                )
            }
            QueryError::InvalidValue { field, data_type } => {
                write!(f, "Invalid value for field '{}': expected a {} value", field, data_type)
            }
            QueryError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Type mismatch: field '{}' holds {} values, got {}",
                    field, expected, found
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}
