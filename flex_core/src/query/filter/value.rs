//! Filter rows and their typed values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::types::{DataType, FilterOperator};

/// The value slot of a filter row, keyed by data type.
///
/// Every variant has an empty form (empty string, `None`, empty list) used
/// while the user has picked a field but not yet entered a value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Number(Option<f64>),
    Date(Option<DateTime<Utc>>),
    Boolean(Option<bool>),
    Array(Vec<String>),
}

impl FilterValue {
    /// The empty placeholder value for a data type
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::String => FilterValue::String(String::new()),
            DataType::Number => FilterValue::Number(None),
            DataType::Date => FilterValue::Date(None),
            DataType::Boolean => FilterValue::Boolean(None),
            DataType::Array => FilterValue::Array(Vec::new()),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            FilterValue::String(_) => DataType::String,
            FilterValue::Number(_) => DataType::Number,
            FilterValue::Date(_) => DataType::Date,
            FilterValue::Boolean(_) => DataType::Boolean,
            FilterValue::Array(_) => DataType::Array,
        }
    }

    /// Read a value of `data_type` from JSON. `null` gives the empty value.
    ///
    /// Returns `None` when the JSON does not fit the data type.
    pub fn from_json(data_type: DataType, json: &serde_json::Value) -> Option<Self> {
        if json.is_null() {
            return Some(FilterValue::empty(data_type));
        }

        match data_type {
            DataType::String => json.as_str().map(|s| FilterValue::String(s.to_string())),
            DataType::Number => json.as_f64().map(|n| FilterValue::Number(Some(n))),
            DataType::Date => {
                let parsed = DateTime::parse_from_rfc3339(json.as_str()?).ok()?;
                Some(FilterValue::Date(Some(parsed.with_timezone(&Utc))))
            }
            DataType::Boolean => json.as_bool().map(|b| FilterValue::Boolean(Some(b))),
            DataType::Array => {
                let items = json
                    .as_array()?
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()?;
                Some(FilterValue::Array(items))
            }
        }
    }

    /// Whether the value is a placeholder that should not be sent.
    ///
    /// Blank strings, non-finite numbers, and lists with only blank entries
    /// count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::String(s) => s.trim().is_empty(),
            FilterValue::Number(n) => !n.is_some_and(f64::is_finite),
            FilterValue::Date(d) => d.is_none(),
            FilterValue::Boolean(b) => b.is_none(),
            FilterValue::Array(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

/// Lifecycle status of a filter row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRowStatus {
    /// Added, no field chosen yet
    Empty,
    /// Field chosen, value still empty
    FieldSelected,
    /// Field and value present, the row filters results
    Active,
    /// Deleted by the user
    Removed,
}

/// One filter row as edited in the UI
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRow {
    pub id: String,
    /// Backend field name. Empty until the user picks a field.
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterRow {
    /// A freshly added row with no field selected
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            field: String::new(),
            operator: DataType::String.default_operator(),
            value: FilterValue::empty(DataType::String),
        }
    }

    pub fn new(id: &str, field: &str, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            id: id.to_string(),
            field: field.to_string(),
            operator,
            value,
        }
    }

    pub fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    pub fn status(&self) -> FilterRowStatus {
        if self.field.trim().is_empty() {
            FilterRowStatus::Empty
        } else if self.value.is_empty() {
            FilterRowStatus::FieldSelected
        } else {
            FilterRowStatus::Active
        }
    }
}

/// Filter row as exchanged with the UI, with one optional slot per data type.
///
/// Only the slot matching `data_type` is read; the others are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRowState {
    pub id: String,
    #[serde(default)]
    pub field: String,
    pub operator: FilterOperator,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_array: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
}

impl From<FilterRowState> for FilterRow {
    fn from(state: FilterRowState) -> Self {
        let value = match state.data_type {
            DataType::String => FilterValue::String(state.value_string.unwrap_or_default()),
            DataType::Number => FilterValue::Number(state.value_number),
            DataType::Date => FilterValue::Date(state.value_date),
            DataType::Boolean => FilterValue::Boolean(state.value_boolean),
            DataType::Array => FilterValue::Array(state.value_array.unwrap_or_default()),
        };

        FilterRow {
            id: state.id,
            field: state.field,
            operator: state.operator,
            value,
        }
    }
}

impl From<&FilterRow> for FilterRowState {
    fn from(row: &FilterRow) -> Self {
        let mut state = FilterRowState {
            id: row.id.clone(),
            field: row.field.clone(),
            operator: row.operator,
            data_type: row.data_type(),
            value_string: None,
            value_number: None,
            value_date: None,
            value_array: None,
            value_boolean: None,
        };

        match &row.value {
            FilterValue::String(s) => state.value_string = Some(s.clone()),
            FilterValue::Number(n) => state.value_number = *n,
            FilterValue::Date(d) => state.value_date = *d,
            FilterValue::Boolean(b) => state.value_boolean = *b,
            FilterValue::Array(items) => state.value_array = Some(items.clone()),
        }

        state
    }
}
