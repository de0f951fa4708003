//! Wire shape of filters sent to listing endpoints

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::value::{FilterRow, FilterValue};
use crate::query::catalog::FilterCatalog;
use crate::query::types::{DataType, FilterOperator};

/// A sanitized filter, ready for the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedBackendFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: BackendFilterValue,
}

/// Value object with exactly one populated slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendFilterValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

/// Format an instant the way the backend expects (RFC 3339, UTC, `Z` suffix).
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl BackendFilterValue {
    /// Encode a non-empty filter value. Returns `None` for placeholders.
    pub fn encode(value: &FilterValue) -> Option<Self> {
        if value.is_empty() {
            return None;
        }

        let mut encoded = BackendFilterValue::default();
        match value {
            FilterValue::String(s) => encoded.string = Some(s.clone()),
            FilterValue::Number(n) => encoded.number = *n,
            FilterValue::Date(d) => encoded.date = d.as_ref().map(format_instant),
            FilterValue::Boolean(b) => encoded.boolean = *b,
            FilterValue::Array(items) => {
                encoded.array = Some(
                    items
                        .iter()
                        .filter(|item| !item.trim().is_empty())
                        .cloned()
                        .collect(),
                )
            }
        }
        Some(encoded)
    }

    /// The data type of the first populated slot
    pub fn data_type(&self) -> Option<DataType> {
        if self.string.is_some() {
            Some(DataType::String)
        } else if self.number.is_some() {
            Some(DataType::Number)
        } else if self.date.is_some() {
            Some(DataType::Date)
        } else if self.array.is_some() {
            Some(DataType::Array)
        } else if self.boolean.is_some() {
            Some(DataType::Boolean)
        } else {
            None
        }
    }

    /// Decode the slot for `data_type` back into a filter value.
    ///
    /// Returns `None` when the slot is missing or the date does not parse.
    pub fn decode(&self, data_type: DataType) -> Option<FilterValue> {
        match data_type {
            DataType::String => self.string.clone().map(FilterValue::String),
            DataType::Number => self.number.map(|n| FilterValue::Number(Some(n))),
            DataType::Date => {
                let raw = self.date.as_ref()?;
                let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
                Some(FilterValue::Date(Some(parsed.with_timezone(&Utc))))
            }
            DataType::Boolean => self.boolean.map(|b| FilterValue::Boolean(Some(b))),
            DataType::Array => self.array.clone().map(FilterValue::Array),
        }
    }
}

impl TypedBackendFilter {
    /// Rebuild a UI row from a backend filter (e.g. filters restored from a saved view).
    ///
    /// The catalog decides the data type when it knows the field; otherwise
    /// the populated slot does.
    pub fn to_row(&self, id: &str, catalog: &FilterCatalog) -> Option<FilterRow> {
        let data_type = match catalog.get(&self.field) {
            Some(entry) => entry.data_type,
            None => self.value.data_type()?,
        };
        let value = self.value.decode(data_type)?;
        Some(FilterRow::new(id, &self.field, self.operator, value))
    }
}
