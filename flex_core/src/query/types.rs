//! Data types, operators and sort directions shared by the query encoder

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of value a filter field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Date,
    Boolean,
    Array,
}

/// Comparison operators understood by the listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "eq")]
    Equals,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "after")]
    After,
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "in")]
    IsAnyOf,
    #[serde(rename = "not_in")]
    IsNotAnyOf,
}

/// UI affordance used to edit a filter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFieldType {
    Input,
    MultiSelect,
    Datepicker,
    Radio,
    Checkbox,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl DataType {
    /// Operators allowed for this data type. The first one is the default.
    pub fn operators(&self) -> &'static [FilterOperator] {
        use FilterOperator::*;
        match self {
            DataType::String => &[Contains, Equals],
            DataType::Number => &[Equals, GreaterThan, LessThan],
            DataType::Date => &[After, Before],
            DataType::Boolean => &[Equals],
            DataType::Array => &[IsAnyOf, IsNotAnyOf],
        }
    }

    /// The operator a freshly selected field starts with.
    pub fn default_operator(&self) -> FilterOperator {
        self.operators()[0]
    }

    /// The UI control normally used to edit this data type.
    pub fn default_field_type(&self) -> FilterFieldType {
        match self {
            DataType::String | DataType::Number => FilterFieldType::Input,
            DataType::Date => FilterFieldType::Datepicker,
            DataType::Boolean => FilterFieldType::Radio,
            DataType::Array => FilterFieldType::MultiSelect,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
            DataType::Array => "array",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FilterOperator {
    /// The wire code sent to the backend.
    pub fn code(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "eq",
            FilterOperator::GreaterThan => "gt",
            FilterOperator::LessThan => "lt",
            FilterOperator::After => "after",
            FilterOperator::Before => "before",
            FilterOperator::IsAnyOf => "in",
            FilterOperator::IsNotAnyOf => "not_in",
        }
    }

    /// Human readable label, as shown in operator dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "is",
            FilterOperator::GreaterThan => "greater than",
            FilterOperator::LessThan => "less than",
            FilterOperator::After => "after",
            FilterOperator::Before => "before",
            FilterOperator::IsAnyOf => "is any of",
            FilterOperator::IsNotAnyOf => "is not any of",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}
