//! Field capability catalog
//!
//! A catalog lists the fields a listing page can filter on, along with the
//! operators each field accepts. The encoder trusts the catalog as the
//! source of truth when validating filter rows.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use super::types::{DataType, FilterFieldType, FilterOperator};

/// A selectable value for enumerated fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// A single filterable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
    pub field: String,
    pub label: String,
    pub field_type: FilterFieldType,
    pub operators: Vec<FilterOperator>,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FilterOption>,
}

impl FilterField {
    /// Create a field with the default label, control and operators for its data type.
    pub fn new(field: &str, data_type: DataType) -> Self {
        Self {
            field: field.to_string(),
            label: field.to_case(Case::Title),
            field_type: data_type.default_field_type(),
            operators: data_type.operators().to_vec(),
            data_type,
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_field_type(mut self, field_type: FilterFieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_operators(mut self, operators: &[FilterOperator]) -> Self {
        self.operators = operators.to_vec();
        self
    }

    /// Add selectable options, given as `(value, label)` pairs.
    pub fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| FilterOption::new(value, label))
            .collect();
        self
    }

    /// Check whether this field accepts the operator
    pub fn allows(&self, operator: FilterOperator) -> bool {
        self.operators.contains(&operator)
    }

    /// The operator a new row on this field starts with.
    ///
    /// This is the data type's default when the field allows it, otherwise
    /// the first operator the field lists.
    pub fn default_operator(&self) -> Option<FilterOperator> {
        let preferred = self.data_type.default_operator();
        if self.allows(preferred) {
            Some(preferred)
        } else {
            self.operators.first().copied()
        }
    }

    /// Keep `operator` if allowed, otherwise fall back to the field default.
    pub fn clamp_operator(&self, operator: FilterOperator) -> Option<FilterOperator> {
        if self.allows(operator) {
            Some(operator)
        } else {
            self.default_operator()
        }
    }
}

/// The filterable fields of one listing page, in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCatalog {
    fields: Vec<FilterField>,
}

impl FilterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A field with the same name replaces the earlier entry.
    pub fn with_field(mut self, field: FilterField) -> Self {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: FilterField) {
        match self.fields.iter_mut().find(|f| f.field == field.field) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Look up a field by its backend name
    pub fn get(&self, field: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FilterField> for FilterCatalog {
    fn from_iter<I: IntoIterator<Item = FilterField>>(iter: I) -> Self {
        let mut catalog = FilterCatalog::new();
        for field in iter {
            catalog.insert(field);
        }
        catalog
    }
}
