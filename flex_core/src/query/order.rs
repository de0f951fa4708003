//! Sort rows and their sanitization

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::types::SortDirection;

/// A sort key. Position in a list is precedence: index 0 is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: String,
    /// Display label, only used by the UI
    #[serde(default, skip_serializing)]
    pub label: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Sort rows as edited in the UI share the wire shape.
pub type SortRow = SortOption;

impl SortOption {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            label: String::new(),
            direction,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

/// Clean up sort rows before sending them.
///
/// Rows without a field are dropped. When a field appears more than once the
/// last row wins and keeps its own position.
pub fn sanitize_sorts(rows: &[SortRow]) -> Vec<SortOption> {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        let field = row.field.trim();
        if !field.is_empty() {
            last_index.insert(field, index);
        }
    }

    let sorts: Vec<SortOption> = rows
        .iter()
        .enumerate()
        .filter(|(index, row)| last_index.get(row.field.trim()) == Some(index))
        .map(|(_, row)| SortOption {
            field: row.field.trim().to_string(),
            ..row.clone()
        })
        .collect();

    if sorts.len() != rows.len() {
        debug!("Dropped {} empty or duplicate sort rows", rows.len() - sorts.len());
    }
    sorts
}
