//! Table Schema Module
//!
//! A Table is the column layout of a CSV file as named by its header row.

use std::collections::HashMap;

use serde::Serialize;

/// Column layout of a CSV file (or of a projected row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Table name, the name used in the FROM clause
    name: String,
    /// Column names in header order
    columns: Vec<String>,
    /// Column name to index lookup. A repeated header name maps to its last position.
    #[serde(skip)]
    column_map: HashMap<String, usize>,
}

impl Table {
    /// Create a table with the given name and columns
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        let column_map = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.clone(), i))
            .collect();

        Table {
            name: name.into(),
            columns,
            column_map,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_map.contains_key(name)
    }

    /// Get the column index for a column name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// Column names sorted alphabetically, used in diagnostics
    pub fn sorted_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
