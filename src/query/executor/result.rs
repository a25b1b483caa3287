// Query Result Implementation
//
// This module defines the row, result set and error types for query execution.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{CatalogError, Table};
use crate::query::parser::components::ParseError;
use crate::query::semantic::SemanticResult;

/// Name-based access to the text values of a row
///
/// WHERE evaluation only needs "value of column X, if any", which both a
/// positional CSV row and a plain name-to-value map can answer.
pub trait RowValues {
    fn value(&self, column: &str) -> Option<&str>;
}

impl RowValues for HashMap<String, String> {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

/// A row flowing between operators
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Column layout the values are positioned against
    schema: Arc<Table>,
    /// Cell values. May be shorter than the schema when the CSV record was short.
    values: Vec<String>,
}

impl Row {
    pub fn new(schema: Arc<Table>, values: Vec<String>) -> Self {
        Row { schema, values }
    }

    /// Value of a named column; `None` only if the header has no such column.
    /// A header column the record had no cell for reads as "".
    pub fn get(&self, column: &str) -> Option<&str> {
        self.schema
            .column_index(column)
            .map(|i| self.values.get(i).map_or("", String::as_str))
    }

    /// Value at a position
    pub fn get_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn schema(&self) -> &Arc<Table> {
        &self.schema
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

impl RowValues for Row {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column)
    }
}

/// Represents query execution error
#[derive(Error, Debug)]
pub enum QueryError {
    /// Syntax error from the parser
    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),
    /// The table could not be located or its header read
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// A data record could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Semantic analysis rejected the statement
    #[error("Semantic error: {}", .0.errors.join("; "))]
    Semantic(SemanticResult),
    /// Error during query execution
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query resultset representation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResultSet {
    /// Output column names, same length as every row
    headers: Vec<String>,
    /// Rows of data
    rows: Vec<Vec<String>>,
}

impl QueryResultSet {
    /// Create a new empty resultset with column names
    pub fn new(headers: Vec<String>) -> Self {
        QueryResultSet {
            headers,
            rows: Vec::new(),
        }
    }

    /// Add a row to the resultset
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the columns in the resultset
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    /// Get the rows in the resultset
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one output column, top to bottom
    pub fn column_values(&self, column: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Split into `(headers, rows)`
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    /// Format the resultset as a bordered text table
    pub fn to_string_table(&self) -> String {
        if self.headers.is_empty() {
            return "Empty result".to_string();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let separator = {
            let mut line = String::from("+");
            for width in &widths {
                line.push_str(&"-".repeat(width + 2));
                line.push('+');
            }
            line
        };

        let format_line = |cells: &[String]| {
            let mut line = String::from("|");
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                line.push_str(&format!(" {:<width$} |", cell, width = width));
            }
            line
        };

        let mut result = String::new();
        result.push_str(&separator);
        result.push('\n');
        result.push_str(&format_line(&self.headers));
        result.push('\n');
        result.push_str(&separator);
        result.push('\n');
        for row in &self.rows {
            result.push_str(&format_line(row));
            result.push('\n');
        }
        result.push_str(&separator);
        result.push('\n');
        result.push_str(&format!("{} row(s)", self.rows.len()));

        result
    }
}
