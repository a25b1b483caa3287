// Semantic diagnostics
//
// Typed errors and warnings. Their Display text is what ends up in
// SemanticResult, which exposes diagnostics as plain strings.

use thiserror::Error;

/// Problems that make a statement invalid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("file not found: '{0}'")]
    FileNotFound(String),
    #[error("cannot read '{table}': {reason}")]
    Unreadable { table: String, reason: String },
    #[error("'{0}' has an empty header row")]
    EmptyHeader(String),
    #[error("column '{column}' does not exist in '{table}' (available columns: {available})")]
    UnknownColumn {
        column: String,
        table: String,
        available: String,
    },
    #[error("column '{column}' in WHERE clause does not exist in '{table}' (available columns: {available})")]
    UnknownWhereColumn {
        column: String,
        table: String,
        available: String,
    },
    #[error("LIMIT must not be negative, got {0}")]
    NegativeLimit(i64),
}

/// Advisory findings that never block execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticWarning {
    #[error("LIMIT 0 will return zero rows")]
    ZeroLimit,
    #[error("SELECT * over {0} columns, consider selecting the columns you need explicitly")]
    WideSelect(usize),
}
