// Semantic Analyzer
//
// Validates a SELECT statement against the header row of its CSV file.
// Errors are accumulated rather than fail-fast, except that a missing or
// unreadable file stops the analysis: without a header there is nothing to
// check columns against.

use log::debug;
use serde::Serialize;

use super::diagnostics::{SemanticError, SemanticWarning};
use crate::catalog::{CatalogError, CsvSource, Table};
use crate::config::EngineConfig;
use crate::query::parser::ast::{SelectStatement, WILDCARD};

/// Outcome of semantic analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemanticResult {
    /// True iff `errors` is empty
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl SemanticResult {
    fn from_diagnostics(errors: Vec<SemanticError>, warnings: Vec<SemanticWarning>) -> Self {
        SemanticResult {
            valid: errors.is_empty(),
            errors: errors.iter().map(ToString::to_string).collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Checks statements against the tables of one CSV source
pub struct SemanticAnalyzer {
    source: CsvSource,
    wide_select_threshold: usize,
}

impl SemanticAnalyzer {
    pub fn new(config: &EngineConfig) -> Self {
        SemanticAnalyzer {
            source: CsvSource::from_config(config),
            wide_select_threshold: config.wide_select_threshold,
        }
    }

    /// Analyze a statement. Never fails: every problem becomes a diagnostic.
    pub fn analyze(&self, stmt: &SelectStatement) -> SemanticResult {
        if !self.source.exists(&stmt.table) {
            return SemanticResult::from_diagnostics(vec![SemanticError::FileNotFound(stmt.table.clone())], vec![]);
        }

        let table = match self.source.load_table(&stmt.table) {
            Ok(table) => table,
            Err(err) => return SemanticResult::from_diagnostics(vec![catalog_error(&stmt.table, err)], vec![]),
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        self.check_columns(stmt, &table, &mut errors);
        self.check_where_clause(stmt, &table, &mut errors);

        match stmt.limit {
            Some(0) => warnings.push(SemanticWarning::ZeroLimit),
            Some(n) if n < 0 => errors.push(SemanticError::NegativeLimit(n)),
            _ => {}
        }

        if stmt.selects_all() && table.column_count() > self.wide_select_threshold {
            warnings.push(SemanticWarning::WideSelect(table.column_count()));
        }

        debug!(
            "semantic analysis of '{}': {} error(s), {} warning(s)",
            stmt.table,
            errors.len(),
            warnings.len()
        );
        SemanticResult::from_diagnostics(errors, warnings)
    }

    fn check_columns(&self, stmt: &SelectStatement, table: &Table, errors: &mut Vec<SemanticError>) {
        for column in stmt.columns.iter().filter(|c| *c != WILDCARD) {
            if !table.has_column(column) {
                errors.push(SemanticError::UnknownColumn {
                    column: column.clone(),
                    table: stmt.table.clone(),
                    available: table.sorted_columns().join(", "),
                });
            }
        }
    }

    fn check_where_clause(&self, stmt: &SelectStatement, table: &Table, errors: &mut Vec<SemanticError>) {
        let Some(expr) = &stmt.where_clause else {
            return;
        };
        for column in expr.identifiers() {
            if !table.has_column(column) {
                errors.push(SemanticError::UnknownWhereColumn {
                    column: column.to_string(),
                    table: stmt.table.clone(),
                    available: table.sorted_columns().join(", "),
                });
            }
        }
    }
}

fn catalog_error(table: &str, err: CatalogError) -> SemanticError {
    match err {
        CatalogError::NotFound(_) => SemanticError::FileNotFound(table.to_string()),
        CatalogError::EmptyHeader(_) => SemanticError::EmptyHeader(table.to_string()),
        other => SemanticError::Unreadable {
            table: table.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Analyze a statement with the default configuration (tables relative to
/// the working directory)
pub fn analyze(stmt: &SelectStatement) -> SemanticResult {
    SemanticAnalyzer::new(&EngineConfig::default()).analyze(stmt)
}
