// Query Operators Module
//
// This module defines the operators used for query execution in the
// iterator-based execution model.

pub mod filter;
pub mod limit;
pub mod project;
pub mod scan;

use std::sync::Arc;

use crate::catalog::{CsvSource, Table};
use crate::query::executor::result::{QueryResult, Row};
use crate::query::parser::ast::Expression;

/// The Operator trait defines the interface for all query execution operators
/// in the iterator-based execution model. Each operator pulls rows from its
/// input and passes them on to its parent.
pub trait Operator: Send {
    /// Initialize the operator (and its inputs) before execution
    fn init(&mut self) -> QueryResult<()>;

    /// Get the next row of data from this operator
    fn next(&mut self) -> QueryResult<Option<Row>>;

    /// Close the operator and release any resources
    fn close(&mut self) -> QueryResult<()>;

    /// Column layout of the rows this operator produces. Available after `init`.
    fn schema(&self) -> QueryResult<Arc<Table>>;
}

// Factory functions for creating operators
pub fn create_csv_scan(source: CsvSource, table_name: &str) -> QueryResult<Box<dyn Operator>> {
    Ok(Box::new(scan::CsvScanOperator::new(source, table_name)))
}

pub fn create_filter(input: Box<dyn Operator>, predicate: Expression, epsilon: f64) -> QueryResult<Box<dyn Operator>> {
    Ok(Box::new(filter::FilterOperator::new(input, predicate, epsilon)))
}

pub fn create_projection(input: Box<dyn Operator>, columns: Vec<String>) -> QueryResult<Box<dyn Operator>> {
    Ok(Box::new(project::ProjectOperator::new(input, columns)))
}

pub fn create_limit(input: Box<dyn Operator>, limit: usize) -> QueryResult<Box<dyn Operator>> {
    Ok(Box::new(limit::LimitOperator::new(input, limit)))
}
