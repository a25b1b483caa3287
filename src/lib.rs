// CSVQL Query Engine
//
// A small SQL-like query language over CSV files: lexer, recursive-descent
// parser, semantic analysis against the CSV header, a linear query plan and
// an iterator-based execution engine.

pub mod catalog;
pub mod config;
pub mod query;

// Re-export key items for convenient access
pub use catalog::{CatalogError, CsvSource, Table};
pub use config::EngineConfig;
pub use query::parser::{Parser, ParseError};
pub use query::executor::engine::ExecutionEngine;
pub use query::executor::result::{QueryError, QueryResult, QueryResultSet};
pub use query::semantic::SemanticResult;
pub use query::planner::QueryPlan;
