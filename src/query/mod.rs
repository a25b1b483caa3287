// Query Processing Module
//
// This module contains the compilation pipeline: parsing, semantic analysis,
// query planning and execution.

pub mod parser;
pub mod semantic;
pub mod planner;
pub mod executor;

// Export key public interfaces
pub use parser::{parse, parse_sql, tokenize, Parser};
pub use semantic::{analyze, SemanticAnalyzer, SemanticResult};
pub use planner::{ast_to_ir, QueryPlan};
pub use executor::engine::{ExecutionEngine, QueryOutcome};
pub use executor::result::{QueryError, QueryResult, QueryResultSet};
