// Query Executor Module
//
// This module is responsible for executing SELECT statements and producing
// results. It implements the iterator-based execution model for query processing.

pub mod engine;
pub mod expression_eval;
pub mod operators;
pub mod result;

// Export key types
pub use self::engine::{execute, ExecutionEngine, QueryOutcome};
pub use self::expression_eval::{eval, evaluate_predicate};
pub use self::operators::Operator;
pub use self::result::{QueryError, QueryResult, QueryResultSet, Row, RowValues};
