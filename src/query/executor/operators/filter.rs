// Filter Operator Implementation
//
// This module implements the filter operator for filtering rows based on predicates.

use std::sync::Arc;

use log::trace;

use crate::catalog::Table;
use crate::query::executor::expression_eval::evaluate_predicate;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::{QueryError, QueryResult, Row};
use crate::query::parser::ast::Expression;

/// Filter operator that filters rows based on a predicate
pub struct FilterOperator {
    /// The input operator
    input: Box<dyn Operator>,
    /// The WHERE expression
    predicate: Expression,
    /// Tolerance for numeric equality
    epsilon: f64,
    /// Whether the operator is initialized
    initialized: bool,
}

impl FilterOperator {
    /// Create a new filter operator
    pub fn new(input: Box<dyn Operator>, predicate: Expression, epsilon: f64) -> Self {
        FilterOperator {
            input,
            predicate,
            epsilon,
            initialized: false,
        }
    }
}

impl Operator for FilterOperator {
    fn init(&mut self) -> QueryResult<()> {
        self.input.init()?;
        self.initialized = true;
        Ok(())
    }

    /// Get the next row that satisfies the predicate
    fn next(&mut self) -> QueryResult<Option<Row>> {
        if !self.initialized {
            return Err(QueryError::Execution("Operator not initialized".to_string()));
        }

        while let Some(row) = self.input.next()? {
            let keep = evaluate_predicate(&self.predicate, &row, self.epsilon);
            trace!("filter {} on {:?}: {}", self.predicate, row.values(), keep);
            if keep {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.initialized = false;
        self.input.close()
    }

    fn schema(&self) -> QueryResult<Arc<Table>> {
        self.input.schema()
    }
}
