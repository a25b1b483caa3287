// Limit Operator Implementation
//
// Passes through at most `limit` rows, then stops pulling from its input so
// the underlying scan never reads the rest of the file.

use std::sync::Arc;

use crate::catalog::Table;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::{QueryResult, Row};

/// Limit operator
pub struct LimitOperator {
    input: Box<dyn Operator>,
    limit: usize,
    emitted: usize,
}

impl LimitOperator {
    pub fn new(input: Box<dyn Operator>, limit: usize) -> Self {
        LimitOperator {
            input,
            limit,
            emitted: 0,
        }
    }
}

impl Operator for LimitOperator {
    fn init(&mut self) -> QueryResult<()> {
        self.emitted = 0;
        self.input.init()
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        if self.emitted >= self.limit {
            return Ok(None);
        }
        let row = self.input.next()?;
        if row.is_some() {
            self.emitted += 1;
        }
        Ok(row)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.input.close()
    }

    fn schema(&self) -> QueryResult<Arc<Table>> {
        self.input.schema()
    }
}
