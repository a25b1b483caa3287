// Projection Operator Implementation
//
// Maps input rows onto the SELECT column list. `*` expands in place to every
// header column in file order; a named column the input lacks yields "".

use std::sync::Arc;

use crate::catalog::Table;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::{QueryError, QueryResult, Row};
use crate::query::parser::ast::WILDCARD;

/// Projection operator that selects columns from input rows
pub struct ProjectOperator {
    /// The input operator
    input: Box<dyn Operator>,
    /// Requested columns, as written
    columns: Vec<String>,
    /// Output layout and, per output column, its input position
    output: Option<(Arc<Table>, Vec<Option<usize>>)>,
}

impl ProjectOperator {
    /// Create a new projection operator
    pub fn new(input: Box<dyn Operator>, columns: Vec<String>) -> Self {
        ProjectOperator {
            input,
            columns,
            output: None,
        }
    }

    fn resolve_columns(&self, input: &Table) -> (Vec<String>, Vec<Option<usize>>) {
        let mut names = Vec::new();
        let mut positions = Vec::new();
        for column in &self.columns {
            if column == WILDCARD {
                names.extend(input.columns().iter().cloned());
                positions.extend((0..input.column_count()).map(Some));
            } else {
                names.push(column.clone());
                positions.push(input.column_index(column));
            }
        }
        (names, positions)
    }
}

impl Operator for ProjectOperator {
    fn init(&mut self) -> QueryResult<()> {
        self.input.init()?;
        let input_schema = self.input.schema()?;
        let (names, positions) = self.resolve_columns(&input_schema);
        self.output = Some((Arc::new(Table::new(input_schema.name(), names)), positions));
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        let (schema, positions) = self
            .output
            .as_ref()
            .ok_or_else(|| QueryError::Execution("Operator not initialized".to_string()))?;

        let Some(row) = self.input.next()? else {
            return Ok(None);
        };

        let values = positions
            .iter()
            .map(|pos| pos.and_then(|i| row.get_at(i)).unwrap_or("").to_string())
            .collect();
        Ok(Some(Row::new(schema.clone(), values)))
    }

    fn close(&mut self) -> QueryResult<()> {
        self.input.close()
    }

    fn schema(&self) -> QueryResult<Arc<Table>> {
        self.output
            .as_ref()
            .map(|(schema, _)| schema.clone())
            .ok_or_else(|| QueryError::Execution("Operator not initialized".to_string()))
    }
}
