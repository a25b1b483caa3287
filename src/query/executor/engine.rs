// Query Execution Engine Implementation
//
// This module implements the engine for executing SELECT statements against
// CSV files, and the full text-to-rows pipeline built on top of it.

use log::{debug, info};

use crate::catalog::CsvSource;
use crate::config::EngineConfig;
use crate::query::executor::operators::{self, Operator};
use crate::query::executor::result::{QueryError, QueryResult, QueryResultSet};
use crate::query::parser::ast::SelectStatement;
use crate::query::parser::{self, tokenize, Token};
use crate::query::planner::{ast_to_ir, QueryPlan};
use crate::query::semantic::{SemanticAnalyzer, SemanticResult};

/// Everything produced while running one query through the pipeline
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub tokens: Vec<Token>,
    pub statement: SelectStatement,
    pub semantic: SemanticResult,
    pub plan: QueryPlan,
    pub result: QueryResultSet,
}

pub struct ExecutionEngine {
    config: EngineConfig,
    source: CsvSource,
    analyzer: SemanticAnalyzer,
}

impl ExecutionEngine {
    pub fn new(config: EngineConfig) -> Self {
        ExecutionEngine {
            source: CsvSource::from_config(&config),
            analyzer: SemanticAnalyzer::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &SemanticAnalyzer {
        &self.analyzer
    }

    /// Build the operator pipeline for a statement: scan, filter, project, limit
    fn build_operator_tree(&self, stmt: &SelectStatement) -> QueryResult<Box<dyn Operator>> {
        let mut root = operators::create_csv_scan(self.source.clone(), &stmt.table)?;

        if let Some(predicate) = &stmt.where_clause {
            root = operators::create_filter(root, predicate.clone(), self.config.float_epsilon)?;
        }

        root = operators::create_projection(root, stmt.columns.clone())?;

        if let Some(limit) = stmt.limit {
            let limit = usize::try_from(limit)
                .map_err(|_| QueryError::Execution(format!("LIMIT must not be negative, got {}", limit)))?;
            root = operators::create_limit(root, limit)?;
        }

        Ok(root)
    }

    /// Execute a SELECT statement, streaming rows from its CSV file
    ///
    /// No semantic checks happen here; unknown columns simply read as empty.
    pub fn execute(&self, stmt: &SelectStatement) -> QueryResult<QueryResultSet> {
        let mut root = self.build_operator_tree(stmt)?;
        root.init()?;

        let drained = Self::drain(root.as_mut());
        // The file is released whether or not draining succeeded
        let closed = root.close();
        let result = drained?;
        closed?;

        info!("query on '{}' returned {} row(s)", stmt.table, result.row_count());
        Ok(result)
    }

    fn drain(root: &mut dyn Operator) -> QueryResult<QueryResultSet> {
        let mut result = QueryResultSet::new(root.schema()?.columns().to_vec());
        while let Some(row) = root.next()? {
            result.add_row(row.into_values());
        }
        Ok(result)
    }

    /// Run query text through every stage: tokenize, parse, analyze, plan, execute
    ///
    /// A statement that fails semantic analysis is never executed; its
    /// diagnostics come back in `QueryError::Semantic`.
    pub fn execute_query(&self, query: &str) -> QueryResult<QueryOutcome> {
        let tokens = tokenize(query);
        debug!("tokens: {:?}", tokens);

        let statement = parser::parse(tokens.clone())?;

        let semantic = self.analyzer.analyze(&statement);
        if !semantic.valid {
            return Err(QueryError::Semantic(semantic));
        }

        let plan = ast_to_ir(&statement);
        debug!("plan:\n{}", plan);

        let result = self.execute(&statement)?;

        Ok(QueryOutcome {
            tokens,
            statement,
            semantic,
            plan,
            result,
        })
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Execute a statement with the default configuration, returning
/// `(headers, rows)`
pub fn execute(stmt: &SelectStatement) -> QueryResult<(Vec<String>, Vec<Vec<String>>)> {
    ExecutionEngine::default().execute(stmt).map(QueryResultSet::into_parts)
}
