// Logical Query Plan Implementation
//
// This module defines the plan representation that sits between the AST and
// execution: a flat list of steps in a fixed order.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::query::parser::ast::SelectStatement;

/// One step of a query plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum PlanStep {
    /// Read every row of a CSV file
    Scan { table: String },
    /// Keep rows matching the WHERE clause. `condition` is the rendered
    /// expression, for display only.
    Filter { condition: String },
    /// Output the listed columns (`*` meaning all)
    Project { columns: Vec<String> },
    /// Stop after this many rows
    Limit { count: i64 },
}

impl PlanStep {
    /// Upper-case step name used in plan listings
    pub fn name(&self) -> &'static str {
        match self {
            PlanStep::Scan { .. } => "SCAN",
            PlanStep::Filter { .. } => "FILTER",
            PlanStep::Project { .. } => "PROJECT",
            PlanStep::Limit { .. } => "LIMIT",
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::Scan { table } => write!(f, "{}: {}", self.name(), table),
            PlanStep::Filter { condition } => write!(f, "{}: {}", self.name(), condition),
            PlanStep::Project { columns } => write!(f, "{}: {}", self.name(), columns.join(", ")),
            PlanStep::Limit { count } => write!(f, "{}: {}", self.name(), count),
        }
    }
}

/// Ordered list of plan steps: Scan, [Filter], Project, [Limit]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    pub steps: Vec<PlanStep>,
}

impl QueryPlan {
    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in order, e.g. `["SCAN", "PROJECT"]`
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(PlanStep::name).collect()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

/// Translate a SELECT statement into a query plan
///
/// Filtering comes before projection so the predicate can use columns that
/// are not selected, and before the limit so LIMIT counts matching rows.
pub fn ast_to_ir(stmt: &SelectStatement) -> QueryPlan {
    let mut steps = vec![PlanStep::Scan {
        table: stmt.table.clone(),
    }];

    if let Some(expr) = &stmt.where_clause {
        steps.push(PlanStep::Filter {
            condition: expr.to_string(),
        });
    }

    steps.push(PlanStep::Project {
        columns: stmt.columns.clone(),
    });

    if let Some(count) = stmt.limit {
        steps.push(PlanStep::Limit { count });
    }

    let plan = QueryPlan { steps };
    debug!("query plan: {:?}", plan.step_names());
    plan
}
