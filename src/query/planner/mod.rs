// Query Planner Module
//
// This module is responsible for translating parsed SQL statements into
// query plans.

pub mod logical;

// Export key types
pub use self::logical::{ast_to_ir, PlanStep, QueryPlan};
