// Semantic Analysis Module
//
// Checks a parsed statement against the real CSV header before execution.

pub mod analyzer;
pub mod diagnostics;

pub use self::analyzer::{analyze, SemanticAnalyzer, SemanticResult};
pub use self::diagnostics::{SemanticError, SemanticWarning};
