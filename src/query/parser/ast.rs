// Query Abstract Syntax Tree (AST) Implementation
//
// This module defines the AST nodes produced by the parser.

use std::fmt;

use serde::Serialize;

/// Column list entry meaning "all columns of the file"
pub const WILDCARD: &str = "*";

/// SELECT statement representation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    /// Columns in SELECT clause, in the order written; `*` is kept as a literal entry
    pub columns: Vec<String>,
    /// FROM clause: the CSV file to read
    pub table: String,
    /// WHERE clause (optional)
    pub where_clause: Option<Expression>,
    /// LIMIT clause (optional). Signed so that a negative value built by hand
    /// can be reported by semantic analysis.
    pub limit: Option<i64>,
}

impl SelectStatement {
    /// Whether the column list contains the `*` entry
    pub fn selects_all(&self) -> bool {
        self.columns.iter().any(|c| c == WILDCARD)
    }
}

/// Expression in a WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// Binary operation (comparison, AND, OR)
    BinaryOp {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },
    /// Column reference, resolved against the CSV header
    Identifier(String),
    /// Numeric literal
    Number(f64),
    /// Quoted string literal
    StringLiteral(String),
    /// Unquoted literal text. The parser never produces it.
    Literal(String),
}

impl Expression {
    /// Convenience constructor for a binary operation
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// All column names referenced in this expression, left to right
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expression::Identifier(name) => names.push(name),
            Expression::BinaryOp { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
            Expression::Number(_) | Expression::StringLiteral(_) | Expression::Literal(_) => {}
        }
    }
}

/// Operators of the WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    // Comparison
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterEquals,
    LessEquals,
    // Logical
    And,
    Or,
}

impl Operator {
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterEquals => ">=",
            Operator::LessEquals => "<=",
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Human readable rendering used for plan display. AND/OR nodes are
/// parenthesised so precedence is visible; the output is not meant to be
/// parsed again.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already drops the `.0` of integral values
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Identifier(name) => f.write_str(name),
            Expression::StringLiteral(s) => write!(f, "\"{}\"", s),
            Expression::Literal(s) => f.write_str(s),
            Expression::BinaryOp { left, op, right } if op.is_logical() => {
                write!(f, "({} {} {})", left, op, right)
            }
            Expression::BinaryOp { left, op, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}
