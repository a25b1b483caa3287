// Expression Evaluation Utility
//
// WHERE-clause evaluation against a row of untyped CSV text.
//
// `=` and `!=` compare as text when both operands have a text value and fall
// back to an epsilon numeric comparison otherwise. Ordering operators are
// always numeric. Unparseable or missing numeric values read as 0.0. A
// column the row knows nothing about has no text value, so `=` against it
// always takes the numeric path.

use crate::config::DEFAULT_FLOAT_EPSILON;
use crate::query::executor::result::RowValues;
use crate::query::parser::ast::{Expression, Operator};

/// Evaluate a predicate with the default epsilon
pub fn eval<R: RowValues + ?Sized>(expr: &Expression, row: &R) -> bool {
    evaluate_predicate(expr, row, DEFAULT_FLOAT_EPSILON)
}

/// Evaluate a predicate in the context of a single row
pub fn evaluate_predicate<R: RowValues + ?Sized>(expr: &Expression, row: &R, epsilon: f64) -> bool {
    let Expression::BinaryOp { left, op, right } = expr else {
        return false;
    };

    match op {
        Operator::And => evaluate_predicate(left, row, epsilon) && evaluate_predicate(right, row, epsilon),
        Operator::Or => evaluate_predicate(left, row, epsilon) || evaluate_predicate(right, row, epsilon),
        Operator::Equals | Operator::NotEquals => {
            let equal = match (string_value(left, row), string_value(right, row)) {
                (Some(l), Some(r)) => l == r,
                _ => (numeric_value(left, row) - numeric_value(right, row)).abs() < epsilon,
            };
            if *op == Operator::Equals { equal } else { !equal }
        }
        Operator::GreaterThan => numeric_value(left, row) > numeric_value(right, row),
        Operator::LessThan => numeric_value(left, row) < numeric_value(right, row),
        Operator::GreaterEquals => numeric_value(left, row) >= numeric_value(right, row),
        Operator::LessEquals => numeric_value(left, row) <= numeric_value(right, row),
    }
}

/// Text value of an operand. Numbers have none, and neither does an
/// identifier the row has no value for.
pub fn string_value<'a, R: RowValues + ?Sized>(expr: &'a Expression, row: &'a R) -> Option<&'a str> {
    match expr {
        Expression::StringLiteral(s) | Expression::Literal(s) => Some(s),
        Expression::Identifier(name) => row.value(name),
        Expression::Number(_) | Expression::BinaryOp { .. } => None,
    }
}

/// Numeric value of an operand
pub fn numeric_value<R: RowValues + ?Sized>(expr: &Expression, row: &R) -> f64 {
    match expr {
        Expression::Number(n) => *n,
        Expression::Identifier(name) => row
            .value(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}
