// Expression Parser Implementation
//
// This module implements WHERE-clause expression parsing. Precedence is
// encoded by the nesting of the functions: OR binds loosest, then AND, then
// a single comparison.

use crate::query::parser::ast::{Expression, Operator};
use crate::query::parser::lexer::TokenType;
use super::parser_core::{Parser, ParseResult, ParseError};

/// Parse a full WHERE expression
pub fn parse_expression(parser: &mut Parser) -> ParseResult<Expression> {
    parse_or(parser)
}

/// or_expr := and_expr (OR and_expr)*
fn parse_or(parser: &mut Parser) -> ParseResult<Expression> {
    let mut left = parse_and(parser)?;
    while parser.match_token(&TokenType::OR) {
        let right = parse_and(parser)?;
        left = Expression::binary(left, Operator::Or, right);
    }
    Ok(left)
}

/// and_expr := comparison (AND comparison)*
fn parse_and(parser: &mut Parser) -> ParseResult<Expression> {
    let mut left = parse_comparison(parser)?;
    while parser.match_token(&TokenType::AND) {
        let right = parse_comparison(parser)?;
        left = Expression::binary(left, Operator::And, right);
    }
    Ok(left)
}

/// comparison := leaf [comp_op leaf]
fn parse_comparison(parser: &mut Parser) -> ParseResult<Expression> {
    let left = parse_leaf(parser)?;

    let op = match parser.current().and_then(|token| token_to_operator(&token.token_type)) {
        Some(op) => op,
        None => return Ok(left),
    };
    parser.advance();

    let right = parse_leaf(parser)?;
    Ok(Expression::binary(left, op, right))
}

/// leaf := IDENTIFIER | NUMBER | STRING_LITERAL
fn parse_leaf(parser: &mut Parser) -> ParseResult<Expression> {
    let token = parser
        .current()
        .ok_or(ParseError::EndOfInput { expected: "identifier, number or string literal" })?;

    let expr = match &token.token_type {
        TokenType::IDENTIFIER(name) => Expression::Identifier(name.clone()),
        TokenType::NUMBER(value) => Expression::Number(*value),
        TokenType::STRING(value) => Expression::StringLiteral(value.clone()),
        _ => return Err(ParseError::UnexpectedToken(token.clone())),
    };
    parser.advance();
    Ok(expr)
}

/// Map a comparison token to its operator
pub fn token_to_operator(token_type: &TokenType) -> Option<Operator> {
    match token_type {
        TokenType::EQUALS => Some(Operator::Equals),
        TokenType::NotEqual => Some(Operator::NotEquals),
        TokenType::GreaterThan => Some(Operator::GreaterThan),
        TokenType::LessThan => Some(Operator::LessThan),
        TokenType::GreaterEqual => Some(Operator::GreaterEquals),
        TokenType::LessEqual => Some(Operator::LessEquals),
        _ => None,
    }
}
