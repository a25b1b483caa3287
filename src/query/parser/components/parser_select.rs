// SELECT Statement Parser Implementation
//
// select := SELECT columns FROM IDENTIFIER [WHERE expr] [LIMIT NUMBER]

use crate::query::parser::ast::{SelectStatement, WILDCARD};
use crate::query::parser::lexer::{Token, TokenType};
use super::parser_core::{Parser, ParseResult, ParseError};
use super::parser_expressions::parse_expression;

/// Parse a SELECT statement
pub fn parse_select(parser: &mut Parser) -> ParseResult<SelectStatement> {
    parser.expect_token(&TokenType::SELECT, "SELECT")?;

    let columns = parse_select_columns(parser)?;

    parser.expect_token(&TokenType::FROM, "FROM")?;

    // The table must be a bare identifier, quoted names are rejected
    let table = parser.parse_identifier("table name after FROM")?;

    let where_clause = if parser.match_token(&TokenType::WHERE) {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    let limit = if parser.match_token(&TokenType::LIMIT) {
        Some(parse_limit(parser)?)
    } else {
        None
    };

    Ok(SelectStatement {
        columns,
        table,
        where_clause,
        limit,
    })
}

/// columns := ('*' | IDENTIFIER) (',' ('*' | IDENTIFIER))*
fn parse_select_columns(parser: &mut Parser) -> ParseResult<Vec<String>> {
    const EXPECTED: &str = "column name or '*'";
    let mut columns = Vec::new();

    loop {
        match parser.current() {
            Some(Token { token_type: TokenType::STAR, .. }) => {
                columns.push(WILDCARD.to_string());
                parser.advance();
            }
            Some(Token { token_type: TokenType::IDENTIFIER(name), .. }) => {
                columns.push(name.clone());
                parser.advance();
            }
            Some(token) => return Err(ParseError::ExpectedToken { expected: EXPECTED, found: token.clone() }),
            None => return Err(ParseError::EndOfInput { expected: EXPECTED }),
        }

        if !parser.match_token(&TokenType::COMMA) {
            break;
        }
    }

    Ok(columns)
}

/// LIMIT takes a NUMBER token; its value is truncated toward zero
fn parse_limit(parser: &mut Parser) -> ParseResult<i64> {
    const EXPECTED: &str = "number after LIMIT";
    match parser.current() {
        Some(Token { token_type: TokenType::NUMBER(value), .. }) => {
            let limit = value.trunc() as i64;
            parser.advance();
            Ok(limit)
        }
        Some(token) => Err(ParseError::ExpectedToken { expected: EXPECTED, found: token.clone() }),
        None => Err(ParseError::EndOfInput { expected: EXPECTED }),
    }
}
