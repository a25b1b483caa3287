// Query Parser Module
//
// This module is responsible for turning query text into tokens and tokens
// into a SELECT statement AST.

pub mod lexer;
pub mod ast;
pub mod components;

use log::debug;

// Export key types
pub use self::lexer::{tokenize, Lexer, Token, TokenType};
pub use self::ast::{Expression, Operator, SelectStatement};
pub use self::components::{Parser, ParseError, ParseResult};

/// Parse a token sequence into a SELECT statement. The whole sequence must be
/// consumed; one error aborts the parse.
pub fn parse(tokens: Vec<Token>) -> ParseResult<SelectStatement> {
    let mut parser = Parser::new(tokens);
    let statement = components::parse_select(&mut parser)?;
    parser.expect_end()?;
    debug!("parsed statement: {:?}", statement);
    Ok(statement)
}

/// Tokenize and parse query text in one step
pub fn parse_sql(input: &str) -> ParseResult<SelectStatement> {
    parse(tokenize(input))
}
