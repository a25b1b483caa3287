// Query Parser Components
//
// The parser is split into the token cursor, expression parsing and the
// SELECT statement grammar.

pub mod parser_core;
pub mod parser_expressions;
pub mod parser_select;

// Re-export frequently used items
pub use parser_core::{Parser, ParseResult, ParseError};
pub use parser_expressions::parse_expression;
pub use parser_select::parse_select;
