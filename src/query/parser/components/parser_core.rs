// Core Parser Implementation
//
// This module implements the token cursor shared by the parser components.

use std::fmt;

use crate::query::parser::lexer::{tokenize, Token, TokenType};

/// Query parsing errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A specific construct was required but another token was found
    ExpectedToken { expected: &'static str, found: Token },
    /// A token that cannot start the construct being parsed
    UnexpectedToken(Token),
    /// Input ended while a construct was still required
    EndOfInput { expected: &'static str },
    /// Tokens left over after a complete statement
    TrailingInput(Token),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ExpectedToken { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            ParseError::UnexpectedToken(token) => {
                write!(f, "Expected identifier, number or string literal, found {}", token)
            }
            ParseError::EndOfInput { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            ParseError::TrailingInput(token) => {
                write!(f, "Unexpected {} after end of statement", token)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a token sequence with a single forward cursor
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser over an already scanned token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Create a parser directly from query text
    pub fn from_sql(input: &str) -> Self {
        Self::new(tokenize(input))
    }

    /// The token under the cursor, if any
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Move the cursor forward by one token
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Whether all tokens have been consumed
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if the current token has the given type (payloads are ignored)
    pub fn current_token_is(&self, token_type: &TokenType) -> bool {
        self.current()
            .is_some_and(|token| std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type))
    }

    /// Consume the current token if it has the given type
    pub fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.current_token_is(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given type or fail, describing it as `expected`
    pub fn expect_token(&mut self, token_type: &TokenType, expected: &'static str) -> ParseResult<Token> {
        match self.current() {
            Some(token) if self.current_token_is(token_type) => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            Some(token) => Err(ParseError::ExpectedToken { expected, found: token.clone() }),
            None => Err(ParseError::EndOfInput { expected }),
        }
    }

    /// Consume an IDENTIFIER token and return its name
    pub fn parse_identifier(&mut self, expected: &'static str) -> ParseResult<String> {
        match self.current() {
            Some(Token { token_type: TokenType::IDENTIFIER(name), .. }) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            Some(token) => Err(ParseError::ExpectedToken { expected, found: token.clone() }),
            None => Err(ParseError::EndOfInput { expected }),
        }
    }

    /// Fail if any token remains
    pub fn expect_end(&self) -> ParseResult<()> {
        match self.current() {
            Some(token) => Err(ParseError::TrailingInput(token.clone())),
            None => Ok(()),
        }
    }
}
