// Query Lexer Implementation
//
// This module turns raw query text into tokens. The lexer is total: characters
// it does not recognise are dropped and an unterminated string simply runs to
// the end of the input.

use std::collections::HashMap;
use std::fmt;

use log::trace;
use once_cell::sync::Lazy;

/// Token types of the query language
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    SELECT,
    FROM,
    WHERE,
    LIMIT,
    AND,
    OR,

    // Comparison operators
    EQUALS,       // =
    NotEqual,     // != or <>
    GreaterThan,  // >
    LessThan,     // <
    GreaterEqual, // >=
    LessEqual,    // <=

    // Punctuation
    STAR,  // *
    COMMA, // ,

    // Literals and identifiers
    IDENTIFIER(String),
    NUMBER(f64),
    STRING(String),
}

impl TokenType {
    /// Whether this token is one of the six comparison operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenType::EQUALS
                | TokenType::NotEqual
                | TokenType::GreaterThan
                | TokenType::LessThan
                | TokenType::GreaterEqual
                | TokenType::LessEqual
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::SELECT => write!(f, "SELECT"),
            TokenType::FROM => write!(f, "FROM"),
            TokenType::WHERE => write!(f, "WHERE"),
            TokenType::LIMIT => write!(f, "LIMIT"),
            TokenType::AND => write!(f, "AND"),
            TokenType::OR => write!(f, "OR"),
            TokenType::EQUALS => write!(f, "'='"),
            TokenType::NotEqual => write!(f, "'!='"),
            TokenType::GreaterThan => write!(f, "'>'"),
            TokenType::LessThan => write!(f, "'<'"),
            TokenType::GreaterEqual => write!(f, "'>='"),
            TokenType::LessEqual => write!(f, "'<='"),
            TokenType::STAR => write!(f, "'*'"),
            TokenType::COMMA => write!(f, "','"),
            TokenType::IDENTIFIER(name) => write!(f, "identifier '{}'", name),
            TokenType::NUMBER(value) => write!(f, "number {}", value),
            TokenType::STRING(value) => write!(f, "string \"{}\"", value),
        }
    }
}

/// A Token is one lexical unit of a query
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Source text the token was scanned from
    pub literal: String,
    /// Character offset of the token's first character
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.token_type, self.position)
    }
}

// Keyword table. Matching is case-sensitive: only the all-caps and the
// all-lowercase spellings are keywords, mixed case lexes as an identifier.
static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    let mut keywords = HashMap::new();
    for (upper, lower, token_type) in [
        ("SELECT", "select", TokenType::SELECT),
        ("FROM", "from", TokenType::FROM),
        ("WHERE", "where", TokenType::WHERE),
        ("LIMIT", "limit", TokenType::LIMIT),
        ("AND", "and", TokenType::AND),
        ("OR", "or", TokenType::OR),
    ] {
        keywords.insert(upper, token_type.clone());
        keywords.insert(lower, token_type);
    }
    keywords
});

/// Lexer for breaking a query string into tokens
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer over a query string
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.peek_char();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    /// Consume characters while `pred` holds and return them
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.position += 1;
        }
        text
    }

    fn skip_whitespace(&mut self) {
        self.read_while(|ch| matches!(ch, ' ' | '\t' | '\r' | '\n'));
    }

    fn source_since(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Read an identifier or keyword. `.` is part of the identifier class so
    /// that bare file names such as `data.csv` lex as one token.
    fn read_identifier(&mut self) -> TokenType {
        let text = self.read_while(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');
        match KEYWORDS.get(text.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::IDENTIFIER(text),
        }
    }

    /// Read a number. Malformed text such as `1.2.3` becomes 0.0.
    fn read_number(&mut self) -> TokenType {
        let text = self.read_while(|ch| ch.is_ascii_digit() || ch == '.');
        TokenType::NUMBER(text.parse::<f64>().unwrap_or(0.0))
    }

    /// Read a string literal closed by the same quote character that opened it
    fn read_string(&mut self) -> TokenType {
        let quote = self.read_char();
        let mut value = String::new();
        while let Some(ch) = self.read_char() {
            if Some(ch) == quote {
                return TokenType::STRING(value);
            }
            value.push(ch);
        }
        trace!("unterminated string literal, keeping {:?}", value);
        TokenType::STRING(value)
    }

    /// Read an operator or punctuation symbol; `None` means the character was dropped
    fn read_symbol(&mut self) -> Option<TokenType> {
        let ch = self.read_char()?;
        let token_type = match ch {
            '*' => TokenType::STAR,
            ',' => TokenType::COMMA,
            '=' => TokenType::EQUALS,
            '!' if self.peek_char() == Some('=') => {
                self.read_char();
                TokenType::NotEqual
            }
            '>' if self.peek_char() == Some('=') => {
                self.read_char();
                TokenType::GreaterEqual
            }
            '>' => TokenType::GreaterThan,
            '<' => match self.peek_char() {
                Some('=') => {
                    self.read_char();
                    TokenType::LessEqual
                }
                Some('>') => {
                    self.read_char();
                    TokenType::NotEqual
                }
                _ => TokenType::LessThan,
            },
            other => {
                trace!("dropping unrecognised character {:?} at position {}", other, self.position - 1);
                return None;
            }
        };
        Some(token_type)
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let start = self.position;
            let ch = self.peek_char()?;

            let token_type = if ch.is_ascii_alphabetic() || ch == '_' {
                Some(self.read_identifier())
            } else if ch.is_ascii_digit() {
                Some(self.read_number())
            } else if ch == '"' || ch == '\'' {
                Some(self.read_string())
            } else {
                self.read_symbol()
            };

            if let Some(token_type) = token_type {
                return Some(Token {
                    token_type,
                    literal: self.source_since(start),
                    position: start,
                });
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Scan a whole query into its token sequence
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}
