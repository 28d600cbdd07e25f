//! Parse-time error taxonomy.
//!
//! Lexical and syntactic failures share one error type so callers (query
//! boxes, filter bars) only handle a single shape: what went wrong, the index
//! of the offending token, and a few surrounding tokens for display.

use thiserror::Error;

use crate::ast::{LogicalOperator, Operation, Token, TokenType, ValueKind};

/// What went wrong while turning AQL text into an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("Invalid identifier format '{0}': only Latin letters and underscores are allowed")]
    InvalidIdentifierFormat(String),

    #[error("Identifier '{0}' is not allowed")]
    ForbiddenIdentifier(String),

    #[error("Operation {0} is not allowed")]
    ForbiddenOperation(Operation),

    #[error("Logical operator {0} is not allowed")]
    ForbiddenLogicalOperator(LogicalOperator),

    #[error("Value type {0} is not allowed")]
    ForbiddenValueType(ValueKind),

    #[error("Parentheses are not allowed")]
    ForbiddenParentheses,

    #[error("Bracket access is not allowed")]
    ForbiddenBracketAccess,

    #[error("Expected {expected}, got {found}")]
    ExpectedToken { expected: TokenType, found: TokenType },

    #[error("Expected operation")]
    ExpectedOperation,

    #[error("Expected value")]
    ExpectedValue,

    #[error("Expected accessor")]
    ExpectedAccessor,
}

/// A positioned parse failure.
///
/// `position` is a token index. `context` holds the text of up to two tokens
/// before and two after that index.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at position {position}{}", render_context(.context))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
    pub context: Option<String>,
}

fn render_context(context: &Option<String>) -> String {
    match context {
        Some(ctx) => format!(" (near: {})", ctx),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError {
            kind,
            position,
            context: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ParseError::new(ParseErrorKind::InvalidInput(message.into()), 0)
    }

    /// Attaches the token window around `position`.
    pub fn with_tokens(mut self, tokens: &[Token]) -> Self {
        self.context = error_context(tokens, self.position);
        self
    }
}

/// Renders tokens `position - 2 ..= position + 2` by source text, falling
/// back to the type name.
pub fn error_context(tokens: &[Token], position: usize) -> Option<String> {
    if tokens.is_empty() || position > tokens.len() {
        return None;
    }

    let start = position.saturating_sub(2);
    let end = tokens.len().min(position + 3);
    if start >= end {
        return None;
    }

    let parts: Vec<&str> = tokens[start..end].iter().map(Token::text).collect();
    Some(parts.join(" "))
}
