use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    ast::{
        Accessor, AccessorParam, BinaryOperator, ComparisonOperator, Expression, Literal,
        LogicalOperator, Number, Operation, Token, TokenType, ValueKind,
    },
    config::ParserConfig,
    context::{Context, resolve_literal},
    error::{ParseError, ParseErrorKind},
    lexer::Lexer,
};

/// Outcome of a successful parse; `None` for input without tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub expression: Option<Expression>,
}

/// Single-use recursive-descent parser over one tokenized query.
///
/// ```text
/// expr      := orExpr
/// orExpr    := andExpr (OR andExpr)*
/// andExpr   := notExpr (AND notExpr)*
/// notExpr   := NOT notExpr | primary
/// primary   := '(' expr ')' | BOOLEAN | accessor IN array | accessor operation value
/// ```
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    context: Option<&'a dyn Context>,
    config: &'a ParserConfig,
}

impl<'a> Parser<'a> {
    /// Tokenizes `input`. Fails with `InvalidInput` for an empty string
    /// before any tokenizing happens.
    pub fn new(
        input: &str,
        context: Option<&'a dyn Context>,
        config: &'a ParserConfig,
    ) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::invalid_input("Input must be a non-empty string"));
        }

        let tokens = Lexer::new(input).tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
            context,
            config,
        })
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    fn reached_eol(&self) -> bool {
        self.current().token_type == TokenType::Eol
    }

    fn advance(&mut self) {
        if !self.reached_eol() {
            self.position += 1;
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current().token_type == token_type
    }

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenType) -> Result<(), ParseError> {
        if self.match_token(expected) {
            return Ok(());
        }
        let current = self.current();
        Err(self.fail(
            ParseErrorKind::ExpectedToken {
                expected,
                found: current.token_type,
            },
            current.position,
        ))
    }

    fn fail(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError::new(kind, position).with_tokens(&self.tokens)
    }

    /// Parses the whole query; the parser is consumed.
    pub fn parse(mut self) -> Result<ParseResult, ParseError> {
        if self.reached_eol() {
            return Ok(ParseResult { expression: None });
        }

        let expression = self.parse_or()?;
        self.expect(TokenType::Eol)?;
        debug!(tokens = self.tokens.len(), "parsed AQL expression");
        Ok(ParseResult {
            expression: Some(expression),
        })
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_and()?;

        while self.match_token(TokenType::Or) {
            self.gate_logical_operator(LogicalOperator::Or, self.previous().position)?;
            let right = self.parse_and()?;
            left = Expression::binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_not()?;

        while self.match_token(TokenType::And) {
            self.gate_logical_operator(LogicalOperator::And, self.previous().position)?;
            let right = self.parse_not()?;
            left = Expression::binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(TokenType::Not) {
            self.gate_logical_operator(LogicalOperator::Not, self.previous().position)?;
            let inner = self.parse_not()?; // Right-associative
            return Ok(Expression::not(inner));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(TokenType::LParen) {
            if !self.config.parentheses {
                return Err(self.fail(
                    ParseErrorKind::ForbiddenParentheses,
                    self.previous().position,
                ));
            }
            let inner = self.parse_or()?;
            self.expect(TokenType::RParen)?;
            return Ok(Expression::paren(inner));
        }

        if self.match_token(TokenType::Boolean) {
            return Ok(Expression::boolean(is_true(self.previous())));
        }

        let left = self.parse_accessor()?;

        if self.match_token(TokenType::In) {
            self.gate_operation(Operation::In, self.previous().position)?;
            let right = self.parse_array()?;
            return Ok(Expression::array_condition(left, right));
        }

        let operator = self.parse_operation()?;
        let right = self.parse_value()?;
        Ok(Expression::Condition {
            left,
            operator,
            right,
        })
    }

    fn parse_accessor(&mut self) -> Result<Accessor, ParseError> {
        self.expect(TokenType::Identifier)?;
        let token = self.previous();
        let identifier = token.text().to_string();
        let position = token.position;

        if !is_latin_identifier(&identifier) {
            return Err(self.fail(ParseErrorKind::InvalidIdentifierFormat(identifier), position));
        }
        if !self.config.allows_identifier(&identifier) {
            return Err(self.fail(ParseErrorKind::ForbiddenIdentifier(identifier), position));
        }

        if !self.match_token(TokenType::LBracket) {
            return Ok(Accessor {
                identifier,
                param: None,
            });
        }

        if !self.config.index_access {
            return Err(self.fail(
                ParseErrorKind::ForbiddenBracketAccess,
                self.previous().position,
            ));
        }

        let param = if self.match_token(TokenType::String) {
            AccessorParam::Key(unquote(self.previous().text()))
        } else if self.match_token(TokenType::Number) {
            let token = self.previous();
            match Number::parse(token.text()) {
                Some(n) => AccessorParam::Index(n),
                None => {
                    return Err(self.fail(ParseErrorKind::ExpectedAccessor, token.position));
                }
            }
        } else {
            return Err(self.fail(ParseErrorKind::ExpectedAccessor, self.current().position));
        };

        self.expect(TokenType::RBracket)?;
        Ok(Accessor {
            identifier,
            param: Some(param),
        })
    }

    fn parse_operation(&mut self) -> Result<ComparisonOperator, ParseError> {
        let position = self.current().position;
        let operator = match self.current().token_type {
            TokenType::Gt => ComparisonOperator::Gt,
            TokenType::Ge => ComparisonOperator::Ge,
            TokenType::Lt => ComparisonOperator::Lt,
            TokenType::Le => ComparisonOperator::Le,
            TokenType::Eq => ComparisonOperator::Eq,
            TokenType::Neq => ComparisonOperator::Neq,
            TokenType::Contains => ComparisonOperator::Contains,
            _ => return Err(self.fail(ParseErrorKind::ExpectedOperation, position)),
        };
        self.advance();
        self.gate_operation(operator.into(), position)?;
        Ok(operator)
    }

    fn parse_value(&mut self) -> Result<Literal, ParseError> {
        let token = self.current().clone();
        let kind = match token.token_type {
            TokenType::Null => ValueKind::Null,
            TokenType::Boolean => ValueKind::Boolean,
            TokenType::Number => ValueKind::Number,
            TokenType::String => ValueKind::String,
            TokenType::Function => ValueKind::Function,
            _ => return Err(self.fail(ParseErrorKind::ExpectedValue, token.position)),
        };
        self.advance();
        self.gate_value_type(kind, token.position)?;

        let literal = match kind {
            ValueKind::Null => Literal::Null,
            ValueKind::Boolean => Literal::Boolean(is_true(&token)),
            ValueKind::Number => match Number::parse(token.text()) {
                Some(n) => Literal::Number(n),
                None => return Err(self.fail(ParseErrorKind::ExpectedValue, token.position)),
            },
            ValueKind::String => Literal::String(unquote(token.text())),
            ValueKind::Function => self.resolve_function(token.text()),
        };
        Ok(literal)
    }

    fn resolve_function(&self, key: &str) -> Literal {
        let value = match self.context {
            Some(ctx) if !ctx.is_empty() => ctx.lookup(key),
            _ => None,
        };
        let literal = resolve_literal(value);
        trace!(key, kind = %literal.kind(), "resolved function literal from context");
        literal
    }

    fn parse_array(&mut self) -> Result<Vec<Literal>, ParseError> {
        self.expect(TokenType::LBracket)?;
        let mut values = vec![];

        if !self.match_token(TokenType::RBracket) {
            loop {
                values.push(self.parse_value()?);
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RBracket)?;
        }
        Ok(values)
    }

    fn gate_logical_operator(&self, op: LogicalOperator, position: usize) -> Result<(), ParseError> {
        if self.config.allows_logical_operator(op) {
            Ok(())
        } else {
            Err(self.fail(ParseErrorKind::ForbiddenLogicalOperator(op), position))
        }
    }

    fn gate_operation(&self, op: Operation, position: usize) -> Result<(), ParseError> {
        if self.config.allows_operation(op) {
            Ok(())
        } else {
            Err(self.fail(ParseErrorKind::ForbiddenOperation(op), position))
        }
    }

    fn gate_value_type(&self, kind: ValueKind, position: usize) -> Result<(), ParseError> {
        if self.config.allows_value_type(kind) {
            Ok(())
        } else {
            Err(self.fail(ParseErrorKind::ForbiddenValueType(kind), position))
        }
    }
}

fn is_true(token: &Token) -> bool {
    token.text().eq_ignore_ascii_case("true")
}

fn is_latin_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Decodes a quoted string literal in one pass.
///
/// `\n \t \r \" \\` become their characters; any other `\x` is kept as the
/// two characters `\` and `x`.
pub fn unquote(quoted: &str) -> String {
    let Some(inner) = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    else {
        return quoted.to_string();
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Parses AQL with no context and no restrictions.
///
/// # Examples
///
/// ```
/// use aql_lang::{parse_aql, Expression};
///
/// let result = parse_aql(r#"status = "passed""#).unwrap();
/// assert!(matches!(result.expression, Some(Expression::Condition { .. })));
///
/// assert_eq!(parse_aql("").unwrap().expression, None);
/// ```
pub fn parse_aql(aql: &str) -> Result<ParseResult, ParseError> {
    parse_aql_with(aql, None, &ParserConfig::default())
}

/// Parses AQL, resolving `name()` placeholders through `context` and
/// enforcing `config`. Empty input yields no expression.
pub fn parse_aql_with(
    aql: &str,
    context: Option<&dyn Context>,
    config: &ParserConfig,
) -> Result<ParseResult, ParseError> {
    if aql.is_empty() {
        return Ok(ParseResult { expression: None });
    }

    Parser::new(aql, context, config)
        .and_then(Parser::parse)
        .inspect_err(|err| debug!(error = %err, "AQL parse failed"))
}
