//! Validate AQL queries and run them against JSON records

use super::{CliError, apply_predicate};
use crate::{
    Context, Expression, ParserConfig, create_predicate,
    parser::{ParseResult, parse_aql_with},
};

/// Options for the check and parse commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The AQL query
    pub query: String,
    /// JSON input string (an object or an array of objects)
    pub input: Option<String>,
    /// JSON object resolving `name()` placeholders
    pub context: Option<String>,
    /// JSON parser configuration
    pub config: Option<String>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully with JSON output
    Success(serde_json::Value),
}

fn parse(options: &CheckOptions) -> Result<ParseResult, CliError> {
    let context = options
        .context
        .as_deref()
        .map(serde_json::from_str::<serde_json::Map<String, serde_json::Value>>)
        .transpose()?;
    let config = options
        .config
        .as_deref()
        .map(ParserConfig::from_json)
        .transpose()?
        .unwrap_or_default();

    let result = parse_aql_with(
        &options.query,
        context.as_ref().map(|ctx| ctx as &dyn Context),
        &config,
    )?;
    Ok(result)
}

/// Execute an aql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let result = parse(options)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;

    // An empty query filters nothing out
    let expression = result.expression.unwrap_or(Expression::boolean(true));
    let predicate = create_predicate(expression);
    let output = apply_predicate(&predicate, input)?;
    Ok(CheckResult::Success(output))
}

/// Parse a query and return its syntax tree as JSON
pub fn execute_parse(options: &CheckOptions) -> Result<serde_json::Value, CliError> {
    let result = parse(options)?;
    Ok(serde_json::to_value(result)?)
}
