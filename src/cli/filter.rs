//! Apply structured filters to JSON records

use super::{CliError, apply_predicate};
use crate::filter::{Filter, build_filter_predicate};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// JSON array of structured filters
    pub filters: String,
    /// JSON input string (an object or an array of objects)
    pub input: Option<String>,
}

/// Build a predicate from structured filters and apply it to the input
pub fn execute_filter(options: &FilterOptions) -> Result<serde_json::Value, CliError> {
    let filters: Vec<Filter> = serde_json::from_str(&options.filters)?;
    let predicate = build_filter_predicate(&filters)?;

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    apply_predicate(&predicate, input)
}
