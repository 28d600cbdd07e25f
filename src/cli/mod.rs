//! CLI support for aql-lang
//!
//! Provides programmatic access to the aql CLI functionality so other tools
//! can embed query checking and record filtering.

mod check;
mod docs;
mod filter;

pub use check::{CheckOptions, CheckResult, execute_check, execute_parse};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use filter::{FilterOptions, execute_filter};

use std::io;

use thiserror::Error;

use crate::{convert::json_to_value, predicate::Predicate};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Filter error: {0}")]
    Filter(#[from] crate::FilterError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Input must be a JSON object or an array of objects, got {0}")]
    NotRecords(&'static str),

    #[error("Unknown category: '{0}'\nRun 'aql docs' to see available categories.")]
    UnknownCategory(String),
}

/// Applies a predicate to JSON input: arrays are filtered, a single object
/// yields `true` or `false`.
pub(crate) fn apply_predicate(
    predicate: &Predicate,
    input: &str,
) -> Result<serde_json::Value, CliError> {
    let json: serde_json::Value = serde_json::from_str(input)?;

    match json {
        serde_json::Value::Array(items) => {
            let matching = items
                .into_iter()
                .filter(|item| predicate.matches_value(&json_to_value(item.clone())))
                .collect();
            Ok(serde_json::Value::Array(matching))
        }
        object @ serde_json::Value::Object(_) => Ok(serde_json::Value::Bool(
            predicate.matches_value(&json_to_value(object)),
        )),
        scalar => Err(CliError::NotRecords(json_to_value(scalar).type_name())),
    }
}
