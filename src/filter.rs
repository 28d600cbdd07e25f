//! Structured filters to AQL expressions.
//!
//! UI controls describe what they select as [`Filter`] values. The builder
//! turns them into the same [`Expression`] trees the parser produces, so both
//! feed the one predicate compiler.
//!
//! - strict scalar fields become `EQ` conditions
//! - non-strict string/number fields become `CONTAINS`
//! - strict array fields become a single `IN`
//! - non-strict array fields check the first `MAX_ARRAY_FIELD_VALUES + 1`
//!   slots of the array for every candidate value; longer arrays are only
//!   partially checked

pub mod model;

pub use model::{FieldFilter, FieldType, FieldValue, Filter, MAX_ARRAY_FIELD_VALUES};

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Accessor, BinaryOperator, ComparisonOperator, Expression, Literal, Number},
    predicate::{Predicate, create_predicate},
};

/// Misuse of the builder API. These are not AQL parse errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Filters array cannot be empty")]
    EmptyFilters,

    #[error("Filter group cannot be empty")]
    EmptyGroup,

    #[error("Array filter '{key}' needs at least one value")]
    EmptyArrayValues { key: String },

    #[error("Unsupported field type for '{key}'")]
    UnsupportedFieldType { key: String },

    #[error("Field '{key}' of type {expected} has a value of another type")]
    ValueMismatch { key: String, expected: FieldType },
}

/// Chains filters left to right.
///
/// The first pair is joined with the first filter's operator; every later
/// filter is joined with its own operator. Operators default to `AND`.
pub fn build_field_filters(filters: &[Filter]) -> Result<Expression, FilterError> {
    let expression = match filters {
        [] => return Err(FilterError::EmptyFilters),
        [single] => build_filter(single)?,
        [first, second, rest @ ..] => {
            let head = Expression::binary(
                build_filter(first)?,
                first.logical_operator(),
                build_filter(second)?,
            );
            rest.iter().try_fold(head, |acc, filter| {
                Ok::<_, FilterError>(Expression::binary(
                    acc,
                    filter.logical_operator(),
                    build_filter(filter)?,
                ))
            })?
        }
    };
    debug!(filters = filters.len(), "built filter expression");
    Ok(expression)
}

/// Builds filters and compiles them into a predicate.
pub fn build_filter_predicate(filters: &[Filter]) -> Result<Predicate, FilterError> {
    build_field_filters(filters).map(create_predicate)
}

fn build_filter(filter: &Filter) -> Result<Expression, FilterError> {
    match filter {
        Filter::Field { field, .. } => build_field_filter(field),
        Filter::Group { filters, .. } => match filters.as_slice() {
            [] => Err(FilterError::EmptyGroup),
            [only] => build_filter(only),
            many => Ok(Expression::paren(build_field_filters(many)?)),
        },
    }
}

fn build_field_filter(field: &FieldFilter) -> Result<Expression, FilterError> {
    let key = field.key.as_str();
    let mismatch = || FilterError::ValueMismatch {
        key: key.to_string(),
        expected: field.field_type,
    };
    let scalar_operator = if field.is_strict() {
        ComparisonOperator::Eq
    } else {
        ComparisonOperator::Contains
    };

    match field.field_type {
        FieldType::Array => {
            let FieldValue::List(values) = &field.value else {
                return Err(mismatch());
            };
            if values.is_empty() {
                return Err(FilterError::EmptyArrayValues {
                    key: key.to_string(),
                });
            }
            if !field.is_strict() {
                return build_array_intersection_filter(key, values, MAX_ARRAY_FIELD_VALUES);
            }
            let right = values.iter().map(|v| Literal::from(v.as_str())).collect();
            Ok(Expression::array_condition(Accessor::field(key), right))
        }
        FieldType::Number => {
            let number = match &field.value {
                FieldValue::Number(n) => Number::from_f64(*n),
                FieldValue::String(s) => Number::parse(s),
                _ => None,
            }
            .ok_or_else(mismatch)?;
            Ok(Expression::condition(
                Accessor::field(key),
                scalar_operator,
                Literal::Number(number),
            ))
        }
        FieldType::Boolean => {
            let FieldValue::Boolean(b) = &field.value else {
                return Err(mismatch());
            };
            Ok(Expression::condition(
                Accessor::field(key),
                ComparisonOperator::Eq,
                Literal::Boolean(*b),
            ))
        }
        FieldType::String => {
            let text = match &field.value {
                FieldValue::String(s) => s.clone(),
                FieldValue::Number(n) => n.to_string(),
                FieldValue::Boolean(b) => b.to_string(),
                FieldValue::List(_) => return Err(mismatch()),
            };
            Ok(Expression::condition(
                Accessor::field(key),
                scalar_operator,
                Literal::String(text),
            ))
        }
        FieldType::Unsupported => Err(FilterError::UnsupportedFieldType {
            key: key.to_string(),
        }),
    }
}

/// Approximates "array `key` contains any of `values`".
///
/// For each value, builds `key[0] = value OR ... OR key[max_index] = value`,
/// then ORs those groups together. Elements past `max_index` are not checked.
pub fn build_array_intersection_filter(
    key: &str,
    values: &[String],
    max_index: usize,
) -> Result<Expression, FilterError> {
    let Some((first, rest)) = values.split_first() else {
        return Err(FilterError::EmptyArrayValues {
            key: key.to_string(),
        });
    };

    let expression = rest.iter().fold(any_index_equals(key, first, max_index), |acc, value| {
        Expression::binary(acc, BinaryOperator::Or, any_index_equals(key, value, max_index))
    });
    Ok(expression)
}

fn any_index_equals(key: &str, value: &str, max_index: usize) -> Expression {
    let index_equals =
        |index| Expression::condition(Accessor::indexed(key, index), ComparisonOperator::Eq, value);

    (1..=max_index).fold(index_equals(0), |acc, index| {
        Expression::binary(acc, BinaryOperator::Or, index_equals(index))
    })
}
