use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::BinaryOperator;

/// Default number of array slots checked by non-strict array filters.
pub const MAX_ARRAY_FIELD_VALUES: usize = 20;

/// Declared type of a filtered field.
///
/// Unknown type names deserialize to `Unsupported`, which the builder rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Unsupported => "unsupported",
        })
    }
}

/// Value selected in a filter control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
}

/// One field constraint, as produced by a checkbox, toggle or search box.
///
/// ```json
/// { "key": "status", "type": "string", "strict": false, "value": "pass" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// `None` means strict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    pub value: FieldValue,
}

impl FieldFilter {
    fn new(key: impl Into<String>, field_type: FieldType, value: FieldValue) -> Self {
        FieldFilter {
            key: key.into(),
            field_type,
            strict: None,
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldType::String, FieldValue::String(value.into()))
    }

    pub fn number(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldType::Number, FieldValue::Number(value))
    }

    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldType::Boolean, FieldValue::Boolean(value))
    }

    pub fn array<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(key, FieldType::Array, FieldValue::List(values))
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(true)
    }
}

/// A field filter or a nested group, each optionally carrying the operator
/// used to chain it with its neighbour.
///
/// ```json
/// { "type": "group", "logicalOperator": "OR", "value": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Filter {
    Field {
        #[serde(
            rename = "logicalOperator",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        logical_operator: Option<BinaryOperator>,
        #[serde(rename = "value")]
        field: FieldFilter,
    },
    Group {
        #[serde(
            rename = "logicalOperator",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        logical_operator: Option<BinaryOperator>,
        #[serde(rename = "value")]
        filters: Vec<Filter>,
    },
}

impl Filter {
    pub fn field(field: FieldFilter) -> Self {
        Filter::Field {
            logical_operator: None,
            field,
        }
    }

    pub fn group(filters: Vec<Filter>) -> Self {
        Filter::Group {
            logical_operator: None,
            filters,
        }
    }

    pub fn with_operator(mut self, op: BinaryOperator) -> Self {
        match &mut self {
            Filter::Field {
                logical_operator, ..
            }
            | Filter::Group {
                logical_operator, ..
            } => *logical_operator = Some(op),
        }
        self
    }

    /// Chaining operator, `AND` unless set.
    pub fn logical_operator(&self) -> BinaryOperator {
        match self {
            Filter::Field {
                logical_operator, ..
            }
            | Filter::Group {
                logical_operator, ..
            } => logical_operator.unwrap_or_default(),
        }
    }
}

impl From<FieldFilter> for Filter {
    fn from(field: FieldFilter) -> Self {
        Filter::field(field)
    }
}
