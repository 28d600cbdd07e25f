use rust_decimal::Decimal;
use serde::Serialize;

use crate::ast::{BinaryOperator, ComparisonOperator, Literal, Number};

/// Bracketed parameter of an accessor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum AccessorParam {
    /// Numeric parameter, an array index (or an object key in text form)
    ///
    /// # Example
    /// ```text
    /// tags[0]
    /// ```
    #[serde(rename = "number")]
    Index(Number),

    /// String parameter, an object property key
    ///
    /// # Example
    /// ```text
    /// labels["owner"]
    /// ```
    #[serde(rename = "string")]
    Key(String),
}

/// Field reference on the left-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accessor {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<AccessorParam>,
}

impl Accessor {
    pub fn field(identifier: impl Into<String>) -> Self {
        Accessor {
            identifier: identifier.into(),
            param: None,
        }
    }

    pub fn indexed(identifier: impl Into<String>, index: usize) -> Self {
        Accessor {
            identifier: identifier.into(),
            param: Some(AccessorParam::Index(Number::Exact(Decimal::from(index)))),
        }
    }

    pub fn keyed(identifier: impl Into<String>, key: impl Into<String>) -> Self {
        Accessor {
            identifier: identifier.into(),
            param: Some(AccessorParam::Key(key.into())),
        }
    }
}

/// Abstract Syntax Tree node of an AQL expression.
///
/// Trees are immutable once built and can be shared freely between
/// predicates and threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    /// Bare boolean literal
    ///
    /// # Example
    /// ```text
    /// true
    /// ```
    Boolean { value: bool },

    /// Negation
    ///
    /// # Example
    /// ```text
    /// NOT status = "passed"
    /// ```
    Not { expression: Box<Expression> },

    /// Explicit grouping, transparent on evaluation
    Paren { expression: Box<Expression> },

    /// `AND` / `OR` of two sub-expressions
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },

    /// Accessor compared against a literal
    ///
    /// # Examples
    /// ```text
    /// status = "passed"
    /// duration >= 100
    /// tags[0] != null
    /// ```
    Condition {
        left: Accessor,
        operator: ComparisonOperator,
        right: Literal,
    },

    /// Accessor checked for membership in a literal list (`IN`)
    ///
    /// # Example
    /// ```text
    /// tags IN ["smoke", "regression"]
    /// ```
    ArrayCondition { left: Accessor, right: Vec<Literal> },
}

impl Expression {
    pub fn boolean(value: bool) -> Self {
        Expression::Boolean { value }
    }

    pub fn not(expression: Expression) -> Self {
        Expression::Not {
            expression: Box::new(expression),
        }
    }

    pub fn paren(expression: Expression) -> Self {
        Expression::Paren {
            expression: Box::new(expression),
        }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn condition(left: Accessor, operator: ComparisonOperator, right: impl Into<Literal>) -> Self {
        Expression::Condition {
            left,
            operator,
            right: right.into(),
        }
    }

    pub fn array_condition(left: Accessor, right: Vec<Literal>) -> Self {
        Expression::ArrayCondition { left, right }
    }
}
