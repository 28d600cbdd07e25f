use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical operators, as gated by the parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    /// Conjunction (`AND`)
    And,
    /// Disjunction (`OR`)
    Or,
    /// Negation (`NOT`)
    Not,
}

/// Operators joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinaryOperator {
    #[default]
    And,
    Or,
}

impl From<BinaryOperator> for LogicalOperator {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::And => LogicalOperator::And,
            BinaryOperator::Or => LogicalOperator::Or,
        }
    }
}

/// Operators comparing an accessor against a single literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComparisonOperator {
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Ge,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Le,
    /// Equal (`=`)
    Eq,
    /// Not equal (`!=`)
    Neq,
    /// Substring or element membership (`CONTAINS`)
    Contains,
}

/// Every condition operator, as gated by the parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Neq,
    Contains,
    /// Array membership (`IN`)
    In,
}

impl From<ComparisonOperator> for Operation {
    fn from(op: ComparisonOperator) -> Self {
        match op {
            ComparisonOperator::Gt => Operation::Gt,
            ComparisonOperator::Ge => Operation::Ge,
            ComparisonOperator::Lt => Operation::Lt,
            ComparisonOperator::Le => Operation::Le,
            ComparisonOperator::Eq => Operation::Eq,
            ComparisonOperator::Neq => Operation::Neq,
            ComparisonOperator::Contains => Operation::Contains,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LogicalOperator::from(*self).fmt(f)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Gt => "GT",
            Operation::Ge => "GE",
            Operation::Lt => "LT",
            Operation::Le => "LE",
            Operation::Eq => "EQ",
            Operation::Neq => "NEQ",
            Operation::Contains => "CONTAINS",
            Operation::In => "IN",
        })
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Operation::from(*self).fmt(f)
    }
}
