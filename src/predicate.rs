use std::{cmp::Ordering, sync::Arc};

use crate::{
    ast::{Accessor, AccessorParam, BinaryOperator, ComparisonOperator, Expression, Literal, Number},
    value::{Record, Value},
};

/// A compiled, reusable record filter.
///
/// Holds the expression behind an `Arc`, so clones are cheap and a single
/// predicate can be shared across threads. Evaluation never fails: fields
/// that cannot be resolved simply make their condition false.
///
/// # Examples
///
/// ```
/// use aql_lang::{create_predicate, parse_aql, Record, Value};
///
/// let expr = parse_aql(r#"status = "passed""#).unwrap().expression.unwrap();
/// let predicate = create_predicate(expr);
///
/// let mut record = Record::new();
/// record.insert("status".to_string(), Value::from("passed"));
/// assert!(predicate.matches(&record));
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    expression: Arc<Expression>,
}

/// Compiles an expression into a [`Predicate`].
pub fn create_predicate(expression: Expression) -> Predicate {
    Predicate::new(expression)
}

impl Predicate {
    pub fn new(expression: Expression) -> Self {
        Predicate {
            expression: Arc::new(expression),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Evaluates the predicate against one record.
    pub fn matches(&self, record: &Record) -> bool {
        evaluate(&self.expression, record)
    }

    /// Evaluates against an arbitrary value; only objects have fields.
    pub fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::Object(record) => self.matches(record),
            _ => self.matches(&Record::new()),
        }
    }

    /// Turns the predicate into a plain closure, e.g. for `Iterator::filter`.
    pub fn into_fn(self) -> impl Fn(&Record) -> bool + Clone + Send + Sync {
        move |record| self.matches(record)
    }
}

fn evaluate(expr: &Expression, record: &Record) -> bool {
    match expr {
        Expression::Boolean { value } => *value,
        Expression::Not { expression } => !evaluate(expression, record),
        Expression::Paren { expression } => evaluate(expression, record),
        Expression::Binary {
            left,
            operator,
            right,
        } => match operator {
            BinaryOperator::And => evaluate(left, record) && evaluate(right, record),
            BinaryOperator::Or => evaluate(left, record) || evaluate(right, record),
        },
        Expression::Condition {
            left,
            operator,
            right,
        } => compare(resolve(left, record), *operator, right),
        Expression::ArrayCondition { left, right } => match resolve(left, record) {
            // Array fields match when the two lists share an element
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| right.iter().any(|literal| equals(Some(item), literal))),
            field => right.iter().any(|literal| equals(field, literal)),
        },
    }
}

/// Looks up the accessor's field, then its bracket parameter if any.
fn resolve<'r>(accessor: &Accessor, record: &'r Record) -> Option<&'r Value> {
    let field = record.get(&accessor.identifier)?;

    match &accessor.param {
        None => Some(field),
        Some(AccessorParam::Index(n)) => match field {
            Value::Array(items) => n.to_index().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(&n.key_text()),
            _ => None,
        },
        Some(AccessorParam::Key(key)) => match field {
            Value::Object(map) => map.get(key),
            _ => None,
        },
    }
}

fn compare(field: Option<&Value>, operator: ComparisonOperator, literal: &Literal) -> bool {
    match operator {
        ComparisonOperator::Eq => equals(field, literal),
        ComparisonOperator::Neq => !equals(field, literal),
        ComparisonOperator::Gt => order(field, literal).is_some_and(Ordering::is_gt),
        ComparisonOperator::Ge => order(field, literal).is_some_and(Ordering::is_ge),
        ComparisonOperator::Lt => order(field, literal).is_some_and(Ordering::is_lt),
        ComparisonOperator::Le => order(field, literal).is_some_and(Ordering::is_le),
        ComparisonOperator::Contains => contains(field, literal),
    }
}

/// Type-aware equality: the field is coerced to the literal's kind.
/// A missing field only equals `null`.
fn equals(field: Option<&Value>, literal: &Literal) -> bool {
    let Some(value) = field else {
        return *literal == Literal::Null;
    };

    match literal {
        Literal::Null => *value == Value::Null,
        Literal::Number(n) => value.as_number() == Some(*n),
        Literal::Boolean(b) => value.as_boolean() == Some(*b),
        Literal::String(s) => value.as_text().is_some_and(|text| text == s.as_str()),
    }
}

/// Numeric ordering; `None` when either side is not a number.
fn order(field: Option<&Value>, literal: &Literal) -> Option<Ordering> {
    let left = field?.as_number()?;
    let right = match literal {
        Literal::Number(n) => *n,
        Literal::String(s) => Number::parse(s)?,
        _ => return None,
    };
    left.partial_cmp(&right)
}

fn contains(field: Option<&Value>, literal: &Literal) -> bool {
    match field {
        Some(Value::Array(items)) => items.iter().any(|item| equals(Some(item), literal)),
        Some(value @ (Value::String(_) | Value::Integer(_) | Value::Float(_))) => {
            if *literal == Literal::Null {
                return false;
            }
            let needle = literal.text();
            value.as_text().is_some_and(|text| text.contains(&*needle))
        }
        _ => false,
    }
}
