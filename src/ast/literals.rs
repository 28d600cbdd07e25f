use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize, Serializer};

/// Literal kinds that may appear on the right-hand side of a condition.
///
/// `Function` only exists before parsing finishes; it names the
/// `identifier()` placeholder form for the value-type gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Function,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "NULL",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Number => "NUMBER",
            ValueKind::String => "STRING",
            ValueKind::Function => "FUNCTION",
        })
    }
}

/// A numeric literal or numeric view of a record value.
///
/// Numbers that fit `Decimal` keep their exact digits and scale. Anything
/// beyond its range or precision (`1e30`, `1e-30`, 30-digit integers) is
/// held as an `f64` instead of being rejected or rounded to zero.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Exact(Decimal),
    Approx(f64),
}

impl Number {
    /// Reads plain or scientific notation; `None` for non-numeric or
    /// non-finite text.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(d) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
            return Some(Number::Exact(d));
        }
        // f64 parsing also takes "inf" and "NaN", which are not numbers here
        if !text.bytes().all(|b| b.is_ascii_digit() || b".+-eE".contains(&b)) {
            return None;
        }
        text.parse::<f64>().ok().and_then(Number::from_f64)
    }

    /// Exact when the float survives the trip through `Decimal` unchanged.
    pub fn from_f64(n: f64) -> Option<Number> {
        if !n.is_finite() {
            return None;
        }
        match Decimal::from_f64(n) {
            Some(d) if d.to_f64() == Some(n) => Some(Number::Exact(d)),
            _ => Some(Number::Approx(n)),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Exact(d) => d.to_f64().unwrap_or(f64::NAN),
            Number::Approx(n) => n,
        }
    }

    /// Non-negative whole numbers only.
    pub fn to_index(self) -> Option<usize> {
        match self {
            Number::Exact(d) if d.is_integer() => d.to_usize(),
            Number::Exact(_) | Number::Approx(_) => None,
        }
    }

    /// Text used when the number addresses an object key: `1.0` reads as `"1"`.
    pub fn key_text(self) -> String {
        match self {
            Number::Exact(d) => d.normalize().to_string(),
            Number::Approx(n) => n.to_string(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Exact(d) => fmt::Display::fmt(d, f),
            Number::Approx(n) => fmt::Display::fmt(n, f),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Exact(d)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Exact(Decimal::from(n))
    }
}

/// A resolved literal value.
///
/// Function placeholders are resolved against the parse context before
/// an expression is built, so there is no function variant here.
///
/// # Examples
/// ```text
/// null            -> Literal::Null
/// TRUE            -> Literal::Boolean(true)
/// 1.50            -> Literal::Number(1.50)
/// "passed"        -> Literal::String("passed")
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum Literal {
    Null,
    Boolean(bool),
    /// Keeps the scale the number was written with when it fits a `Decimal`
    Number(Number),
    String(String),
}

impl Literal {
    pub fn kind(&self) -> ValueKind {
        match self {
            Literal::Null => ValueKind::Null,
            Literal::Boolean(_) => ValueKind::Boolean,
            Literal::Number(_) => ValueKind::Number,
            Literal::String(_) => ValueKind::String,
        }
    }

    /// The literal's string form (`null`, `true`, `1.5`, raw string contents).
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Literal::Null => Cow::Borrowed("null"),
            Literal::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Literal::Number(n) => Cow::Owned(n.to_string()),
            Literal::String(s) => Cow::Borrowed(s),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Decimal> for Literal {
    fn from(n: Decimal) -> Self {
        Literal::Number(Number::Exact(n))
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(Number::from(n))
    }
}
