//! Capability restriction for the parser.
//!
//! Every option defaults to "no restriction". Restrictions are checked at the
//! token where the construct is recognised, so errors point at the exact
//! offending token.

use std::{collections::HashSet, fmt, sync::Arc};

use serde::Deserialize;

use crate::ast::{LogicalOperator, Operation, ValueKind};

/// Decides which field names may appear in a query.
pub trait IdentifierPolicy: Send + Sync {
    fn is_allowed(&self, name: &str) -> bool;
}

/// Allows only the listed field names.
#[derive(Debug, Clone, Default)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList(names.into_iter().map(Into::into).collect())
    }
}

impl IdentifierPolicy for AllowList {
    fn is_allowed(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Allows field names accepted by a closure.
pub struct AllowFn<F>(pub F);

impl<F> IdentifierPolicy for AllowFn<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_allowed(&self, name: &str) -> bool {
        (self.0)(name)
    }
}

/// Parser feature switches. `Default` allows everything.
///
/// # Examples
///
/// ```
/// use aql_lang::{Operation, ParserConfig};
///
/// let config = ParserConfig::new()
///     .parentheses(false)
///     .operations([Operation::Eq, Operation::Neq])
///     .identifiers(["status", "severity"]);
/// ```
#[derive(Clone)]
pub struct ParserConfig {
    pub parentheses: bool,
    pub index_access: bool,
    pub logical_operators: Option<HashSet<LogicalOperator>>,
    pub operations: Option<HashSet<Operation>>,
    pub identifiers: Option<Arc<dyn IdentifierPolicy>>,
    pub value_types: Option<HashSet<ValueKind>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            parentheses: true,
            index_access: true,
            logical_operators: None,
            operations: None,
            identifiers: None,
            value_types: None,
        }
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("parentheses", &self.parentheses)
            .field("index_access", &self.index_access)
            .field("logical_operators", &self.logical_operators)
            .field("operations", &self.operations)
            .field("identifiers", &self.identifiers.as_ref().map(|_| ".."))
            .field("value_types", &self.value_types)
            .finish()
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parentheses(mut self, allowed: bool) -> Self {
        self.parentheses = allowed;
        self
    }

    pub fn index_access(mut self, allowed: bool) -> Self {
        self.index_access = allowed;
        self
    }

    pub fn logical_operators(mut self, ops: impl IntoIterator<Item = LogicalOperator>) -> Self {
        self.logical_operators = Some(ops.into_iter().collect());
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.operations = Some(ops.into_iter().collect());
        self
    }

    pub fn identifiers<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_policy(AllowList::new(names))
    }

    pub fn identifier_filter<F>(self, allow: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.identifier_policy(AllowFn(allow))
    }

    pub fn identifier_policy(mut self, policy: impl IdentifierPolicy + 'static) -> Self {
        self.identifiers = Some(Arc::new(policy));
        self
    }

    pub fn value_types(mut self, kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        self.value_types = Some(kinds.into_iter().collect());
        self
    }

    pub fn allows_logical_operator(&self, op: LogicalOperator) -> bool {
        self.logical_operators.as_ref().is_none_or(|ops| ops.contains(&op))
    }

    pub fn allows_operation(&self, op: Operation) -> bool {
        self.operations.as_ref().is_none_or(|ops| ops.contains(&op))
    }

    pub fn allows_identifier(&self, name: &str) -> bool {
        self.identifiers
            .as_ref()
            .is_none_or(|policy| policy.is_allowed(name))
    }

    pub fn allows_value_type(&self, kind: ValueKind) -> bool {
        self.value_types.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }

    /// Reads a config from its JSON form.
    ///
    /// ```json
    /// { "parentheses": false, "operations": ["EQ", "IN"], "identifiers": ["status"] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ConfigDocument>(json).map(Into::into)
    }
}

/// Serialized form of [`ParserConfig`]; identifiers can only be a list here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDocument {
    pub parentheses: Option<bool>,
    pub index_access: Option<bool>,
    pub logical_operators: Option<Vec<LogicalOperator>>,
    pub operations: Option<Vec<Operation>>,
    pub identifiers: Option<Vec<String>>,
    pub value_types: Option<Vec<ValueKind>>,
}

impl From<ConfigDocument> for ParserConfig {
    fn from(doc: ConfigDocument) -> Self {
        ParserConfig {
            parentheses: doc.parentheses.unwrap_or(true),
            index_access: doc.index_access.unwrap_or(true),
            logical_operators: doc.logical_operators.map(|v| v.into_iter().collect()),
            operations: doc.operations.map(|v| v.into_iter().collect()),
            identifiers: doc
                .identifiers
                .map(|names| Arc::new(AllowList::new(names)) as Arc<dyn IdentifierPolicy>),
            value_types: doc.value_types.map(|v| v.into_iter().collect()),
        }
    }
}
