//! Documentation content for the aql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Context,
    Config,
    Filters,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "context" | "functions" => Some(Self::Context),
            "config" | "restrictions" => Some(Self::Config),
            "filters" | "filter" => Some(Self::Filters),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"AQL DOCUMENTATION

AQL is a boolean query language for filtering test-result records by status,
labels, tags, owners, durations and similar fields.

DOCUMENTATION CATEGORIES

  syntax       Grammar, precedence, accessors and literals
  operators    Comparison, membership and logical operators
  context      name() placeholders resolved from --context
  config       Restricting the language with --config
  filters      Structured filters accepted by 'aql filter'

QUICK REFERENCE

  status = "passed"                     Equality
  duration > 1000                       Numeric comparison
  tags IN ["smoke", "regression"]       Membership
  labels["owner"] CONTAINS "ali"        Keyed access + substring
  NOT flaky = true AND (a = 1 OR b = 2) Logic and grouping

Run 'aql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Context) => Ok(CONTEXT_DOC),
        Some(DocCategory::Config) => Ok(CONFIG_DOC),
        Some(DocCategory::Filters) => Ok(FILTERS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

GRAMMAR (loosest to tightest)

  expr      := orExpr
  orExpr    := andExpr (OR andExpr)*
  andExpr   := notExpr (AND notExpr)*
  notExpr   := NOT notExpr | primary
  primary   := '(' expr ')' | BOOLEAN | accessor IN array | accessor operation value
  accessor  := IDENTIFIER ('[' (STRING | NUMBER) ']')?
  value     := NULL | BOOLEAN | NUMBER | STRING | FUNCTION
  array     := '[' (value (',' value)*)? ']'

ACCESSORS

  status              Top-level field (Latin letters and underscores only)
  tags[0]             Array element
  labels["owner"]     Object property

LITERALS

  null                Null (any case)
  true, FALSE         Booleans (any case)
  42, -1.5            Numbers
  "a \"quoted\" word" Strings; escapes: \n \t \r \" \\
  now()               Placeholder resolved from the context

Keywords AND, OR, NOT, IN and CONTAINS are case-insensitive.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON

  =   !=              Type-aware equality; the field is read as the literal's type
  >   >=  <   <=      Numeric only; non-numbers never match
  CONTAINS            Substring of text, or element of an array
  IN [...]            Field equals any listed value

MISSING FIELDS

  A field that is absent only equals null. `!=` is true for anything else;
  every other operator is false.

LOGICAL

  NOT x               Negation, binds tightest
  a AND b             Conjunction, short-circuits
  a OR b              Disjunction, short-circuits
"#;

const CONTEXT_DOC: &str = r#"CONTEXT

A literal written as name() is looked up in the context by its full text,
parentheses included, while parsing:

  aql check 'createdDate >= now()' --context '{"now()": 1700000000000}'

  number   -> NUMBER literal
  boolean  -> BOOLEAN literal
  null     -> NULL literal (also when missing or no context is given)
  other    -> STRING literal
"#;

const CONFIG_DOC: &str = r#"CONFIG

Pass a JSON file with --config to restrict what queries may use. Every key is
optional; a missing key means no restriction.

  {
    "parentheses": false,
    "indexAccess": false,
    "logicalOperators": ["AND", "OR", "NOT"],
    "operations": ["GT", "GE", "LT", "LE", "EQ", "NEQ", "CONTAINS", "IN"],
    "identifiers": ["status", "duration"],
    "valueTypes": ["NULL", "BOOLEAN", "NUMBER", "STRING", "FUNCTION"]
  }

Violations are reported at the offending token.
"#;

const FILTERS_DOC: &str = r#"FILTERS

'aql filter --filters <json>' accepts the structured filters produced by UI
controls:

  [
    {"type": "field", "value": {"key": "status", "type": "string", "value": "failed"}},
    {"type": "field", "logicalOperator": "OR",
     "value": {"key": "tags", "type": "array", "strict": false, "value": ["flaky"]}}
  ]

  strict (default)    string/number/boolean -> EQ, array -> IN
  strict: false       string/number -> CONTAINS,
                      array -> checks the first 21 elements for each value

Groups ({"type": "group", "value": [...]}) are parenthesised.
"#;
