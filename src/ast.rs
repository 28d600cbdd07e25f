//! # AQL - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for AQL, a small boolean
//! query language used to filter test-result records by status, labels, tags,
//! owners, durations and similar fields.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[literals]** - Literal values and their kinds
//! - **[operators]** - Logical, comparison and membership operators
//! - **[expressions]** - Expression nodes and field accessors
//!
//! ## Quick Start
//!
//! ```text
//! status = "failed" AND (duration > 1000 OR tags IN ["flaky"])
//! ```
//!
//! ## Precedence
//!
//! From loosest to tightest: `OR`, `AND`, `NOT`, then primary expressions
//! (parenthesised groups, boolean literals, conditions). `AND` and `OR` are
//! left-associative; `NOT` nests (`NOT NOT x`).
//!
//! ## Accessors
//!
//! A condition always starts with a field name made of Latin letters and
//! underscores, optionally followed by one bracketed parameter:
//!
//! - `tags[0]` - array element by index
//! - `labels["owner"]` - object property by key
//!
//! ## Literals
//!
//! `null`, `true`/`false` (any case), signed decimals, double-quoted strings
//! with `\n \t \r \" \\` escapes, and `name()` placeholders that are resolved
//! against the caller's context while parsing.
pub mod expressions;
pub mod literals;
pub mod operators;
pub mod tokens;

pub use expressions::{Accessor, AccessorParam, Expression};
pub use literals::{Literal, Number, ValueKind};
pub use operators::{BinaryOperator, ComparisonOperator, LogicalOperator, Operation};
pub use tokens::{Token, TokenType};
