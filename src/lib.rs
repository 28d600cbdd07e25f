//! AQL: a small boolean query language for filtering test-result records.
//!
//! ```text
//! text -> Lexer -> tokens -> Parser (+ context, + config) -> Expression -> Predicate
//! ```
//!
//! Structured UI filters take a second route into the same predicate compiler
//! through [`filter::build_field_filters`].

pub mod ast;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod parser;
pub mod predicate;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{
    Accessor, AccessorParam, BinaryOperator, ComparisonOperator, Expression, Literal,
    LogicalOperator, Number, Operation, Token, TokenType, ValueKind,
};
pub use config::{AllowFn, AllowList, IdentifierPolicy, ParserConfig};
pub use context::Context;
pub use error::{ParseError, ParseErrorKind};
pub use filter::{
    FieldFilter, FieldType, FieldValue, Filter, FilterError, build_array_intersection_filter,
    build_field_filters, build_filter_predicate,
};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseResult, Parser, parse_aql, parse_aql_with};
pub use predicate::{Predicate, create_predicate};
pub use value::{Record, Value};
