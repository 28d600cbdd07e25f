// tests/parser_tests.rs

use std::collections::HashMap;

use aql_lang::ast::{
    Accessor, AccessorParam, BinaryOperator, ComparisonOperator, Expression, Literal,
    LogicalOperator, Number, Operation, TokenType, ValueKind,
};
use aql_lang::config::ParserConfig;
use aql_lang::context::Context;
use aql_lang::error::{ParseError, ParseErrorKind};
use aql_lang::parser::{Parser, parse_aql, parse_aql_with};
use aql_lang::value::Value;
use rust_decimal::Decimal;
use serde_json::json;

fn parse(input: &str) -> Expression {
    parse_aql(input)
        .unwrap()
        .expression
        .unwrap_or_else(|| panic!("Expected an expression for: {}", input))
}

fn parse_err(input: &str, config: &ParserConfig) -> ParseError {
    match parse_aql_with(input, None, config) {
        Ok(result) => panic!("Expected error for {}, got {:?}", input, result),
        Err(err) => err,
    }
}

fn status_passed() -> Expression {
    Expression::condition(Accessor::field("status"), ComparisonOperator::Eq, "passed")
}

// ============================================================================
// Empty Input
// ============================================================================

#[test]
fn test_empty_input_has_no_expression() {
    assert_eq!(parse_aql("").unwrap().expression, None);
}

#[test]
fn test_blank_input_has_no_expression() {
    assert_eq!(parse_aql("  \n ").unwrap().expression, None);
}

#[test]
fn test_parser_rejects_empty_string() {
    let config = ParserConfig::default();
    match Parser::new("", None, &config) {
        Err(err) => {
            assert!(matches!(err.kind, ParseErrorKind::InvalidInput(_)));
            assert_eq!(err.position, 0);
        }
        Ok(_) => panic!("Expected InvalidInput"),
    }
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_simple_condition() {
    assert_eq!(parse(r#"status = "passed""#), status_passed());
}

#[test]
fn test_condition_serializes_as_tree() {
    assert_eq!(
        serde_json::to_value(parse(r#"status = "passed""#)).unwrap(),
        json!({
            "type": "condition",
            "left": {"identifier": "status"},
            "operator": "EQ",
            "right": {"type": "STRING", "value": "passed"}
        })
    );
}

#[test]
fn test_all_comparison_operators() {
    let test_cases = vec![
        ("d = 1", ComparisonOperator::Eq),
        ("d != 1", ComparisonOperator::Neq),
        ("d > 1", ComparisonOperator::Gt),
        ("d >= 1", ComparisonOperator::Ge),
        ("d < 1", ComparisonOperator::Lt),
        ("d <= 1", ComparisonOperator::Le),
        ("d CONTAINS 1", ComparisonOperator::Contains),
    ];

    for (input, expected) in test_cases {
        match parse(input) {
            Expression::Condition { operator, .. } => {
                assert_eq!(operator, expected, "Failed for input: {}", input)
            }
            other => panic!("Expected Condition, got {:?}", other),
        }
    }
}

#[test]
fn test_literal_kinds() {
    let test_cases = vec![
        ("a = null", Literal::Null),
        ("a = NULL", Literal::Null),
        ("a = TRUE", Literal::Boolean(true)),
        ("a = false", Literal::Boolean(false)),
        ("a = 42", Literal::from(42i64)),
        ("a = -1.5", Literal::from(Decimal::new(-15, 1))),
        ("a = 1e3", Literal::from(1000i64)),
        (r#"a = "x""#, Literal::String("x".to_string())),
    ];

    for (input, expected) in test_cases {
        match parse(input) {
            Expression::Condition { right, .. } => {
                assert_eq!(right, expected, "Failed for input: {}", input)
            }
            other => panic!("Expected Condition, got {:?}", other),
        }
    }
}

#[test]
fn test_numbers_beyond_decimal_range() {
    let test_cases = vec![
        ("id = 123456789012345678901234567890", 123456789012345678901234567890.0),
        ("size > 1e30", 1e30),
        ("d > 1e-30", 1e-30),
        ("d < -9.9e40", -9.9e40),
    ];

    for (input, expected) in test_cases {
        match parse(input) {
            Expression::Condition {
                right: Literal::Number(n),
                ..
            } => assert_eq!(n, Number::Approx(expected), "Failed for input: {}", input),
            other => panic!("Expected numeric Condition, got {:?}", other),
        }
    }
}

#[test]
fn test_exact_numbers_keep_their_scale() {
    let expr = parse("duration = 100.00");
    assert_eq!(
        serde_json::to_value(&expr).unwrap()["right"],
        json!({"type": "NUMBER", "value": "100.00"})
    );
}

#[test]
fn test_string_escapes_are_decoded() {
    match parse(r#"msg = "line\nnext \"quoted\" C:\dir""#) {
        Expression::Condition { right, .. } => {
            assert_eq!(right, Literal::from("line\nnext \"quoted\" C:\\dir"));
        }
        other => panic!("Expected Condition, got {:?}", other),
    }
}

#[test]
fn test_bare_boolean() {
    assert_eq!(parse("true"), Expression::boolean(true));
    assert_eq!(parse("FALSE"), Expression::boolean(false));
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_index_accessor() {
    assert_eq!(
        parse(r#"tags[0] = "smoke""#),
        Expression::condition(Accessor::indexed("tags", 0), ComparisonOperator::Eq, "smoke")
    );
}

#[test]
fn test_key_accessor() {
    assert_eq!(
        parse(r#"labels["owner"] CONTAINS "ali""#),
        Expression::condition(
            Accessor::keyed("labels", "owner"),
            ComparisonOperator::Contains,
            "ali"
        )
    );
}

#[test]
fn test_huge_index_accessor() {
    match parse(r#"ids[123456789012345678901234567890] = "x""#) {
        Expression::Condition { left, .. } => {
            assert_eq!(left.identifier, "ids");
            assert!(matches!(
                left.param,
                Some(AccessorParam::Index(Number::Approx(_)))
            ));
        }
        other => panic!("Expected Condition, got {:?}", other),
    }
}

#[test]
fn test_identifier_in_brackets_is_rejected() {
    let err = parse_err("labels[owner] = 1", &ParserConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExpectedAccessor);
    assert_eq!(err.position, 2);
}

#[test]
fn test_unclosed_bracket() {
    let err = parse_err("tags[0 = 1", &ParserConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenType::RBracket,
            found: TokenType::Eq
        }
    );
    assert_eq!(err.position, 3);
}

#[test]
fn test_non_latin_identifiers_are_rejected() {
    for input in ["status2 = 1", "статус = 1"] {
        let err = parse_err(input, &ParserConfig::default());
        assert!(
            matches!(err.kind, ParseErrorKind::InvalidIdentifierFormat(_)),
            "Failed for input: {}",
            input
        );
        assert_eq!(err.position, 0);
    }
}

// ============================================================================
// IN
// ============================================================================

#[test]
fn test_in_array() {
    assert_eq!(
        parse(r#"tags IN ["smoke", "regression"]"#),
        Expression::array_condition(
            Accessor::field("tags"),
            vec![Literal::from("smoke"), Literal::from("regression")]
        )
    );
}

#[test]
fn test_in_mixed_and_empty_arrays() {
    assert_eq!(
        parse(r#"x in [1, "a", null, true]"#),
        Expression::array_condition(
            Accessor::field("x"),
            vec![
                Literal::from(1i64),
                Literal::from("a"),
                Literal::Null,
                Literal::from(true)
            ]
        )
    );
    assert_eq!(
        parse("x IN []"),
        Expression::array_condition(Accessor::field("x"), vec![])
    );
}

#[test]
fn test_in_requires_array() {
    let err = parse_err(r#"tags IN "smoke""#, &ParserConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenType::LBracket,
            found: TokenType::String
        }
    );
    assert_eq!(err.position, 2);
}

#[test]
fn test_trailing_comma_in_array() {
    let err = parse_err(r#"tags IN ["a",]"#, &ParserConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExpectedValue);
    assert_eq!(err.position, 5);
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[test]
fn test_not_binds_tighter_than_and() {
    let severity =
        Expression::condition(Accessor::field("severity"), ComparisonOperator::Eq, "critical");
    assert_eq!(
        parse(r#"NOT status = "passed" AND severity = "critical""#),
        Expression::binary(
            Expression::not(status_passed()),
            BinaryOperator::And,
            severity
        )
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    let cond = |name: &str| Expression::condition(Accessor::field(name), ComparisonOperator::Eq, 1i64);
    assert_eq!(
        parse("a = 1 OR b = 1 AND c = 1"),
        Expression::binary(
            cond("a"),
            BinaryOperator::Or,
            Expression::binary(cond("b"), BinaryOperator::And, cond("c"))
        )
    );
}

#[test]
fn test_or_is_left_associative() {
    let cond = |name: &str| Expression::condition(Accessor::field(name), ComparisonOperator::Eq, 1i64);
    assert_eq!(
        parse("a = 1 or b = 1 or c = 1"),
        Expression::binary(
            Expression::binary(cond("a"), BinaryOperator::Or, cond("b")),
            BinaryOperator::Or,
            cond("c")
        )
    );
}

#[test]
fn test_double_not() {
    assert_eq!(
        parse(r#"NOT NOT status = "passed""#),
        Expression::not(Expression::not(status_passed()))
    );
}

#[test]
fn test_parentheses_group() {
    let cond = |name: &str| Expression::condition(Accessor::field(name), ComparisonOperator::Eq, 1i64);
    assert_eq!(
        parse("(a = 1 OR b = 1) AND c = 1"),
        Expression::binary(
            Expression::paren(Expression::binary(cond("a"), BinaryOperator::Or, cond("b"))),
            BinaryOperator::And,
            cond("c")
        )
    );
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test]
fn test_trailing_tokens() {
    let err = parse_err(r#"status = "a" extra"#, &ParserConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenType::Eol,
            found: TokenType::Identifier
        }
    );
    assert_eq!(err.position, 3);
}

#[test]
fn test_unclosed_paren() {
    let err = parse_err("(a = 1", &ParserConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenType::RParen,
            found: TokenType::Eol
        }
    );
    assert_eq!(err.position, 4);
}

#[test]
fn test_missing_operation() {
    let err = parse_err(r#"status "a""#, &ParserConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExpectedOperation);
    assert_eq!(err.position, 1);
}

#[test]
fn test_missing_value_with_context() {
    let err = parse_err("duration >", &ParserConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExpectedValue);
    assert_eq!(err.position, 2);
    assert_eq!(err.context.as_deref(), Some("duration > EOL"));
    assert_eq!(
        err.to_string(),
        "Expected value at position 2 (near: duration > EOL)"
    );
}

#[test]
fn test_identifier_as_value() {
    let err = parse_err("a = b", &ParserConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExpectedValue);
}

#[test]
fn test_missing_accessor() {
    let err = parse_err("= 1", &ParserConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenType::Identifier,
            found: TokenType::Eq
        }
    );
    assert_eq!(err.position, 0);
}

#[test]
fn test_unterminated_string_is_parse_error() {
    let err = parse_aql(r#"status = "passed"#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString { offset: 9 });
    assert_eq!(err.position, 2);
}

// ============================================================================
// Configuration Gates
// ============================================================================

#[test]
fn test_forbidden_operation_at_operator() {
    let config = ParserConfig::new().operations([Operation::Eq]);
    let err = parse_err("duration > 100", &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenOperation(Operation::Gt));
    assert_eq!(err.position, 1);
    assert_eq!(err.context.as_deref(), Some("duration > 100 EOL"));
}

#[test]
fn test_forbidden_in() {
    let config = ParserConfig::new().operations([Operation::Eq]);
    let err = parse_err(r#"tags IN ["a"]"#, &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenOperation(Operation::In));
    assert_eq!(err.position, 1);
}

#[test]
fn test_forbidden_logical_operators() {
    let config = ParserConfig::new().logical_operators([LogicalOperator::And]);

    let err = parse_err("a = 1 OR b = 2", &config);
    assert_eq!(
        err.kind,
        ParseErrorKind::ForbiddenLogicalOperator(LogicalOperator::Or)
    );
    assert_eq!(err.position, 3);

    let err = parse_err("NOT a = 1", &config);
    assert_eq!(
        err.kind,
        ParseErrorKind::ForbiddenLogicalOperator(LogicalOperator::Not)
    );
    assert_eq!(err.position, 0);

    assert!(parse_aql_with("a = 1 AND b = 2", None, &config).is_ok());
}

#[test]
fn test_forbidden_parentheses() {
    let config = ParserConfig::new().parentheses(false);
    let err = parse_err("a = 1 AND (b = 2)", &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenParentheses);
    assert_eq!(err.position, 4);
}

#[test]
fn test_forbidden_parentheses_before_contents() {
    let config = ParserConfig::new().parentheses(false);
    let err = parse_err("(", &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenParentheses);
    assert_eq!(err.position, 0);
}

#[test]
fn test_forbidden_bracket_access() {
    let config = ParserConfig::new().index_access(false);
    let err = parse_err(r#"field["k"] = 1"#, &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenBracketAccess);
    assert_eq!(err.position, 1);

    // Bracket contents are never looked at
    let err = parse_err("field[owner] = 1", &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenBracketAccess);
}

#[test]
fn test_forbidden_identifier_list() {
    let config = ParserConfig::new().identifiers(["status"]);
    let err = parse_err(r#"status = "a" AND owner = "b""#, &config);
    assert_eq!(
        err.kind,
        ParseErrorKind::ForbiddenIdentifier("owner".to_string())
    );
    assert_eq!(err.position, 4);
}

#[test]
fn test_forbidden_identifier_filter() {
    let config = ParserConfig::new().identifier_filter(|name| !name.starts_with('_'));
    assert!(parse_aql_with("visible = 1", None, &config).is_ok());
    let err = parse_err("_hidden = 1", &config);
    assert!(matches!(err.kind, ParseErrorKind::ForbiddenIdentifier(_)));
}

#[test]
fn test_identifier_format_checked_before_policy() {
    let config = ParserConfig::new().identifiers(["status"]);
    let err = parse_err("status2 = 1", &config);
    assert!(matches!(err.kind, ParseErrorKind::InvalidIdentifierFormat(_)));
}

#[test]
fn test_forbidden_value_types() {
    let config = ParserConfig::new().value_types([ValueKind::String]);
    let err = parse_err("duration > 1", &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenValueType(ValueKind::Number));
    assert_eq!(err.position, 2);

    let err = parse_err(r#"tags IN ["a", null]"#, &config);
    assert_eq!(err.kind, ParseErrorKind::ForbiddenValueType(ValueKind::Null));
    assert_eq!(err.position, 5);
}

#[test]
fn test_function_gate_applies_before_resolution() {
    let mut context: HashMap<String, Value> = HashMap::new();
    context.insert("now()".to_string(), Value::Integer(1));
    let config = ParserConfig::new().value_types([ValueKind::Number]);

    let err = parse_aql_with("d >= now()", Some(&context as &dyn Context), &config).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ForbiddenValueType(ValueKind::Function));
    assert_eq!(err.position, 2);
}

#[test]
fn test_config_from_json_restricts_parse() {
    let config = ParserConfig::from_json(r#"{"operations": ["EQ"], "parentheses": false}"#).unwrap();
    assert!(parse_aql_with(r#"status = "passed""#, None, &config).is_ok());
    assert!(parse_aql_with(r#"status != "passed""#, None, &config).is_err());
}

// ============================================================================
// Context Resolution
// ============================================================================

fn right_of(expression: Expression) -> Literal {
    match expression {
        Expression::Condition { right, .. } => right,
        other => panic!("Expected Condition, got {:?}", other),
    }
}

fn parse_with_context(input: &str, context: &dyn Context) -> Expression {
    parse_aql_with(input, Some(context), &ParserConfig::default())
        .unwrap()
        .expression
        .unwrap()
}

#[test]
fn test_function_resolves_number() {
    let mut context: HashMap<String, Value> = HashMap::new();
    context.insert("now()".to_string(), Value::Integer(1_700_000_000_000));

    let literal = right_of(parse_with_context("createdDate >= now()", &context));
    assert_eq!(literal, Literal::from(1_700_000_000_000i64));
    assert_eq!(
        serde_json::to_value(&literal).unwrap(),
        json!({"type": "NUMBER", "value": "1700000000000"})
    );
}

#[test]
fn test_function_resolves_by_runtime_type() {
    let context = json!({
        "me()": "alice",
        "flag()": true,
        "nothing()": null,
        "list()": ["a", "b"]
    });
    let context = context.as_object().unwrap();

    assert_eq!(
        right_of(parse_with_context("owner = me()", context)),
        Literal::from("alice")
    );
    assert_eq!(
        right_of(parse_with_context("flaky = flag()", context)),
        Literal::Boolean(true)
    );
    assert_eq!(
        right_of(parse_with_context("x = nothing()", context)),
        Literal::Null
    );
    assert_eq!(
        right_of(parse_with_context("x = list()", context)),
        Literal::from("a,b")
    );
    assert_eq!(
        right_of(parse_with_context("x = missing()", context)),
        Literal::Null
    );
}

#[test]
fn test_function_without_context_is_null() {
    assert_eq!(right_of(parse("createdDate >= now()")), Literal::Null);

    let empty: HashMap<String, Value> = HashMap::new();
    assert_eq!(
        right_of(parse_with_context("createdDate >= now()", &empty)),
        Literal::Null
    );
}

#[test]
fn test_function_in_array() {
    let mut context: HashMap<String, Value> = HashMap::new();
    context.insert("me()".to_string(), Value::from("alice"));

    assert_eq!(
        parse_with_context(r#"owner IN [me(), "bob"]"#, &context),
        Expression::array_condition(
            Accessor::field("owner"),
            vec![Literal::from("alice"), Literal::from("bob")]
        )
    );
}
