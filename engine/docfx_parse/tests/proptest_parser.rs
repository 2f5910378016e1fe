//! Property-based tests for the formula parser.
//!
//! Random inputs must never panic, and generated well-formed expressions
//! must parse into the expected node kinds.

use docfx_ir::{ExprKind, Value};
use docfx_parse::parse;
use proptest::prelude::*;

const KEYWORDS: &[&str] = &["true", "false", "null", "and", "or", "not", "this", "super"];

// ============================================================================
// Strategies
// ============================================================================

fn arb_number() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..=100_000).prop_map(|n| n.to_string()),
        (0.0f64..1000.0).prop_map(|f| format!("{f:.3}")),
        (1.0f64..10.0, -5i32..5).prop_map(|(m, e)| format!("{m:.1}e{e}")),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_ ]{0,20}".prop_map(|s| format!("\"{s}\"")),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(|s| format!("'{s}'")),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(|s| format!("`{s}`")),
    ]
}

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_filter("keywords are reserved", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

fn arb_path() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("super."), Just("super.super."), Just("this.")],
        prop::collection::vec(arb_ident(), 1..4),
    )
        .prop_map(|(prefix, keys)| format!("{prefix}{}", keys.join(".")))
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("%"),
        Just("~"),
        Just("=="),
        Just("!="),
        Just("<"),
        Just(">"),
        Just("<="),
        Just(">="),
        Just("and"),
        Just("or"),
        Just("&&"),
        Just("||"),
    ]
}

fn arb_simple_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_number(),
        arb_string(),
        Just("true".to_string()),
        Just("null".to_string()),
        arb_path(),
    ]
}

fn arb_binary_expr() -> impl Strategy<Value = String> {
    (arb_simple_expr(), arb_binop(), arb_simple_expr())
        .prop_map(|(left, op, right)| format!("{left} {op} {right}"))
}

fn arb_call_expr() -> impl Strategy<Value = String> {
    ("[A-Z][A-Z0-9_]{0,8}", prop::collection::vec(arb_simple_expr(), 0..4))
        .prop_map(|(name, args)| format!("{name}({})", args.join(", ")))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parser never panics, whatever the input.
    #[test]
    fn parser_no_panic(input in ".{0,100}") {
        let _ = parse(&input);
    }

    /// Numbers parse to finite number literals.
    #[test]
    fn valid_number_parses(s in arb_number()) {
        let ast = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        match &ast.get(ast.root()).kind {
            ExprKind::Literal(Value::Number(n)) => prop_assert!(n.is_finite()),
            other => prop_assert!(false, "expected number literal for {}, got {:?}", s, other),
        }
    }

    #[test]
    fn valid_string_parses(s in arb_string()) {
        let ast = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        let expected = s[1..s.len() - 1].to_string();
        prop_assert_eq!(&ast.get(ast.root()).kind, &ExprKind::Literal(Value::String(expected)));
    }

    #[test]
    fn valid_path_parses(s in arb_path()) {
        let ast = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        prop_assert!(
            matches!(ast.get(ast.root()).kind, ExprKind::Field { .. } | ExprKind::Ident(_)),
            "expected a path for: {}", s
        );
    }

    #[test]
    fn valid_binary_expr_parses(s in arb_binary_expr()) {
        let ast = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        prop_assert!(matches!(ast.get(ast.root()).kind, ExprKind::Binary { .. }),
            "expected Binary for: {}", s);
    }

    #[test]
    fn valid_call_expr_parses(s in arb_call_expr()) {
        let ast = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        prop_assert!(matches!(ast.get(ast.root()).kind, ExprKind::Call { .. }),
            "expected Call for: {}", s);
    }

    /// Wrapping in parentheses does not change the tree.
    #[test]
    fn parentheses_are_transparent(s in arb_binary_expr()) {
        let plain = parse(&s).map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        let wrapped = parse(&format!("(({s}))"))
            .map_err(|e| TestCaseError::fail(format!("{s}: {e}")))?;
        prop_assert_eq!(plain.to_sexpr(), wrapped.to_sexpr());
    }

    /// `super` after an ordinary key is always rejected.
    #[test]
    fn super_after_key_is_malformed(key in arb_ident()) {
        let err = parse(&format!("{key}.super"));
        prop_assert!(err.is_err());
    }

    /// Parsing is deterministic.
    #[test]
    fn parse_is_deterministic(s in arb_binary_expr()) {
        prop_assert_eq!(parse(&s), parse(&s));
    }
}
