#![allow(clippy::unwrap_used)]

use super::*;
use crate::ErrorCode;
use docfx_ir::DocPath;
use pretty_assertions::assert_eq;

fn err(key: &str, kind: ErrorKind, message: &str) -> EvaluationError {
    EvaluationError::new(DocPath::root().key(key), kind, message)
}

#[test]
fn test_empty_bag_has_no_failure() {
    assert!(ErrorBag::new().into_failure().is_none());
    assert!(EvaluationFailure::from_errors(Vec::new()).is_none());
}

#[test]
fn test_discovery_order_is_kept() {
    let mut bag = ErrorBag::new();
    bag.push(err("b", ErrorKind::Reference, "missing `x`"));
    bag.push(err("a", ErrorKind::Type, "cannot add"));
    assert_eq!(bag.len(), 2);
    assert!(bag.has_kind(ErrorKind::Type));
    assert!(!bag.has_kind(ErrorKind::Parse));

    let failure = bag.into_failure().unwrap();
    assert_eq!(failure.kinds(), vec![ErrorKind::Reference, ErrorKind::Type]);
    assert_eq!(failure.first().path.to_string(), "b");
}

#[test]
fn test_display_lists_each_error() {
    let failure = EvaluationFailure::from_errors(vec![
        err("id", ErrorKind::UnknownFunction, "no function named `FOO`"),
        err("loop", ErrorKind::CyclicReference, "cycle detected")
            .with_code(ErrorCode::E2005),
    ])
    .unwrap();

    assert_eq!(
        failure.to_string(),
        "id: [E2003] no function named `FOO`\n\
         loop: [E2005] cycle detected"
    );
}

#[test]
fn test_specific_code_overrides_default() {
    let e = err("f", ErrorKind::Parse, "unterminated string").with_code(ErrorCode::E1006);
    assert_eq!(e.code, ErrorCode::E1006);
    assert!(e.code.is_parse_error());
    assert_eq!(ErrorKind::Parse.default_code(), ErrorCode::E1001);
    assert!(!ErrorCode::E2001.is_parse_error());
}

#[test]
fn test_fail_with_appends_last() {
    let mut bag = ErrorBag::new();
    bag.push(err("dep", ErrorKind::Type, "cannot add"));
    let failure = bag.fail_with(EvaluationError::new(
        DocPath::root(),
        ErrorKind::Type,
        "depends on `dep`",
    ));
    let paths: Vec<String> = failure.errors().iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["dep", "$"]);

    let alone = ErrorBag::new().fail_with(err("x", ErrorKind::Parse, "bad"));
    assert_eq!(alone.len(), 1);
}
