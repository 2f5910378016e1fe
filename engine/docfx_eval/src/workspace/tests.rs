#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn workspace(document: Value) -> Rc<Workspace> {
    Workspace::new(
        document,
        Arc::new(FunctionRegistry::with_builtins()),
        CallContext::new(),
    )
}

fn path(key: &str) -> DocPath {
    DocPath::root().key(key)
}

#[test]
fn test_resolve_formula_caches_result() {
    let ws = workspace(Value::object([("n", Value::formula("2 * 21"))]));
    assert_eq!(ws.resolve_formula(&path("n"), None), Ok(Value::from(42)));
    // Second call hits the resolved state.
    assert_eq!(ws.resolve_formula(&path("n"), None), Ok(Value::from(42)));

    let (tree, errors) = ws.take();
    assert!(errors.is_empty());
    assert_eq!(tree.into_value(), Value::object([("n", Value::from(42))]));
}

#[test]
fn test_failure_is_recorded_once() {
    let ws = workspace(Value::object([("bad", Value::formula("1 + \"x\""))]));
    let first = ws.resolve_formula(&path("bad"), None).unwrap_err();
    let second = ws.resolve_formula(&path("bad"), None).unwrap_err();
    assert_eq!(first.kind, ErrorKind::Reference);
    assert_eq!(second.kind, ErrorKind::Reference);
    assert_eq!(first.message, "depends on `bad`, which failed (TypeError)");

    let (_, errors) = ws.take();
    assert_eq!(errors.len(), 1);
    let recorded = errors.iter().next().unwrap();
    assert_eq!(recorded.kind, ErrorKind::Type);
    assert_eq!(recorded.path, path("bad"));
    assert_eq!(
        recorded.message,
        "operator `+` cannot be applied to number and string"
    );
}

#[test]
fn test_parse_failure_keeps_parse_code() {
    let ws = workspace(Value::object([("p", Value::formula("(1 + 2"))]));
    ws.resolve_formula(&path("p"), None).unwrap_err();

    let (_, errors) = ws.take();
    let recorded = errors.iter().next().unwrap();
    assert_eq!(recorded.kind, ErrorKind::Parse);
    assert!(recorded.code.is_parse_error());
}

#[test]
fn test_cycle_is_detected_without_recursing_forever() {
    let ws = workspace(Value::object([
        ("a", Value::formula("super.b")),
        ("b", Value::formula("super.a")),
    ]));
    let err = ws.resolve_formula(&path("a"), None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::CyclicReference);

    let (_, errors) = ws.take();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["b", "a"]);
    assert!(errors.iter().all(|e| e.kind == ErrorKind::CyclicReference));
}

#[test]
fn test_field_and_element_places() {
    let ws = workspace(Value::object([
        ("obj", Value::object([("k", Value::from(1))])),
        ("list", Value::array([Value::from(10), Value::from(20)])),
    ]));
    let root = Place::Node(DocPath::root());

    let place = ws.field(root.clone(), "obj").unwrap();
    assert_eq!(place, Place::Node(path("obj")));

    let list = ws.field(root, "list").unwrap();
    assert_eq!(ws.element(list.clone(), -1).unwrap(), Place::Node(path("list").index(1)));
    assert_eq!(ws.element(list.clone(), -3).unwrap_err().kind, ErrorKind::Reference);
    assert_eq!(
        ws.field(list, "k").unwrap_err().message,
        "cannot access property `k` on array `list`"
    );
}

#[test]
fn test_navigation_through_formula_result() {
    let ws = workspace(Value::object([
        ("src", Value::array([Value::from(1), Value::from(2)])),
        ("copy", Value::formula("super.src")),
    ]));
    let place = ws.element(Place::Node(path("copy")), 0).unwrap();
    assert_eq!(place, Place::Temp(Value::from(1)));

    let err = ws.element(Place::Node(path("copy")), 2).unwrap_err();
    assert_eq!(
        err.message,
        "index 2 is out of bounds for computed value (length 2)"
    );
}

#[test]
fn test_temp_places() {
    let ws = workspace(Value::Null);
    let obj = Place::Temp(Value::object([("x", Value::from(true))]));
    assert_eq!(ws.field(obj.clone(), "x").unwrap(), Place::Temp(Value::from(true)));
    assert_eq!(
        ws.field(obj, "y").unwrap_err().message,
        "no property `y` in computed value"
    );
    assert_eq!(
        ws.load(Place::Temp(Value::from("t"))).unwrap(),
        Value::from("t")
    );
}

#[test]
fn test_normalize_index() {
    assert_eq!(normalize_index(0, 3), Some(0));
    assert_eq!(normalize_index(-1, 3), Some(2));
    assert_eq!(normalize_index(-3, 3), Some(0));
    assert_eq!(normalize_index(3, 3), None);
    assert_eq!(normalize_index(-4, 3), None);
    assert_eq!(normalize_index(0, 0), None);
}

#[test]
fn test_children_are_classified() {
    let ws = workspace(Value::object([
        ("a", Value::from(1)),
        ("b", Value::Array(Vec::new())),
        ("c", Value::formula("1")),
    ]));
    assert_eq!(
        ws.children(&DocPath::root()),
        vec![
            (path("a"), ChildKind::Scalar),
            (path("b"), ChildKind::Container),
            (path("c"), ChildKind::Formula),
        ]
    );
    assert!(ws.is_formula(&path("c")));
    assert!(!ws.is_formula(&path("a")));
}
