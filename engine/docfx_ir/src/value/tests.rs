use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_is_compact_json() {
    let value = Value::object([
        ("name", Value::from("eu \"west\"")),
        ("count", Value::from(15)),
        ("ratio", Value::from(0.5)),
        ("tags", Value::array([Value::Bool(true), Value::Null])),
    ]);
    assert_eq!(
        value.to_string(),
        r#"{"name":"eu \"west\"","count":15,"ratio":0.5,"tags":[true,null]}"#
    );
}

#[test]
fn test_object_keeps_insertion_order() {
    let value = Value::object([("z", Value::Null), ("a", Value::Null), ("m", Value::Null)]);
    let keys: Vec<_> = value.as_object().map(|m| m.keys().cloned().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_as_integer() {
    assert_eq!(Value::from(3.0).as_integer(), Some(3));
    assert_eq!(Value::from(-2).as_integer(), Some(-2));
    assert_eq!(Value::from(2.5).as_integer(), None);
    assert_eq!(Value::from(f64::INFINITY).as_integer(), None);
    assert_eq!(Value::from("3").as_integer(), None);
}

#[test]
fn test_contains_formula() {
    let nested = Value::object([(
        "outer",
        Value::array([Value::from(1), Value::object([("f", Value::formula("1 + 1"))])]),
    )]);
    assert!(nested.contains_formula());
    assert!(!Value::object([("a", Value::from(1))]).contains_formula());
}

#[test]
fn test_to_text_does_not_quote_strings() {
    assert_eq!(Value::from("abc").to_text(), "abc");
    assert_eq!(Value::from(2).to_text(), "2");
    assert_eq!(Value::Bool(false).to_text(), "false");
}
