#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use super::*;
use crate::functions::{CallContext, FunctionRegistry};
use pretty_assertions::assert_eq;

fn workspace(document: Value) -> Rc<Workspace> {
    Workspace::new(
        document,
        Arc::new(FunctionRegistry::with_builtins()),
        CallContext::new(),
    )
}

fn sample() -> Rc<Workspace> {
    workspace(Value::object([
        ("a", Value::from(1)),
        (
            "inner",
            Value::object([
                ("b", Value::from(2)),
                ("list", Value::array([Value::from("x"), Value::from("y")])),
            ]),
        ),
    ]))
}

#[test]
fn test_ancestor_climbs_one_parent_per_level() {
    let ws = sample();
    let root = Scope::root(&ws);
    let inner = Scope::child(&root, DocPath::root().key("inner"), ScopeKind::Container);
    let formula = Scope::child(&inner, DocPath::root().key("inner").key("b"), ScopeKind::Formula);

    assert_eq!(formula.ancestor(0).unwrap().path(), &DocPath::root().key("inner").key("b"));
    assert_eq!(formula.ancestor(1).unwrap().path(), &DocPath::root().key("inner"));
    assert_eq!(formula.ancestor(2).unwrap().path(), &DocPath::root());

    let err = formula.ancestor(3).err().unwrap();
    assert_eq!(err.kind, ErrorKind::Reference);
    assert_eq!(err.message, "`super.super.super` climbs above the document root");
}

#[test]
fn test_container_path() {
    let ws = sample();
    let root = Scope::root(&ws);
    let formula = Scope::child(&root, DocPath::root().key("a"), ScopeKind::Formula);
    assert_eq!(root.container_path(), Some(DocPath::root()));
    assert_eq!(formula.container_path(), Some(DocPath::root()));
    assert_eq!(formula.kind, ScopeKind::Formula);
    assert_eq!(Scope::detached_formula(&ws).container_path(), None);
}

#[test]
fn test_resolve_identifier_uses_nearest_container() {
    let ws = sample();
    let root = Scope::root(&ws);
    let inner = Scope::child(&root, DocPath::root().key("inner"), ScopeKind::Container);

    assert_eq!(resolve_identifier(&inner, "b").unwrap(), Value::from(2));
    assert_eq!(resolve_identifier(&root, "a").unwrap(), Value::from(1));

    // Lookup does not fall back to outer containers.
    let err = resolve_identifier(&inner, "a").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reference);
    assert_eq!(err.message, "no property `a` in `inner`");
}

#[test]
fn test_identifier_without_container() {
    let ws = workspace(Value::formula("a"));
    let scope = Scope::detached_formula(&ws);
    let err = resolve_identifier(&scope, "a").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reference);
}

#[test]
fn test_resolve_path_segments() {
    let ws = sample();
    let root = Scope::root(&ws);
    let segments = [PathSegment::from("inner"), PathSegment::from("list"), PathSegment::Index(1)];
    assert_eq!(resolve_path(&root, &segments).unwrap(), Value::from("y"));

    let missing = [PathSegment::from("inner"), PathSegment::from("list"), PathSegment::Index(5)];
    let err = resolve_path(&root, &missing).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reference);
    assert_eq!(err.message, "index 5 is out of bounds for `inner.list` (length 2)");
}

#[test]
fn test_resolve_path_into_scalar_is_reference_error() {
    let ws = sample();
    let root = Scope::root(&ws);
    let err = resolve_path(&root, &[PathSegment::from("a"), PathSegment::from("b")]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reference);
    assert_eq!(err.message, "cannot access property `b` on number `a`");
}

#[test]
fn test_resolve_path_resolves_formulas_on_demand() {
    let ws = workspace(Value::object([
        ("x", Value::formula("1 + 2")),
        ("y", Value::object([("z", Value::formula("super.super.x * 2"))])),
    ]));
    let root = Scope::root(&ws);
    let value = resolve_path(&root, &[PathSegment::from("y")]).unwrap();
    assert_eq!(value, Value::object([("z", Value::from(6))]));
}

#[test]
fn test_scope_chain_builds_every_prefix() {
    let ws = sample();
    let path = DocPath::root().key("inner").key("list");
    let chain = ScopeChain::to_container(&ws, &path);
    let innermost = chain.innermost();
    assert_eq!(innermost.path(), &path);
    assert_eq!(innermost.ancestor(2).unwrap().path(), &DocPath::root());
    assert_eq!(innermost.kind, ScopeKind::Container);
}
