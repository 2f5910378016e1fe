//! End-to-end document evaluation through the public API.

#![allow(clippy::unwrap_used)]

use docfx::{
    evaluate, evaluate_json, Arity, Engine, ErrorKind, Function, FunctionError, FunctionRegistry,
    Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn failure_kinds(result: Result<serde_json::Value, docfx::Error>) -> Vec<(String, ErrorKind)> {
    let err = result.unwrap_err();
    err.as_failure()
        .unwrap()
        .errors()
        .iter()
        .map(|e| (e.path.to_string(), e.kind))
        .collect()
}

#[test]
fn plain_document_is_returned_unchanged() {
    let doc = json!({
        "title": "report",
        "pages": [1, 2, 3],
        "meta": { "draft": false, "owner": null },
    });
    assert_eq!(evaluate_json(doc.clone()).unwrap(), doc);
}

#[test]
fn simple_arithmetic() {
    let result = evaluate_json(json!({ "math": { "$formula": "5 + 10" } })).unwrap();
    assert_eq!(result, json!({ "math": 15 }));
}

#[test]
fn sibling_reference() {
    let result = evaluate_json(json!({ "a": 2, "b": { "$formula": "super.a + 1" } })).unwrap();
    assert_eq!(result, json!({ "a": 2, "b": 3 }));
}

#[test]
fn missing_property_is_reference_error() {
    let result = evaluate_json(json!({ "prop": { "$formula": "super.notExistingProperty" } }));
    assert_eq!(
        failure_kinds(result),
        vec![("prop".to_string(), ErrorKind::Reference)]
    );
}

#[test]
fn one_bad_formula_fails_the_whole_document() {
    let result = evaluate_json(json!({
        "foo": { "$formula": "UNIQUE_ID()" },
        "prop": { "$$formula": "super.notExistingProperty" },
    }));
    assert_eq!(
        failure_kinds(result),
        vec![("prop".to_string(), ErrorKind::Reference)]
    );
}

#[test]
fn mutual_references_are_cyclic() {
    let result = evaluate_json(json!({
        "a": { "$formula": "super.b" },
        "b": { "$formula": "super.a" },
    }));
    let kinds = failure_kinds(result);
    assert_eq!(kinds.len(), 2);
    assert!(kinds.iter().all(|(_, kind)| *kind == ErrorKind::CyclicReference));
}

#[test]
fn long_cycle_does_not_exhaust_the_stack() {
    let mut doc = serde_json::Map::new();
    let n = 3_000;
    for i in 0..n {
        let next = (i + 1) % n;
        doc.insert(
            format!("k{i}"),
            json!({ "$formula": format!("super.k{next}") }),
        );
    }
    let kinds = failure_kinds(evaluate_json(serde_json::Value::Object(doc)));
    assert_eq!(kinds.len(), n);
    assert!(kinds.iter().all(|(_, kind)| *kind == ErrorKind::CyclicReference));
}

#[test]
fn every_error_is_reported_in_order() {
    let result = evaluate_json(json!({
        "x": { "$formula": "1 +" },
        "fine": { "$formula": "2" },
        "group": [
            { "$formula": "true + 1" },
            { "$formula": "MISSING()" },
        ],
        "y": { "$formula": "ABS(\"a\")" },
    }));
    let err = result.unwrap_err();
    let rendered = err.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("x: [E1002]"));
    assert!(lines[1].starts_with("group[0]: [E2002]"));
    assert_eq!(lines[2], "group[1]: [E2003] unknown function `MISSING`");
    assert!(lines[3].starts_with("y: [E2004] ABS: argument 1 must be"));
}

#[test]
fn random_ids_have_the_right_shape() {
    let result = evaluate_json(json!({
        "uuid": { "$formula": "UUIDV4()" },
        "id": { "$formula": "UNIQUE_ID()" },
    }))
    .unwrap();
    let uuid = result["uuid"].as_str().unwrap();
    assert_eq!(uuid.len(), 36);
    assert_eq!(uuid.matches('-').count(), 4);
    assert_eq!(&uuid[14..15], "4");

    let id = result["id"].as_str().unwrap();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn deterministic_documents_are_idempotent() {
    let doc = json!({
        "price": 4,
        "qty": 3,
        "total": { "$formula": "super.price * super.qty" },
        "label": { "$formula": "\"total: \" ~ super.total" },
    });
    let first = evaluate_json(doc.clone()).unwrap();
    assert_eq!(evaluate_json(doc).unwrap(), first);
    assert_eq!(evaluate_json(first.clone()).unwrap(), first);
    assert_eq!(first["label"], json!("total: 12"));
}

#[test]
fn non_finite_results_become_null() {
    let result = evaluate_json(json!({ "inf": { "$formula": "1 / 0" } })).unwrap();
    assert_eq!(result, json!({ "inf": null }));
}

#[test]
fn value_api_matches_json_api() {
    let doc = Value::object([
        ("a", Value::from(1)),
        ("b", Value::formula("super.a * 3")),
    ]);
    assert_eq!(
        evaluate(doc).unwrap(),
        Value::object([("a", Value::from(1)), ("b", Value::from(3))])
    );
}

#[test]
fn engine_with_custom_registry_and_keys() {
    let mut registry = FunctionRegistry::empty();
    registry.register(Function::new("GREET", Arity::Exact(1), |args, _| {
        match args.first() {
            Some(Value::String(name)) => Ok(Value::from(format!("hello {name}"))),
            _ => Err(FunctionError::Failed("GREET expects a name".to_string())),
        }
    }));
    let engine = Engine::builder()
        .registry(registry)
        .formula_keys(["="])
        .build();

    let result = engine
        .evaluate_json(json!({ "who": "ada", "msg": { "=": "GREET(super.who)" } }))
        .unwrap();
    assert_eq!(result, json!({ "who": "ada", "msg": "hello ada" }));

    // Built-ins are gone with a custom registry.
    let err = engine
        .evaluate_json(json!({ "n": { "=": "ABS(1)" } }))
        .unwrap_err();
    assert_eq!(err.as_failure().unwrap().first().kind, ErrorKind::UnknownFunction);

    // `$formula` is plain data for this engine.
    let data = json!({ "n": { "$formula": "1" } });
    assert_eq!(engine.evaluate_json(data.clone()).unwrap(), data);
}

#[test]
fn custom_function_cannot_return_a_formula() {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register(Function::new("F", Arity::Exact(0), |_, _| {
        Ok(Value::formula("1+1"))
    }));
    let engine = Engine::builder().registry(registry).build();

    let failure = engine
        .evaluate(Value::object([("a", Value::formula("F()"))]))
        .unwrap_err();
    assert_eq!(failure.first().path.to_string(), "a");
    assert_eq!(failure.first().kind, ErrorKind::Function);
    assert_eq!(failure.first().message, "F: result contains a formula");
}

#[test]
fn root_anchored_lookup() {
    let result = evaluate_json(json!({
        "net": { "ssid": "x" },
        "dev": { "name": { "$formula": "$.net.ssid" } },
    }))
    .unwrap();
    assert_eq!(result["dev"]["name"], json!("x"));
}

#[test]
fn dependent_of_parse_failure_is_reference_error() {
    let result = evaluate_json(json!({
        "a": { "$formula": "super.b" },
        "b": { "$formula": "1 +" },
    }));
    assert_eq!(
        failure_kinds(result),
        vec![
            ("b".to_string(), ErrorKind::Parse),
            ("a".to_string(), ErrorKind::Reference),
        ]
    );
}

#[test]
fn max_of_nan_is_an_error() {
    let result = evaluate_json(json!({ "m": { "$formula": "MAX(0 / 0)" } }));
    assert_eq!(
        failure_kinds(result),
        vec![("m".to_string(), ErrorKind::Function)]
    );
}

#[test]
fn engine_fixed_now() {
    let engine = Engine::builder().fixed_now(0.0).build();
    let result = engine
        .evaluate_json(json!({ "when": { "$formula": "DATETIME(NOW())" } }))
        .unwrap();
    assert_eq!(result, json!({ "when": "1970-01-01T00:00:00Z" }));
}

#[test]
fn batch_evaluation_keeps_input_order() {
    let engine = Engine::new();
    let documents: Vec<Value> = (0..64)
        .map(|i| {
            if i % 7 == 0 {
                Value::object([("bad", Value::formula("nope"))])
            } else {
                Value::object([
                    ("i", Value::from(i)),
                    ("sq", Value::formula("super.i * super.i")),
                ])
            }
        })
        .collect();
    let results = engine.evaluate_batch(documents);
    assert_eq!(results.len(), 64);
    for (i, result) in results.into_iter().enumerate() {
        if i % 7 == 0 {
            assert!(result.is_err());
        } else {
            let value = result.unwrap();
            let sq = value.as_object().unwrap()["sq"].clone();
            assert_eq!(sq, Value::Number((i * i) as f64));
        }
    }
}

#[test]
fn engine_evaluate_expression() {
    let engine = Engine::new();
    let data = Value::object([("items", Value::array([Value::from(3), Value::from(4)]))]);
    assert_eq!(
        engine.evaluate_expression("(items[0] * items[1]) | POW(2)", data),
        Ok(Value::from(144))
    );
}

#[test]
fn init_tracing_is_idempotent() {
    docfx::init_tracing();
    docfx::init_tracing();
}
