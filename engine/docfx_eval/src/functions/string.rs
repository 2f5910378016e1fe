//! String and collection built-ins.

use docfx_ir::Value;

use super::{invalid_argument, string_arg, Arity, CallContext, Function, FunctionError, FunctionRegistry};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register(Function::new("UPPER", Arity::Exact(1), |args, _| {
        Ok(Value::String(string_arg(args, 0)?.to_uppercase()))
    }));
    registry.register(Function::new("LOWER", Arity::Exact(1), |args, _| {
        Ok(Value::String(string_arg(args, 0)?.to_lowercase()))
    }));
    registry.register(Function::new("TRIM", Arity::Exact(1), |args, _| {
        Ok(Value::String(string_arg(args, 0)?.trim().to_string()))
    }));
    registry.register(Function::new("SLUGIFY", Arity::Exact(1), |args, _| {
        Ok(Value::String(slugify(string_arg(args, 0)?)))
    }));
    registry.register(Function::new("LEN", Arity::Exact(1), len));
}

fn len(args: &[Value], _ctx: &CallContext) -> Result<Value, FunctionError> {
    let count = match args.first() {
        Some(Value::String(s)) => s.chars().count(),
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        other => return Err(invalid_argument(0, "a string, array or object", other)),
    };
    Ok(Value::from(count))
}

/// Lowercase ASCII alphanumeric runs joined by single `-`.
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
