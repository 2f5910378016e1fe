//! Random identifier built-ins.

use docfx_ir::Value;
use uuid::Uuid;

use super::{Arity, Function, FunctionRegistry};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register(Function::new("UUIDV4", Arity::Exact(0), |_, _| {
        Ok(Value::String(Uuid::new_v4().hyphenated().to_string()))
    }));
    // 32 lowercase hex digits, no separators.
    registry.register(Function::new("UNIQUE_ID", Arity::Exact(0), |_, _| {
        Ok(Value::String(Uuid::new_v4().simple().to_string()))
    }));
}
