//! Unary operator implementations.

use docfx_ir::{UnaryOp, Value};

use crate::errors::{invalid_unary_operand, EvalResult};

/// Evaluate `-x` or `not x`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult<Value> {
    match (value, op) {
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        _ => Err(invalid_unary_operand(op, value.type_name())),
    }
}
