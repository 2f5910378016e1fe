//! Binary operator implementations.
//!
//! Direct enum-based dispatch on `(left, right)`. There is no implicit
//! coercion: operand type combinations not listed here are type errors.

use std::cmp::Ordering;

use docfx_ir::{BinaryOp, Value};

use crate::errors::{binary_type_mismatch, logical_requires_bool, EvalResult};

/// Evaluate a binary operation on two already-evaluated operands.
///
/// `and`/`or` short-circuit in the interpreter; here they only see two
/// booleans or report the offending operand.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Concat => eval_concat(left, right),
        _ if op.is_short_circuit() => eval_logical(left, right, op),
        _ if op.is_comparison() => eval_comparison(left, right, op),
        _ => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(eval_float(*a, *b, op))),
            (Value::String(a), Value::String(b)) if op == BinaryOp::Add => {
                Ok(Value::String(format!("{a}{b}")))
            }
            _ => Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
        },
    }
}

/// IEEE-754 double arithmetic: `1 / 0` is infinity, `0 / 0` is NaN.
fn eval_float(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        _ => f64::NAN,
    }
}

fn eval_comparison(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => return Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
    };

    // NaN compares false against everything.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };

    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn eval_logical(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    let a = require_bool(left, op)?;
    let b = require_bool(right, op)?;
    Ok(Value::Bool(if op == BinaryOp::And { a && b } else { a || b }))
}

/// Boolean operand of `and`/`or`.
pub fn require_bool(value: &Value, op: BinaryOp) -> EvalResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| logical_requires_bool(op, value.type_name()))
}

fn eval_concat(left: &Value, right: &Value) -> EvalResult<Value> {
    let is_scalar = |v: &Value| {
        matches!(
            v,
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null
        )
    };
    if !is_scalar(left) || !is_scalar(right) {
        return Err(binary_type_mismatch(
            BinaryOp::Concat,
            left.type_name(),
            right.type_name(),
        ));
    }
    Ok(Value::String(format!("{}{}", left.to_text(), right.to_text())))
}
