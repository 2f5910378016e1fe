//! Numeric built-ins.

use docfx_ir::Value;

use super::{finite, number_arg, Arity, CallContext, Function, FunctionError, FunctionRegistry};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register(Function::new("POW", Arity::Exact(2), pow));
    registry.register(Function::new("LOG10", Arity::Exact(1), log10));
    registry.register(Function::new("MAX", Arity::AtLeast(1), max));
    registry.register(Function::new("MIN", Arity::AtLeast(1), min));
    registry.register(Function::new("ABS", Arity::Exact(1), |args, _| {
        Ok(Value::Number(number_arg(args, 0)?.abs()))
    }));
    registry.register(Function::new("FLOOR", Arity::Exact(1), |args, _| {
        Ok(Value::Number(number_arg(args, 0)?.floor()))
    }));
    registry.register(Function::new("CEIL", Arity::Exact(1), |args, _| {
        Ok(Value::Number(number_arg(args, 0)?.ceil()))
    }));
    registry.register(Function::new("ROUND", Arity::Exact(1), |args, _| {
        Ok(Value::Number(number_arg(args, 0)?.round()))
    }));
}

fn pow(args: &[Value], _ctx: &CallContext) -> Result<Value, FunctionError> {
    let base = number_arg(args, 0)?;
    let exponent = number_arg(args, 1)?;
    finite(base.powf(exponent))
}

fn log10(args: &[Value], _ctx: &CallContext) -> Result<Value, FunctionError> {
    // log10(0) = -inf, log10(-1) = NaN
    finite(number_arg(args, 0)?.log10())
}

fn max(args: &[Value], _ctx: &CallContext) -> Result<Value, FunctionError> {
    fold_numbers(args, f64::max)
}

fn min(args: &[Value], _ctx: &CallContext) -> Result<Value, FunctionError> {
    fold_numbers(args, f64::min)
}

fn fold_numbers(args: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value, FunctionError> {
    let mut acc = number_arg(args, 0)?;
    for index in 1..args.len() {
        acc = pick(acc, number_arg(args, index)?);
    }
    finite(acc)
}
