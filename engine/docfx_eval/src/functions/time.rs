//! Time built-ins.
//!
//! Timestamps are Unix seconds as numbers; formatting is UTC with strftime
//! patterns.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use docfx_ir::Value;

use super::{number_arg, string_arg, Arity, CallContext, Function, FunctionError, FunctionRegistry};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register(Function::new("NOW", Arity::Exact(0), |_, ctx| {
        Ok(Value::Number(ctx.now()))
    }));
    registry.register(Function::new("DATETIME", Arity::Range(1, 2), |args, ctx| {
        format_timestamp(args, ctx, DATETIME_FORMAT)
    }));
    registry.register(Function::new("DATE", Arity::Range(1, 2), |args, ctx| {
        format_timestamp(args, ctx, DATE_FORMAT)
    }));
    registry.register(Function::new("TIME", Arity::Range(1, 2), |args, ctx| {
        format_timestamp(args, ctx, TIME_FORMAT)
    }));
}

/// Wall clock as Unix seconds with microsecond precision.
pub(super) fn unix_now() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}

fn format_timestamp(
    args: &[Value],
    _ctx: &CallContext,
    default_format: &str,
) -> Result<Value, FunctionError> {
    let timestamp = number_arg(args, 0)?;
    let format = if args.len() > 1 {
        string_arg(args, 1)?
    } else {
        default_format
    };

    let datetime = to_datetime(timestamp)?;

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(FunctionError::Failed(format!(
            "invalid format string `{format}`"
        )));
    }

    let mut out = String::new();
    write!(out, "{}", datetime.format_with_items(items.into_iter())).map_err(|_| {
        FunctionError::Failed(format!("cannot format timestamp with `{format}`"))
    })?;
    Ok(Value::String(out))
}

fn to_datetime(timestamp: f64) -> Result<DateTime<Utc>, FunctionError> {
    if !timestamp.is_finite() {
        return Err(FunctionError::NonFinite);
    }
    let seconds = timestamp.floor();
    let nanos = ((timestamp - seconds) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(seconds as i64, nanos)
        .ok_or_else(|| FunctionError::Failed(format!("timestamp {timestamp} is out of range")))
}
