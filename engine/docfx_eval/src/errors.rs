//! Error types for formula evaluation.
//!
//! Factory functions (e.g. [`key_not_found`]) are the public API; they set
//! both the [`ErrorKind`] and a message naming the path or operands involved.

use docfx_diagnostic::{ErrorCode, ErrorKind};
use docfx_ir::{BinaryOp, DocPath, UnaryOp};
use docfx_parse::ParseError;

use crate::functions::FunctionError;

/// Result of evaluating an expression.
pub type EvalResult<T> = Result<T, EvalError>;

/// Why a single expression failed to evaluate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            code: kind.default_code(),
            message: message.into(),
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        EvalError {
            kind: ErrorKind::Parse,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// Reference errors

pub fn key_not_found(key: &str, container: &DocPath) -> EvalError {
    EvalError::new(
        ErrorKind::Reference,
        format!("no property `{key}` in `{container}`"),
    )
}

pub fn index_out_of_bounds(index: i64, len: usize, container: &DocPath) -> EvalError {
    EvalError::new(
        ErrorKind::Reference,
        format!("index {index} is out of bounds for `{container}` (length {len})"),
    )
}

pub fn temp_key_not_found(key: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Reference,
        format!("no property `{key}` in computed value"),
    )
}

pub fn temp_index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(
        ErrorKind::Reference,
        format!("index {index} is out of bounds for computed value (length {len})"),
    )
}

pub fn cannot_access(accessor: &str, type_name: &str, at: Option<&DocPath>) -> EvalError {
    let message = match at {
        Some(path) => format!("cannot access {accessor} on {type_name} `{path}`"),
        None => format!("cannot access {accessor} on {type_name}"),
    };
    EvalError::new(ErrorKind::Reference, message)
}

pub fn super_above_root(depth: u32) -> EvalError {
    let chain = vec!["super"; depth as usize].join(".");
    EvalError::new(
        ErrorKind::Reference,
        format!("`{chain}` climbs above the document root"),
    )
}

// Type errors

pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("operator `{op}` cannot be applied to {left} and {right}"),
    )
}

pub fn logical_requires_bool(op: BinaryOp, got: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("operator `{op}` requires boolean operands, got {got}"),
    )
}

pub fn invalid_unary_operand(op: UnaryOp, got: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("operator `{op}` cannot be applied to {got}"),
    )
}

pub fn invalid_index_type(got: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("index must be a string or an integer, got {got}"),
    )
}

// Function errors

pub fn undefined_function(name: &str) -> EvalError {
    EvalError::new(
        ErrorKind::UnknownFunction,
        format!("unknown function `{name}`"),
    )
}

pub fn function_failed(name: &str, err: &FunctionError) -> EvalError {
    EvalError::new(ErrorKind::Function, format!("{name}: {err}"))
}

// Formula state errors

pub fn cyclic_reference(path: &DocPath) -> EvalError {
    EvalError::new(
        ErrorKind::CyclicReference,
        format!("cyclic reference: `{path}` is still being resolved"),
    )
}

/// A formula this one depends on has failed.
///
/// Only `CyclicReference` carries over, so every member of a cycle reports
/// it; any other failure of the dependency is a reference error here.
pub fn dependency_failed(path: &DocPath, kind: ErrorKind) -> EvalError {
    let own_kind = match kind {
        ErrorKind::CyclicReference => ErrorKind::CyclicReference,
        _ => ErrorKind::Reference,
    };
    EvalError::new(own_kind, format!("depends on `{path}`, which failed ({kind})"))
}
