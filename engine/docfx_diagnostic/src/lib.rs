//! Error reporting for formula evaluation.
//!
//! - [`ErrorKind`]: the six failure categories a formula can end in
//! - [`ErrorCode`]: stable `E####` identifiers (first digit = phase)
//! - [`EvaluationError`]: one failure, anchored at a document path
//! - [`ErrorBag`]: ordered collector used during a single evaluation pass
//! - [`EvaluationFailure`]: the non-empty aggregate a failed pass returns
//!
//! Every formula failure is recorded, never thrown; the walker keeps going so
//! a single pass reports every independent fault.

mod bag;
mod error_code;
mod evaluation_error;
mod kind;

pub use bag::{ErrorBag, EvaluationFailure};
pub use error_code::ErrorCode;
pub use evaluation_error::EvaluationError;
pub use kind::ErrorKind;
