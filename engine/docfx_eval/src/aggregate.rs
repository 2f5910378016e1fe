//! All-or-nothing result policy.

use docfx_diagnostic::{ErrorBag, EvaluationFailure};
use docfx_ir::Value;
use tracing::debug;

use crate::tree::Node;

/// Outcome of evaluating a document: the resolved document, or every error.
pub type EvaluationResult = Result<Value, EvaluationFailure>;

/// Any recorded error fails the whole evaluation, carrying every error in
/// discovery order. Otherwise the working tree becomes the resolved document.
pub fn aggregate(errors: ErrorBag, document: Node) -> EvaluationResult {
    match errors.into_failure() {
        Some(failure) => {
            debug!(errors = failure.len(), "evaluation failed");
            Err(failure)
        }
        None => Ok(document.into_value()),
    }
}
