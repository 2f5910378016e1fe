//! Facade error type.

use docfx_diagnostic::EvaluationFailure;

/// Errors returned by the `docfx` entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// One or more formulas failed; every error is listed.
    #[error("{0}")]
    Evaluation(#[from] EvaluationFailure),
}

impl Error {
    /// The evaluation failure, if this is one.
    pub fn as_failure(&self) -> Option<&EvaluationFailure> {
        match self {
            Error::Evaluation(failure) => Some(failure),
        }
    }
}
