//! A single recorded failure.

use docfx_ir::DocPath;

use crate::{ErrorCode, ErrorKind};

/// A formula that failed, where, and why.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{path}: [{code}] {message}")]
pub struct EvaluationError {
    /// Location of the failing formula node.
    pub path: DocPath,
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub message: String,
}

impl EvaluationError {
    pub fn new(path: DocPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        EvaluationError {
            path,
            kind,
            code: kind.default_code(),
            message: message.into(),
        }
    }

    /// Replace the kind's default code with a more specific one.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }
}
