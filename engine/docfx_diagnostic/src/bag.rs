//! Ordered error collection.

use crate::{ErrorKind, EvaluationError};

/// Accumulates errors in discovery order during one evaluation pass.
#[derive(Clone, Debug, Default)]
pub struct ErrorBag {
    errors: Vec<EvaluationError>,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: EvaluationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvaluationError> {
        self.errors.iter()
    }

    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Failure ending with `error`, after everything already recorded.
    pub fn fail_with(mut self, error: EvaluationError) -> EvaluationFailure {
        self.errors.push(error);
        EvaluationFailure {
            errors: self.errors,
        }
    }

    /// `None` when nothing was recorded.
    pub fn into_failure(self) -> Option<EvaluationFailure> {
        EvaluationFailure::from_errors(self.errors)
    }
}

/// A failed evaluation pass: every error recorded, in discovery order.
///
/// Never empty; construct through [`EvaluationFailure::from_errors`] or
/// [`EvaluationFailure::single`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.errors))]
pub struct EvaluationFailure {
    errors: Vec<EvaluationError>,
}

impl EvaluationFailure {
    pub fn from_errors(errors: Vec<EvaluationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(EvaluationFailure { errors })
        }
    }

    pub fn single(error: EvaluationError) -> Self {
        EvaluationFailure {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[EvaluationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<EvaluationError> {
        self.errors
    }

    /// First error recorded.
    pub fn first(&self) -> &EvaluationError {
        // Non-empty by construction.
        &self.errors[0]
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }
}

impl IntoIterator for EvaluationFailure {
    type Item = EvaluationError;
    type IntoIter = std::vec::IntoIter<EvaluationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

fn render(errors: &[EvaluationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests;
