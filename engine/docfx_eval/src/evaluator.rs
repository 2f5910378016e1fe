//! Evaluator entry points and configuration.

use std::sync::Arc;

use docfx_diagnostic::{EvaluationError, EvaluationFailure};
use docfx_ir::{DocPath, Value};
use tracing::debug;

use crate::aggregate::{aggregate, EvaluationResult};
use crate::functions::{CallContext, FunctionRegistry};
use crate::interpreter::Interpreter;
use crate::scope::Scope;
use crate::walker::Walker;
use crate::workspace::Workspace;

/// Resolves the formulas of documents against a function registry.
///
/// The registry is shared (`Arc`) and immutable, so one evaluator can be
/// used from several threads. Each call gets its own working tree, error
/// collection and `NOW()` cache.
#[derive(Clone, Debug)]
pub struct Evaluator {
    registry: Arc<FunctionRegistry>,
    fixed_now: Option<f64>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Evaluator with the built-in functions.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    fn call_context(&self) -> CallContext {
        match self.fixed_now {
            Some(timestamp) => CallContext::with_fixed_now(timestamp),
            None => CallContext::new(),
        }
    }

    /// Resolve every formula in `document`.
    ///
    /// Fail-slow: evaluation continues past failures so that the returned
    /// [`EvaluationFailure`] lists every error found, in discovery order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&self, document: Value) -> EvaluationResult {
        let workspace = Workspace::new(document, Arc::clone(&self.registry), self.call_context());
        Walker::new(&workspace).run();
        let (tree, errors) = workspace.take();
        debug!(errors = errors.len(), "document walked");
        aggregate(errors, tree)
    }

    /// Evaluate a single expression with `data` as the root container.
    ///
    /// Formulas inside `data` are resolved only when the expression reaches
    /// them. The expression's own failure is reported at the root path `$`.
    #[tracing::instrument(level = "debug", skip(self, data))]
    pub fn evaluate_expression(&self, text: &str, data: Value) -> Result<Value, EvaluationFailure> {
        let workspace = Workspace::new(data, Arc::clone(&self.registry), self.call_context());
        let outcome = match docfx_parse::parse(text) {
            Ok(ast) => {
                let scope = Scope::root(&workspace);
                Interpreter::new(&ast, &scope).eval_root()
            }
            Err(err) => Err(err.into()),
        };
        let (_, errors) = workspace.take();
        match outcome {
            Ok(value) => errors.into_failure().map_or(Ok(value), Err),
            Err(err) => {
                debug!(kind = %err.kind, message = %err.message, "expression failed");
                let error = EvaluationError::new(DocPath::root(), err.kind, err.message)
                    .with_code(err.code);
                Err(errors.fail_with(error))
            }
        }
    }
}

/// Builder for [`Evaluator`].
#[derive(Debug, Default)]
pub struct EvaluatorBuilder {
    registry: Option<FunctionRegistry>,
    fixed_now: Option<f64>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in registry.
    #[must_use]
    pub fn registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Pin `NOW()` to a Unix timestamp (seconds).
    #[must_use]
    pub fn fixed_now(mut self, timestamp: f64) -> Self {
        self.fixed_now = Some(timestamp);
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            registry: Arc::new(self.registry.unwrap_or_else(FunctionRegistry::with_builtins)),
            fixed_now: self.fixed_now,
        }
    }
}
