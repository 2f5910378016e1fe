//! Configured entry point.

use docfx_diagnostic::EvaluationFailure;
use docfx_eval::{EvaluationResult, Evaluator, FunctionRegistry};
use docfx_ir::Value;
use rayon::prelude::*;
use tracing::debug;

use crate::json::{from_json, to_json, FormulaKeys};
use crate::Error;

/// An evaluator plus the JSON formula keys.
///
/// `Engine` is `Send + Sync`; one instance can serve many threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    evaluator: Evaluator,
    formula_keys: FormulaKeys,
}

impl Engine {
    /// Engine with the built-in functions and the default formula keys.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.evaluator.registry()
    }

    pub fn formula_keys(&self) -> &FormulaKeys {
        &self.formula_keys
    }

    /// Resolve every formula in `document`.
    pub fn evaluate(&self, document: Value) -> EvaluationResult {
        self.evaluator.evaluate(document)
    }

    /// Resolve a JSON document.
    pub fn evaluate_json(&self, document: serde_json::Value) -> Result<serde_json::Value, Error> {
        let value = from_json(document, &self.formula_keys);
        let resolved = self.evaluator.evaluate(value)?;
        Ok(to_json(resolved, &self.formula_keys))
    }

    /// Evaluate one expression with `data` as the root object.
    pub fn evaluate_expression(&self, text: &str, data: Value) -> Result<Value, EvaluationFailure> {
        self.evaluator.evaluate_expression(text, data)
    }

    /// Evaluate independent documents in parallel.
    ///
    /// Results come back in input order. Each document has its own working
    /// tree, errors and `NOW()` value.
    #[tracing::instrument(level = "debug", skip_all, fields(documents = documents.len()))]
    pub fn evaluate_batch(&self, documents: Vec<Value>) -> Vec<EvaluationResult> {
        let results: Vec<EvaluationResult> = documents
            .into_par_iter()
            .map(|document| self.evaluator.evaluate(document))
            .collect();
        debug!(
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch finished"
        );
        results
    }
}

/// Builder for [`Engine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    registry: Option<FunctionRegistry>,
    formula_keys: Option<FormulaKeys>,
    fixed_now: Option<f64>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in function registry.
    #[must_use]
    pub fn registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Keys marking a formula in JSON input; the first is used for output.
    #[must_use]
    pub fn formula_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.formula_keys = Some(FormulaKeys::new(keys));
        self
    }

    /// Pin `NOW()` to a Unix timestamp (seconds).
    #[must_use]
    pub fn fixed_now(mut self, timestamp: f64) -> Self {
        self.fixed_now = Some(timestamp);
        self
    }

    pub fn build(self) -> Engine {
        let mut evaluator = Evaluator::builder();
        if let Some(registry) = self.registry {
            evaluator = evaluator.registry(registry);
        }
        if let Some(timestamp) = self.fixed_now {
            evaluator = evaluator.fixed_now(timestamp);
        }
        Engine {
            evaluator: evaluator.build(),
            formula_keys: self.formula_keys.unwrap_or_default(),
        }
    }
}
