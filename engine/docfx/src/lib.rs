//! docfx: evaluate documents with embedded formulas.
//!
//! A document is a tree of objects, arrays and scalars in which some nodes
//! are formulas. Evaluation resolves every formula and returns the same tree
//! with each formula replaced by its value, or a failure listing every error.
//!
//! ```text
//! { "a": 2, "b": { "$formula": "super.a + 1" } }   →   { "a": 2, "b": 3 }
//! ```
//!
//! - [`evaluate`] / [`evaluate_json`]: one document, built-in functions.
//! - [`Engine`]: custom registry, formula keys, batch evaluation.
//!
//! # Tracing
//!
//! Call [`init_tracing`] and set `RUST_LOG`, e.g. `RUST_LOG=docfx_eval=trace`.

mod engine;
mod error;
pub mod json;

use std::sync::Once;

pub use docfx_diagnostic::{ErrorCode, ErrorKind, EvaluationError, EvaluationFailure};
pub use docfx_eval::{
    Arity, CallContext, EvaluationResult, Evaluator, EvaluatorBuilder, Function, FunctionError,
    FunctionRegistry,
};
pub use docfx_ir::{DocPath, PathSegment, Value};
pub use engine::{Engine, EngineBuilder};
pub use error::Error;
pub use json::FormulaKeys;

/// Resolve every formula in `document` with the built-in functions.
pub fn evaluate(document: Value) -> EvaluationResult {
    Evaluator::new().evaluate(document)
}

/// Resolve a JSON document using the default formula keys.
pub fn evaluate_json(document: serde_json::Value) -> Result<serde_json::Value, Error> {
    Engine::new().evaluate_json(document)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
