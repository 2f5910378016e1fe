//! Formula resolution for docfx documents.
//!
//! Evaluating a document runs these pieces in order:
//!
//! - `tree`: the document becomes a working tree whose formulas carry an
//!   explicit [`FormulaState`].
//! - `walker`: depth-first traversal, building container scopes.
//! - `scope`: `this`/`super`/bare-name lookup through weak parent links.
//! - `interpreter`: expression evaluation, with [`operators`] and
//!   [`unary_operators`] doing the arithmetic.
//! - [`functions`]: the registry of callable functions and the built-ins.
//! - `aggregate`: any recorded error fails the whole evaluation.
//!
//! Only [`Evaluator`] drives this; the rest is exposed for embedders that
//! register their own functions or want the operator semantics.

mod aggregate;
pub mod errors;
mod evaluator;
pub mod functions;
mod interpreter;
pub mod operators;
mod scope;
pub mod tree;
pub mod unary_operators;
mod walker;
mod workspace;

pub use aggregate::{aggregate, EvaluationResult};
pub use errors::{EvalError, EvalResult};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use functions::{Arity, CallContext, Function, FunctionError, FunctionImpl, FunctionRegistry};
pub use operators::evaluate_binary;
pub use tree::{FormulaCell, FormulaState, Node};
pub use unary_operators::evaluate_unary;
