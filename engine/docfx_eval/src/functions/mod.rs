//! Function registry and built-in functions.
//!
//! Functions are looked up by name in a [`FunctionRegistry`] passed explicitly
//! to evaluation. Each [`Function`] declares its [`Arity`], which is checked
//! before the implementation runs, so implementations may index their
//! arguments within the declared bounds.

mod id;
mod math;
mod string;
mod time;

use std::fmt;
use std::sync::Arc;

use docfx_ir::Value;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// A function implementation.
///
/// Receives the already-evaluated arguments and the per-evaluation context.
pub type FunctionImpl = Arc<dyn Fn(&[Value], &CallContext) -> Result<Value, FunctionError> + Send + Sync>;

/// Accepted argument counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    /// Inclusive bounds.
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Range(min, max) => write!(f, "{min} to {max}"),
        }
    }
}

/// Why a function rejected its arguments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: Arity, got: usize },

    #[error("argument {position} must be {expected}, got {got}")]
    InvalidArgument {
        /// 1-based.
        position: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("result is not a finite number")]
    NonFinite,

    /// Results must be plain data; a formula would leak into the output.
    #[error("result contains a formula")]
    FormulaInResult,

    #[error("{0}")]
    Failed(String),
}

/// A named function with its arity and implementation.
#[derive(Clone)]
pub struct Function {
    name: String,
    arity: Arity,
    implementation: FunctionImpl,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        implementation: impl Fn(&[Value], &CallContext) -> Result<Value, FunctionError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Function {
            name: name.into(),
            arity,
            implementation: Arc::new(implementation),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Check the argument count, then run the implementation.
    pub fn call(&self, args: &[Value], ctx: &CallContext) -> Result<Value, FunctionError> {
        if !self.arity.accepts(args.len()) {
            return Err(FunctionError::Arity {
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.implementation)(args, ctx)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name → function table.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Function>,
}

impl FunctionRegistry {
    /// Registry with no functions at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every built-in function.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        id::register(&mut registry);
        math::register(&mut registry);
        string::register(&mut registry);
        time::register(&mut registry);
        registry
    }

    /// Add a function, replacing any existing one with the same name.
    pub fn register(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn lookup(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// State shared by every function call within one evaluation pass.
#[derive(Debug, Default)]
pub struct CallContext {
    /// Unix timestamp returned by `NOW()`, fixed on first use.
    now: Mutex<Option<f64>>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose `NOW()` always returns `timestamp`.
    pub fn with_fixed_now(timestamp: f64) -> Self {
        CallContext {
            now: Mutex::new(Some(timestamp)),
        }
    }

    /// Current time in Unix seconds; the same value for the whole pass.
    pub fn now(&self) -> f64 {
        *self.now.lock().get_or_insert_with(time::unix_now)
    }
}

// Argument helpers shared by the built-in modules.

fn number_arg(args: &[Value], index: usize) -> Result<f64, FunctionError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(invalid_argument(index, "a number", other)),
    }
}

fn string_arg(args: &[Value], index: usize) -> Result<&str, FunctionError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        other => Err(invalid_argument(index, "a string", other)),
    }
}

fn invalid_argument(index: usize, expected: &'static str, got: Option<&Value>) -> FunctionError {
    FunctionError::InvalidArgument {
        position: index + 1,
        expected,
        got: got.map_or("nothing", Value::type_name),
    }
}

fn finite(n: f64) -> Result<Value, FunctionError> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(FunctionError::NonFinite)
    }
}
