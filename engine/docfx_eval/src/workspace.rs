//! Per-document evaluation state.
//!
//! A [`Workspace`] owns the working tree, the function registry handle, the
//! per-pass [`CallContext`] and the error collection. All formula resolution
//! funnels through [`Workspace::resolve_formula`], which drives the
//! `Unresolved → InProgress → Resolved | Failed` state machine and records
//! each failure exactly once, at the failing formula's own path.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use docfx_diagnostic::{ErrorBag, ErrorKind, EvaluationError};
use docfx_ir::{DocPath, Value};
use docfx_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::errors::{
    cannot_access, cyclic_reference, dependency_failed, index_out_of_bounds, key_not_found,
    temp_index_out_of_bounds, temp_key_not_found, EvalError, EvalResult,
};
use crate::functions::{CallContext, FunctionRegistry};
use crate::interpreter::Interpreter;
use crate::scope::{Place, Scope, ScopeChain, ScopeKind};
use crate::tree::{FormulaState, Node};

pub(crate) struct Workspace {
    tree: RefCell<Node>,
    registry: Arc<FunctionRegistry>,
    ctx: CallContext,
    errors: RefCell<ErrorBag>,
}

/// What sits at a path, captured without holding the tree borrow.
enum Probe {
    Object { has_key: bool },
    Array { len: usize },
    Formula,
    Other(&'static str),
    Missing,
}

impl Workspace {
    pub(crate) fn new(document: Value, registry: Arc<FunctionRegistry>, ctx: CallContext) -> Rc<Self> {
        Rc::new(Workspace {
            tree: RefCell::new(Node::from_value(document)),
            registry,
            ctx,
            errors: RefCell::new(ErrorBag::new()),
        })
    }

    #[inline]
    pub(crate) fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    #[inline]
    pub(crate) fn call_context(&self) -> &CallContext {
        &self.ctx
    }

    /// Record a failure; errors keep discovery order.
    pub(crate) fn record(&self, path: &DocPath, err: EvalError) {
        debug!(%path, kind = %err.kind, message = %err.message, "formula failed");
        let error = EvaluationError::new(path.clone(), err.kind, err.message).with_code(err.code);
        self.errors.borrow_mut().push(error);
    }

    /// Take the working tree and collected errors, leaving empty ones behind.
    pub(crate) fn take(&self) -> (Node, ErrorBag) {
        let tree = self.tree.replace(Node::Scalar(Value::Null));
        let errors = self.errors.take();
        (tree, errors)
    }

    pub(crate) fn is_formula(&self, path: &DocPath) -> bool {
        matches!(self.tree.borrow().get(path), Some(Node::Formula(_)))
    }

    /// Child segments of the container at `path`, tagged with what they hold.
    pub(crate) fn children(&self, path: &DocPath) -> Vec<(DocPath, ChildKind)> {
        let tree = self.tree.borrow();
        let classify = |node: &Node| match node {
            Node::Object(_) | Node::Array(_) => ChildKind::Container,
            Node::Formula(_) => ChildKind::Formula,
            Node::Scalar(_) => ChildKind::Scalar,
        };
        match tree.get(path) {
            Some(Node::Object(map)) => map
                .iter()
                .map(|(key, node)| (path.key(key), classify(node)))
                .collect(),
            Some(Node::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, node)| (path.index(index), classify(node)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve the formula at `path`, evaluating it if it has not been yet.
    ///
    /// `container` is the scope of the formula's parent when the caller
    /// already has it (the walker); on-demand resolution passes `None` and a
    /// scope chain is built from the root.
    ///
    /// The formula's own failure is recorded here. Callers receive a
    /// [`dependency_failed`] error naming `path`.
    pub(crate) fn resolve_formula(
        self: &Rc<Self>,
        path: &DocPath,
        container: Option<&Rc<Scope>>,
    ) -> EvalResult<Value> {
        let source = {
            let mut tree = self.tree.borrow_mut();
            let Some(Node::Formula(cell)) = tree.get_mut(path) else {
                return Err(key_not_found("formula", path));
            };
            match &cell.state {
                FormulaState::Resolved(value) => return Ok(value.clone()),
                FormulaState::InProgress => {
                    debug!(%path, "cycle detected");
                    return Err(cyclic_reference(path));
                }
                FormulaState::Failed(kind) => return Err(dependency_failed(path, *kind)),
                FormulaState::Unresolved => {}
            }
            cell.state = FormulaState::InProgress;
            cell.source.clone()
        };

        trace!(%path, %source, "resolving formula");
        let result = ensure_sufficient_stack(|| self.evaluate_formula(path, &source, container));

        let state = match &result {
            Ok(value) => FormulaState::Resolved(value.clone()),
            Err(err) => FormulaState::Failed(err.kind),
        };
        if let Some(Node::Formula(cell)) = self.tree.borrow_mut().get_mut(path) {
            cell.state = state;
        }

        match result {
            Ok(value) => {
                trace!(%path, %value, "formula resolved");
                Ok(value)
            }
            Err(err) => {
                let kind = err.kind;
                self.record(path, err);
                Err(dependency_failed(path, kind))
            }
        }
    }

    fn evaluate_formula(
        self: &Rc<Self>,
        path: &DocPath,
        source: &str,
        container: Option<&Rc<Scope>>,
    ) -> EvalResult<Value> {
        let ast = docfx_parse::parse(source)?;

        // Keeps the ancestors of an on-demand scope alive while it runs.
        let chain;
        let parent = match (container, path.parent()) {
            (Some(scope), _) => Some(scope),
            (None, Some(parent_path)) => {
                chain = ScopeChain::to_container(self, &parent_path);
                Some(chain.innermost())
            }
            (None, None) => None,
        };

        let scope = match parent {
            Some(parent) => Scope::child(parent, path.clone(), ScopeKind::Formula),
            None => Scope::detached_formula(self),
        };

        Interpreter::new(&ast, &scope).eval_root()
    }

    /// Fully resolved value at `place`.
    ///
    /// Every formula inside a node place is resolved first; the first
    /// failure is returned.
    pub(crate) fn load(self: &Rc<Self>, place: Place) -> EvalResult<Value> {
        let path = match place {
            Place::Temp(value) => return Ok(value),
            Place::Node(path) => path,
        };

        let pending = match self.tree.borrow().get(&path) {
            Some(node) => node.pending_formulas(&path),
            None => return Err(key_not_found(&path.to_string(), &DocPath::root())),
        };
        for formula in pending {
            self.resolve_formula(&formula, None)?;
        }

        self.tree
            .borrow()
            .get(&path)
            .and_then(Node::to_value)
            .ok_or_else(|| {
                EvalError::new(
                    ErrorKind::Reference,
                    format!("`{path}` could not be resolved"),
                )
            })
    }

    /// `place.key`
    pub(crate) fn field(self: &Rc<Self>, place: Place, key: &str) -> EvalResult<Place> {
        let path = match place {
            Place::Temp(value) => return temp_field(value, key),
            Place::Node(path) => path,
        };

        match self.probe(&path, Some(key)) {
            Probe::Object { has_key: true } => Ok(Place::Node(path.key(key))),
            Probe::Object { has_key: false } | Probe::Missing => Err(key_not_found(key, &path)),
            Probe::Formula => {
                let value = self.resolve_formula(&path, None)?;
                temp_field(value, key)
            }
            Probe::Array { .. } => Err(cannot_access(
                &format!("property `{key}`"),
                "array",
                Some(&path),
            )),
            Probe::Other(type_name) => Err(cannot_access(
                &format!("property `{key}`"),
                type_name,
                Some(&path),
            )),
        }
    }

    /// `place[index]`; negative indices count from the end.
    pub(crate) fn element(self: &Rc<Self>, place: Place, index: i64) -> EvalResult<Place> {
        let path = match place {
            Place::Temp(value) => return temp_element(value, index),
            Place::Node(path) => path,
        };

        match self.probe(&path, None) {
            Probe::Array { len } => normalize_index(index, len)
                .map(|i| Place::Node(path.index(i)))
                .ok_or_else(|| index_out_of_bounds(index, len, &path)),
            Probe::Formula => {
                let value = self.resolve_formula(&path, None)?;
                temp_element(value, index)
            }
            Probe::Object { .. } => Err(cannot_access(
                &format!("index {index}"),
                "object",
                Some(&path),
            )),
            Probe::Other(type_name) => Err(cannot_access(
                &format!("index {index}"),
                type_name,
                Some(&path),
            )),
            Probe::Missing => Err(key_not_found(&path.to_string(), &DocPath::root())),
        }
    }

    fn probe(&self, path: &DocPath, key: Option<&str>) -> Probe {
        match self.tree.borrow().get(path) {
            Some(Node::Object(map)) => Probe::Object {
                has_key: key.is_some_and(|k| map.contains_key(k)),
            },
            Some(Node::Array(items)) => Probe::Array { len: items.len() },
            Some(Node::Formula(_)) => Probe::Formula,
            Some(node) => Probe::Other(node.type_name()),
            None => Probe::Missing,
        }
    }
}

/// What the walker finds below a container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ChildKind {
    Container,
    Formula,
    Scalar,
}

fn temp_field(value: Value, key: &str) -> EvalResult<Place> {
    match value {
        Value::Object(mut map) => map
            .swap_remove(key)
            .map(Place::Temp)
            .ok_or_else(|| temp_key_not_found(key)),
        other => Err(cannot_access(
            &format!("property `{key}`"),
            other.type_name(),
            None,
        )),
    }
}

fn temp_element(value: Value, index: i64) -> EvalResult<Place> {
    match value {
        Value::Array(mut items) => {
            let len = items.len();
            normalize_index(index, len)
                .map(|i| Place::Temp(items.swap_remove(i)))
                .ok_or_else(|| temp_index_out_of_bounds(index, len))
        }
        other => Err(cannot_access(
            &format!("index {index}"),
            other.type_name(),
            None,
        )),
    }
}

/// Map a possibly negative index onto `0..len`.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index + len } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
