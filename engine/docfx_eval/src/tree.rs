//! Working tree: a document whose formulas carry explicit resolution state.

use docfx_diagnostic::ErrorKind;
use docfx_ir::{DocPath, PathSegment, Value};
use indexmap::IndexMap;

/// Resolution progress of one formula.
#[derive(Clone, Debug, PartialEq)]
pub enum FormulaState {
    Unresolved,
    /// Currently being evaluated; reaching it again means a cycle.
    InProgress,
    Resolved(Value),
    /// Sentinel left after a failure; its error has already been recorded.
    Failed(ErrorKind),
}

/// A formula node inside the working tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FormulaCell {
    pub source: String,
    pub state: FormulaState,
}

/// Working-tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar(Value),
    Array(Vec<Node>),
    Object(IndexMap<String, Node>),
    Formula(FormulaCell),
}

impl Node {
    /// Convert a document; every `Value::Formula` becomes an unresolved cell.
    pub fn from_value(value: Value) -> Node {
        match value {
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from_value).collect()),
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from_value(value)))
                    .collect(),
            ),
            Value::Formula(source) => Node::Formula(FormulaCell {
                source,
                state: FormulaState::Unresolved,
            }),
            scalar => Node::Scalar(scalar),
        }
    }

    /// Materialize as a plain value.
    ///
    /// Resolved formulas contribute their value; any other formula state
    /// yields `None` (the caller resolves first).
    pub fn to_value(&self) -> Option<Value> {
        Some(match self {
            Node::Scalar(value) => value.clone(),
            Node::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Node::to_value)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, node)| Some((key.clone(), node.to_value()?)))
                    .collect::<Option<_>>()?,
            ),
            Node::Formula(FormulaCell {
                state: FormulaState::Resolved(value),
                ..
            }) => value.clone(),
            Node::Formula(_) => return None,
        })
    }

    /// Consume into a plain value; unresolved or failed formulas become null.
    pub fn into_value(self) -> Value {
        match self {
            Node::Scalar(value) => value,
            Node::Array(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
            Node::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Node::Formula(FormulaCell {
                state: FormulaState::Resolved(value),
                ..
            }) => value,
            Node::Formula(_) => Value::Null,
        }
    }

    pub fn get(&self, path: &DocPath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn get_mut(&mut self, path: &DocPath) -> Option<&mut Node> {
        let mut node = self;
        for segment in path.segments() {
            node = match (node, segment) {
                (Node::Object(map), PathSegment::Key(key)) => map.get_mut(key)?,
                (Node::Array(items), PathSegment::Index(index)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(node)
    }

    pub fn child(&self, segment: &PathSegment) -> Option<&Node> {
        match (self, segment) {
            (Node::Object(map), PathSegment::Key(key)) => map.get(key),
            (Node::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    /// Type name as reported in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Scalar(value) => value.type_name(),
            Node::Array(_) => "array",
            Node::Object(_) => "object",
            Node::Formula(_) => "formula",
        }
    }

    /// Paths of every formula in this subtree not yet resolved, in document
    /// order. `at` is the path of `self`.
    pub fn pending_formulas(&self, at: &DocPath) -> Vec<DocPath> {
        let mut out = Vec::new();
        self.collect_pending(at.clone(), &mut out);
        out
    }

    fn collect_pending(&self, at: DocPath, out: &mut Vec<DocPath>) {
        match self {
            Node::Scalar(_) => {}
            Node::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_pending(at.index(index), out);
                }
            }
            Node::Object(map) => {
                for (key, node) in map {
                    node.collect_pending(at.key(key), out);
                }
            }
            Node::Formula(cell) => {
                if !matches!(cell.state, FormulaState::Resolved(_)) {
                    out.push(at);
                }
            }
        }
    }
}
