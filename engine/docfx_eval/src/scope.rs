//! Scope chain for relative references.
//!
//! Every object or array the walker enters gets a container scope; every
//! formula being resolved gets a formula scope whose parent is its container.
//! Parents are held through `Weak` links: the walker (or a [`ScopeChain`]
//! built for on-demand resolution) owns the strong references, so a scope
//! never outlives the traversal that created it.
//!
//! - `this` is the scope's own node: the formula itself, or the container.
//! - Each `super` climbs one parent.
//! - A bare name is a property of the nearest container.
//! - `$` is the document root, whatever the depth.

use std::rc::{Rc, Weak};

use docfx_ir::{DocPath, PathSegment, Value};

use crate::errors::{super_above_root, EvalError, EvalResult};
use crate::workspace::Workspace;
use docfx_diagnostic::ErrorKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// An object or array.
    Container,
    /// A formula node being resolved.
    Formula,
}

pub(crate) struct Scope {
    path: DocPath,
    kind: ScopeKind,
    parent: Option<Weak<Scope>>,
    workspace: Rc<Workspace>,
}

impl Scope {
    /// Container scope for the document root.
    pub(crate) fn root(workspace: &Rc<Workspace>) -> Rc<Scope> {
        Rc::new(Scope {
            path: DocPath::root(),
            kind: ScopeKind::Container,
            parent: None,
            workspace: Rc::clone(workspace),
        })
    }

    pub(crate) fn child(parent: &Rc<Scope>, path: DocPath, kind: ScopeKind) -> Rc<Scope> {
        Rc::new(Scope {
            path,
            kind,
            parent: Some(Rc::downgrade(parent)),
            workspace: Rc::clone(&parent.workspace),
        })
    }

    /// Formula scope for the document root itself (a document that is a
    /// single formula): no parent, no container.
    pub(crate) fn detached_formula(workspace: &Rc<Workspace>) -> Rc<Scope> {
        Rc::new(Scope {
            path: DocPath::root(),
            kind: ScopeKind::Formula,
            parent: None,
            workspace: Rc::clone(workspace),
        })
    }

    #[inline]
    pub(crate) fn path(&self) -> &DocPath {
        &self.path
    }

    #[inline]
    pub(crate) fn workspace(&self) -> &Rc<Workspace> {
        &self.workspace
    }

    pub(crate) fn parent(&self) -> Option<Rc<Scope>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Scope reached by `depth` applications of `super` (0 = `this`).
    pub(crate) fn ancestor(self: &Rc<Self>, depth: u32) -> EvalResult<Rc<Scope>> {
        let mut current = Rc::clone(self);
        for _ in 0..depth {
            current = current.parent().ok_or_else(|| super_above_root(depth))?;
        }
        Ok(current)
    }

    /// Path of the nearest enclosing container: the scope itself for a
    /// container, the parent for a formula.
    pub(crate) fn container_path(&self) -> Option<DocPath> {
        match self.kind {
            ScopeKind::Container => Some(self.path.clone()),
            ScopeKind::Formula => self.parent().map(|parent| parent.path.clone()),
        }
    }
}

/// Strong owner of a root-to-leaf run of container scopes.
///
/// Used when a formula is resolved on demand, outside the walker's own
/// descent, so that its scope has live ancestors to climb.
pub(crate) struct ScopeChain {
    scopes: Vec<Rc<Scope>>,
}

impl ScopeChain {
    /// Container scopes for the root and every prefix of `container`.
    pub(crate) fn to_container(workspace: &Rc<Workspace>, container: &DocPath) -> ScopeChain {
        let mut scopes = vec![Scope::root(workspace)];
        let mut path = DocPath::root();
        for segment in container.segments() {
            path.push(segment.clone());
            let child = Scope::child(&scopes[scopes.len() - 1], path.clone(), ScopeKind::Container);
            scopes.push(child);
        }
        ScopeChain { scopes }
    }

    /// The deepest scope (the container itself).
    pub(crate) fn innermost(&self) -> &Rc<Scope> {
        // Never empty: always holds at least the root.
        &self.scopes[self.scopes.len() - 1]
    }
}

/// Where a path expression points.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Place {
    /// A node of the working tree.
    Node(DocPath),
    /// A computed value (e.g. the result of a call) being navigated into.
    Temp(Value),
}

/// Value of a bare name, looked up in the nearest container.
pub(crate) fn resolve_identifier(scope: &Scope, name: &str) -> EvalResult<Value> {
    let place = identifier_place(scope, name)?;
    scope.workspace().load(place)
}

/// Value at `segments` below the scope's own node.
pub(crate) fn resolve_path(scope: &Scope, segments: &[PathSegment]) -> EvalResult<Value> {
    let workspace = scope.workspace();
    let mut place = Place::Node(scope.path().clone());
    for segment in segments {
        place = match segment {
            PathSegment::Key(key) => workspace.field(place, key)?,
            PathSegment::Index(index) => workspace.element(place, *index as i64)?,
        };
    }
    workspace.load(place)
}

pub(crate) fn identifier_place(scope: &Scope, name: &str) -> EvalResult<Place> {
    let container = scope.container_path().ok_or_else(|| {
        EvalError::new(
            ErrorKind::Reference,
            format!("`{name}` has no enclosing object to be looked up in"),
        )
    })?;
    scope.workspace().field(Place::Node(container), name)
}

#[cfg(test)]
mod tests;
