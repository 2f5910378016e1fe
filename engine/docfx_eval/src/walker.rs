//! Depth-first document traversal.
//!
//! Each object or array entered gets a container scope whose parent is the
//! scope of the enclosing container. Formulas are resolved in document order;
//! a failure is recorded by the workspace and the walk carries on with the
//! next sibling.

use std::rc::Rc;

use docfx_ir::DocPath;
use docfx_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::scope::{Scope, ScopeKind};
use crate::workspace::{ChildKind, Workspace};

pub(crate) struct Walker<'a> {
    workspace: &'a Rc<Workspace>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(workspace: &'a Rc<Workspace>) -> Self {
        Walker { workspace }
    }

    /// Resolve every formula in the document.
    pub(crate) fn run(&self) {
        let root = DocPath::root();
        if self.workspace.is_formula(&root) {
            // Already recorded on failure.
            let _ = self.workspace.resolve_formula(&root, None);
            return;
        }
        let scope = Scope::root(self.workspace);
        self.walk(&scope);
    }

    fn walk(&self, scope: &Rc<Scope>) {
        trace!(path = %scope.path(), "entering container");
        for (path, kind) in self.workspace.children(scope.path()) {
            match kind {
                ChildKind::Container => {
                    let child = Scope::child(scope, path, ScopeKind::Container);
                    ensure_sufficient_stack(|| self.walk(&child));
                }
                ChildKind::Formula => {
                    let _ = self.workspace.resolve_formula(&path, Some(scope));
                }
                ChildKind::Scalar => {}
            }
        }
    }
}
