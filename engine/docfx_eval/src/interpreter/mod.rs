//! Expression interpreter.
//!
//! Walks a parsed [`Ast`] against a [`Scope`]. Path expressions are turned
//! into a [`Place`] first and only loaded at the end, so `super.a.b[0]`
//! touches the working tree by path instead of copying whole subtrees.
//!
//! Paths made only of `this`/`super` and literal keys or indices go straight
//! through [`resolve_path`] on the ancestor scope. `$` anchors a path at the
//! document root.

use std::rc::Rc;

use docfx_ir::{Ast, BinaryOp, DocPath, ExprId, ExprKind, PathSegment, Value};
use docfx_stack::ensure_sufficient_stack;

use crate::errors::{function_failed, invalid_index_type, undefined_function, EvalResult};
use crate::functions::FunctionError;
use crate::operators::{evaluate_binary, require_bool};
use crate::scope::{identifier_place, resolve_identifier, resolve_path, Place, Scope};
use crate::unary_operators::evaluate_unary;

pub(crate) struct Interpreter<'a> {
    ast: &'a Ast,
    scope: &'a Rc<Scope>,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(ast: &'a Ast, scope: &'a Rc<Scope>) -> Self {
        Interpreter { ast, scope }
    }

    /// Evaluate the whole formula.
    pub(crate) fn eval_root(&self) -> EvalResult<Value> {
        self.eval(self.ast.root())
    }

    fn eval(&self, id: ExprId) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&self, id: ExprId) -> EvalResult<Value> {
        match &self.ast.get(id).kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Ident(name) => resolve_identifier(self.scope, name),
            ExprKind::ScopeRef { .. }
            | ExprKind::Root
            | ExprKind::Field { .. }
            | ExprKind::Index { .. } => {
                if let Some((depth, segments)) = self.static_path(id) {
                    let target = self.scope.ancestor(depth)?;
                    return resolve_path(&target, &segments);
                }
                let place = self.eval_place(id)?;
                self.scope.workspace().load(place)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval(*operand)?;
                evaluate_unary(&value, *op)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Call { name, args } => self.eval_call(name, args),
        }
    }

    fn eval_binary(&self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        if !op.is_short_circuit() {
            let rhs = self.eval(right)?;
            return evaluate_binary(&lhs, &rhs, op);
        }

        // `false and _` and `true or _` are decided by the left operand.
        let decided = require_bool(&lhs, op)?;
        if decided == (op == BinaryOp::Or) {
            return Ok(Value::Bool(decided));
        }
        let rhs = self.eval(right)?;
        Ok(Value::Bool(require_bool(&rhs, op)?))
    }

    /// Arguments are evaluated left to right before the name is looked up.
    ///
    /// A result holding a formula is rejected so none reaches the output.
    fn eval_call(&self, name: &str, args: &[ExprId]) -> EvalResult<Value> {
        let values = args
            .iter()
            .map(|arg| self.eval(*arg))
            .collect::<EvalResult<Vec<_>>>()?;

        let workspace = self.scope.workspace();
        let function = workspace
            .registry()
            .lookup(name)
            .ok_or_else(|| undefined_function(name))?;
        let result = function
            .call(&values, workspace.call_context())
            .map_err(|err| function_failed(name, &err))?;
        if result.contains_formula() {
            return Err(function_failed(name, &FunctionError::FormulaInResult));
        }
        Ok(result)
    }

    /// Where a path expression points, without loading it.
    fn eval_place(&self, id: ExprId) -> EvalResult<Place> {
        let workspace = self.scope.workspace();
        match &self.ast.get(id).kind {
            ExprKind::Ident(name) => identifier_place(self.scope, name),
            ExprKind::ScopeRef { depth } => {
                let target = self.scope.ancestor(*depth)?;
                Ok(Place::Node(target.path().clone()))
            }
            ExprKind::Root => Ok(Place::Node(DocPath::root())),
            ExprKind::Field { receiver, field } => {
                let base = self.eval_place(*receiver)?;
                workspace.field(base, field)
            }
            ExprKind::Index { receiver, index } => {
                let base = self.eval_place(*receiver)?;
                let key = self.eval(*index)?;
                if let Some(i) = key.as_integer() {
                    return workspace.element(base, i);
                }
                match key {
                    Value::String(key) => workspace.field(base, &key),
                    Value::Number(_) => Err(invalid_index_type("non-integral number")),
                    other => Err(invalid_index_type(other.type_name())),
                }
            }
            _ => self.eval(id).map(Place::Temp),
        }
    }

    /// `this`/`super` followed by literal keys and non-negative indices.
    fn static_path(&self, id: ExprId) -> Option<(u32, Vec<PathSegment>)> {
        match &self.ast.get(id).kind {
            ExprKind::ScopeRef { depth } => Some((*depth, Vec::new())),
            ExprKind::Field { receiver, field } => {
                let (depth, mut segments) = self.static_path(*receiver)?;
                segments.push(PathSegment::Key(field.clone()));
                Some((depth, segments))
            }
            ExprKind::Index { receiver, index } => {
                let segment = match &self.ast.get(*index).kind {
                    ExprKind::Literal(Value::String(key)) => PathSegment::Key(key.clone()),
                    ExprKind::Literal(number @ Value::Number(_)) => {
                        let i = number.as_integer()?;
                        PathSegment::Index(usize::try_from(i).ok()?)
                    }
                    _ => return None,
                };
                let (depth, mut segments) = self.static_path(*receiver)?;
                segments.push(segment);
                Some((depth, segments))
            }
            _ => None,
        }
    }
}
