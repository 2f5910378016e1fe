//! Expression AST.
//!
//! Expressions are stored flat in an [`ExprArena`] and reference their
//! children by [`ExprId`]. A parsed formula is an [`Ast`]: the arena plus the
//! id of the root expression. Nothing mutates an `Ast` after parsing.

mod operators;

use std::fmt::{self, Write as _};

use crate::{Span, Value};

pub use operators::{BinaryOp, UnaryOp};

/// Index of an expression inside an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Number, string, boolean or null literal.
    Literal(Value),

    /// Bare name, looked up in the nearest enclosing container.
    Ident(String),

    /// `this` (depth 0) or a chain of `super` (depth = number of `super`).
    ScopeRef { depth: u32 },

    /// `$`, the document root (or the data of a standalone expression).
    Root,

    /// `receiver.field`
    Field { receiver: ExprId, field: String },

    /// `receiver[index]`, where the index is any expression.
    Index { receiver: ExprId, index: ExprId },

    /// `op operand`
    Unary { op: UnaryOp, operand: ExprId },

    /// `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `NAME(args)`; filters (`x | NAME(args)`) desugar to this with `x` first.
    Call { name: String, args: Vec<ExprId> },
}

/// Flat storage for expressions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an expression and return its id.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    /// Look up an expression.
    ///
    /// Ids are only produced by [`ExprArena::alloc`] on the same arena, so the
    /// index is always in bounds.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// A parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub struct Ast {
    arena: ExprArena,
    root: ExprId,
}

impl Ast {
    pub fn new(arena: ExprArena, root: ExprId) -> Self {
        Ast { arena, root }
    }

    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        self.arena.get(id)
    }

    /// Fully parenthesized prefix rendering, e.g. `(+ 1 (* 2 3))`.
    ///
    /// Stable across releases; parser tests compare against it.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_sexpr(&mut out, self.root);
        out
    }

    fn write_sexpr(&self, out: &mut String, id: ExprId) -> fmt::Result {
        match &self.get(id).kind {
            ExprKind::Literal(Value::String(s)) => write!(out, "{s:?}"),
            ExprKind::Literal(value) => write!(out, "{value}"),
            ExprKind::Ident(name) => out.write_str(name),
            ExprKind::Root => out.write_char('$'),
            ExprKind::ScopeRef { depth: 0 } => out.write_str("this"),
            ExprKind::ScopeRef { depth } => {
                for i in 0..*depth {
                    if i > 0 {
                        out.write_char('.')?;
                    }
                    out.write_str("super")?;
                }
                Ok(())
            }
            ExprKind::Field { receiver, field } => {
                out.write_str("(. ")?;
                self.write_sexpr(out, *receiver)?;
                write!(out, " {field})")
            }
            ExprKind::Index { receiver, index } => {
                out.write_str("([] ")?;
                self.write_sexpr(out, *receiver)?;
                out.write_char(' ')?;
                self.write_sexpr(out, *index)?;
                out.write_char(')')
            }
            ExprKind::Unary { op, operand } => {
                write!(out, "({op} ")?;
                self.write_sexpr(out, *operand)?;
                out.write_char(')')
            }
            ExprKind::Binary { op, left, right } => {
                write!(out, "({op} ")?;
                self.write_sexpr(out, *left)?;
                out.write_char(' ')?;
                self.write_sexpr(out, *right)?;
                out.write_char(')')
            }
            ExprKind::Call { name, args } => {
                write!(out, "({name}")?;
                for arg in args {
                    out.write_char(' ')?;
                    self.write_sexpr(out, *arg)?;
                }
                out.write_char(')')
            }
        }
    }
}

#[cfg(test)]
mod tests;
