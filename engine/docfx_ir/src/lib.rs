//! docfx IR - shared data structures
//!
//! This crate contains the types every other docfx crate speaks:
//! - [`Value`]: the document model (objects, arrays, scalars, formulas)
//! - [`DocPath`]: the location of a node inside a document
//! - [`Span`]: byte ranges inside formula source text
//! - The expression AST ([`Ast`], [`Expr`], [`ExprKind`]) stored in an arena
//!
//! # Design Philosophy
//!
//! - **Flatten the AST**: no `Box<Expr>`, children are `ExprId(u32)` indices
//!   into an [`ExprArena`].
//! - **Explicit variants**: every node kind and value kind is a tagged enum so
//!   the interpreter matches exhaustively instead of coercing.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod path;
mod span;
mod value;

pub use ast::{Ast, BinaryOp, Expr, ExprArena, ExprId, ExprKind, UnaryOp};
pub use path::{DocPath, PathSegment};
pub use span::Span;
pub use value::{Map, Value};
