//! Core data model for the Rill compiler.
//!
//! Every phase of the pipeline speaks the types defined here:
//!
//! - [`Span`]: compact byte-offset range into the source
//! - [`Token`] / [`TokenKind`]: 8-byte tokens carrying offsets, not text
//! - [`ExprArena`] / [`Expr`] / [`ExprKind`]: flat arena-allocated AST
//! - [`StringPool`] / [`Name`]: deduplicated string interning
//! - [`TypePool`] / [`TypeId`]: the built-in type table
//! - [`SexprPrinter`]: the S-expression form used by tests and tooling

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated
/// types. If the size changes, compilation fails.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod ast;
mod interner;
mod sexpr;
mod span;
mod token;
mod type_pool;

pub use ast::{
    BinaryOp, DocPlacement, Expr, ExprArena, ExprId, ExprKind, ExprRange, NaryOp, ParenDelim,
    StrStyle, UnaryOp,
};
pub use interner::{Name, StringPool};
pub use sexpr::SexprPrinter;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use type_pool::{TypeId, TypePool};
