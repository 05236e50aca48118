//! Type checking for the Rill compiler.
//!
//! The checked subset is exactly what the code generator can lower:
//! literals, numeric arithmetic, comparisons, and boolean logic. Every
//! node reachable from the root receives a [`rill_ir::TypeId`] recorded
//! in a side table parallel to the expression arena.

mod check;
mod error;

pub use check::{check, TypeckOutcome};
pub use error::TypeError;
