//! Bytecode lowering for the Rill compiler.
//!
//! Turns a checked expression tree into a [`rill_vm::CodeBlock`] by
//! post-order emission; see [`emit`].

mod emit;
mod error;

pub use emit::emit;
pub use error::CodegenError;
