//! Stack bytecode model and interpreter for the Rill compiler.
//!
//! [`CodeBlock`] is the compiled byte buffer with its string-constant
//! pool; [`Machine`] executes it over a 64-bit-slot operand stack; the
//! [`disassemble`] listing walks the same bytes for humans.

mod code_block;
mod disasm;
mod error;
mod machine;
mod opcode;

pub use code_block::CodeBlock;
pub use disasm::disassemble;
pub use error::RuntimeError;
pub use machine::{Halt, Machine};
pub use opcode::Op;
