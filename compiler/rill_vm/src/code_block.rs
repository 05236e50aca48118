//! Compiled code block: byte buffer plus string-constant pool.

use rill_ir::StringPool;

use crate::Op;

/// A growable opcode buffer with in-line little-endian immediates and
/// the pool of string constants its `STRING_LOAD`s refer to.
///
/// The append methods are fluent so codegen can chain emissions:
///
/// ```
/// use rill_vm::CodeBlock;
///
/// let mut block = CodeBlock::new();
/// block.int64_load_int16(2).int64_load_int16(3).int64_add().ret();
/// assert_eq!(block.bytes().len(), 8);
/// ```
#[derive(Default)]
pub struct CodeBlock {
    code: Vec<u8>,
    strings: StringPool,
}

impl CodeBlock {
    pub fn new() -> Self {
        CodeBlock::default()
    }

    /// Raw opcode stream.
    pub fn bytes(&self) -> &[u8] {
        &self.code
    }

    /// The string constants referenced by `STRING_LOAD` immediates.
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    fn op(&mut self, op: Op) -> &mut Self {
        self.code.push(op as u8);
        self
    }

    // ─── Boolean ─────────────────────────────────────────────────────────

    pub fn bool_load_true(&mut self) -> &mut Self {
        self.op(Op::BoolLoadTrue)
    }

    pub fn bool_load_false(&mut self) -> &mut Self {
        self.op(Op::BoolLoadFalse)
    }

    pub fn bool_and(&mut self) -> &mut Self {
        self.op(Op::BoolAnd)
    }

    pub fn bool_or(&mut self) -> &mut Self {
        self.op(Op::BoolOr)
    }

    pub fn bool_not(&mut self) -> &mut Self {
        self.op(Op::BoolNot)
    }

    // ─── Int64 ───────────────────────────────────────────────────────────

    pub fn int64_load_zero(&mut self) -> &mut Self {
        self.op(Op::Int64LoadZero)
    }

    pub fn int64_load_one(&mut self) -> &mut Self {
        self.op(Op::Int64LoadOne)
    }

    /// Load a small integer constant from a 16-bit immediate.
    pub fn int64_load_int16(&mut self, value: i16) -> &mut Self {
        self.op(Op::Int64LoadInt16);
        self.code.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn int64_add(&mut self) -> &mut Self {
        self.op(Op::Int64Add)
    }

    pub fn int64_subtract(&mut self) -> &mut Self {
        self.op(Op::Int64Subtract)
    }

    pub fn int64_multiply(&mut self) -> &mut Self {
        self.op(Op::Int64Multiply)
    }

    pub fn int64_divide(&mut self) -> &mut Self {
        self.op(Op::Int64Divide)
    }

    pub fn int64_negate(&mut self) -> &mut Self {
        self.op(Op::Int64Negate)
    }

    pub fn int64_equals(&mut self) -> &mut Self {
        self.op(Op::Int64Equals)
    }

    pub fn int64_less(&mut self) -> &mut Self {
        self.op(Op::Int64Less)
    }

    pub fn int64_not_less(&mut self) -> &mut Self {
        self.op(Op::Int64NotLess)
    }

    pub fn int64_greater(&mut self) -> &mut Self {
        self.op(Op::Int64Greater)
    }

    pub fn int64_not_greater(&mut self) -> &mut Self {
        self.op(Op::Int64NotGreater)
    }

    // ─── Float64 ─────────────────────────────────────────────────────────

    pub fn float64_load_zero(&mut self) -> &mut Self {
        self.op(Op::Float64LoadZero)
    }

    pub fn float64_load_one(&mut self) -> &mut Self {
        self.op(Op::Float64LoadOne)
    }

    /// Load an arbitrary float constant from an 8-byte immediate.
    pub fn float64_load_float64(&mut self, value: f64) -> &mut Self {
        self.op(Op::Float64LoadFloat64);
        self.code.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn float64_add(&mut self) -> &mut Self {
        self.op(Op::Float64Add)
    }

    pub fn float64_subtract(&mut self) -> &mut Self {
        self.op(Op::Float64Subtract)
    }

    pub fn float64_multiply(&mut self) -> &mut Self {
        self.op(Op::Float64Multiply)
    }

    pub fn float64_divide(&mut self) -> &mut Self {
        self.op(Op::Float64Divide)
    }

    pub fn float64_negate(&mut self) -> &mut Self {
        self.op(Op::Float64Negate)
    }

    pub fn float64_equals(&mut self) -> &mut Self {
        self.op(Op::Float64Equals)
    }

    pub fn float64_less(&mut self) -> &mut Self {
        self.op(Op::Float64Less)
    }

    pub fn float64_not_less(&mut self) -> &mut Self {
        self.op(Op::Float64NotLess)
    }

    pub fn float64_greater(&mut self) -> &mut Self {
        self.op(Op::Float64Greater)
    }

    pub fn float64_not_greater(&mut self) -> &mut Self {
        self.op(Op::Float64NotGreater)
    }

    // ─── Strings & control ───────────────────────────────────────────────

    /// Intern `text` in the block's pool and load its index.
    pub fn string_load(&mut self, text: &str) -> &mut Self {
        let index = u64::from(self.strings.put(text).index());
        self.op(Op::StringLoad);
        self.code.extend_from_slice(&index.to_le_bytes());
        self
    }

    pub fn ret(&mut self) -> &mut Self {
        self.op(Op::Return)
    }

    pub fn stop(&mut self) -> &mut Self {
        self.op(Op::Stop)
    }
}

impl std::fmt::Debug for CodeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeBlock")
            .field("len", &self.code.len())
            .field("strings", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn appends_opcodes_in_source_order() {
        let mut block = CodeBlock::new();
        block.int64_load_zero().int64_load_one().int64_add().ret();
        assert_eq!(
            block.bytes(),
            &[
                Op::Int64LoadZero as u8,
                Op::Int64LoadOne as u8,
                Op::Int64Add as u8,
                Op::Return as u8,
            ]
        );
    }

    #[test]
    fn int16_immediate_is_little_endian() {
        let mut block = CodeBlock::new();
        block.int64_load_int16(-2);
        assert_eq!(block.bytes(), &[Op::Int64LoadInt16 as u8, 0xfe, 0xff]);
    }

    #[test]
    fn float_immediate_is_little_endian() {
        let mut block = CodeBlock::new();
        block.float64_load_float64(1.5);
        let mut expected = vec![Op::Float64LoadFloat64 as u8];
        expected.extend_from_slice(&1.5f64.to_le_bytes());
        assert_eq!(block.bytes(), expected.as_slice());
    }

    #[test]
    fn string_load_interns_and_references() {
        let mut block = CodeBlock::new();
        block.string_load("s").string_load("t").string_load("s");
        assert_eq!(block.strings().len(), 2);
        assert_eq!(block.strings().resolve(0), Some("s"));
        assert_eq!(block.strings().resolve(1), Some("t"));
        // Third load reuses index 0.
        let last = &block.bytes()[block.len() - 8..];
        assert_eq!(last, 0u64.to_le_bytes());
    }
}
