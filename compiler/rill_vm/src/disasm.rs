//! Disassembler over the code block byte stream.
//!
//! Walks the same buffer the interpreter executes, printing one line
//! per opcode. The listing starts with a newline and each line shows
//! the 1-based byte offset of the opcode, its canonical name, and the
//! decoded immediate if the opcode carries one.

use std::fmt::Write as _;

use rill_diagnostic::ErrorCode;

use crate::{CodeBlock, Op, RuntimeError};

/// Render the whole block as a human-readable listing.
pub fn disassemble(block: &CodeBlock) -> Result<String, RuntimeError> {
    let bytes = block.bytes();
    let mut out = String::from("\n");
    let mut offset = 0;
    while offset < bytes.len() {
        let Some(op) = Op::from_byte(bytes[offset]) else {
            return Err(RuntimeError::new(
                ErrorCode::E4003,
                format!("invalid opcode byte 0x{:02x}", bytes[offset]),
                offset,
            ));
        };
        // pc is the 1-based byte offset of the opcode.
        let _ = write!(out, "{:4}  {}", offset + 1, op.name());
        offset += 1;
        offset += write_operand(&mut out, op, block, offset)?;
        out.push('\n');
    }
    Ok(out)
}

/// Append the operand text, returning the immediate's width.
fn write_operand(
    out: &mut String,
    op: Op,
    block: &CodeBlock,
    offset: usize,
) -> Result<usize, RuntimeError> {
    let width = op.operand_width();
    if width == 0 {
        return Ok(0);
    }
    let bytes = block.bytes();
    let Some(raw) = bytes.get(offset..offset + width) else {
        return Err(RuntimeError::new(
            ErrorCode::E4003,
            format!("truncated immediate for {}", op.name()),
            offset - 1,
        ));
    };
    match op {
        Op::Int64LoadInt16 => {
            let value = i16::from_le_bytes([raw[0], raw[1]]);
            let _ = write!(out, "  {value}");
        }
        Op::Float64LoadFloat64 => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(raw);
            let value = f64::from_le_bytes(buf);
            let _ = write!(out, "  {value:.3}");
        }
        Op::StringLoad => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(raw);
            let index = u64::from_le_bytes(buf);
            let text = block.strings().resolve(index).unwrap_or("");
            let _ = write!(out, "  \"{text}\"");
        }
        _ => {}
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_matches_documented_sample() {
        let mut block = CodeBlock::new();
        block
            .int64_load_int16(2)
            .int64_load_int16(3)
            .int64_load_zero()
            .int64_load_one()
            .int64_add()
            .ret();
        let Ok(listing) = disassemble(&block) else {
            panic!("disassembly failed");
        };
        assert_eq!(
            listing,
            "\n   1  INT64_LOAD_INT16  2\n   4  INT64_LOAD_INT16  3\n   7  INT64_LOAD_ZERO\n   8  INT64_LOAD_ONE\n   9  INT64_ADD\n  10  RETURN\n"
        );
    }

    #[test]
    fn float_operand_prints_three_decimals() {
        let mut block = CodeBlock::new();
        block.float64_load_float64(1.5).ret();
        let Ok(listing) = disassemble(&block) else {
            panic!("disassembly failed");
        };
        assert_eq!(listing, "\n   1  FLOAT64_LOAD_FLOAT64  1.500\n  10  RETURN\n");
    }

    #[test]
    fn string_operand_prints_quoted_text() {
        let mut block = CodeBlock::new();
        block.string_load("hi").ret();
        let Ok(listing) = disassemble(&block) else {
            panic!("disassembly failed");
        };
        assert_eq!(listing, "\n   1  STRING_LOAD  \"hi\"\n  10  RETURN\n");
    }

    #[test]
    fn negative_int16_operand() {
        let mut block = CodeBlock::new();
        block.int64_load_int16(-7);
        let Ok(listing) = disassemble(&block) else {
            panic!("disassembly failed");
        };
        assert_eq!(listing, "\n   1  INT64_LOAD_INT16  -7\n");
    }

    #[test]
    fn invalid_byte_is_an_error() {
        let block = CodeBlock::new();
        let Ok(listing) = disassemble(&block) else {
            panic!("empty block should disassemble");
        };
        assert_eq!(listing, "\n");
    }
}
