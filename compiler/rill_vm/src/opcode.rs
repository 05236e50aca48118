//! The opcode set.
//!
//! One byte per opcode; immediates are little-endian and follow the
//! opcode directly in the byte stream.

/// Bytecode operation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Op {
    BoolLoadTrue = 0x01,
    BoolLoadFalse = 0x02,
    BoolAnd = 0x03,
    BoolOr = 0x04,
    BoolNot = 0x05,

    Int64LoadZero = 0x10,
    Int64LoadOne = 0x11,
    /// Followed by an `i16` immediate.
    Int64LoadInt16 = 0x12,
    Int64Add = 0x13,
    Int64Subtract = 0x14,
    Int64Multiply = 0x15,
    Int64Divide = 0x16,
    Int64Negate = 0x17,
    Int64Equals = 0x18,
    Int64Less = 0x19,
    Int64NotLess = 0x1a,
    Int64Greater = 0x1b,
    Int64NotGreater = 0x1c,

    Float64LoadZero = 0x20,
    Float64LoadOne = 0x21,
    /// Followed by an `f64` immediate.
    Float64LoadFloat64 = 0x22,
    Float64Add = 0x23,
    Float64Subtract = 0x24,
    Float64Multiply = 0x25,
    Float64Divide = 0x26,
    Float64Negate = 0x27,
    Float64Equals = 0x28,
    Float64Less = 0x29,
    Float64NotLess = 0x2a,
    Float64Greater = 0x2b,
    Float64NotGreater = 0x2c,

    /// Followed by a `u64` string-pool index.
    StringLoad = 0x30,

    Return = 0x40,
    Stop = 0x41,
}

impl Op {
    /// Decode a raw byte.
    pub fn from_byte(byte: u8) -> Option<Op> {
        let op = match byte {
            0x01 => Op::BoolLoadTrue,
            0x02 => Op::BoolLoadFalse,
            0x03 => Op::BoolAnd,
            0x04 => Op::BoolOr,
            0x05 => Op::BoolNot,
            0x10 => Op::Int64LoadZero,
            0x11 => Op::Int64LoadOne,
            0x12 => Op::Int64LoadInt16,
            0x13 => Op::Int64Add,
            0x14 => Op::Int64Subtract,
            0x15 => Op::Int64Multiply,
            0x16 => Op::Int64Divide,
            0x17 => Op::Int64Negate,
            0x18 => Op::Int64Equals,
            0x19 => Op::Int64Less,
            0x1a => Op::Int64NotLess,
            0x1b => Op::Int64Greater,
            0x1c => Op::Int64NotGreater,
            0x20 => Op::Float64LoadZero,
            0x21 => Op::Float64LoadOne,
            0x22 => Op::Float64LoadFloat64,
            0x23 => Op::Float64Add,
            0x24 => Op::Float64Subtract,
            0x25 => Op::Float64Multiply,
            0x26 => Op::Float64Divide,
            0x27 => Op::Float64Negate,
            0x28 => Op::Float64Equals,
            0x29 => Op::Float64Less,
            0x2a => Op::Float64NotLess,
            0x2b => Op::Float64Greater,
            0x2c => Op::Float64NotGreater,
            0x30 => Op::StringLoad,
            0x40 => Op::Return,
            0x41 => Op::Stop,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical name, as printed by the disassembler.
    pub fn name(self) -> &'static str {
        match self {
            Op::BoolLoadTrue => "BOOL_LOAD_TRUE",
            Op::BoolLoadFalse => "BOOL_LOAD_FALSE",
            Op::BoolAnd => "BOOL_AND",
            Op::BoolOr => "BOOL_OR",
            Op::BoolNot => "BOOL_NOT",
            Op::Int64LoadZero => "INT64_LOAD_ZERO",
            Op::Int64LoadOne => "INT64_LOAD_ONE",
            Op::Int64LoadInt16 => "INT64_LOAD_INT16",
            Op::Int64Add => "INT64_ADD",
            Op::Int64Subtract => "INT64_SUBTRACT",
            Op::Int64Multiply => "INT64_MULTIPLY",
            Op::Int64Divide => "INT64_DIVIDE",
            Op::Int64Negate => "INT64_NEGATE",
            Op::Int64Equals => "INT64_EQUALS",
            Op::Int64Less => "INT64_LESS",
            Op::Int64NotLess => "INT64_NOT_LESS",
            Op::Int64Greater => "INT64_GREATER",
            Op::Int64NotGreater => "INT64_NOT_GREATER",
            Op::Float64LoadZero => "FLOAT64_LOAD_ZERO",
            Op::Float64LoadOne => "FLOAT64_LOAD_ONE",
            Op::Float64LoadFloat64 => "FLOAT64_LOAD_FLOAT64",
            Op::Float64Add => "FLOAT64_ADD",
            Op::Float64Subtract => "FLOAT64_SUBTRACT",
            Op::Float64Multiply => "FLOAT64_MULTIPLY",
            Op::Float64Divide => "FLOAT64_DIVIDE",
            Op::Float64Negate => "FLOAT64_NEGATE",
            Op::Float64Equals => "FLOAT64_EQUALS",
            Op::Float64Less => "FLOAT64_LESS",
            Op::Float64NotLess => "FLOAT64_NOT_LESS",
            Op::Float64Greater => "FLOAT64_GREATER",
            Op::Float64NotGreater => "FLOAT64_NOT_GREATER",
            Op::StringLoad => "STRING_LOAD",
            Op::Return => "RETURN",
            Op::Stop => "STOP",
        }
    }

    /// Width in bytes of the in-line immediate that follows.
    pub fn operand_width(self) -> usize {
        match self {
            Op::Int64LoadInt16 => 2,
            Op::Float64LoadFloat64 | Op::StringLoad => 8,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALL: [Op; 34] = [
        Op::BoolLoadTrue,
        Op::BoolLoadFalse,
        Op::BoolAnd,
        Op::BoolOr,
        Op::BoolNot,
        Op::Int64LoadZero,
        Op::Int64LoadOne,
        Op::Int64LoadInt16,
        Op::Int64Add,
        Op::Int64Subtract,
        Op::Int64Multiply,
        Op::Int64Divide,
        Op::Int64Negate,
        Op::Int64Equals,
        Op::Int64Less,
        Op::Int64NotLess,
        Op::Int64Greater,
        Op::Int64NotGreater,
        Op::Float64LoadZero,
        Op::Float64LoadOne,
        Op::Float64LoadFloat64,
        Op::Float64Add,
        Op::Float64Subtract,
        Op::Float64Multiply,
        Op::Float64Divide,
        Op::Float64Negate,
        Op::Float64Equals,
        Op::Float64Less,
        Op::Float64NotLess,
        Op::Float64Greater,
        Op::Float64NotGreater,
        Op::StringLoad,
        Op::Return,
        Op::Stop,
    ];

    #[test]
    fn byte_round_trip() {
        for op in ALL {
            assert_eq!(Op::from_byte(op as u8), Some(op), "{}", op.name());
        }
    }

    #[test]
    fn unknown_bytes_decode_to_none() {
        assert_eq!(Op::from_byte(0x00), None);
        assert_eq!(Op::from_byte(0xff), None);
    }

    #[test]
    fn operand_widths() {
        assert_eq!(Op::Int64LoadInt16.operand_width(), 2);
        assert_eq!(Op::Float64LoadFloat64.operand_width(), 8);
        assert_eq!(Op::StringLoad.operand_width(), 8);
        assert_eq!(Op::Int64Add.operand_width(), 0);
        assert_eq!(Op::Return.operand_width(), 0);
    }
}
