//! The interpreter.
//!
//! A dense dispatch loop over the code block's byte stream. The operand
//! stack is a vector of raw 64-bit slots reinterpreted per opcode; the
//! type checker has already established shape safety, so there is no
//! runtime type dispatch.

use rill_diagnostic::ErrorCode;

use crate::{CodeBlock, Op, RuntimeError};

/// How execution ended.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Halt {
    /// `RETURN`: the top of stack is the result.
    Return,
    /// `STOP`: hard termination, no result.
    Stop,
}

/// Runtime state: operand stack, program counter, active code block.
pub struct Machine<'a> {
    block: &'a CodeBlock,
    stack: Vec<u64>,
    pc: usize,
    halt: Option<Halt>,
}

impl<'a> Machine<'a> {
    pub fn new(block: &'a CodeBlock) -> Self {
        Machine {
            block,
            stack: Vec::with_capacity(16),
            pc: 0,
            halt: None,
        }
    }

    /// Execute until `RETURN` or `STOP`.
    pub fn run(&mut self) -> Result<Halt, RuntimeError> {
        let bytes = self.block.bytes();
        loop {
            let at = self.pc;
            let Some(&byte) = bytes.get(at) else {
                return Err(RuntimeError::new(
                    ErrorCode::E4004,
                    "code block ended without RETURN or STOP",
                    at,
                ));
            };
            let Some(op) = Op::from_byte(byte) else {
                return Err(RuntimeError::new(
                    ErrorCode::E4003,
                    format!("invalid opcode byte 0x{byte:02x}"),
                    at,
                ));
            };
            self.pc = at + 1;
            match op {
                Op::BoolLoadTrue => self.push(1),
                Op::BoolLoadFalse => self.push(0),
                Op::BoolAnd => self.bool_binary(at, |l, r| l && r)?,
                Op::BoolOr => self.bool_binary(at, |l, r| l || r)?,
                Op::BoolNot => {
                    let value = self.pop(at)?;
                    self.push(u64::from(value == 0));
                }

                Op::Int64LoadZero => self.push(0),
                Op::Int64LoadOne => self.push(1),
                Op::Int64LoadInt16 => {
                    let value = i64::from(self.imm_i16(at)?);
                    self.push(int_slot(value));
                }
                Op::Int64Add => self.int_binary(at, i64::wrapping_add)?,
                Op::Int64Subtract => self.int_binary(at, i64::wrapping_sub)?,
                Op::Int64Multiply => self.int_binary(at, i64::wrapping_mul)?,
                Op::Int64Divide => {
                    let right = slot_int(self.pop(at)?);
                    let left = slot_int(self.pop(at)?);
                    if right == 0 {
                        return Err(RuntimeError::new(
                            ErrorCode::E4001,
                            "division by zero",
                            at,
                        ));
                    }
                    self.push(int_slot(left.wrapping_div(right)));
                }
                Op::Int64Negate => {
                    let value = slot_int(self.pop(at)?);
                    self.push(int_slot(value.wrapping_neg()));
                }
                Op::Int64Equals => self.int_compare(at, |l, r| l == r)?,
                Op::Int64Less => self.int_compare(at, |l, r| l < r)?,
                Op::Int64NotLess => self.int_compare(at, |l, r| l >= r)?,
                Op::Int64Greater => self.int_compare(at, |l, r| l > r)?,
                Op::Int64NotGreater => self.int_compare(at, |l, r| l <= r)?,

                Op::Float64LoadZero => self.push(0.0f64.to_bits()),
                Op::Float64LoadOne => self.push(1.0f64.to_bits()),
                Op::Float64LoadFloat64 => {
                    let value = self.imm_f64(at)?;
                    self.push(value.to_bits());
                }
                Op::Float64Add => self.float_binary(at, |l, r| l + r)?,
                Op::Float64Subtract => self.float_binary(at, |l, r| l - r)?,
                Op::Float64Multiply => self.float_binary(at, |l, r| l * r)?,
                Op::Float64Divide => self.float_binary(at, |l, r| l / r)?,
                Op::Float64Negate => {
                    let value = f64::from_bits(self.pop(at)?);
                    self.push((-value).to_bits());
                }
                Op::Float64Equals => self.float_compare(at, |l, r| l == r)?,
                Op::Float64Less => self.float_compare(at, |l, r| l < r)?,
                Op::Float64NotLess => self.float_compare(at, |l, r| l >= r)?,
                Op::Float64Greater => self.float_compare(at, |l, r| l > r)?,
                Op::Float64NotGreater => self.float_compare(at, |l, r| l <= r)?,

                Op::StringLoad => {
                    let index = self.imm_u64(at)?;
                    self.push(index);
                }

                Op::Return => {
                    self.halt = Some(Halt::Return);
                    tracing::trace!(stack = self.stack.len(), "machine returned");
                    return Ok(Halt::Return);
                }
                Op::Stop => {
                    self.halt = Some(Halt::Stop);
                    tracing::trace!("machine stopped");
                    return Ok(Halt::Stop);
                }
            }
        }
    }

    // ─── Results ─────────────────────────────────────────────────────────

    /// Top of stack as an integer, after a `RETURN`.
    pub fn int64_result(&self) -> Option<i64> {
        self.returned().map(slot_int)
    }

    /// Top of stack as a float, after a `RETURN`.
    pub fn float64_result(&self) -> Option<f64> {
        self.returned().map(f64::from_bits)
    }

    /// Top of stack as a boolean, after a `RETURN`.
    pub fn bool_result(&self) -> Option<bool> {
        self.returned().map(|slot| slot != 0)
    }

    /// Top of stack as a string-pool lookup, after a `RETURN`.
    pub fn string_result(&self) -> Option<&'a str> {
        self.returned()
            .and_then(|index| self.block.strings().resolve(index))
    }

    fn returned(&self) -> Option<u64> {
        match self.halt {
            Some(Halt::Return) => self.stack.last().copied(),
            _ => None,
        }
    }

    // ─── Stack & immediates ──────────────────────────────────────────────

    fn push(&mut self, slot: u64) {
        self.stack.push(slot);
    }

    fn pop(&mut self, at: usize) -> Result<u64, RuntimeError> {
        self.stack.pop().ok_or_else(|| {
            RuntimeError::new(ErrorCode::E4002, "operand stack underflow", at)
        })
    }

    fn bool_binary(
        &mut self,
        at: usize,
        apply: impl Fn(bool, bool) -> bool,
    ) -> Result<(), RuntimeError> {
        let right = self.pop(at)? != 0;
        let left = self.pop(at)? != 0;
        self.push(u64::from(apply(left, right)));
        Ok(())
    }

    fn int_binary(
        &mut self,
        at: usize,
        apply: impl Fn(i64, i64) -> i64,
    ) -> Result<(), RuntimeError> {
        let right = slot_int(self.pop(at)?);
        let left = slot_int(self.pop(at)?);
        self.push(int_slot(apply(left, right)));
        Ok(())
    }

    fn int_compare(
        &mut self,
        at: usize,
        apply: impl Fn(i64, i64) -> bool,
    ) -> Result<(), RuntimeError> {
        let right = slot_int(self.pop(at)?);
        let left = slot_int(self.pop(at)?);
        self.push(u64::from(apply(left, right)));
        Ok(())
    }

    fn float_binary(
        &mut self,
        at: usize,
        apply: impl Fn(f64, f64) -> f64,
    ) -> Result<(), RuntimeError> {
        let right = f64::from_bits(self.pop(at)?);
        let left = f64::from_bits(self.pop(at)?);
        self.push(apply(left, right).to_bits());
        Ok(())
    }

    fn float_compare(
        &mut self,
        at: usize,
        apply: impl Fn(f64, f64) -> bool,
    ) -> Result<(), RuntimeError> {
        let right = f64::from_bits(self.pop(at)?);
        let left = f64::from_bits(self.pop(at)?);
        self.push(u64::from(apply(left, right)));
        Ok(())
    }

    fn imm_i16(&mut self, at: usize) -> Result<i16, RuntimeError> {
        let raw = self.imm_bytes::<2>(at)?;
        Ok(i16::from_le_bytes(raw))
    }

    fn imm_f64(&mut self, at: usize) -> Result<f64, RuntimeError> {
        let raw = self.imm_bytes::<8>(at)?;
        Ok(f64::from_le_bytes(raw))
    }

    fn imm_u64(&mut self, at: usize) -> Result<u64, RuntimeError> {
        let raw = self.imm_bytes::<8>(at)?;
        Ok(u64::from_le_bytes(raw))
    }

    fn imm_bytes<const N: usize>(&mut self, at: usize) -> Result<[u8; N], RuntimeError> {
        let bytes = self.block.bytes();
        let Some(raw) = bytes.get(self.pc..self.pc + N) else {
            return Err(RuntimeError::new(
                ErrorCode::E4003,
                "truncated immediate",
                at,
            ));
        };
        let mut buf = [0u8; N];
        buf.copy_from_slice(raw);
        self.pc += N;
        Ok(buf)
    }
}

/// Bit-preserving slot conversions; the stack is untyped.
#[inline]
fn int_slot(value: i64) -> u64 {
    u64::from_ne_bytes(value.to_ne_bytes())
}

#[inline]
fn slot_int(slot: u64) -> i64 {
    i64::from_ne_bytes(slot.to_ne_bytes())
}
