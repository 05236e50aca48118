//! Post-order bytecode emission.
//!
//! Walks the typed expression tree leaves-first, appending one opcode
//! per operation through the [`CodeBlock`] builder. The final opcode is
//! always `RETURN`, leaving the result on top of the machine stack.

use rill_diagnostic::ErrorCode;
use rill_ir::{
    BinaryOp, ExprArena, ExprId, ExprKind, NaryOp, ParenDelim, Span, StrStyle, StringPool, TypeId,
    UnaryOp,
};
use rill_typeck::TypeckOutcome;
use rill_vm::CodeBlock;

use crate::CodegenError;

/// Lower a checked expression tree into a code block.
pub fn emit(
    arena: &ExprArena,
    root: ExprId,
    types: &TypeckOutcome,
    strings: &StringPool,
) -> Result<CodeBlock, CodegenError> {
    let mut emitter = Emitter {
        arena,
        types,
        strings,
        block: CodeBlock::new(),
    };
    emitter.expr(root)?;
    emitter.block.ret();
    tracing::trace!(bytes = emitter.block.len(), "emitted code block");
    Ok(emitter.block)
}

struct Emitter<'a> {
    arena: &'a ExprArena,
    types: &'a TypeckOutcome,
    strings: &'a StringPool,
    block: CodeBlock,
}

impl Emitter<'_> {
    fn expr(&mut self, id: ExprId) -> Result<(), CodegenError> {
        let expr = self.arena.get(id);
        match expr.kind {
            ExprKind::Int(value) => self.int_load(value, expr.span),
            ExprKind::Float(bits) => {
                self.float_load(f64::from_bits(bits));
                Ok(())
            }
            ExprKind::Bool(true) => {
                self.block.bool_load_true();
                Ok(())
            }
            ExprKind::Bool(false) => {
                self.block.bool_load_false();
                Ok(())
            }
            ExprKind::Str { text, style } => {
                let raw = self.strings.get(text);
                self.block.string_load(literal_content(raw, style));
                Ok(())
            }
            ExprKind::Unary { op, operand } => self.unary(op, operand, expr.span),
            ExprKind::Nary { op, args } => self.nary(op, args, id, expr.span),
            ExprKind::Binary { op, left, right } => self.comparison(op, left, right, expr.span),
            ExprKind::Paren {
                delim: ParenDelim::Paren,
                items,
            } if items.len() == 1 => self.expr(self.arena.children(items)[0]),
            _ => Err(self.unsupported(expr.span)),
        }
    }

    /// `0` and `1` have dedicated opcodes; everything else must fit the
    /// 16-bit immediate.
    fn int_load(&mut self, value: i64, span: Span) -> Result<(), CodegenError> {
        match value {
            0 => {
                self.block.int64_load_zero();
            }
            1 => {
                self.block.int64_load_one();
            }
            _ => match i16::try_from(value) {
                Ok(small) => {
                    self.block.int64_load_int16(small);
                }
                Err(_) => {
                    return Err(CodegenError::new(
                        ErrorCode::E3002,
                        format!("integer literal {value} does not fit the 16-bit load immediate"),
                        span,
                    ));
                }
            },
        }
        Ok(())
    }

    fn float_load(&mut self, value: f64) {
        // Bit comparison: the dedicated loads are exactly +0.0 and 1.0.
        if value.to_bits() == 0.0f64.to_bits() {
            self.block.float64_load_zero();
        } else if value.to_bits() == 1.0f64.to_bits() {
            self.block.float64_load_one();
        } else {
            self.block.float64_load_float64(value);
        }
    }

    fn unary(&mut self, op: UnaryOp, operand: ExprId, span: Span) -> Result<(), CodegenError> {
        self.expr(operand)?;
        match (op, self.type_of(operand, span)?) {
            (UnaryOp::Negate, TypeId::INT64) => {
                self.block.int64_negate();
            }
            (UnaryOp::Negate, TypeId::FLOAT64) => {
                self.block.float64_negate();
            }
            (UnaryOp::Not, TypeId::BOOL) => {
                self.block.bool_not();
            }
            _ => return Err(self.unsupported(span)),
        }
        Ok(())
    }

    /// Chains emit left to right: first operand, then operand/opcode
    /// pairs for the rest.
    fn nary(
        &mut self,
        op: NaryOp,
        args: rill_ir::ExprRange,
        node: ExprId,
        span: Span,
    ) -> Result<(), CodegenError> {
        let args = self.arena.children(args);
        let ty = self.type_of(node, span)?;
        let Some((&first, rest)) = args.split_first() else {
            return Err(self.unsupported(span));
        };
        self.expr(first)?;
        for &arg in rest {
            self.expr(arg)?;
            self.nary_op(op, ty, span)?;
        }
        Ok(())
    }

    fn nary_op(&mut self, op: NaryOp, ty: TypeId, span: Span) -> Result<(), CodegenError> {
        match (op, ty) {
            (NaryOp::Add, TypeId::INT64) => self.block.int64_add(),
            (NaryOp::Subtract, TypeId::INT64) => self.block.int64_subtract(),
            (NaryOp::Multiply, TypeId::INT64) => self.block.int64_multiply(),
            (NaryOp::Divide, TypeId::INT64) => self.block.int64_divide(),
            (NaryOp::Add, TypeId::FLOAT64) => self.block.float64_add(),
            (NaryOp::Subtract, TypeId::FLOAT64) => self.block.float64_subtract(),
            (NaryOp::Multiply, TypeId::FLOAT64) => self.block.float64_multiply(),
            (NaryOp::Divide, TypeId::FLOAT64) => self.block.float64_divide(),
            (NaryOp::And, TypeId::BOOL) => self.block.bool_and(),
            (NaryOp::Or, TypeId::BOOL) => self.block.bool_or(),
            _ => {
                return Err(CodegenError::new(
                    ErrorCode::E3003,
                    format!("no opcode for `{}` at this type", op.sexpr_tag()),
                    span,
                ))
            }
        };
        Ok(())
    }

    fn comparison(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        span: Span,
    ) -> Result<(), CodegenError> {
        self.expr(left)?;
        self.expr(right)?;
        let ty = self.type_of(left, span)?;
        match (op, ty) {
            (BinaryOp::Equal | BinaryOp::Identical, TypeId::INT64) => self.block.int64_equals(),
            (BinaryOp::LessThan, TypeId::INT64) => self.block.int64_less(),
            (BinaryOp::GreaterThanOrEqual, TypeId::INT64) => self.block.int64_not_less(),
            (BinaryOp::GreaterThan, TypeId::INT64) => self.block.int64_greater(),
            (BinaryOp::LessThanOrEqual, TypeId::INT64) => self.block.int64_not_greater(),
            (BinaryOp::Equal | BinaryOp::Identical, TypeId::FLOAT64) => {
                self.block.float64_equals()
            }
            (BinaryOp::LessThan, TypeId::FLOAT64) => self.block.float64_less(),
            (BinaryOp::GreaterThanOrEqual, TypeId::FLOAT64) => self.block.float64_not_less(),
            (BinaryOp::GreaterThan, TypeId::FLOAT64) => self.block.float64_greater(),
            (BinaryOp::LessThanOrEqual, TypeId::FLOAT64) => self.block.float64_not_greater(),
            _ => {
                return Err(CodegenError::new(
                    ErrorCode::E3003,
                    format!("no opcode for `{}` at this type", op.sexpr_tag()),
                    span,
                ))
            }
        };
        Ok(())
    }

    fn type_of(&self, id: ExprId, span: Span) -> Result<TypeId, CodegenError> {
        self.types
            .type_of(id)
            .ok_or_else(|| self.unsupported(span))
    }

    fn unsupported(&self, span: Span) -> CodegenError {
        CodegenError::new(
            ErrorCode::E3001,
            "expression shape has no bytecode lowering",
            span,
        )
    }
}

/// Strip the surrounding quotes off a raw string-literal slice.
/// Back-ticked literals keep their raw text.
fn literal_content(raw: &str, style: StrStyle) -> &str {
    match style {
        StrStyle::Single | StrStyle::Double if raw.len() >= 2 => &raw[1..raw.len() - 1],
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rill_ir::TypePool;
    use rill_vm::Op;

    fn compile(source: &str) -> Result<CodeBlock, CodegenError> {
        let strings = StringPool::new();
        let Ok(parsed) = rill_parse::parse(source, &strings) else {
            panic!("parse failed for `{source}`");
        };
        let types = TypePool::new();
        let Ok(checked) = rill_typeck::check(&parsed.arena, parsed.root, &types) else {
            panic!("check failed for `{source}`");
        };
        emit(&parsed.arena, parsed.root, &checked, &strings)
    }

    fn bytes_of(source: &str) -> Vec<u8> {
        match compile(source) {
            Ok(block) => block.bytes().to_vec(),
            Err(err) => panic!("emit failed for `{source}`: {err}"),
        }
    }

    #[test]
    fn small_constants_use_dedicated_loads() {
        assert_eq!(
            bytes_of("0 + 1"),
            vec![
                Op::Int64LoadZero as u8,
                Op::Int64LoadOne as u8,
                Op::Int64Add as u8,
                Op::Return as u8,
            ]
        );
    }

    #[test]
    fn int16_immediates_for_wider_literals() {
        assert_eq!(
            bytes_of("2 + 3"),
            vec![
                Op::Int64LoadInt16 as u8,
                2,
                0,
                Op::Int64LoadInt16 as u8,
                3,
                0,
                Op::Int64Add as u8,
                Op::Return as u8,
            ]
        );
    }

    #[test]
    fn nary_chain_emits_pairwise_ops() {
        assert_eq!(
            bytes_of("0 + 1 + 2"),
            vec![
                Op::Int64LoadZero as u8,
                Op::Int64LoadOne as u8,
                Op::Int64Add as u8,
                Op::Int64LoadInt16 as u8,
                2,
                0,
                Op::Int64Add as u8,
                Op::Return as u8,
            ]
        );
    }

    #[test]
    fn grouping_parens_are_transparent() {
        assert_eq!(bytes_of("(0 + 1)"), bytes_of("0 + 1"));
    }

    #[test]
    fn comparison_opcode_mapping() {
        let tail = |source: &str| {
            let bytes = bytes_of(source);
            bytes[bytes.len() - 2]
        };
        assert_eq!(tail("2 < 3"), Op::Int64Less as u8);
        assert_eq!(tail("2 >= 3"), Op::Int64NotLess as u8);
        assert_eq!(tail("2 > 3"), Op::Int64Greater as u8);
        assert_eq!(tail("2 <= 3"), Op::Int64NotGreater as u8);
        assert_eq!(tail("2 == 3"), Op::Int64Equals as u8);
        assert_eq!(tail("2.5 < 3.5"), Op::Float64Less as u8);
    }

    #[test]
    fn float_constant_loads() {
        assert_eq!(
            bytes_of("0.0 + 1.0"),
            vec![
                Op::Float64LoadZero as u8,
                Op::Float64LoadOne as u8,
                Op::Float64Add as u8,
                Op::Return as u8,
            ]
        );
        let bytes = bytes_of("2.5 * 2.5");
        assert_eq!(bytes[0], Op::Float64LoadFloat64 as u8);
        assert_eq!(&bytes[1..9], 2.5f64.to_le_bytes());
    }

    #[test]
    fn negate_and_boolean_ops() {
        assert_eq!(
            bytes_of("-(7 - 3) + 1"),
            vec![
                Op::Int64LoadInt16 as u8,
                7,
                0,
                Op::Int64LoadInt16 as u8,
                3,
                0,
                Op::Int64Subtract as u8,
                Op::Int64Negate as u8,
                Op::Int64LoadOne as u8,
                Op::Int64Add as u8,
                Op::Return as u8,
            ]
        );
        assert_eq!(
            bytes_of("not true and false"),
            vec![
                Op::BoolLoadTrue as u8,
                Op::BoolNot as u8,
                Op::BoolLoadFalse as u8,
                Op::BoolAnd as u8,
                Op::Return as u8,
            ]
        );
    }

    #[test]
    fn string_literal_strips_quotes() {
        let Ok(block) = compile("\"hi\"") else {
            panic!("emit failed");
        };
        assert_eq!(block.strings().resolve(0), Some("hi"));
        assert_eq!(block.bytes()[0], Op::StringLoad as u8);
    }

    #[test]
    fn wide_integer_literal_is_rejected() {
        let Err(err) = compile("40000 + 1") else {
            panic!("expected failure");
        };
        assert_eq!(err.code, ErrorCode::E3002);
        assert_eq!(err.span, Span::new(0, 5));
    }
}
