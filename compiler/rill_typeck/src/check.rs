//! Post-order type inference over the expression arena.
//!
//! Covers the subset that lowers to bytecode: literals, numeric
//! arithmetic, comparisons, and boolean logic. Everything else is
//! rejected with `E2003` so later phases never see an unchecked shape.

use rill_diagnostic::ErrorCode;
use rill_ir::{
    BinaryOp, ExprArena, ExprId, ExprKind, NaryOp, ParenDelim, Span, TypeId, TypePool, UnaryOp,
};

use crate::TypeError;

/// Types assigned to every checked node, parallel to the arena.
#[derive(Debug)]
pub struct TypeckOutcome {
    types: Vec<Option<TypeId>>,
    root: ExprId,
}

impl TypeckOutcome {
    /// Type of a checked node; `None` for nodes the root does not reach.
    pub fn type_of(&self, id: ExprId) -> Option<TypeId> {
        self.types.get(id.index()).copied().flatten()
    }

    /// Type of the root expression.
    pub fn root_type(&self) -> TypeId {
        // The checker only returns an outcome after assigning the root.
        self.type_of(self.root).unwrap_or(TypeId::TYPE)
    }
}

/// Check the tree rooted at `root`, producing a type per node.
pub fn check(
    arena: &ExprArena,
    root: ExprId,
    pool: &TypePool,
) -> Result<TypeckOutcome, TypeError> {
    let mut checker = Checker {
        arena,
        pool,
        types: vec![None; arena.len()],
    };
    checker.infer(root)?;
    Ok(TypeckOutcome {
        types: checker.types,
        root,
    })
}

struct Checker<'a> {
    arena: &'a ExprArena,
    pool: &'a TypePool,
    types: Vec<Option<TypeId>>,
}

impl Checker<'_> {
    fn infer(&mut self, id: ExprId) -> Result<TypeId, TypeError> {
        let expr = self.arena.get(id);
        let ty = match expr.kind {
            ExprKind::Int(_) => TypeId::INT64,
            ExprKind::Float(_) => TypeId::FLOAT64,
            ExprKind::Bool(_) => TypeId::BOOL,
            ExprKind::Str { .. } => TypeId::STRING,
            ExprKind::Unary { op, operand } => self.unary(op, operand, expr.span)?,
            ExprKind::Nary { op, args } => {
                let args = self.arena.children(args);
                self.nary(op, args, expr.span)?
            }
            ExprKind::Binary { op, left, right } => self.binary(op, left, right, expr.span)?,
            ExprKind::Paren {
                delim: ParenDelim::Paren,
                items,
            } if items.len() == 1 => {
                // Plain grouping.
                self.infer(self.arena.children(items)[0])?
            }
            _ => return Err(self.unsupported(expr.span)),
        };
        self.types[id.index()] = Some(ty);
        Ok(ty)
    }

    fn unary(&mut self, op: UnaryOp, operand: ExprId, span: Span) -> Result<TypeId, TypeError> {
        let ty = self.infer(operand)?;
        match op {
            UnaryOp::Negate if is_numeric(ty) => Ok(ty),
            UnaryOp::Not if ty == TypeId::BOOL => Ok(TypeId::BOOL),
            _ => Err(self.operator_mismatch(op_name(op), ty, span)),
        }
    }

    fn nary(&mut self, op: NaryOp, args: &[ExprId], span: Span) -> Result<TypeId, TypeError> {
        match op {
            NaryOp::Add | NaryOp::Subtract | NaryOp::Multiply | NaryOp::Divide => {
                let ty = self.same_operand_type(args, span)?;
                if is_numeric(ty) {
                    Ok(ty)
                } else {
                    Err(self.operator_mismatch(op.sexpr_tag(), ty, span))
                }
            }
            NaryOp::And | NaryOp::Or => {
                let ty = self.same_operand_type(args, span)?;
                if ty == TypeId::BOOL {
                    Ok(TypeId::BOOL)
                } else {
                    Err(self.operator_mismatch(op.sexpr_tag(), ty, span))
                }
            }
            NaryOp::FieldRef | NaryOp::Union => Err(self.unsupported(span)),
        }
    }

    fn binary(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        span: Span,
    ) -> Result<TypeId, TypeError> {
        match op {
            BinaryOp::Equal
            | BinaryOp::Identical
            | BinaryOp::LessThan
            | BinaryOp::LessThanOrEqual
            | BinaryOp::GreaterThan
            | BinaryOp::GreaterThanOrEqual => {
                let ty = self.same_operand_type(&[left, right], span)?;
                if is_numeric(ty) {
                    Ok(TypeId::BOOL)
                } else {
                    Err(self.operator_mismatch(op.sexpr_tag(), ty, span))
                }
            }
            _ => Err(self.unsupported(span)),
        }
    }

    /// Infer all operands and require a single shared type.
    fn same_operand_type(&mut self, args: &[ExprId], span: Span) -> Result<TypeId, TypeError> {
        let mut shared = None;
        for &arg in args {
            let ty = self.infer(arg)?;
            match shared {
                None => shared = Some(ty),
                Some(expected) if expected != ty => {
                    return Err(TypeError::new(
                        ErrorCode::E2001,
                        format!(
                            "operand type mismatch: expected {}, found {}",
                            self.type_name(expected),
                            self.type_name(ty)
                        ),
                        self.arena.get(arg).span,
                    ));
                }
                Some(_) => {}
            }
        }
        shared.ok_or_else(|| self.unsupported(span))
    }

    fn operator_mismatch(&self, op: &str, ty: TypeId, span: Span) -> TypeError {
        TypeError::new(
            ErrorCode::E2002,
            format!("`{op}` is not defined for {}", self.type_name(ty)),
            span,
        )
    }

    fn type_name(&self, ty: TypeId) -> &str {
        self.pool.name(ty).unwrap_or("<unknown>")
    }

    fn unsupported(&self, span: Span) -> TypeError {
        TypeError::new(
            ErrorCode::E2003,
            "expression is outside the checked subset",
            span,
        )
    }
}

fn is_numeric(ty: TypeId) -> bool {
    ty == TypeId::INT64 || ty == TypeId::FLOAT64
}

const fn op_name(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Negate => "negate",
        UnaryOp::Not => "not",
    }
}
