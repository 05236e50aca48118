//! Flat arena-allocated expression tree.
//!
//! No `Box<Expr>`: children are held by [`ExprId`] index, n-ary children
//! as contiguous [`ExprRange`] slices of a side array. The tree is
//! consumed in post-order by the type checker and code generator.

use std::fmt;

use crate::{Name, Span};

/// Index of an expression in an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contiguous run of child ids in the arena's side array.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprRange {
    start: u32,
    end: u32,
}

impl ExprRange {
    /// An empty child list.
    pub const EMPTY: ExprRange = ExprRange { start: 0, end: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Expression node: variant tag plus the source span it encloses.
///
/// Invariant: a node's span encloses every descendant's span.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Quote style of a string literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StrStyle {
    Single,
    Double,
    /// Back-ticked, possibly spanning several source lines.
    Multiline,
}

/// Delimiter of a parenthesized constructor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParenDelim {
    /// `( ... )`
    Paren,
    /// `{ ... }`
    Brace,
}

impl ParenDelim {
    /// The quoted two-character form the S-expression printer records.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParenDelim::Paren => "()",
            ParenDelim::Brace => "{}",
        }
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub const fn sexpr_tag(self) -> &'static str {
        match self {
            UnaryOp::Negate => "negate",
            UnaryOp::Not => "not",
        }
    }
}

/// Operators whose same-operator chains collapse into one n-ary node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    FieldRef,
    Union,
}

impl NaryOp {
    pub const fn sexpr_tag(self) -> &'static str {
        match self {
            NaryOp::Add => "add",
            NaryOp::Subtract => "subtract",
            NaryOp::Multiply => "multiply",
            NaryOp::Divide => "divide",
            NaryOp::And => "and",
            NaryOp::Or => "or",
            NaryOp::FieldRef => "fieldref",
            NaryOp::Union => "union",
        }
    }

    /// Surface syntax between two operands, spacing included.
    pub const fn surface(self) -> &'static str {
        match self {
            NaryOp::Add => " + ",
            NaryOp::Subtract => " - ",
            NaryOp::Multiply => " * ",
            NaryOp::Divide => " / ",
            NaryOp::And => " and ",
            NaryOp::Or => " or ",
            NaryOp::FieldRef => ".",
            NaryOp::Union => " | ",
        }
    }
}

/// Strictly binary infix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    IntersectAssign,
    Where,
    Qualify,
    IntersectDefault,
    When,
    Equal,
    Identical,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Matches,
    NotMatches,
    In,
    Is,
    Range,
    IntersectLowPrecedence,
    Intersect,
    Arrow,
}

impl BinaryOp {
    pub const fn sexpr_tag(self) -> &'static str {
        match self {
            BinaryOp::IntersectAssign => "intersectassign",
            BinaryOp::Where => "where",
            BinaryOp::Qualify => "qualify",
            BinaryOp::IntersectDefault => "intersectdefault",
            BinaryOp::When => "when",
            BinaryOp::Equal => "equal",
            BinaryOp::Identical => "identical",
            BinaryOp::LessThan => "lessthan",
            BinaryOp::LessThanOrEqual => "lessthanorequal",
            BinaryOp::GreaterThan => "greaterthan",
            BinaryOp::GreaterThanOrEqual => "greaterthanorequal",
            BinaryOp::Matches => "match",
            BinaryOp::NotMatches => "notmatch",
            BinaryOp::In => "in",
            BinaryOp::Is => "is",
            BinaryOp::Range => "range",
            BinaryOp::IntersectLowPrecedence => "intersectlowprecedence",
            BinaryOp::Intersect => "intersect",
            BinaryOp::Arrow => "arrow",
        }
    }

    /// Surface syntax between the two operands, spacing included.
    pub const fn surface(self) -> &'static str {
        match self {
            BinaryOp::IntersectAssign => " = ",
            BinaryOp::Where => " where ",
            BinaryOp::Qualify => ": ",
            BinaryOp::IntersectDefault => " ?: ",
            BinaryOp::When => " when ",
            BinaryOp::Equal => " == ",
            BinaryOp::Identical => " === ",
            BinaryOp::LessThan => " < ",
            BinaryOp::LessThanOrEqual => " <= ",
            BinaryOp::GreaterThan => " > ",
            BinaryOp::GreaterThanOrEqual => " >= ",
            BinaryOp::Matches => " =~ ",
            BinaryOp::NotMatches => " !~ ",
            BinaryOp::In => " in ",
            BinaryOp::Is => " is ",
            BinaryOp::Range => "..",
            BinaryOp::IntersectLowPrecedence => " && ",
            BinaryOp::Intersect => " & ",
            BinaryOp::Arrow => " -> ",
        }
    }
}

/// Placement of a documentation text leaf.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DocPlacement {
    Leading,
    Trailing,
}

/// Expression variants.
///
/// All children are arena indices; the payload stays `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Identifier, interned.
    Ident(Name),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal (bits, for `Eq`/`Hash`).
    Float(u64),
    /// String literal; `text` is the raw source slice including quotes.
    Str { text: Name, style: StrStyle },
    /// Boolean literal.
    Bool(bool),
    /// Raw documentation text rewritten by the filter.
    DocText { text: Name, placement: DocPlacement },
    /// Prefix operator application.
    Unary { op: UnaryOp, operand: ExprId },
    /// Strictly binary infix application.
    Binary { op: BinaryOp, left: ExprId, right: ExprId },
    /// Same-operator chain collapsed into one node (two or more args).
    Nary { op: NaryOp, args: ExprRange },
    /// Variadic `(...)` or `{...}` constructor; the delimiter is retained.
    Paren { delim: ParenDelim, items: ExprRange },
    /// Variadic `[...]` constructor.
    Sequence { items: ExprRange },
    /// Postfix call: `callee(args)`; `args` is always a `Paren` node.
    Call { callee: ExprId, args: ExprId },
    /// Postfix `?`.
    Optional { operand: ExprId },
    /// Documentation binding: `(doc leading body)` or `(doc body trailing)`.
    Doc { left: ExprId, right: ExprId },
}

/// Arena owning all expression nodes of one compilation.
#[derive(Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    children: Vec<ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    /// Allocate a node, returning its id.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena size is bounded far below u32::MAX by available memory"
        )]
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Allocate a contiguous child list.
    pub fn alloc_children(&mut self, ids: &[ExprId]) -> ExprRange {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena size is bounded far below u32::MAX by available memory"
        )]
        let start = self.children.len() as u32;
        self.children.extend_from_slice(ids);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena size is bounded far below u32::MAX by available memory"
        )]
        let end = self.children.len() as u32;
        ExprRange { start, end }
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn children(&self, range: ExprRange) -> &[ExprId] {
        &self.children[range.start as usize..range.end as usize]
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

crate::static_assert_size!(Expr, 24);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arena_alloc_and_get() {
        let mut arena = ExprArena::new();
        let a = arena.alloc(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
        let b = arena.alloc(Expr::new(ExprKind::Int(2), Span::new(4, 5)));
        assert_eq!(arena.get(a).kind, ExprKind::Int(1));
        assert_eq!(arena.get(b).span, Span::new(4, 5));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn child_ranges_are_contiguous() {
        let mut arena = ExprArena::new();
        let a = arena.alloc(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
        let b = arena.alloc(Expr::new(ExprKind::Int(2), Span::new(2, 3)));
        let c = arena.alloc(Expr::new(ExprKind::Int(3), Span::new(4, 5)));
        let range = arena.alloc_children(&[a, b, c]);
        assert_eq!(range.len(), 3);
        assert_eq!(arena.children(range), &[a, b, c]);
    }

    #[test]
    fn empty_child_range() {
        let mut arena = ExprArena::new();
        let range = arena.alloc_children(&[]);
        assert!(range.is_empty());
        assert_eq!(arena.children(range), &[] as &[ExprId]);
    }

    #[test]
    fn paren_delims_record_two_char_forms() {
        assert_eq!(ParenDelim::Paren.as_str(), "()");
        assert_eq!(ParenDelim::Brace.as_str(), "{}");
    }
}
