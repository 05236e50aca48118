//! S-expression printer for expression trees.
//!
//! The textual form used by tests and tooling: every interior node prints
//! as `(<tag> <child> ...)`, leaves as `(<tag> <text>)`. String leaves
//! carry their surrounding quotes; `parenthesized` nodes record their
//! delimiter as a quoted two-character string.

use crate::{DocPlacement, ExprArena, ExprId, ExprKind, StringPool};

/// Prints arena-allocated expressions in S-expression form.
pub struct SexprPrinter<'a> {
    arena: &'a ExprArena,
    pool: &'a StringPool,
}

impl<'a> SexprPrinter<'a> {
    pub fn new(arena: &'a ExprArena, pool: &'a StringPool) -> Self {
        SexprPrinter { arena, pool }
    }

    /// Render the tree rooted at `id`.
    pub fn print(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write(&mut out, id);
        out
    }

    fn write(&self, out: &mut String, id: ExprId) {
        match self.arena.get(id).kind {
            ExprKind::Ident(name) => {
                out.push_str("(id ");
                out.push_str(self.pool.get(name));
                out.push(')');
            }
            ExprKind::Int(value) => {
                out.push_str(&format!("(int {value})"));
            }
            ExprKind::Float(bits) => {
                out.push_str(&format!("(float {})", f64::from_bits(bits)));
            }
            ExprKind::Str { text, .. } => {
                // Raw slice, quotes included.
                out.push_str("(string ");
                out.push_str(self.pool.get(text));
                out.push(')');
            }
            ExprKind::Bool(value) => {
                out.push_str(&format!("(bool {value})"));
            }
            ExprKind::DocText { text, placement } => {
                let tag = match placement {
                    DocPlacement::Leading => "leadingdoc",
                    DocPlacement::Trailing => "trailingdoc",
                };
                out.push('(');
                out.push_str(tag);
                out.push(' ');
                out.push_str(self.pool.get(text));
                out.push(')');
            }
            ExprKind::Unary { op, operand } => {
                self.node(out, op.sexpr_tag(), &[operand]);
            }
            ExprKind::Binary { op, left, right } => {
                self.node(out, op.sexpr_tag(), &[left, right]);
            }
            ExprKind::Nary { op, args } => {
                self.node(out, op.sexpr_tag(), self.arena.children(args));
            }
            ExprKind::Paren { delim, items } => {
                out.push_str("(parenthesized \"");
                out.push_str(delim.as_str());
                out.push('"');
                for &item in self.arena.children(items) {
                    out.push(' ');
                    self.write(out, item);
                }
                out.push(')');
            }
            ExprKind::Sequence { items } => {
                self.node(out, "sequence", self.arena.children(items));
            }
            ExprKind::Call { callee, args } => {
                self.node(out, "call", &[callee, args]);
            }
            ExprKind::Optional { operand } => {
                self.node(out, "optional", &[operand]);
            }
            ExprKind::Doc { left, right } => {
                self.node(out, "doc", &[left, right]);
            }
        }
    }

    fn node(&self, out: &mut String, tag: &str, children: &[ExprId]) {
        out.push('(');
        out.push_str(tag);
        for &child in children {
            out.push(' ');
            self.write(out, child);
        }
        out.push(')');
    }
}
