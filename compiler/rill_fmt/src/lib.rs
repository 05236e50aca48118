//! Canonical source formatter.
//!
//! Prints an expression tree back to text in the canonical style: one
//! space around every infix operator except the tight forms (`.`
//! field references, `..` ranges, the `: ` qualifier), `, ` between
//! constructor items, `-x`/`not x` prefixes, and a `?` postfix. For
//! source already in canonical form, `format(parse(source))` returns
//! the source unchanged.

use rill_ir::{DocPlacement, ExprArena, ExprId, ExprKind, StringPool, UnaryOp};

/// Render the tree rooted at `root` in canonical form.
pub fn format_expr(arena: &ExprArena, root: ExprId, pool: &StringPool) -> String {
    let mut out = String::new();
    write_expr(&mut out, arena, pool, root);
    out
}

fn write_expr(out: &mut String, arena: &ExprArena, pool: &StringPool, id: ExprId) {
    match arena.get(id).kind {
        ExprKind::Ident(name) => out.push_str(pool.get(name)),
        ExprKind::Int(value) => {
            out.push_str(&value.to_string());
        }
        ExprKind::Float(bits) => {
            // `{:?}` keeps a decimal point so the literal rescans as a
            // float.
            out.push_str(&format!("{:?}", f64::from_bits(bits)));
        }
        ExprKind::Str { text, .. } => out.push_str(pool.get(text)),
        ExprKind::Bool(true) => out.push_str("true"),
        ExprKind::Bool(false) => out.push_str("false"),
        ExprKind::DocText { text, .. } => out.push_str(pool.get(text)),
        ExprKind::Unary { op, operand } => {
            out.push_str(match op {
                UnaryOp::Negate => "-",
                UnaryOp::Not => "not ",
            });
            write_expr(out, arena, pool, operand);
        }
        ExprKind::Binary { op, left, right } => {
            write_expr(out, arena, pool, left);
            out.push_str(op.surface());
            write_expr(out, arena, pool, right);
        }
        ExprKind::Nary { op, args } => {
            for (i, &arg) in arena.children(args).iter().enumerate() {
                if i > 0 {
                    out.push_str(op.surface());
                }
                write_expr(out, arena, pool, arg);
            }
        }
        ExprKind::Paren { delim, items } => {
            let [open, close] = delimiter_chars(delim.as_str());
            out.push(open);
            write_items(out, arena, pool, arena.children(items));
            out.push(close);
        }
        ExprKind::Sequence { items } => {
            out.push('[');
            write_items(out, arena, pool, arena.children(items));
            out.push(']');
        }
        ExprKind::Call { callee, args } => {
            write_expr(out, arena, pool, callee);
            write_expr(out, arena, pool, args);
        }
        ExprKind::Optional { operand } => {
            write_expr(out, arena, pool, operand);
            out.push('?');
        }
        ExprKind::Doc { left, right } => {
            write_doc(out, arena, pool, left, right);
        }
    }
}

fn write_items(out: &mut String, arena: &ExprArena, pool: &StringPool, items: &[ExprId]) {
    for (i, &item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, arena, pool, item);
    }
}

/// Leading docs print before the body (the doc text carries its own
/// newline); trailing docs print after it, separated by a space.
fn write_doc(out: &mut String, arena: &ExprArena, pool: &StringPool, left: ExprId, right: ExprId) {
    let leading = matches!(
        arena.get(left).kind,
        ExprKind::DocText {
            placement: DocPlacement::Leading,
            ..
        }
    );
    write_expr(out, arena, pool, left);
    if !leading {
        out.push(' ');
    }
    write_expr(out, arena, pool, right);
}

fn delimiter_chars(delim: &str) -> [char; 2] {
    let mut chars = delim.chars();
    [chars.next().unwrap_or('('), chars.next().unwrap_or(')')]
}
