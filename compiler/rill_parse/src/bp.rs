//! Operator binding powers.
//!
//! Higher binds tighter. Left BP competes against the current minimum;
//! right BP is the recursion floor for the operand that follows. Equal
//! left/right pairs with `(n, n + 1)` give left associativity.

use rill_ir::{BinaryOp, NaryOp, TokenKind};

/// What an infix-position token does to the expression on its left.
#[derive(Copy, Clone, Debug)]
pub(crate) enum InfixOp {
    /// Strictly binary operator.
    Binary(BinaryOp),
    /// Operator whose same-token chains collapse into one n-ary node.
    Nary(NaryOp),
    /// Postfix `?`, no right operand.
    Optional,
    /// Postfix call `(` immediately after a primary.
    Call,
    /// Synthetic documentation marker binding doc text to its neighbor.
    Doc,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct InfixRule {
    pub op: InfixOp,
    pub lbp: u8,
    pub rbp: u8,
}

const fn rule(op: InfixOp, lbp: u8, rbp: u8) -> InfixRule {
    InfixRule { op, lbp, rbp }
}

/// The infix operator catalog.
pub(crate) fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    use InfixOp::{Binary, Call, Doc, Nary, Optional};
    let rule = match kind {
        TokenKind::Eq => rule(Binary(BinaryOp::IntersectAssign), 10, 10),
        TokenKind::Where => rule(Binary(BinaryOp::Where), 20, 21),
        TokenKind::Colon => rule(Binary(BinaryOp::Qualify), 30, 31),
        TokenKind::QuestionColon => rule(Binary(BinaryOp::IntersectDefault), 40, 41),
        TokenKind::Pipe => rule(Nary(NaryOp::Union), 50, 51),
        TokenKind::When => rule(Binary(BinaryOp::When), 60, 61),
        TokenKind::Or => rule(Nary(NaryOp::Or), 70, 71),
        TokenKind::And => rule(Nary(NaryOp::And), 72, 73),
        TokenKind::EqEq => rule(Binary(BinaryOp::Equal), 80, 81),
        TokenKind::EqEqEq => rule(Binary(BinaryOp::Identical), 80, 81),
        TokenKind::Lt => rule(Binary(BinaryOp::LessThan), 80, 81),
        TokenKind::LtEq => rule(Binary(BinaryOp::LessThanOrEqual), 80, 81),
        TokenKind::Gt => rule(Binary(BinaryOp::GreaterThan), 80, 81),
        TokenKind::GtEq => rule(Binary(BinaryOp::GreaterThanOrEqual), 80, 81),
        TokenKind::Matches => rule(Binary(BinaryOp::Matches), 80, 81),
        TokenKind::NotMatches => rule(Binary(BinaryOp::NotMatches), 80, 81),
        TokenKind::In => rule(Binary(BinaryOp::In), 82, 83),
        TokenKind::Is => rule(Binary(BinaryOp::Is), 82, 83),
        TokenKind::DotDot => rule(Binary(BinaryOp::Range), 84, 85),
        TokenKind::AmpAmp => rule(Binary(BinaryOp::IntersectLowPrecedence), 86, 87),
        TokenKind::Amp => rule(Binary(BinaryOp::Intersect), 88, 89),
        TokenKind::Arrow => rule(Binary(BinaryOp::Arrow), 90, 91),
        TokenKind::Plus => rule(Nary(NaryOp::Add), 100, 101),
        TokenKind::Minus => rule(Nary(NaryOp::Subtract), 100, 101),
        TokenKind::Star => rule(Nary(NaryOp::Multiply), 110, 111),
        TokenKind::Slash => rule(Nary(NaryOp::Divide), 110, 111),
        TokenKind::Question => rule(Optional, 130, 0),
        TokenKind::Dot => rule(Nary(NaryOp::FieldRef), 140, 141),
        // Call binds as tightly as the field-reference right side so
        // `a.b(x)` is a call on the field reference.
        TokenKind::LParen => rule(Call, 141, 0),
        TokenKind::SynthDocument => rule(Doc, 150, 151),
        _ => return None,
    };
    Some(rule)
}

/// Right binding power of prefix operators.
pub(crate) fn prefix_binding_power(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Not => Some(74),
        TokenKind::Minus => Some(120),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_associative_pairs() {
        for kind in [
            TokenKind::Plus,
            TokenKind::Star,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Dot,
            TokenKind::Colon,
        ] {
            let Some(rule) = infix_rule(kind) else {
                panic!("missing rule for {kind:?}");
            };
            assert!(rule.rbp == rule.lbp + 1, "{kind:?}");
        }
    }

    #[test]
    fn multiplicative_over_additive_over_comparison() {
        let bp = |kind| match infix_rule(kind) {
            Some(rule) => rule.lbp,
            None => 0,
        };
        assert!(bp(TokenKind::Star) > bp(TokenKind::Plus));
        assert!(bp(TokenKind::Plus) > bp(TokenKind::EqEq));
        assert!(bp(TokenKind::EqEq) > bp(TokenKind::And));
        assert!(bp(TokenKind::And) > bp(TokenKind::Or));
        assert!(bp(TokenKind::Or) > bp(TokenKind::When));
        assert!(bp(TokenKind::When) > bp(TokenKind::Pipe));
    }

    #[test]
    fn doc_marker_binds_tightest() {
        let Some(doc) = infix_rule(TokenKind::SynthDocument) else {
            panic!("missing doc rule");
        };
        let Some(dot) = infix_rule(TokenKind::Dot) else {
            panic!("missing dot rule");
        };
        assert!(doc.lbp > dot.rbp);
    }
}
