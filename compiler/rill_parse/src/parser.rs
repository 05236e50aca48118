//! Pratt expression parser.
//!
//! `parse_expr(min_bp)` reads a prefix (*nud*) expression, then while
//! the next token's left binding power exceeds `min_bp` consumes it as
//! an infix or postfix (*led*), recursing with the operator's right
//! binding power. See [`crate::bp`] for the operator catalog.

use rill_diagnostic::ErrorCode;
use rill_ir::{
    DocPlacement, Expr, ExprArena, ExprId, ExprKind, ExprRange, NaryOp, ParenDelim, Span,
    StrStyle, StringPool, Token, TokenKind, UnaryOp,
};

use crate::bp::{infix_rule, prefix_binding_power, InfixOp, InfixRule};
use crate::cursor::TokenCursor;
use crate::ParseError;

/// A parsed expression tree: the arena plus its root.
#[derive(Debug)]
pub struct ParseOutcome {
    pub arena: ExprArena,
    pub root: ExprId,
}

/// Lex and parse a complete source string into one expression.
///
/// Identifier, string, and documentation text is interned in `pool`.
pub fn parse(source: &str, pool: &StringPool) -> Result<ParseOutcome, ParseError> {
    let lexed = rill_lexer::lex(source);
    Parser::new(source, &lexed.tokens, pool).parse()
}

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    arena: ExprArena,
    pool: &'a StringPool,
}

impl<'a> Parser<'a> {
    /// Parser over an already filtered token stream.
    pub fn new(source: &'a str, tokens: &'a [Token], pool: &'a StringPool) -> Self {
        Parser {
            cursor: TokenCursor::new(source, tokens),
            arena: ExprArena::new(),
            pool,
        }
    }

    /// Parse a single expression spanning the whole token stream.
    pub fn parse(mut self) -> Result<ParseOutcome, ParseError> {
        let root = self.parse_expr(0)?;
        if !self.cursor.at(TokenKind::Eof) {
            return Err(ParseError::new(
                ErrorCode::E1001,
                format!("unexpected {} after expression", self.cursor.describe()),
                self.cursor.span(),
            ));
        }
        tracing::trace!(nodes = self.arena.len(), "parsed expression");
        Ok(ParseOutcome {
            arena: self.arena,
            root,
        })
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<ExprId, ParseError> {
        let mut lhs = self.nud()?;
        while let Some(rule) = infix_rule(self.cursor.kind()) {
            if rule.lbp <= min_bp {
                break;
            }
            lhs = self.led(lhs, rule)?;
        }
        Ok(lhs)
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get(id).span
    }

    // ─── Prefix position ─────────────────────────────────────────────────

    fn nud(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Ident => self.leaf(|p, t| ExprKind::Ident(p.pool.put(t))),
            TokenKind::Int => self.int_literal(),
            TokenKind::Float => self.float_literal(),
            TokenKind::True => self.leaf(|_, _| ExprKind::Bool(true)),
            TokenKind::False => self.leaf(|_, _| ExprKind::Bool(false)),
            TokenKind::SingleQuotedString => self.string_literal(StrStyle::Single),
            TokenKind::DoubleQuotedString => self.string_literal(StrStyle::Double),
            TokenKind::BacktickString => self.string_literal(StrStyle::Multiline),
            TokenKind::LeadingDocumentation => self.doc_text(DocPlacement::Leading),
            TokenKind::TrailingDocumentation => self.doc_text(DocPlacement::Trailing),
            TokenKind::Minus | TokenKind::Not => self.prefix(token.kind),
            TokenKind::LParen => self.constructor(ParenDelim::Paren.into(), TokenKind::RParen),
            TokenKind::LBrace => self.constructor(ParenDelim::Brace.into(), TokenKind::RBrace),
            TokenKind::LBracket => self.constructor(Constructor::Sequence, TokenKind::RBracket),
            TokenKind::UnclosedSingleQuotedString | TokenKind::UnclosedDoubleQuotedString => {
                Err(ParseError::new(
                    ErrorCode::E0001,
                    "unclosed string literal",
                    token.span(),
                ))
            }
            TokenKind::Unrecognized => Err(ParseError::new(
                ErrorCode::E0002,
                format!("unrecognized character {}", self.cursor.describe()),
                token.span(),
            )),
            TokenKind::As | TokenKind::Of | TokenKind::To => Err(ParseError::new(
                ErrorCode::E1006,
                format!("reserved keyword {} has no operator role", self.cursor.describe()),
                token.span(),
            )),
            _ => Err(ParseError::new(
                ErrorCode::E1002,
                format!("expected expression, found {}", self.cursor.describe()),
                token.span(),
            )),
        }
    }

    /// Single-token leaf, with access to the token text.
    fn leaf(
        &mut self,
        build: impl FnOnce(&Parser<'a>, &str) -> ExprKind,
    ) -> Result<ExprId, ParseError> {
        let token = self.cursor.advance();
        let kind = build(self, self.cursor.text(token));
        Ok(self.alloc(kind, token.span()))
    }

    fn int_literal(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.advance();
        let text = self.cursor.text(token);
        match text.parse::<i64>() {
            Ok(value) => Ok(self.alloc(ExprKind::Int(value), token.span())),
            Err(_) => Err(ParseError::new(
                ErrorCode::E1004,
                format!("integer literal `{text}` does not fit in 64 bits"),
                token.span(),
            )),
        }
    }

    fn float_literal(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.advance();
        let text = self.cursor.text(token);
        match text.parse::<f64>() {
            Ok(value) => Ok(self.alloc(ExprKind::Float(value.to_bits()), token.span())),
            Err(_) => Err(ParseError::new(
                ErrorCode::E1005,
                format!("invalid floating-point literal `{text}`"),
                token.span(),
            )),
        }
    }

    fn string_literal(&mut self, style: StrStyle) -> Result<ExprId, ParseError> {
        // The raw slice, quotes included; codegen strips them.
        self.leaf(|p, t| ExprKind::Str {
            text: p.pool.put(t),
            style,
        })
    }

    fn doc_text(&mut self, placement: DocPlacement) -> Result<ExprId, ParseError> {
        self.leaf(|p, t| ExprKind::DocText {
            text: p.pool.put(t),
            placement,
        })
    }

    fn prefix(&mut self, kind: TokenKind) -> Result<ExprId, ParseError> {
        let token = self.cursor.advance();
        let op = match kind {
            TokenKind::Minus => UnaryOp::Negate,
            _ => UnaryOp::Not,
        };
        let rbp = prefix_binding_power(kind).unwrap_or(0);
        let operand = self.parse_expr(rbp)?;
        let span = token.span().merge(self.span_of(operand));
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    /// Variadic `(...)`, `{...}`, or `[...]` constructor.
    fn constructor(
        &mut self,
        shape: Constructor,
        close: TokenKind,
    ) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance();
        let (items, close_span) = self.item_list(open, close)?;
        let span = open.span().merge(close_span);
        let kind = match shape {
            Constructor::Paren(delim) => ExprKind::Paren { delim, items },
            Constructor::Sequence => ExprKind::Sequence { items },
        };
        Ok(self.alloc(kind, span))
    }

    /// Separator-delimited expressions up to `close`; empty lists and a
    /// trailing separator are legal.
    fn item_list(
        &mut self,
        open: Token,
        close: TokenKind,
    ) -> Result<(ExprRange, Span), ParseError> {
        let mut items = Vec::new();
        while !self.cursor.at(close) {
            if self.cursor.at(TokenKind::Eof) {
                return Err(ParseError::new(
                    ErrorCode::E1003,
                    format!("unclosed `{}`", self.cursor.text(open)),
                    open.span(),
                ));
            }
            items.push(self.parse_expr(0)?);
            if !(self.cursor.eat(TokenKind::Comma) || self.cursor.eat(TokenKind::Semicolon)) {
                break;
            }
        }
        let close_token = self.cursor.expect(close)?;
        Ok((self.arena.alloc_children(&items), close_token.span()))
    }

    // ─── Infix position ──────────────────────────────────────────────────

    fn led(&mut self, lhs: ExprId, rule: InfixRule) -> Result<ExprId, ParseError> {
        match rule.op {
            InfixOp::Binary(op) => {
                self.cursor.advance();
                let rhs = self.parse_expr(rule.rbp)?;
                let span = self.span_of(lhs).merge(self.span_of(rhs));
                Ok(self.alloc(ExprKind::Binary { op, left: lhs, right: rhs }, span))
            }
            InfixOp::Nary(op) => {
                let operator = self.cursor.advance();
                self.nary_chain(op, operator.kind, lhs, rule.rbp)
            }
            InfixOp::Optional => {
                let token = self.cursor.advance();
                let span = self.span_of(lhs).merge(token.span());
                Ok(self.alloc(ExprKind::Optional { operand: lhs }, span))
            }
            InfixOp::Call => self.call(lhs),
            InfixOp::Doc => {
                self.cursor.advance();
                let rhs = self.parse_expr(rule.rbp)?;
                let span = self.span_of(lhs).merge(self.span_of(rhs));
                Ok(self.alloc(ExprKind::Doc { left: lhs, right: rhs }, span))
            }
        }
    }

    /// Collapse a chain of the same operator token into one n-ary node.
    fn nary_chain(
        &mut self,
        op: NaryOp,
        operator: TokenKind,
        first: ExprId,
        rbp: u8,
    ) -> Result<ExprId, ParseError> {
        let mut args = vec![first];
        loop {
            args.push(self.parse_expr(rbp)?);
            if !self.cursor.eat(operator) {
                break;
            }
        }
        let span = self
            .span_of(first)
            .merge(self.span_of(args[args.len() - 1]));
        let args = self.arena.alloc_children(&args);
        Ok(self.alloc(ExprKind::Nary { op, args }, span))
    }

    /// Postfix call: `callee(args)`. The argument list is kept as a
    /// `parenthesized "()"` node so calls and groupings print alike.
    fn call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance();
        let (items, close_span) = self.item_list(open, TokenKind::RParen)?;
        let args_span = open.span().merge(close_span);
        let args = self.alloc(
            ExprKind::Paren {
                delim: ParenDelim::Paren,
                items,
            },
            args_span,
        );
        let span = self.span_of(callee).merge(args_span);
        Ok(self.alloc(ExprKind::Call { callee, args }, span))
    }
}

/// Shape of a variadic constructor in prefix position.
#[derive(Copy, Clone)]
enum Constructor {
    Paren(ParenDelim),
    Sequence,
}

impl From<ParenDelim> for Constructor {
    fn from(delim: ParenDelim) -> Self {
        Constructor::Paren(delim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rill_ir::SexprPrinter;

    fn sexpr(source: &str) -> String {
        let pool = StringPool::new();
        match parse(source, &pool) {
            Ok(outcome) => SexprPrinter::new(&outcome.arena, &pool).print(outcome.root),
            Err(err) => panic!("parse failed for `{source}`: {err}"),
        }
    }

    fn parse_err(source: &str) -> ParseError {
        let pool = StringPool::new();
        match parse(source, &pool) {
            Ok(_) => panic!("expected `{source}` to fail"),
            Err(err) => err,
        }
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(
            sexpr("a + b / 2 - c"),
            "(subtract (add (id a) (divide (id b) (int 2))) (id c))"
        );
    }

    #[test]
    fn variadic_record_with_qualify() {
        assert_eq!(
            sexpr("{x: int && 5, y: string && \"s\"}"),
            "(parenthesized \"{}\" (qualify (id x) (intersectlowprecedence (id int) (int 5))) \
             (qualify (id y) (intersectlowprecedence (id string) (string \"s\"))))"
        );
    }

    #[test]
    fn same_operator_chains_collapse() {
        assert_eq!(
            sexpr("0 + 1 + 2 + 3"),
            "(add (int 0) (int 1) (int 2) (int 3))"
        );
        assert_eq!(sexpr("a.b.c"), "(fieldref (id a) (id b) (id c))");
        assert_eq!(
            sexpr("a and b and c or d"),
            "(or (and (id a) (id b) (id c)) (id d))"
        );
    }

    #[test]
    fn mixed_additive_does_not_collapse() {
        assert_eq!(
            sexpr("5 + 6 - 1"),
            "(subtract (add (int 5) (int 6)) (int 1))"
        );
    }

    #[test]
    fn prefix_negate_and_not() {
        assert_eq!(sexpr("-(7 - 3) + 1"), "(add (negate (parenthesized \"()\" (subtract (int 7) (int 3)))) (int 1))");
        assert_eq!(sexpr("not a and b"), "(and (not (id a)) (id b))");
        assert_eq!(sexpr("-a.b"), "(negate (fieldref (id a) (id b)))");
    }

    #[test]
    fn union_of_when_guards() {
        assert_eq!(
            sexpr("a when x | b when y"),
            "(union (when (id a) (id x)) (when (id b) (id y)))"
        );
        assert_eq!(
            sexpr("a when x | b when y | c"),
            "(union (when (id a) (id x)) (when (id b) (id y)) (id c))"
        );
    }

    #[test]
    fn where_scopes_a_record() {
        assert_eq!(
            sexpr("a + b where {b = 1}"),
            "(where (add (id a) (id b)) (parenthesized \"{}\" (intersectassign (id b) (int 1))))"
        );
    }

    #[test]
    fn qualify_default_and_assign_stack() {
        assert_eq!(
            sexpr("x: int ?: 0"),
            "(qualify (id x) (intersectdefault (id int) (int 0)))"
        );
        assert_eq!(
            sexpr("x = a | b"),
            "(intersectassign (id x) (union (id a) (id b)))"
        );
    }

    #[test]
    fn comparisons_and_membership() {
        assert_eq!(sexpr("a == b"), "(equal (id a) (id b))");
        assert_eq!(sexpr("a === b"), "(identical (id a) (id b))");
        assert_eq!(sexpr("a =~ b"), "(match (id a) (id b))");
        assert_eq!(sexpr("a !~ b"), "(notmatch (id a) (id b))");
        assert_eq!(
            sexpr("a in 1 .. 10"),
            "(in (id a) (range (int 1) (int 10)))"
        );
        assert_eq!(sexpr("a is int"), "(is (id a) (id int))");
        assert_eq!(sexpr("1 < 2 == true"), "(equal (lessthan (int 1) (int 2)) (bool true))");
    }

    #[test]
    fn intersections_order() {
        assert_eq!(
            sexpr("a && b & c"),
            "(intersectlowprecedence (id a) (intersect (id b) (id c)))"
        );
        assert_eq!(sexpr("a -> b"), "(arrow (id a) (id b))");
    }

    #[test]
    fn postfix_optional_and_call() {
        assert_eq!(sexpr("a?"), "(optional (id a))");
        assert_eq!(sexpr("a.b?"), "(optional (fieldref (id a) (id b)))");
        assert_eq!(
            sexpr("f(a, b)"),
            "(call (id f) (parenthesized \"()\" (id a) (id b)))"
        );
        assert_eq!(
            sexpr("a.b(x)"),
            "(call (fieldref (id a) (id b)) (parenthesized \"()\" (id x)))"
        );
        assert_eq!(sexpr("f()"), "(call (id f) (parenthesized \"()\"))");
    }

    #[test]
    fn empty_and_nested_constructors() {
        assert_eq!(sexpr("()"), "(parenthesized \"()\")");
        assert_eq!(sexpr("{}"), "(parenthesized \"{}\")");
        assert_eq!(sexpr("[]"), "(sequence)");
        assert_eq!(
            sexpr("[1, [2, 3]]"),
            "(sequence (int 1) (sequence (int 2) (int 3)))"
        );
        assert_eq!(
            sexpr("{a, b,}"),
            "(parenthesized \"{}\" (id a) (id b))"
        );
    }

    #[test]
    fn literals() {
        assert_eq!(sexpr("3.25"), "(float 3.25)");
        assert_eq!(sexpr("false"), "(bool false)");
        assert_eq!(sexpr("'s'"), "(string 's')");
    }

    #[test]
    fn leading_documentation_binds_to_following_primary() {
        assert_eq!(
            sexpr("// note\nx + y"),
            "(add (doc (leadingdoc // note\n) (id x)) (id y))"
        );
    }

    #[test]
    fn trailing_documentation_binds_to_list_element() {
        assert_eq!(
            sexpr("{x, // doc\ny}"),
            "(parenthesized \"{}\" (doc (id x) (trailingdoc // doc\n)) (id y))"
        );
    }

    #[test]
    fn root_span_encloses_children() {
        let pool = StringPool::new();
        let source = "a + b * c";
        let Ok(outcome) = parse(source, &pool) else {
            panic!("parse failed");
        };
        let root_span = outcome.arena.get(outcome.root).span;
        assert_eq!(root_span, Span::new(0, 9));
    }

    #[test]
    fn error_unexpected_trailing_token() {
        let err = parse_err("a b");
        assert_eq!(err.code, ErrorCode::E1001);
    }

    #[test]
    fn error_expected_expression() {
        assert_eq!(parse_err("+ a").code, ErrorCode::E1002);
        assert_eq!(parse_err("").code, ErrorCode::E1002);
    }

    #[test]
    fn error_unclosed_delimiter() {
        let err = parse_err("(a, b");
        assert_eq!(err.code, ErrorCode::E1003);
        assert_eq!(err.span, Span::new(0, 1));
    }

    #[test]
    fn error_reserved_keyword() {
        assert_eq!(parse_err("a as b").code, ErrorCode::E1001);
        assert_eq!(parse_err("as").code, ErrorCode::E1006);
    }

    #[test]
    fn error_integer_overflow() {
        assert_eq!(parse_err("99999999999999999999").code, ErrorCode::E1004);
    }

    #[test]
    fn error_unclosed_string() {
        assert_eq!(parse_err("'open").code, ErrorCode::E0001);
    }
}
