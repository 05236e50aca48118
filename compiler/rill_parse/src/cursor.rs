//! Token cursor for navigating the filtered token stream.

use rill_diagnostic::ErrorCode;
use rill_ir::{Span, Token, TokenKind};

use crate::ParseError;

/// Cursor over the filtered token vector with one-token lookahead.
///
/// Invariant: the stream ends with an EOF token and the position never
/// moves past it, so `current` is always valid.
pub struct TokenCursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        debug_assert!(matches!(
            tokens.last(),
            Some(t) if t.kind == TokenKind::Eof
        ));
        TokenCursor {
            source,
            tokens,
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.current().span()
    }

    /// Source text of a token.
    #[inline]
    pub fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a required token or fail with an unexpected-token error.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            let expected = kind.fixed_text().unwrap_or("expression");
            Err(ParseError::new(
                ErrorCode::E1001,
                format!("expected `{expected}`, found {}", self.describe()),
                self.span(),
            ))
        }
    }

    /// Short description of the current token for error messages.
    pub fn describe(&self) -> String {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => "end of input".to_owned(),
            _ => format!("`{}`", self.text(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cursor_over(source: &str) -> (Vec<Token>, String) {
        (rill_lexer::scan(source).tokens, source.to_owned())
    }

    #[test]
    fn advance_stops_at_eof() {
        let (tokens, source) = cursor_over("a b");
        let mut cursor = TokenCursor::new(&source, &tokens);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.kind(), TokenKind::Eof);
        cursor.advance();
        assert_eq!(cursor.kind(), TokenKind::Eof);
    }

    #[test]
    fn eat_and_expect() {
        let (tokens, source) = cursor_over("( )");
        let mut cursor = TokenCursor::new(&source, &tokens);
        assert!(cursor.eat(TokenKind::LParen));
        assert!(!cursor.eat(TokenKind::LParen));
        let Ok(token) = cursor.expect(TokenKind::RParen) else {
            panic!("expected `)` to be accepted");
        };
        assert_eq!(token.kind, TokenKind::RParen);
    }

    #[test]
    fn expect_failure_names_both_sides() {
        let (tokens, source) = cursor_over("+");
        let mut cursor = TokenCursor::new(&source, &tokens);
        let Err(err) = cursor.expect(TokenKind::RParen) else {
            panic!("expected failure");
        };
        assert_eq!(err.message, "expected `)`, found `+`");
    }
}
