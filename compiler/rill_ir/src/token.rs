//! Token types for the Rill scanner.
//!
//! Tokens carry no copied text: an 8-byte `(offset, length, kind)` triple
//! refers back to the exact source slice the scanner consumed.

use std::fmt;

use crate::Span;

/// A scanned token: 8 bytes total.
///
/// Text is recovered as `source[offset .. offset + len]`; see [`Token::text`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    /// Byte offset of the token start in the source.
    pub offset: u32,
    /// Byte length of the token.
    pub len: u16,
    /// Token kind tag.
    pub kind: TokenKind,
}

impl Token {
    #[inline]
    pub const fn new(offset: u32, len: u16, kind: TokenKind) -> Self {
        Token { offset, len, kind }
    }

    /// Byte offset one past the end of the token.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset + self.len as u32
    }

    /// The token's span in the source.
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }

    /// Recover the exact source slice this token was scanned from.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.offset as usize..self.end() as usize]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}+{}", self.kind, self.offset, self.len)
    }
}

/// Token kinds for Rill.
///
/// Fieldless so that a token stays at 8 bytes; literal payloads are
/// recovered from the source slice when the parser needs them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum TokenKind {
    // Punctuation
    Amp,          // &
    AmpAmp,       // &&
    Star,         // *
    Colon,        // :
    Comma,        // ,
    Dot,          // .
    DotDot,       // ..
    DotDotDot,    // ...
    Eq,           // =
    EqEq,         // ==
    EqEqEq,       // ===
    Matches,      // =~
    NotMatches,   // !~
    Lt,           // <
    LtEq,         // <=
    Gt,           // >
    GtEq,         // >=
    Arrow,        // ->
    Question,     // ?
    QuestionColon, // ?:
    Pipe,         // |
    Plus,         // +
    Minus,        // -
    Slash,        // /
    LParen,       // (
    RParen,       // )
    LBracket,     // [
    RBracket,     // ]
    LBrace,       // {
    RBrace,       // }
    Semicolon,    // ;

    // Keywords
    And,
    As,
    In,
    Is,
    Not,
    Of,
    Or,
    To,
    When,
    Where,
    True,
    False,

    // Literals
    Ident,
    Int,
    Float,
    BacktickString,
    SingleQuotedString,
    DoubleQuotedString,
    UnclosedSingleQuotedString,
    UnclosedDoubleQuotedString,

    // Documentation
    Documentation,
    LeadingDocumentation,
    TrailingDocumentation,
    /// Zero-length marker synthesized by the documentation filter so the
    /// parser sees documentation binding as a regular infix operator.
    SynthDocument,

    Eof,
    Unrecognized,
}

impl TokenKind {
    /// Canonical spelling of fixed-text tokens (punctuation and keywords).
    ///
    /// Returns `None` for kinds whose text varies (identifiers, literals,
    /// documentation) and for the zero-length `SynthDocument`/`Eof`.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Star => "*",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::DotDotDot => "...",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::EqEqEq => "===",
            TokenKind::Matches => "=~",
            TokenKind::NotMatches => "!~",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Arrow => "->",
            TokenKind::Question => "?",
            TokenKind::QuestionColon => "?:",
            TokenKind::Pipe => "|",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::And => "and",
            TokenKind::As => "as",
            TokenKind::In => "in",
            TokenKind::Is => "is",
            TokenKind::Not => "not",
            TokenKind::Of => "of",
            TokenKind::Or => "or",
            TokenKind::To => "to",
            TokenKind::When => "when",
            TokenKind::Where => "where",
            TokenKind::True => "true",
            TokenKind::False => "false",
            _ => return None,
        };
        Some(text)
    }

    /// Look up an identifier against the keyword table.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "and" => TokenKind::And,
            "as" => TokenKind::As,
            "in" => TokenKind::In,
            "is" => TokenKind::Is,
            "not" => TokenKind::Not,
            "of" => TokenKind::Of,
            "or" => TokenKind::Or,
            "to" => TokenKind::To,
            "when" => TokenKind::When,
            "where" => TokenKind::Where,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Raw or rewritten documentation, including the synthetic marker.
    pub fn is_documentation(self) -> bool {
        matches!(
            self,
            TokenKind::Documentation
                | TokenKind::LeadingDocumentation
                | TokenKind::TrailingDocumentation
                | TokenKind::SynthDocument
        )
    }

    /// List-element separators the documentation filter hoists over.
    pub fn is_separator(self) -> bool {
        matches!(self, TokenKind::Comma | TokenKind::Semicolon)
    }
}

crate::static_assert_size!(Token, 8);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_text_recovers_source_slice() {
        let source = "alpha + 12";
        let tok = Token::new(8, 2, TokenKind::Int);
        assert_eq!(tok.text(source), "12");
        assert_eq!(tok.span(), Span::new(8, 10));
    }

    #[test]
    fn keyword_table_round_trips_fixed_text() {
        for kind in [
            TokenKind::And,
            TokenKind::As,
            TokenKind::In,
            TokenKind::Is,
            TokenKind::Not,
            TokenKind::Of,
            TokenKind::Or,
            TokenKind::To,
            TokenKind::When,
            TokenKind::Where,
            TokenKind::True,
            TokenKind::False,
        ] {
            let Some(text) = kind.fixed_text() else {
                panic!("keyword {kind:?} must have fixed text");
            };
            assert_eq!(TokenKind::keyword(text), Some(kind));
        }
    }

    #[test]
    fn non_keywords_do_not_resolve() {
        assert_eq!(TokenKind::keyword("android"), None);
        assert_eq!(TokenKind::keyword(""), None);
        assert_eq!(TokenKind::keyword("True"), None);
    }

    #[test]
    fn variable_text_kinds_have_no_fixed_text() {
        assert_eq!(TokenKind::Ident.fixed_text(), None);
        assert_eq!(TokenKind::Int.fixed_text(), None);
        assert_eq!(TokenKind::Documentation.fixed_text(), None);
        assert_eq!(TokenKind::SynthDocument.fixed_text(), None);
        assert_eq!(TokenKind::Eof.fixed_text(), None);
    }
}
