//! Single-pass scanner producing tokens and newline offsets.
//!
//! One dispatch on the current byte per token, with a focused method per
//! token family. Error conditions (unclosed strings, unrecognized
//! characters) are encoded as token kinds, not as `Result::Err`;
//! scanning always continues to EOF.

use rill_ir::{Token, TokenKind};

use crate::cursor::Cursor;
use crate::LineMap;

/// Result of scanning a source string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanOutcome {
    pub tokens: Vec<Token>,
    /// Byte offsets of every line feed in the source, strictly increasing.
    pub newline_offsets: Vec<u32>,
}

impl ScanOutcome {
    /// Line/column lookup over the newline offsets.
    pub fn line_map(&self) -> LineMap<'_> {
        LineMap::new(&self.newline_offsets)
    }
}

/// Scan a UTF-8 source string.
pub fn scan(source: &str) -> ScanOutcome {
    Scanner::new(source).scan()
}

struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    newline_offsets: Vec<u32>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            newline_offsets: Vec::new(),
        }
    }

    fn scan(mut self) -> ScanOutcome {
        loop {
            self.skip_whitespace();
            self.cursor.mark();
            if self.cursor.is_eof() {
                self.emit(TokenKind::Eof);
                break;
            }
            let kind = self.next_kind();
            self.emit(kind);
        }
        ScanOutcome {
            tokens: self.tokens,
            newline_offsets: self.newline_offsets,
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        self.tokens
            .push(Token::new(self.cursor.marked(), self.cursor.token_len(), kind));
    }

    /// Skip Unicode whitespace, recording every line feed.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.cursor.current_char() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                self.newline_offsets.push(self.cursor.pos());
            }
            self.cursor.advance_char();
        }
    }

    fn next_kind(&mut self) -> TokenKind {
        match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),
            b'0'..=b'9' => self.number(),
            b'\'' => self.quoted(
                b'\'',
                TokenKind::SingleQuotedString,
                TokenKind::UnclosedSingleQuotedString,
            ),
            b'"' => self.quoted(
                b'"',
                TokenKind::DoubleQuotedString,
                TokenKind::UnclosedDoubleQuotedString,
            ),
            b'`' => self.backtick(),
            b'/' => self.slash_or_comment(),
            b'&' => self.one_or_two(TokenKind::Amp, b'&', TokenKind::AmpAmp),
            b'=' => self.equal(),
            b'!' => self.bang(),
            b'<' => self.one_or_two(TokenKind::Lt, b'=', TokenKind::LtEq),
            b'>' => self.one_or_two(TokenKind::Gt, b'=', TokenKind::GtEq),
            b'-' => self.one_or_two(TokenKind::Minus, b'>', TokenKind::Arrow),
            b'?' => self.one_or_two(TokenKind::Question, b':', TokenKind::QuestionColon),
            b'.' => self.dot(),
            b'*' => self.single(TokenKind::Star),
            b':' => self.single(TokenKind::Colon),
            b',' => self.single(TokenKind::Comma),
            b'|' => self.single(TokenKind::Pipe),
            b'+' => self.single(TokenKind::Plus),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b';' => self.single(TokenKind::Semicolon),
            _ => self.non_ascii(),
        }
    }

    // ─── Simple punctuation ──────────────────────────────────────────────

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    /// Longest-match cascade for two-character punctuation.
    fn one_or_two(&mut self, one: TokenKind, second: u8, two: TokenKind) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current() == second {
            self.cursor.advance();
            two
        } else {
            one
        }
    }

    /// `=` vs `==` vs `===` vs `=~`.
    fn equal(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.current() {
            b'=' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    TokenKind::EqEqEq
                } else {
                    TokenKind::EqEq
                }
            }
            b'~' => {
                self.cursor.advance();
                TokenKind::Matches
            }
            _ => TokenKind::Eq,
        }
    }

    /// `!~`; a lone `!` is not part of the language (`not` is a keyword).
    fn bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current() == b'~' {
            self.cursor.advance();
            TokenKind::NotMatches
        } else {
            TokenKind::Unrecognized
        }
    }

    /// `.` vs `..` vs `...`.
    fn dot(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current() != b'.' {
            return TokenKind::Dot;
        }
        self.cursor.advance();
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            TokenKind::DotDotDot
        } else {
            TokenKind::DotDot
        }
    }

    // ─── Identifiers & numbers ───────────────────────────────────────────

    fn identifier(&mut self) -> TokenKind {
        self.cursor.advance_char();
        while let Some(c) = self.cursor.current_char() {
            if c != '_' && !c.is_alphanumeric() {
                break;
            }
            self.cursor.advance_char();
        }
        let text = self.cursor.slice(self.cursor.marked(), self.cursor.pos());
        TokenKind::keyword(text).unwrap_or(TokenKind::Ident)
    }

    fn number(&mut self) -> TokenKind {
        self.eat_digits();
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance(); // '.'
            self.eat_digits();
            TokenKind::Float
        } else {
            TokenKind::Int
        }
    }

    fn eat_digits(&mut self) {
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
    }

    // ─── Strings ─────────────────────────────────────────────────────────

    /// Single- or double-quoted string. A backslash escapes the next
    /// byte (escape semantics are opaque here); a literal newline
    /// terminates the token as unclosed without consuming the newline,
    /// so line counting stays correct.
    fn quoted(&mut self, quote: u8, closed: TokenKind, unclosed: TokenKind) -> TokenKind {
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_eof() {
                return unclosed;
            }
            let b = self.cursor.current();
            if b == b'\n' {
                return unclosed;
            }
            if b == b'\\' {
                self.cursor.advance();
                if self.cursor.is_eof() {
                    return unclosed;
                }
                if self.cursor.current() == b'\n' {
                    self.newline_offsets.push(self.cursor.pos());
                }
                self.cursor.advance_char();
                continue;
            }
            if b == quote {
                self.cursor.advance();
                return closed;
            }
            self.cursor.advance_char();
        }
    }

    /// Back-ticked string: consume to end of line (newline included),
    /// then keep consuming while the next line's first non-blank
    /// character is also a back-tick.
    fn backtick(&mut self) -> TokenKind {
        loop {
            if !self.eat_line_inclusive() {
                break;
            }
            match self.continuation_start(b'`') {
                Some(at) => self.cursor.advance_to(at),
                None => break,
            }
        }
        TokenKind::BacktickString
    }

    // ─── Comments ────────────────────────────────────────────────────────

    /// `/` vs `//`. Consecutive `//` lines (allowing leading blanks)
    /// coalesce into a single documentation token.
    fn slash_or_comment(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current() != b'/' {
            return TokenKind::Slash;
        }
        loop {
            if !self.eat_line_inclusive() {
                break;
            }
            match self.comment_continuation() {
                Some(at) => self.cursor.advance_to(at),
                None => break,
            }
        }
        TokenKind::Documentation
    }

    /// Consume up to and including the next newline, recording its
    /// offset. Returns `false` when the source ends without one.
    fn eat_line_inclusive(&mut self) -> bool {
        match self.cursor.next_newline() {
            Some(at) => {
                self.newline_offsets.push(at);
                self.cursor.advance_to(at + 1);
                true
            }
            None => {
                self.cursor.advance_to(self.cursor.source_len());
                false
            }
        }
    }

    /// After a consumed line: offset of `marker` if it is the first
    /// non-blank character of the next line.
    fn continuation_start(&self, marker: u8) -> Option<u32> {
        let mut at = self.cursor.pos();
        let len = self.cursor.source_len();
        while at < len {
            match self.cursor.byte_at(at) {
                b' ' | b'\t' => at += 1,
                b if b == marker => return Some(at),
                _ => return None,
            }
        }
        None
    }

    /// Like [`Self::continuation_start`] but requires the two-byte `//`.
    fn comment_continuation(&self) -> Option<u32> {
        let at = self.continuation_start(b'/')?;
        (self.cursor.byte_at(at + 1) == b'/').then_some(at)
    }

    // ─── Fallback ────────────────────────────────────────────────────────

    /// Non-ASCII dispatch: Unicode letters start identifiers, anything
    /// else is a single unrecognized character.
    fn non_ascii(&mut self) -> TokenKind {
        if let Some(c) = self.cursor.current_char() {
            if c.is_alphabetic() {
                return self.identifier();
            }
        }
        self.cursor.advance_char();
        TokenKind::Unrecognized
    }
}
