//! Documentation filter.
//!
//! Rewrites raw [`TokenKind::Documentation`] tokens into leading or
//! trailing documentation plus a zero-length [`TokenKind::SynthDocument`]
//! marker, so documentation binding reaches the parser as an ordinary
//! infix operator.

use rill_ir::{Token, TokenKind};

/// Rewrite every raw documentation token in place of the source order.
///
/// A comment becomes *trailing* when the token before it starts on the
/// same source line, is not itself the first token of that line, and is
/// not a `|`. Trailing docs that follow a `,` or `;` are hoisted in
/// front of the separator so they bind to the preceding list element.
/// Everything else becomes *leading* documentation for the content that
/// follows.
pub fn attach_documentation(source: &str, tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + 8);
    for (i, &token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Documentation {
            out.push(token);
            continue;
        }
        let synth = Token::new(token.offset, 0, TokenKind::SynthDocument);
        if trailing_context(source, tokens, i) {
            let trailing = Token::new(token.offset, token.len, TokenKind::TrailingDocumentation);
            let separator = match out.last() {
                Some(prev) if prev.kind.is_separator() => out.pop(),
                _ => None,
            };
            out.push(synth);
            out.push(trailing);
            out.extend(separator);
        } else {
            out.push(Token::new(
                token.offset,
                token.len,
                TokenKind::LeadingDocumentation,
            ));
            out.push(synth);
        }
    }
    out
}

/// Drop raw, rewritten, and synthetic documentation tokens entirely.
pub fn remove_documentation(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .copied()
        .filter(|t| !t.kind.is_documentation())
        .collect()
}

/// Whether the raw documentation token at `index` trails content on its
/// own line.
fn trailing_context(source: &str, tokens: &[Token], index: usize) -> bool {
    let Some(prev_index) = index.checked_sub(1) else {
        return false;
    };
    let prev = tokens[prev_index];
    if prev.kind == TokenKind::Pipe {
        return false;
    }
    if !same_line(source, prev.offset, tokens[index].offset) {
        return false;
    }
    // A token that itself starts its line makes the comment leading.
    let prev_starts_line = match prev_index.checked_sub(1) {
        Some(before) => !same_line(source, tokens[before].offset, prev.offset),
        None => true,
    };
    !prev_starts_line
}

/// No newline byte between the two token starts.
fn same_line(source: &str, earlier: u32, later: u32) -> bool {
    !source.as_bytes()[earlier as usize..later as usize].contains(&b'\n')
}
