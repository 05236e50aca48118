//! Parse error type.
//!
//! The parser fails fast: the first unexpected token aborts the current
//! expression and surfaces here with its source span.

use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// A single parse failure.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Convert into a structured diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_to_diagnostic() {
        let err = ParseError::new(ErrorCode::E1001, "unexpected `)`", Span::new(3, 4));
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1001);
        assert_eq!(diag.message, "unexpected `)`");
        assert_eq!(diag.primary_span(), Some(Span::new(3, 4)));
    }
}
