use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// A type-checking failure, carrying the offending source span.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl TypeError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        TypeError {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.span)
    }
}

impl std::error::Error for TypeError {}
