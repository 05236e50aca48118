use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// A lowering failure: a typed expression the emitter cannot express
/// in the current opcode set.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CodegenError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl CodegenError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        CodegenError {
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

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.span)
    }
}

impl std::error::Error for CodegenError {}
