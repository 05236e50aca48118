//! Pipeline error union.
//!
//! Each phase fails with its own error type; callers that drive the
//! whole pipeline get them folded into one enum that renders with a
//! line and column computed from the scan's newline offsets.

use rill_codegen::CodegenError;
use rill_diagnostic::Diagnostic;
use rill_parse::ParseError;
use rill_typeck::TypeError;
use rill_vm::RuntimeError;

/// Any failure between source text and result value.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PipelineError {
    Parse(ParseError),
    Type(TypeError),
    Codegen(CodegenError),
    Runtime(RuntimeError),
}

impl PipelineError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PipelineError::Parse(err) => err.to_diagnostic(),
            PipelineError::Type(err) => err.to_diagnostic(),
            PipelineError::Codegen(err) => err.to_diagnostic(),
            PipelineError::Runtime(err) => err.to_diagnostic(),
        }
    }

    /// Render against the source, with the primary span as line:column.
    pub fn render(&self, source: &str) -> String {
        let diagnostic = self.to_diagnostic();
        let Some(span) = diagnostic.primary_span() else {
            return format!("{}[{}]: {}", diagnostic.severity, diagnostic.code, diagnostic.message);
        };
        let outcome = rill_lexer::scan(source);
        let (line, column) = outcome.line_map().origin_of(span.start);
        format!(
            "{}[{}]: {} at {line}:{column}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        )
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Parse(err) => err.fmt(f),
            PipelineError::Type(err) => err.fmt(f),
            PipelineError::Codegen(err) => err.fmt(f),
            PipelineError::Runtime(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        PipelineError::Parse(err)
    }
}

impl From<TypeError> for PipelineError {
    fn from(err: TypeError) -> Self {
        PipelineError::Type(err)
    }
}

impl From<CodegenError> for PipelineError {
    fn from(err: CodegenError) -> Self {
        PipelineError::Codegen(err)
    }
}

impl From<RuntimeError> for PipelineError {
    fn from(err: RuntimeError) -> Self {
        PipelineError::Runtime(err)
    }
}
