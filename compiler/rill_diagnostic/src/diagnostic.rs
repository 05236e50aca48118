use std::fmt;

use rill_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span inside a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
        }
    }
}

/// A structured diagnostic: severity, code, message, labeled spans.
///
/// Rendering to a terminal belongs to the embedding tool; this type only
/// carries the structure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Start an error-severity diagnostic for the given code.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code,
            message: code.description().to_owned(),
            labels: Vec::new(),
        }
    }

    /// Start a warning-severity diagnostic for the given code.
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            code,
            message: code.description().to_owned(),
            labels: Vec::new(),
        }
    }

    /// Replace the headline message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a labeled span.
    #[must_use]
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Span of the primary (first) label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.first().map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            write!(f, "\n  --> {}: {}", label.span, label.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_chains() {
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("unexpected `)`")
            .with_label(Span::new(4, 5), "here");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "unexpected `)`");
        assert_eq!(diag.primary_span(), Some(Span::new(4, 5)));
    }

    #[test]
    fn display_includes_code_and_labels() {
        let diag = Diagnostic::error(ErrorCode::E4001).with_label(Span::new(0, 3), "this division");
        let rendered = format!("{diag}");
        assert_eq!(
            rendered,
            "error[E4001]: division by zero\n  --> 0..3: this division"
        );
    }

    #[test]
    fn default_message_is_code_description() {
        let diag = Diagnostic::warning(ErrorCode::E0001);
        assert_eq!(diag.message, "unclosed string literal");
        assert_eq!(diag.primary_span(), None);
    }
}
