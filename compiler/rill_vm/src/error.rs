use rill_diagnostic::{Diagnostic, ErrorCode};

/// A failure raised while executing or decoding bytecode.
///
/// Runtime errors carry the byte offset of the offending opcode instead
/// of a source span; the pipeline driver maps them back if needed.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RuntimeError {
    pub code: ErrorCode,
    pub message: String,
    /// Byte offset of the opcode in the code block.
    pub offset: usize,
}

impl RuntimeError {
    pub fn new(code: ErrorCode, message: impl Into<String>, offset: usize) -> Self {
        RuntimeError {
            code,
            message: message.into(),
            offset,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(format!("{} (at byte {})", self.message, self.offset))
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at byte {}", self.code, self.message, self.offset)
    }
}

impl std::error::Error for RuntimeError {}
