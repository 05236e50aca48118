//! Lexical analysis for the Rill compiler.
//!
//! [`scan`] turns source text into an offset/length token vector plus
//! the newline offsets used for position reporting. The documentation
//! filter then rewrites comment tokens for the parser; see
//! [`attach_documentation`].

mod cursor;
mod filter;
mod line_map;
mod scanner;

pub use filter::{attach_documentation, remove_documentation};
pub use line_map::LineMap;
pub use scanner::{scan, ScanOutcome};

/// Scan and apply the documentation filter in one step.
///
/// This is the token stream the parser consumes.
pub fn lex(source: &str) -> ScanOutcome {
    let outcome = scan(source);
    ScanOutcome {
        tokens: attach_documentation(source, &outcome.tokens),
        newline_offsets: outcome.newline_offsets,
    }
}
