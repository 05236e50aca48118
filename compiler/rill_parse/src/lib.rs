//! Pratt expression parser for the Rill compiler.
//!
//! Consumes the filtered token stream from `rill_lexer` and produces an
//! arena-allocated expression tree. The parser fails fast on the first
//! unexpected token; recovery is not attempted.

mod bp;
mod cursor;
mod error;
mod parser;

pub use cursor::TokenCursor;
pub use error::ParseError;
pub use parser::{parse, ParseOutcome, Parser};
