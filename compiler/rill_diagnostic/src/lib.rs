//! Diagnostic and error reporting for the Rill compiler.
//!
//! Each pipeline phase carries its own error struct; all of them convert
//! into the structured [`Diagnostic`] defined here for uniform reporting.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
