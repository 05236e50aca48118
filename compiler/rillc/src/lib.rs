//! Compilation pipeline driver for the Rill language.
//!
//! Threads one source string through scan, parse, check, lower, and
//! execute:
//!
//! ```
//! use rillc::{run, RunValue};
//!
//! let value = run("(5 + 6 - 1) * (0 + 1 + 2 + 3)");
//! assert_eq!(value, Ok(RunValue::Int64(60)));
//! ```

mod error;

pub use error::PipelineError;

use rill_ir::{StringPool, TypeId, TypePool};
use rill_vm::{CodeBlock, Machine};

/// A fully lowered program, ready to execute.
#[derive(Debug)]
pub struct Compiled {
    pub block: CodeBlock,
    /// Type of the value `RETURN` leaves on the stack.
    pub result_type: TypeId,
}

/// The result of running a program to completion.
#[derive(Clone, PartialEq, Debug)]
pub enum RunValue {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Str(String),
}

/// Compile a source string down to bytecode.
pub fn compile(source: &str) -> Result<Compiled, PipelineError> {
    let strings = StringPool::new();
    let parsed = rill_parse::parse(source, &strings)?;
    let types = TypePool::new();
    let checked = rill_typeck::check(&parsed.arena, parsed.root, &types)?;
    let block = rill_codegen::emit(&parsed.arena, parsed.root, &checked, &strings)?;
    tracing::debug!(bytes = block.len(), "compiled");
    Ok(Compiled {
        block,
        result_type: checked.root_type(),
    })
}

/// Compile and execute, returning the typed result value.
pub fn run(source: &str) -> Result<RunValue, PipelineError> {
    let compiled = compile(source)?;
    let mut machine = Machine::new(&compiled.block);
    machine.run()?;
    let value = match compiled.result_type {
        TypeId::FLOAT64 => machine.float64_result().map(RunValue::Float64),
        TypeId::BOOL => machine.bool_result().map(RunValue::Bool),
        TypeId::STRING => machine
            .string_result()
            .map(|text| RunValue::Str(text.to_owned())),
        _ => machine.int64_result().map(RunValue::Int64),
    };
    value.ok_or_else(|| {
        PipelineError::Runtime(rill_vm::RuntimeError::new(
            rill_diagnostic::ErrorCode::E4004,
            "execution finished without a result",
            compiled.block.len(),
        ))
    })
}

/// Parse and print back in canonical form.
pub fn format(source: &str) -> Result<String, PipelineError> {
    let strings = StringPool::new();
    let parsed = rill_parse::parse(source, &strings)?;
    Ok(rill_fmt::format_expr(&parsed.arena, parsed.root, &strings))
}
