//! End-to-end pipeline tests: source text in, value or rendered error
//! out.

use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;
use rillc::{compile, format, run, PipelineError, RunValue};

#[test]
fn evaluates_integer_expression() {
    assert_eq!(
        run("(5 + 6 - 1) * (0 + 1 + 2 + 3)"),
        Ok(RunValue::Int64(60))
    );
}

#[test]
fn evaluates_negation_chain() {
    assert_eq!(run("-(7 - 3) + 1"), Ok(RunValue::Int64(-3)));
}

#[test]
fn evaluates_floats_booleans_and_strings() {
    assert_eq!(run("0.5 * 4.0"), Ok(RunValue::Float64(2.0)));
    assert_eq!(run("1 + 2 < 4"), Ok(RunValue::Bool(true)));
    assert_eq!(run("not (1 == 1)"), Ok(RunValue::Bool(false)));
    assert_eq!(run("\"out\""), Ok(RunValue::Str("out".to_owned())));
}

#[test]
fn division_results_and_failure() {
    assert_eq!(run("7 / 2"), Ok(RunValue::Int64(3)));
    let Err(PipelineError::Runtime(err)) = run("1 / (2 - 2)") else {
        panic!("expected a runtime failure");
    };
    assert_eq!(err.code, ErrorCode::E4001);
}

#[test]
fn compiled_block_disassembles() {
    let Ok(compiled) = compile("2 + 3 + 0 + 1") else {
        panic!("compile failed");
    };
    let Ok(listing) = rill_vm::disassemble(&compiled.block) else {
        panic!("disassembly failed");
    };
    assert_eq!(
        listing,
        "\n   1  INT64_LOAD_INT16  2\n   4  INT64_LOAD_INT16  3\n   7  INT64_ADD\n   8  INT64_LOAD_ZERO\n   9  INT64_ADD\n  10  INT64_LOAD_ONE\n  11  INT64_ADD\n  12  RETURN\n"
    );
}

#[test]
fn format_round_trips_canonical_source() {
    for source in ["a + b / 2 - c", "{x: int && 5}", "f(a, b)?"] {
        assert_eq!(format(source).as_deref(), Ok(source));
    }
}

#[test]
fn parse_error_renders_with_line_and_column() {
    let source = "1 +\n+ 2";
    let Err(err) = run(source) else {
        panic!("expected a parse failure");
    };
    assert_eq!(
        err.render(source),
        "error[E1002]: expected expression, found `+` at 2:1"
    );
}

#[test]
fn type_error_surfaces_offending_position() {
    let source = "1 + true";
    let Err(PipelineError::Type(err)) = run(source) else {
        panic!("expected a type failure");
    };
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.span.start, 4);
}

#[test]
fn codegen_error_for_wide_literal() {
    let Err(PipelineError::Codegen(err)) = run("100000") else {
        panic!("expected a codegen failure");
    };
    assert_eq!(err.code, ErrorCode::E3002);
}
