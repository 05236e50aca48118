use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Scanner
/// - E1xxx: Parser
/// - E2xxx: Type checker
/// - E3xxx: Code generator
/// - E4xxx: Interpreter runtime
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scanner (E0xxx) - reported in-band as token kinds, surfaced by later phases
    /// Unclosed string literal
    E0001,
    /// Unrecognized character in source
    E0002,

    // Parser (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Integer literal out of range
    E1004,
    /// Invalid floating-point literal
    E1005,
    /// Reserved keyword with no operator role
    E1006,

    // Type checker (E2xxx)
    /// Operand type mismatch
    E2001,
    /// Operator not defined for operand type
    E2002,
    /// Construct outside the checked subset
    E2003,

    // Code generator (E3xxx)
    /// Unsupported typed-expression shape
    E3001,
    /// Integer literal wider than the 16-bit load immediate
    E3002,
    /// No opcode for operator at this type
    E3003,

    // Runtime (E4xxx)
    /// Division by zero
    E4001,
    /// Operand stack underflow (malformed bytecode)
    E4002,
    /// Invalid opcode byte
    E4003,
    /// Code block ended without RETURN or STOP
    E4004,
}

impl ErrorCode {
    /// Short human description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unclosed string literal",
            ErrorCode::E0002 => "unrecognized character",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "integer literal out of range",
            ErrorCode::E1005 => "invalid floating-point literal",
            ErrorCode::E1006 => "reserved keyword",
            ErrorCode::E2001 => "operand type mismatch",
            ErrorCode::E2002 => "operator not defined for operand type",
            ErrorCode::E2003 => "construct outside the checked subset",
            ErrorCode::E3001 => "unsupported expression shape",
            ErrorCode::E3002 => "integer literal too wide for load immediate",
            ErrorCode::E3003 => "no opcode for operator at this type",
            ErrorCode::E4001 => "division by zero",
            ErrorCode::E4002 => "operand stack underflow",
            ErrorCode::E4003 => "invalid opcode",
            ErrorCode::E4004 => "missing RETURN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_matches_code_name() {
        assert_eq!(format!("{}", ErrorCode::E1001), "E1001");
        assert_eq!(format!("{}", ErrorCode::E4001), "E4001");
    }

    #[test]
    fn descriptions_are_nonempty() {
        for code in [
            ErrorCode::E0001,
            ErrorCode::E1002,
            ErrorCode::E2001,
            ErrorCode::E3002,
            ErrorCode::E4003,
        ] {
            assert!(!code.description().is_empty());
        }
    }
}
