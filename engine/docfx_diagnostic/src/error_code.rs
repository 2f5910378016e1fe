//! Error codes for every evaluation diagnostic.

use std::fmt;

/// Error codes.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: formula text (lexing and parsing)
/// - E2xxx: evaluation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression (including an empty formula)
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Malformed path (`super`/`this` after a property, missing property name)
    E1004,
    /// Invalid character or number literal
    E1005,
    /// Unterminated string literal
    E1006,

    // Evaluation Errors (E2xxx)
    /// Unresolvable identifier or path
    E2001,
    /// Operator applied to incompatible types
    E2002,
    /// Unknown function
    E2003,
    /// Function rejected its arguments
    E2004,
    /// Cyclic reference between formulas
    E2005,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
        }
    }

    /// One-line explanation.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "malformed path",
            ErrorCode::E1005 => "invalid token",
            ErrorCode::E1006 => "unterminated string literal",
            ErrorCode::E2001 => "unresolvable reference",
            ErrorCode::E2002 => "type mismatch",
            ErrorCode::E2003 => "unknown function",
            ErrorCode::E2004 => "function error",
            ErrorCode::E2005 => "cyclic reference",
        }
    }

    /// Whether the code belongs to the parse phase.
    pub fn is_parse_error(self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
