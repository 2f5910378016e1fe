//! Failure categories.

use std::fmt;

use crate::ErrorCode;

/// Why a formula failed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Malformed expression text.
    Parse,
    /// Identifier or path does not resolve (missing property, `super` above
    /// the root, index out of range).
    Reference,
    /// Operator applied to incompatible operand types.
    Type,
    /// Call to a name absent from the function registry.
    UnknownFunction,
    /// A function rejected its arguments or failed.
    Function,
    /// A formula depends on its own unresolved value.
    CyclicReference,
}

impl ErrorKind {
    /// Code reported when no more specific one applies.
    pub fn default_code(self) -> ErrorCode {
        match self {
            ErrorKind::Parse => ErrorCode::E1001,
            ErrorKind::Reference => ErrorCode::E2001,
            ErrorKind::Type => ErrorCode::E2002,
            ErrorKind::UnknownFunction => ErrorCode::E2003,
            ErrorKind::Function => ErrorCode::E2004,
            ErrorKind::CyclicReference => ErrorCode::E2005,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Type => "TypeError",
            ErrorKind::UnknownFunction => "UnknownFunction",
            ErrorKind::Function => "FunctionError",
            ErrorKind::CyclicReference => "CyclicReference",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
