//! Parse error types.

use docfx_diagnostic::ErrorCode;
use docfx_ir::Span;
use docfx_lexer::{LexError, LexErrorKind};

/// What went wrong while parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A token that cannot appear at this position.
    UnexpectedToken,
    /// Nothing to parse, or an operand is missing.
    ExpectedExpression,
    /// `(` or `[` without its closer, or a stray `)` / `]`.
    UnmatchedDelimiter,
    /// `super`/`this` after a property, or `.` without a property name.
    MalformedPath,
    /// Character or literal the lexer rejected.
    InvalidToken,
    UnterminatedString,
    /// A complete expression followed by more input.
    TrailingInput,
}

impl ParseErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ParseErrorKind::UnexpectedToken | ParseErrorKind::TrailingInput => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression => ErrorCode::E1002,
            ParseErrorKind::UnmatchedDelimiter => ErrorCode::E1003,
            ParseErrorKind::MalformedPath => ErrorCode::E1004,
            ParseErrorKind::InvalidToken => ErrorCode::E1005,
            ParseErrorKind::UnterminatedString => ErrorCode::E1006,
        }
    }
}

/// A parse error with its location in the formula text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let kind = match err.kind {
            LexErrorKind::UnterminatedString => ParseErrorKind::UnterminatedString,
            LexErrorKind::InvalidCharacter(_)
            | LexErrorKind::InvalidNumber(_)
            | LexErrorKind::InvalidEscape(_) => ParseErrorKind::InvalidToken,
        };
        ParseError::new(kind, err.span, err.to_string())
    }
}
