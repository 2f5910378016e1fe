//! Lexer for formula expressions, built on logos.
//!
//! Produces a [`TokenList`] with escapes resolved and keywords recognized.
//! Lexing stops at the first invalid token: a formula is short enough that
//! one precise error is more useful than recovery.

mod token;

use std::fmt;

use docfx_ir::Span;
use logos::Logos;

pub use token::{Token, TokenKind, TokenList};

/// Error produced by logos callbacks.
#[derive(Default, Debug, Clone, PartialEq)]
enum RawError {
    #[default]
    InvalidCharacter,
    NonFiniteNumber,
}

/// Raw token from logos (before escape processing).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(error = RawError)]
enum RawToken {
    // === Keywords ===
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("$")]
    Dollar,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("|")]
    Pipe,

    // === Literals ===

    // Decimal with optional fraction and exponent; `.5` and `5.` are not numbers
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    String,

    // Opening quote with no matching close before the end of input
    #[regex(r#""([^"\\]|\\.)*\\?"#)]
    #[regex(r"'([^'\\]|\\.)*\\?")]
    #[regex(r"`([^`\\]|\\.)*\\?")]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

fn parse_number(lex: &mut logos::Lexer<RawToken>) -> Result<f64, RawError> {
    match lex.slice().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(RawError::NonFiniteNumber),
    }
}

/// Why lexing failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    InvalidCharacter(char),
    /// Numeric literal that overflows to infinity.
    InvalidNumber(String),
    UnterminatedString,
    InvalidEscape(char),
}

/// A lexing failure at a source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::InvalidCharacter(c) => write!(f, "invalid character {c:?}"),
            LexErrorKind::InvalidNumber(text) => {
                write!(f, "number literal `{text}` is out of range")
            }
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::InvalidEscape(c) => write!(f, "invalid escape sequence `\\{c}`"),
        }
    }
}

impl std::error::Error for LexError {}

/// Tokenize a formula expression.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut tokens = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(RawError::NonFiniteNumber) => {
                return Err(LexError {
                    kind: LexErrorKind::InvalidNumber(slice.to_string()),
                    span,
                });
            }
            Err(RawError::InvalidCharacter) => {
                let c = slice.chars().next().unwrap_or('\0');
                return Err(LexError {
                    kind: LexErrorKind::InvalidCharacter(c),
                    span,
                });
            }
        };

        let kind = match raw {
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::This => TokenKind::This,
            RawToken::Super => TokenKind::Super,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Bang => TokenKind::Bang,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Number(n) => TokenKind::Number(n),
            RawToken::String => {
                // Strip the quotes; both are single-byte ASCII.
                let inner = &slice[1..slice.len() - 1];
                TokenKind::Str(unescape(inner, span)?)
            }
            RawToken::UnterminatedString => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedString,
                    span,
                });
            }
            RawToken::Ident => TokenKind::Ident(slice.to_string()),
        };

        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    Ok(tokens)
}

/// Resolve backslash escapes inside a string literal body.
fn unescape(body: &str, span: Span) -> Result<String, LexError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        // The literal regex guarantees a character follows every backslash.
        let escaped = chars.next().unwrap_or('\\');
        let resolved = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' | '"' | '\'' | '`' | '/' => escaped,
            other => {
                return Err(LexError {
                    kind: LexErrorKind::InvalidEscape(other),
                    span,
                });
            }
        };
        out.push(resolved);
    }

    Ok(out)
}
