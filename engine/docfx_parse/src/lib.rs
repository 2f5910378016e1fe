//! Recursive descent parser for formula expressions.
//!
//! Turns formula text into an [`Ast`]. Parsing is a pure function of the
//! text: no scope, registry or document is consulted, so unknown names and
//! unresolvable paths are left for evaluation to report.
//!
//! # Module Structure
//!
//! - `error.rs`: [`ParseError`] and its kinds
//! - `grammar/expr.rs`: binary precedence climbing, `not`, unary, filters
//! - `grammar/postfix.rs`: `.field` and `[index]`
//! - `grammar/primary.rs`: literals, names, calls, `this`/`super` chains

mod error;
mod grammar;

use docfx_ir::{Ast, Expr, ExprArena, ExprId, Span};
use docfx_lexer::{Token, TokenKind, TokenList};

pub use error::{ParseError, ParseErrorKind};

/// Parse a formula expression.
pub fn parse(source: &str) -> Result<Ast, ParseError> {
    let tokens = docfx_lexer::lex(source).map_err(|err| {
        tracing::trace!(%err, "lexing failed");
        ParseError::from(err)
    })?;

    let result = Parser::new(&tokens).parse_formula();
    if let Err(err) = &result {
        tracing::trace!(%err, source, "parsing failed");
    }
    result
}

/// Parser state: the token stream, a cursor into it, and the arena being
/// filled.
pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList) -> Self {
        Parser {
            tokens: tokens.as_slice(),
            pos: 0,
            arena: ExprArena::new(),
        }
    }

    /// Parse a whole formula: exactly one expression, then end of input.
    fn parse_formula(mut self) -> Result<Ast, ParseError> {
        if self.current_kind().is_eof() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.current_span(),
                "empty expression",
            ));
        }

        let root = self.parse_expr()?;

        if !self.current_kind().is_eof() {
            let token = self.current();
            return Err(match &token.kind {
                TokenKind::RParen | TokenKind::RBracket => ParseError::new(
                    ParseErrorKind::UnmatchedDelimiter,
                    token.span,
                    format!("unmatched {}", token.kind.display_name()),
                ),
                kind => ParseError::new(
                    ParseErrorKind::TrailingInput,
                    token.span,
                    format!("unexpected {kind} after complete expression"),
                ),
            });
        }

        Ok(Ast::new(self.arena, root))
    }

    // Cursor

    /// Current token. The stream always ends in `Eof` and the cursor never
    /// moves past it.
    #[inline]
    fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.current().span
    }

    /// Token `n` positions ahead, clamped to `Eof`.
    fn peek_kind(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)].kind
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.kind.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume a closing delimiter matching the opener at `open`.
    fn expect_closing(&mut self, closer: &TokenKind, open: Span) -> Result<Span, ParseError> {
        if self.check(closer) {
            return Ok(self.advance().span);
        }
        let found = self.current();
        let message = if found.kind.is_eof() {
            format!("unclosed delimiter, expected {}", closer.display_name())
        } else {
            format!(
                "expected {} to close delimiter at {open}, found {}",
                closer.display_name(),
                found.kind
            )
        };
        Err(ParseError::new(
            ParseErrorKind::UnmatchedDelimiter,
            open.merge(found.span),
            message,
        ))
    }

    // Arena

    fn alloc(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc(expr)
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get(id).span
    }
}
