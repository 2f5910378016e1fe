//! Primary expressions: literals, names, calls, scope chains, the root anchor, groups.

use docfx_ir::{Expr, ExprId, ExprKind, Span, Value};
use docfx_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.advance();
        let span = token.span;

        let kind = match token.kind {
            TokenKind::Number(n) => ExprKind::Literal(Value::Number(n)),
            TokenKind::Str(s) => ExprKind::Literal(Value::String(s)),
            TokenKind::True => ExprKind::Literal(Value::Bool(true)),
            TokenKind::False => ExprKind::Literal(Value::Bool(false)),
            TokenKind::Null => ExprKind::Literal(Value::Null),

            TokenKind::Ident(name) => {
                if self.check(&TokenKind::LParen) {
                    let (args, close) = self.parse_call_args()?;
                    return Ok(self.alloc(Expr::new(
                        ExprKind::Call { name, args },
                        span.merge(close),
                    )));
                }
                ExprKind::Ident(name)
            }

            TokenKind::This => return Ok(self.parse_scope_chain(0, span)),
            TokenKind::Super => return Ok(self.parse_scope_chain(1, span)),
            TokenKind::Dollar => ExprKind::Root,

            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect_closing(&TokenKind::RParen, span)?;
                return Ok(inner);
            }

            TokenKind::Eof => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression,
                    span,
                    "expected expression, found end of expression",
                ));
            }
            TokenKind::RParen => {
                return Err(ParseError::new(
                    ParseErrorKind::UnmatchedDelimiter,
                    span,
                    "unmatched `)`",
                ));
            }
            TokenKind::RBracket => {
                return Err(ParseError::new(
                    ParseErrorKind::UnmatchedDelimiter,
                    span,
                    "unmatched `]`",
                ));
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    span,
                    format!("expected expression, found {other}"),
                ));
            }
        };

        Ok(self.alloc(Expr::new(kind, span)))
    }

    /// Extend a leading `this`/`super` with further `.this`/`.super` links.
    ///
    /// Each `super` climbs one scope; `this` stays put.
    fn parse_scope_chain(&mut self, mut depth: u32, start: Span) -> ExprId {
        let mut end = start;
        while self.check(&TokenKind::Dot)
            && matches!(self.peek_kind(1), TokenKind::This | TokenKind::Super)
        {
            self.advance();
            let link = self.advance();
            if link.kind == TokenKind::Super {
                depth = depth.saturating_add(1);
            }
            end = link.span;
        }
        self.alloc(Expr::new(ExprKind::ScopeRef { depth }, start.merge(end)))
    }

    /// Parse `"(" (expr ("," expr)*)? ")"`, returning the arguments and the
    /// span of the closing parenthesis.
    pub(crate) fn parse_call_args(&mut self) -> Result<(Vec<ExprId>, Span), ParseError> {
        let open = self.advance().span;
        let mut args = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok((args, self.advance().span));
        }

        loop {
            args.push(self.parse_expr()?);
            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            let close = self.expect_closing(&TokenKind::RParen, open)?;
            return Ok((args, close));
        }
    }
}
