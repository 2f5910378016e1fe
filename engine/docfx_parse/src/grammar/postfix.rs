//! Postfix operators: field access and indexing.

use docfx_ir::{Expr, ExprId, ExprKind};
use docfx_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse `primary ("." NAME | "[" expr "]")*`.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    let dot = self.advance().span;
                    let token = self.advance();
                    let field = match token.kind {
                        TokenKind::Ident(name) => name,
                        // Keywords are ordinary keys after a dot.
                        TokenKind::True => "true".to_string(),
                        TokenKind::False => "false".to_string(),
                        TokenKind::Null => "null".to_string(),
                        TokenKind::And => "and".to_string(),
                        TokenKind::Or => "or".to_string(),
                        TokenKind::Not => "not".to_string(),
                        TokenKind::This | TokenKind::Super | TokenKind::Dollar => {
                            return Err(ParseError::new(
                                ParseErrorKind::MalformedPath,
                                token.span,
                                format!(
                                    "{} can only appear at the start of a path",
                                    token.kind.display_name()
                                ),
                            ));
                        }
                        other => {
                            return Err(ParseError::new(
                                ParseErrorKind::MalformedPath,
                                dot.merge(token.span),
                                format!("expected property name after `.`, found {other}"),
                            ));
                        }
                    };
                    let span = self.span_of(expr).merge(token.span);
                    expr = self.alloc(Expr::new(
                        ExprKind::Field {
                            receiver: expr,
                            field,
                        },
                        span,
                    ));
                }
                TokenKind::LBracket => {
                    let open = self.advance().span;
                    if self.check(&TokenKind::RBracket) {
                        return Err(ParseError::new(
                            ParseErrorKind::ExpectedExpression,
                            open.merge(self.current_span()),
                            "expected index expression inside `[]`",
                        ));
                    }
                    let index = self.parse_expr()?;
                    let close = self.expect_closing(&TokenKind::RBracket, open)?;
                    let span = self.span_of(expr).merge(close);
                    expr = self.alloc(Expr::new(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                        },
                        span,
                    ));
                }
                _ => return Ok(expr),
            }
        }
    }
}
