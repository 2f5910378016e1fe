//! Expression entry point, binary operators, `not`, unary, and filters.
//!
//! Binary operators are parsed by precedence climbing on
//! [`BinaryOp::precedence`]. Prefix `not` sits between equality and `and`,
//! so `not a == b` negates the comparison while `not a and b` negates `a`.

use docfx_ir::{BinaryOp, Expr, ExprId, ExprKind, UnaryOp};
use docfx_lexer::TokenKind;
use docfx_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// Binding strength of prefix `not`.
const NOT_PRECEDENCE: u8 = 3;

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary(1)
    }

    /// Parse binary operators binding at least as tight as `min_prec`.
    fn parse_binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_binary_inner(min_prec))
    }

    fn parse_binary_inner(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = if min_prec <= NOT_PRECEDENCE && self.check(&TokenKind::Not) {
            let start = self.advance().span;
            let operand = self.parse_binary(NOT_PRECEDENCE)?;
            let span = start.merge(self.span_of(operand));
            self.alloc(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand,
                },
                span,
            ))
        } else {
            self.parse_unary()?
        };

        while let Some(op) = self.match_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();

            // Left-associative: the right side only takes tighter operators.
            let right = self.parse_binary(prec + 1)?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(Expr::new(ExprKind::Binary { op, left, right }, span));
        }

        Ok(left)
    }

    /// Binary operator at the cursor, if any.
    fn match_binary_op(&self) -> Option<BinaryOp> {
        let op = match self.current_kind() {
            TokenKind::Or | TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::And | TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Tilde => BinaryOp::Concat,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    /// Parse `-x`, `!x`, or a filter chain.
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_filter(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    /// Parse `postfix ("|" NAME ("(" args ")")?)*`.
    ///
    /// `x | NAME(a, b)` becomes the call `NAME(x, a, b)`.
    fn parse_filter(&mut self) -> Result<ExprId, ParseError> {
        let mut value = self.parse_postfix()?;

        while self.check(&TokenKind::Pipe) {
            self.advance();
            let name_token = self.advance();
            let name = match name_token.kind {
                TokenKind::Ident(name) => name,
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        name_token.span,
                        format!("expected filter name after `|`, found {other}"),
                    ));
                }
            };

            let mut args = vec![value];
            let mut end = name_token.span;
            if self.check(&TokenKind::LParen) {
                let (extra, close) = self.parse_call_args()?;
                args.extend(extra);
                end = close;
            }

            let span = self.span_of(value).merge(end);
            value = self.alloc(Expr::new(ExprKind::Call { name, args }, span));
        }

        Ok(value)
    }
}
