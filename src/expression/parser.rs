use crate::expression::ast::{BinaryOp, Expr, Var};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Token, TokenKind, lex};

const PREFIX_BP: u8 = 5;
const MAX_DEPTH: usize = 64;

/// Parse a whole coordinate expression. Trailing tokens are an error.
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut cursor = Cursor {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = cursor.expr(0)?;
    match cursor.peek().kind {
        TokenKind::Eof => Ok(expr),
        ref other => Err(ExprError::at(
            cursor.peek().span.start,
            format!("unexpected {other:?} after expression"),
        )),
    }
}

fn infix(kind: &TokenKind) -> Option<(BinaryOp, u8, u8)> {
    match kind {
        TokenKind::Plus => Some((BinaryOp::Add, 1, 2)),
        TokenKind::Minus => Some((BinaryOp::Sub, 1, 2)),
        TokenKind::Star => Some((BinaryOp::Mul, 3, 4)),
        TokenKind::Slash => Some((BinaryOp::Div, 3, 4)),
        _ => None,
    }
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Cursor {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    // Eof is never consumed, so `pos` stays in bounds.
    fn advance(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expr(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::at(
                self.peek().span.start,
                format!("expression nested deeper than {MAX_DEPTH}"),
            ));
        }
        self.depth += 1;
        let out = self.expr_inner(min_bp);
        self.depth -= 1;
        out
    }

    fn expr_inner(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let mut lhs = self.operand()?;
        while let Some((op, lbp, rbp)) = infix(&self.peek().kind) {
            if lbp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.expr(rbp)?;
            lhs = Expr::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Expr, ExprError> {
        let t = self.advance();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => Var::from_ident(&name).map(Expr::Var).ok_or_else(|| {
                ExprError::at(
                    t.span.start,
                    format!("unknown variable '{name}', only width and height are bound"),
                )
            }),
            TokenKind::Minus => Ok(Expr::Neg(Box::new(self.expr(PREFIX_BP)?))),
            TokenKind::Plus => self.expr(PREFIX_BP),
            TokenKind::LParen => {
                let inner = self.expr(0)?;
                let close = self.advance();
                if close.kind != TokenKind::RParen {
                    return Err(ExprError::at(close.span.start, "missing ')'"));
                }
                Ok(inner)
            }
            other => Err(ExprError::at(
                t.span.start,
                format!("expected a number, variable or '(', found {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
