use crate::expression::ast::{BinaryOp, Expr, Func, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Deepest nesting the parser accepts; parentheses, signs, exponents, function arguments and
/// chained operators each add a level.
pub(crate) const MAX_DEPTH: usize = 256;

/// Parse `lhs` or `lhs = rhs`; the equation form is normalized to `lhs - rhs`.
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let lhs = p.parse_sum()?;
    let e = if p.consume(TokenKind::Eq) {
        let rhs = p.parse_sum()?;
        Expr::Binary {
            op: BinaryOp::Sub,
            left: Box::new(lhs),
            right: Box::new(rhs),
        }
    } else {
        lhs
    };
    p.expect(TokenKind::Eof)?;
    Ok(e)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    // Each chained operator deepens the left spine, so it counts against the depth bound.
    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut e = self.parse_product()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            self.enter()?;
            let r = self.parse_product()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        self.depth = base;
        Ok(e)
    }

    fn parse_product(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            self.enter()?;
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        self.depth = base;
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            self.enter()?;
            let e = self.parse_unary()?;
            self.leave();
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        if self.consume(TokenKind::Plus) {
            self.enter()?;
            let e = self.parse_unary()?;
            self.leave();
            return Ok(e);
        }
        self.parse_power()
    }

    // Right-associative; the exponent goes back through unary so `2^-1` parses.
    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_primary()?;
        if self.consume(TokenKind::Caret) {
            self.enter()?;
            let exp = self.parse_unary()?;
            self.leave();
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exp),
            });
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => self.parse_ident(name, t.span),
            TokenKind::LParen => {
                self.enter()?;
                let e = self.parse_sum()?;
                self.leave();
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }

    fn parse_ident(&mut self, name: String, span: Span) -> Result<Expr, ExprError> {
        if let Some(func) = Func::from_name(&name) {
            self.enter()?;
            let arg = if self.consume(TokenKind::LParen) {
                let e = self.parse_sum()?;
                self.expect(TokenKind::RParen)?;
                e
            } else {
                // `sin x` reads as `sin(x)`: the argument is the next bare atom only.
                self.parse_implicit_arg(&name)?
            };
            self.leave();
            return Ok(Expr::Call {
                func,
                arg: Box::new(arg),
            });
        }
        resolve_atom(&name).ok_or_else(|| {
            ExprError::new(span.start, format!("unknown identifier '{name}'"))
        })
    }

    fn parse_implicit_arg(&mut self, func_name: &str) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => self.parse_ident(name, t.span),
            other => Err(ExprError::new(
                t.span.start,
                format!("expected argument for '{func_name}', found {other:?}"),
            )),
        }
    }
}

fn resolve_atom(name: &str) -> Option<Expr> {
    match name {
        "x" => Some(Expr::X),
        "pi" => Some(Expr::Num(std::f64::consts::PI)),
        "e" => Some(Expr::Num(std::f64::consts::E)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
