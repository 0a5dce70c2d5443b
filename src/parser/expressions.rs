//! Expression parsing implementation
//!
//! Three precedence levels, loosest first, as in Pascal:
//!
//! ```text
//! <Expr>       --> <SimpleExpr> [ <RelOp> <SimpleExpr> ]
//! <SimpleExpr> --> <Term> { ( + | - | or ) <Term> }
//! <Term>       --> <Factor> { ( * | div | mod | and ) <Factor> }
//! <Factor>     --> num | true | false | id [ ( <Args> ) ] | ( <Expr> )
//!                | - <Factor> | not <Factor>
//! <Args>       --> <Expr> { , <Expr> } | ε
//! <RelOp>      --> == | <> | < | <= | > | >=
//! ```
//!
//! Relational operators do not chain: `a < b < c` stops after `a < b`.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenStream};
use crate::parser::parse::{int_value, ParseError, Parser};

/// Token kinds that can start an expression
pub(crate) const FACTOR_FIRST: &[TokenKind] = &[
    TokenKind::Num,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Id,
    TokenKind::LParen,
    TokenKind::Minus,
    TokenKind::Not,
];

const REL_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Eq, BinOp::Eq),
    (TokenKind::Ne, BinOp::Ne),
    (TokenKind::Lt, BinOp::Lt),
    (TokenKind::Le, BinOp::Le),
    (TokenKind::Gt, BinOp::Gt),
    (TokenKind::Ge, BinOp::Ge),
];

const ADD_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Plus, BinOp::Add),
    (TokenKind::Minus, BinOp::Sub),
    (TokenKind::Or, BinOp::Or),
];

const MUL_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Star, BinOp::Mul),
    (TokenKind::Div, BinOp::Div),
    (TokenKind::Mod, BinOp::Mod),
    (TokenKind::And, BinOp::And),
];

impl<S: TokenStream> Parser<S> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_simple_expr()?;

        match self.match_operator(REL_OPS)? {
            Some(op) => {
                let right = self.parse_simple_expr()?;
                Ok(Expr::binary(op, left, right))
            }
            None => Ok(left),
        }
    }

    fn parse_simple_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_term()?;
        while let Some(op) = self.match_operator(ADD_OPS)? {
            let right = self.parse_term()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_factor()?;
        while let Some(op) = self.match_operator(MUL_OPS)? {
            let right = self.parse_factor()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::Num => {
                let num = self.expect_token(TokenKind::Num)?;
                Ok(Expr::Num(int_value(&num, 1)?))
            }
            TokenKind::True => {
                self.expect_token(TokenKind::True)?;
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.expect_token(TokenKind::False)?;
                Ok(Expr::Bool(false))
            }
            TokenKind::Id => {
                let name = self.expect_identifier()?;
                if self.check(&[TokenKind::LParen]) {
                    self.expect_token(TokenKind::LParen)?;
                    let args = self.parse_args()?;
                    self.expect_token(TokenKind::RParen)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Id(name))
                }
            }
            TokenKind::LParen => {
                self.expect_token(TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect_token(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Minus => {
                self.expect_token(TokenKind::Minus)?;
                Ok(Expr::unary(UnOp::Neg, self.parse_factor()?))
            }
            TokenKind::Not => {
                self.expect_token(TokenKind::Not)?;
                Ok(Expr::unary(UnOp::Not, self.parse_factor()?))
            }
            _ => Err(self.expected_one_of(FACTOR_FIRST)),
        }
    }

    /// Comma-separated arguments, possibly none. Used by call statements and
    /// call expressions; the caller matches the parentheses.
    pub(crate) fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.check(FACTOR_FIRST) {
            args.push(self.parse_expr()?);
            while self.check(&[TokenKind::Comma]) {
                self.expect_token(TokenKind::Comma)?;
                args.push(self.parse_expr()?);
            }
        }
        Ok(args)
    }

    /// Consume the lookahead if it is one of the operators in `table`
    fn match_operator(
        &mut self,
        table: &[(TokenKind, BinOp)],
    ) -> Result<Option<BinOp>, ParseError> {
        let Some(&(kind, op)) = table.iter().find(|(kind, _)| self.check(&[*kind])) else {
            return Ok(None);
        };
        self.expect_token(kind)?;
        Ok(Some(op))
    }
}
