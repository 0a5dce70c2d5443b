//! Statement parsing implementation
//!
//! The declaration grammar ends every block with exactly one statement and
//! reaches it only through [`Parser::parse_stmt`].
//!
//! # Grammar
//!
//! ```text
//! <Stmt>     --> id <IdStmt>
//!              | begin <StmtList> end
//!              | if <Expr> then <Stmt> [ else <Stmt> ]
//!              | while <Expr> do <Stmt>
//!              | print <Items>
//! <IdStmt>   --> = <Expr> | ( <Args> )
//! <StmtList> --> <Stmt> { ; <Stmt> } | ε
//! <Items>    --> <Item> { , <Item> }
//! <Item>     --> string | <Expr>
//! ```
//!
//! An `else` always belongs to the nearest unmatched `if`.

use crate::parser::ast::*;
use crate::parser::expressions::FACTOR_FIRST;
use crate::parser::lexer::{TokenKind, TokenStream};
use crate::parser::parse::{ParseError, Parser};

/// Token kinds that can start a statement
pub(crate) const STMT_FIRST: &[TokenKind] = &[
    TokenKind::Id,
    TokenKind::Begin,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
];

impl<S: TokenStream> Parser<S> {
    /// Parse a statement
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current.kind {
            TokenKind::Id => self.parse_id_stmt(),
            TokenKind::Begin => self.parse_sequence(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            _ => Err(self.expected_one_of(STMT_FIRST)),
        }
    }

    /// Assignment `x = e` or procedure call `f(a, b)`
    fn parse_id_stmt(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier()?;

        if self.check(&[TokenKind::Assign]) {
            self.expect_token(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign {
                target: name,
                value,
            });
        }

        if self.check(&[TokenKind::LParen]) {
            self.expect_token(TokenKind::LParen)?;
            let args = self.parse_args()?;
            self.expect_token(TokenKind::RParen)?;
            return Ok(Stmt::Call { name, args });
        }

        Err(self.expected_one_of(&[TokenKind::Assign, TokenKind::LParen]))
    }

    /// `begin s1; s2; ... end`, possibly empty
    fn parse_sequence(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::Begin)?;

        let mut stmts = Vec::new();
        if self.check(STMT_FIRST) {
            stmts.push(self.parse_stmt()?);
            while self.check(&[TokenKind::Semi]) {
                self.expect_token(TokenKind::Semi)?;
                stmts.push(self.parse_stmt()?);
            }
        }

        self.expect_token(TokenKind::End)?;
        Ok(Stmt::Sequence(stmts))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::If)?;
        let test = self.parse_expr()?;
        self.expect_token(TokenKind::Then)?;
        let then_branch = Box::new(self.parse_stmt()?);

        let else_branch = if self.check(&[TokenKind::Else]) {
            self.expect_token(TokenKind::Else)?;
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::If {
            test,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::While)?;
        let test = self.parse_expr()?;
        self.expect_token(TokenKind::Do)?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::While { test, body })
    }

    fn parse_print_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::Print)?;

        let mut items = vec![self.parse_item()?];
        while self.check(&[TokenKind::Comma]) {
            self.expect_token(TokenKind::Comma)?;
            items.push(self.parse_item()?);
        }

        Ok(Stmt::Print(items))
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.check(&[TokenKind::String]) {
            let text = self.expect_token(TokenKind::String)?.lexeme;
            return Ok(Item::Str(text));
        }
        if !self.check(FACTOR_FIRST) {
            let mut expected = vec![TokenKind::String];
            expected.extend_from_slice(FACTOR_FIRST);
            return Err(self.expected_one_of(&expected));
        }
        Ok(Item::Expr(self.parse_expr()?))
    }
}
