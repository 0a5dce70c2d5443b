//! Declaration parsing implementation
//!
//! This module handles the declaration part of a block:
//!
//! - Constants: `val x = -5;`
//! - Variables: `var x : int;`
//! - Functions: `fun f(a : int, b : bool) : int; <Block> ;`
//! - Types and parameter lists
//!
//! # Grammar
//!
//! ```text
//! <ValDecls>   --> <ValDecl> <ValDecls> | ε                  FIRST = VAL
//! <ValDecl>    --> val id = <Sign> num ;
//! <Sign>       --> - | ε                                     FOLLOW = NUM
//! <VarDecls>   --> <VarDecl> <VarDecls> | ε                  FIRST = VAR
//! <VarDecl>    --> var id : <Type> ;
//! <Type>       --> int | bool | void
//! <FunDecls>   --> <FunDecl> <FunDecls> | ε                  FIRST = FUN
//! <FunDecl>    --> fun id ( <ParamList> ) : <Type> ; <Block> ;
//! <ParamList>  --> <Params> | ε                              FOLLOW = RPAREN
//! <Params>     --> <Param> <ParamsRest>                      FIRST = ID
//! <ParamsRest> --> , <Params> | ε                            FOLLOW = RPAREN
//! <Param>      --> id : <Type>
//! ```
//!
//! The three lists stop as soon as the lookahead is not their keyword. Whatever
//! comes next is checked by the next procedure, so a `val` after a `var` fails
//! when the statement parser meets it.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenStream};
use crate::parser::parse::{int_value, ParseError, Parser};
use tracing::debug;

impl<S: TokenStream> Parser<S> {
    pub(crate) fn parse_val_decls(&mut self) -> Result<Vec<ValDecl>, ParseError> {
        let mut decls = Vec::new();
        while self.check(&[TokenKind::Val]) {
            decls.push(self.parse_val_decl()?);
        }
        Ok(decls)
    }

    /// Parse `val id = <Sign> num ;`, folding the sign into the value
    pub(crate) fn parse_val_decl(&mut self) -> Result<ValDecl, ParseError> {
        self.expect_token(TokenKind::Val)?;
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Assign)?;
        let sign = self.parse_sign()?;
        let num = self.expect_token(TokenKind::Num)?;
        let value = int_value(&num, sign)?;
        self.expect_token(TokenKind::Semi)?;

        debug!(%name, value, "val declaration");
        Ok(ValDecl { name, value })
    }

    /// `-` gives -1, anything else +1 without consuming
    pub(crate) fn parse_sign(&mut self) -> Result<i64, ParseError> {
        if self.check(&[TokenKind::Minus]) {
            self.expect_token(TokenKind::Minus)?;
            return Ok(-1);
        }
        Ok(1)
    }

    pub(crate) fn parse_var_decls(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let mut decls = Vec::new();
        while self.check(&[TokenKind::Var]) {
            decls.push(self.parse_var_decl()?);
        }
        Ok(decls)
    }

    pub(crate) fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        self.expect_token(TokenKind::Var)?;
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect_token(TokenKind::Semi)?;

        debug!(%name, %ty, "var declaration");
        Ok(VarDecl { name, ty })
    }

    /// Parse one of the primitive type keywords.
    ///
    /// No single kind can be named as expected here, so a miss is reported as
    /// [`ParseError::InvalidType`] rather than a mismatch.
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let (kind, ty) = match self.current.kind {
            TokenKind::Int => (TokenKind::Int, Type::Int),
            TokenKind::Bool => (TokenKind::Bool, Type::Bool),
            TokenKind::Void => (TokenKind::Void, Type::Void),
            _ => {
                return Err(ParseError::InvalidType {
                    found: self.current.clone(),
                })
            }
        };
        self.expect_token(kind)?;
        Ok(ty)
    }

    pub(crate) fn parse_fun_decls(&mut self) -> Result<Vec<FunDecl>, ParseError> {
        let mut decls = Vec::new();
        while self.check(&[TokenKind::Fun]) {
            decls.push(self.parse_fun_decl()?);
        }
        Ok(decls)
    }

    /// Parse `fun id ( <ParamList> ) : <Type> ; <Block> ;`
    pub(crate) fn parse_fun_decl(&mut self) -> Result<FunDecl, ParseError> {
        self.expect_token(TokenKind::Fun)?;
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::LParen)?;
        let params = self.parse_param_list()?;
        self.expect_token(TokenKind::RParen)?;
        self.expect_token(TokenKind::Colon)?;
        let return_type = self.parse_type()?;
        self.expect_token(TokenKind::Semi)?;

        debug!(%name, params = params.len(), %return_type, "entering function body");
        let block = self.parse_block()?;
        self.expect_token(TokenKind::Semi)?;

        Ok(FunDecl {
            name,
            return_type,
            params,
            block,
        })
    }

    pub(crate) fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        if self.check(&[TokenKind::Id]) {
            self.parse_params()
        } else {
            Ok(Vec::new())
        }
    }

    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = vec![self.parse_param()?];
        params.extend(self.parse_params_rest()?);
        Ok(params)
    }

    /// After a comma another parameter is mandatory, so `(a: int,)` fails on
    /// the `)` expecting ID.
    pub(crate) fn parse_params_rest(&mut self) -> Result<Vec<Param>, ParseError> {
        if self.check(&[TokenKind::Comma]) {
            self.expect_token(TokenKind::Comma)?;
            self.parse_params()
        } else {
            Ok(Vec::new())
        }
    }

    pub(crate) fn parse_param(&mut self) -> Result<Param, ParseError> {
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Param { name, ty })
    }
}
