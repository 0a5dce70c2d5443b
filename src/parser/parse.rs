//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, the lookahead helpers, and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser is an LL(1) recursive descent parser:
//! - This module: Parser struct, `expect_token`/`check`, `Program` and `Block`
//! - `declarations`: `val`, `var` and `fun` declarations, types, parameters
//! - `statements`: the statement grammar a block ends with
//! - `expressions`: expressions with Pascal-style precedence levels
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks.
//! The only mutable state is the single lookahead token in `current`, and
//! [`Parser::expect_token`] is the only method that advances it.
//!
//! # Grammar
//!
//! ```text
//! <Program> --> program id ; <Block> . EOF                FIRST = PROGRAM
//! <Block>   --> <ValDecls> <VarDecls> <FunDecls> <Stmt>   FIRST = VAL, VAR, FUN, FIRST(Stmt)
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind, TokenStream};
use thiserror::Error;
use tracing::trace;

/// Parser error type
///
/// Every variant carries the token that triggered it. Nothing past that token
/// has been pulled from the stream when the error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar required exactly one token kind and found another
    #[error("Expected {expected} but found {found}")]
    Mismatch { expected: TokenKind, found: Token },

    /// A type was required and the lookahead is not a type keyword
    #[error("Invalid type: type has to be INT, BOOL, or VOID but found {found}")]
    InvalidType { found: Token },

    /// The mismatch case for positions where several kinds could come next,
    /// such as the start of a statement or a factor
    #[error("Expected one of {} but found {found}", kind_list(.expected))]
    ExpectedOneOf {
        expected: Vec<TokenKind>,
        found: Token,
    },

    /// A numeral, after applying its sign, does not fit in 32 bits
    #[error("Integer literal {literal} is out of range")]
    IntegerOutOfRange { literal: String, found: Token },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Where the offending token (or character) starts
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Mismatch { found, .. }
            | ParseError::InvalidType { found }
            | ParseError::ExpectedOneOf { found, .. }
            | ParseError::IntegerOutOfRange { found, .. } => found.location,
            ParseError::Lex(err) => err.location,
        }
    }
}

fn kind_list(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recursive descent parser for minipas
pub struct Parser<S: TokenStream> {
    pub(crate) tokens: S,
    pub(crate) current: Token,
}

impl Parser<Lexer> {
    /// Parser reading directly from source text
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Parser::new(Lexer::new(source))
    }
}

impl<S: TokenStream> Parser<S> {
    /// Wrap a token stream, pulling its first token into the lookahead.
    pub fn new(mut tokens: S) -> Result<Self, ParseError> {
        let current = tokens.next_token()?;
        Ok(Self { tokens, current })
    }

    /// Parse a whole program: `program id ; <Block> . EOF`
    ///
    /// Consumes the parser; a parser reads exactly one token stream.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        self.expect_token(TokenKind::Program)?;
        let name = self.expect_token(TokenKind::Id)?.lexeme;
        self.expect_token(TokenKind::Semi)?;
        let block = self.parse_block()?;
        self.expect_token(TokenKind::Period)?;
        self.expect_token(TokenKind::Eof)?;

        Ok(Program { name, block })
    }

    /// Parse a block. The order val, var, fun, statement is fixed.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let val_decls = self.parse_val_decls()?;
        let var_decls = self.parse_var_decls()?;
        let fun_decls = self.parse_fun_decls()?;
        let body = self.parse_stmt()?;

        Ok(Block {
            val_decls,
            var_decls,
            fun_decls,
            body,
        })
    }

    // ===== Helper methods =====

    /// If the lookahead has the given kind, return it and pull the next token;
    /// otherwise fail without touching the stream.
    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.current.kind != kind {
            return Err(ParseError::Mismatch {
                expected: kind,
                found: self.current.clone(),
            });
        }

        trace!(kind = %kind, lexeme = %self.current.lexeme, "match");
        let next = self.tokens.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// True iff the lookahead's kind is one of `kinds`. Never consumes.
    pub(crate) fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Id)?.lexeme)
    }

    /// Error for a position where any of `expected` could start
    pub(crate) fn expected_one_of(&self, expected: &[TokenKind]) -> ParseError {
        ParseError::ExpectedOneOf {
            expected: expected.to_vec(),
            found: self.current.clone(),
        }
    }
}

/// Convert a NUM token to its value after applying `sign` (+1 or -1).
pub(crate) fn int_value(token: &Token, sign: i64) -> Result<i32, ParseError> {
    token
        .lexeme
        .parse::<i64>()
        .ok()
        .and_then(|n| i32::try_from(sign * n).ok())
        .ok_or_else(|| ParseError::IntegerOutOfRange {
            literal: if sign < 0 {
                format!("-{}", token.lexeme)
            } else {
                token.lexeme.clone()
            },
            found: token.clone(),
        })
}
