//! minipas source code parser
//!
//! This module transforms minipas source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens, pulled on demand)
//! - [`parse`]: The [`Parser`] itself, its error type and the lookahead helpers
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! A program is `program <name> ;` followed by a block and a closing `.`.
//! A block declares, in this order, constants (`val`), variables (`var`) and
//! functions (`fun`), then gives one statement. Function bodies are blocks,
//! so functions nest to any depth.
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent: one method per nonterminal, one
//! token of lookahead, no backtracking. The first syntax error is returned
//! as a [`ParseError`]; there is no recovery.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{ParseError, Parser};

/// Parse a complete program from source text
pub fn parse_source(source: &str) -> Result<ast::Program, ParseError> {
    Parser::from_source(source)?.parse_program()
}
