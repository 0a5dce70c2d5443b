//! # Introduction
//!
//! minipas parses programs written in a small Pascal-like teaching language
//! into an abstract syntax tree. The language has integer constants, `int`,
//! `bool` and `void` variables, and nested function declarations.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`] — turns source text into tokens, one at a time.
//! 2. [`parser::parse`] — the recursive descent [`parser::Parser`], which
//!    builds a [`parser::ast::Program`] or stops at the first syntax error.
//!
//! ## Example
//!
//! ```
//! let program = minipas::parser::parse_source(
//!     "program P; val c = -3; var v : int; v = c.",
//! )
//! .unwrap();
//! assert_eq!(program.name, "P");
//! assert_eq!(program.block.val_decls[0].value, -3);
//! ```
//!
//! Any token source can drive the parser by implementing
//! [`parser::lexer::TokenStream`].

pub mod parser;
