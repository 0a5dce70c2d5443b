//! Lexer (tokenizer) for minipas source code
//!
//! Converts raw source text into [`Token`]s. The parser pulls tokens one at a
//! time through the [`TokenStream`] trait, so a [`Lexer`] only scans as far as
//! the parser has read. Any other token source (a pre-built `Vec<Token>`, an
//! external scanner) can drive the parser by implementing the same trait.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Token type tags.
///
/// Displayed by their upper-case names, which is how diagnostics refer to
/// them (`Expected PERIOD but found EOF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Declarations
    Program,
    Val,
    Var,
    Fun,
    Int,
    Bool,
    Void,

    // Statements
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Print,

    // Literals and names
    Id,
    Num,
    String,
    True,
    False,

    // Word operators
    And,
    Or,
    Not,
    Div,
    Mod,

    // Symbols
    Assign, // =
    Eq,     // ==
    Ne,     // <>
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Plus,   // +
    Minus,  // -
    Star,   // *

    // Punctuation
    Semi,   // ;
    Period, // .
    Colon,  // :
    Comma,  // ,
    LParen, // (
    RParen, // )

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Program => "PROGRAM",
            TokenKind::Val => "VAL",
            TokenKind::Var => "VAR",
            TokenKind::Fun => "FUN",
            TokenKind::Int => "INT",
            TokenKind::Bool => "BOOL",
            TokenKind::Void => "VOID",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Print => "PRINT",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
            TokenKind::String => "STRING",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Div => "DIV",
            TokenKind::Mod => "MOD",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Semi => "SEMI",
            TokenKind::Period => "PERIOD",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A lexical token: type tag, raw text and where it started.
///
/// For `STRING` tokens the lexeme is the unescaped contents without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::String => write!(f, "STRING {:?}", self.lexeme),
            kind => write!(f, "{} '{}'", kind, self.lexeme),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Pull-based source of tokens for the parser.
///
/// Once the input is exhausted an implementation keeps returning `EOF`.
pub trait TokenStream {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

impl TokenStream for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Ok(self
            .next()
            .unwrap_or_else(|| Token::eof(SourceLocation::default())))
    }
}

/// Lexer for minipas source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    keywords: FxHashMap<&'static str, TokenKind>,
}

fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    [
        ("program", TokenKind::Program),
        ("val", TokenKind::Val),
        ("var", TokenKind::Var),
        ("fun", TokenKind::Fun),
        ("int", TokenKind::Int),
        ("bool", TokenKind::Bool),
        ("void", TokenKind::Void),
        ("begin", TokenKind::Begin),
        ("end", TokenKind::End),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("while", TokenKind::While),
        ("do", TokenKind::Do),
        ("print", TokenKind::Print),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
        ("div", TokenKind::Div),
        ("mod", TokenKind::Mod),
    ]
    .into_iter()
    .collect()
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords: keyword_table(),
        }
    }

    /// Tokenize the entire input, ending with a single EOF token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token, or EOF if the input is used up
    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::eof(loc));
        };

        let symbol = |kind: TokenKind, text: &str| -> Result<Token, LexError> {
            Ok(Token::new(kind, text, loc))
        };

        match ch {
            '"' => self.string_literal(loc),
            '0'..='9' => Ok(self.number_literal(ch, loc)),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    symbol(TokenKind::Eq, "==")
                } else {
                    symbol(TokenKind::Assign, "=")
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    symbol(TokenKind::Le, "<=")
                } else if self.peek() == Some('>') {
                    self.advance();
                    symbol(TokenKind::Ne, "<>")
                } else {
                    symbol(TokenKind::Lt, "<")
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    symbol(TokenKind::Ge, ">=")
                } else {
                    symbol(TokenKind::Gt, ">")
                }
            }
            '+' => symbol(TokenKind::Plus, "+"),
            '-' => symbol(TokenKind::Minus, "-"),
            '*' => symbol(TokenKind::Star, "*"),
            ';' => symbol(TokenKind::Semi, ";"),
            '.' => symbol(TokenKind::Period, "."),
            ':' => symbol(TokenKind::Colon, ":"),
            ',' => symbol(TokenKind::Comma, ","),
            '(' => symbol(TokenKind::LParen, "("),
            ')' => symbol(TokenKind::RParen, ")"),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::new(TokenKind::String, string, loc));
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal".to_string(),
                    location: self.current_location(),
                })?;

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    '\\' => '\\',
                    '"' => '"',
                    _ => {
                        return Err(LexError {
                            message: format!("Unknown escape sequence: \\{}", escaped),
                            location: self.current_location(),
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Scan a run of digits. Range checking happens in the parser, which
    /// knows whether a minus sign applies.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Num, digits, loc)
    }

    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .keywords
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Id);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl TokenStream for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_declaration_tokens() {
        let mut lexer = Lexer::new("program P; val c = -3;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Program);
        assert_eq!(tokens[1].kind, TokenKind::Id);
        assert_eq!(tokens[1].lexeme, "P");
        assert_eq!(tokens[2].kind, TokenKind::Semi);
        assert_eq!(tokens[3].kind, TokenKind::Val);
        assert_eq!(tokens[4].lexeme, "c");
        assert_eq!(tokens[5].kind, TokenKind::Assign);
        assert_eq!(tokens[6].kind, TokenKind::Minus);
        assert_eq!(tokens[7].kind, TokenKind::Num);
        assert_eq!(tokens[7].lexeme, "3");
        assert_eq!(tokens[8].kind, TokenKind::Semi);
        assert_eq!(tokens[9].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= == <> < <= > >= + - *"),
            vec![
                TokenKind::Assign,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        assert_eq!(
            kinds("int integer bool void_ div mod"),
            vec![
                TokenKind::Int,
                TokenKind::Id,
                TokenKind::Bool,
                TokenKind::Id,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = Lexer::new("var x; // comment\nvar y; /* block\ncomment */ var z;")
            .tokenize()
            .unwrap();
        let names: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Id)
            .map(|t| t.lexeme.as_str())
            .collect();

        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_string_literal() {
        let tokens = Lexer::new(r#"print "hello\n\"world\"""#).tokenize().unwrap();

        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].lexeme, "hello\n\"world\"");
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("program\n  P ;").tokenize().unwrap();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("  ");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("x = 1 # 2").tokenize().unwrap_err();
        assert_eq!(err.message, "Unexpected character: '#'");
        assert_eq!(err.location, SourceLocation::new(1, 7));

        let err = Lexer::new("print \"abc").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");

        let err = Lexer::new("/* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
    }

    #[test]
    fn test_token_display() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(Token::new(TokenKind::Id, "x", loc).to_string(), "ID 'x'");
        assert_eq!(Token::eof(loc).to_string(), "EOF");
    }
}
