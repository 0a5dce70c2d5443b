// AST (Abstract Syntax Tree) definitions for minipas programs

use serde::Serialize;
use std::fmt;

/// Source location information for error reporting
///
/// Lines and columns are 1-based. The default location (0:0) marks tokens
/// that did not come from source text, such as the EOF a token vector yields
/// once it runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Root of the tree: `program <name> ; <block> .`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    pub block: Block,
}

/// One lexical scope: its declarations, in source order, and its statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub val_decls: Vec<ValDecl>,
    pub var_decls: Vec<VarDecl>,
    pub fun_decls: Vec<FunDecl>,
    pub body: Stmt,
}

/// Named constant. The sign has already been applied to `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValDecl {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
}

/// Primitive types; the language has no user-defined types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Type {
    Int,
    Bool,
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
        }
    }
}

/// Function declaration; its block may declare further functions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunDecl {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub block: Block,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Assign {
        target: String,
        value: Expr,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// `begin s1; s2; ... end`
    Sequence(Vec<Stmt>),
    If {
        test: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    Print(Vec<Item>),
}

/// A single argument of `print`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Expr(Expr),
    Str(String),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Logical
    And,
    Or,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Neg, // -x
    Not, // not x
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Num(i32),
    Bool(bool),
    Id(String),
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}
