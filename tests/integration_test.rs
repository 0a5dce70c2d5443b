// Integration tests for the minipas parser

use minipas::parser::ast::{self, *};
use minipas::parser::lexer::{Token, TokenKind};
use minipas::parser::{parse_source, ParseError, Parser};
use std::fs;
use std::path::Path;

/// Build a token vector the way an external scanner would hand it over
fn tokens(spec: &[(TokenKind, &str)]) -> Vec<Token> {
    spec.iter()
        .enumerate()
        .map(|(i, (kind, lexeme))| Token::new(*kind, *lexeme, SourceLocation::new(1, i + 1)))
        .collect()
}

fn parse_tokens(spec: &[(TokenKind, &str)]) -> Result<Program, ParseError> {
    Parser::new(tokens(spec).into_iter())?.parse_program()
}

fn print_num(n: i32) -> Stmt {
    Stmt::Print(vec![Item::Expr(Expr::Num(n))])
}

#[test]
fn test_round_trip_from_token_vector() {
    use TokenKind::*;

    // program P; val c = 3; var v: int;
    // fun f(x: int): int; var y: bool; print 2; print 1 . EOF
    let program = parse_tokens(&[
        (Program, "program"),
        (Id, "P"),
        (Semi, ";"),
        (Val, "val"),
        (Id, "c"),
        (Assign, "="),
        (Num, "3"),
        (Semi, ";"),
        (Var, "var"),
        (Id, "v"),
        (Colon, ":"),
        (Int, "int"),
        (Semi, ";"),
        (Fun, "fun"),
        (Id, "f"),
        (LParen, "("),
        (Id, "x"),
        (Colon, ":"),
        (Int, "int"),
        (RParen, ")"),
        (Colon, ":"),
        (Int, "int"),
        (Semi, ";"),
        (Var, "var"),
        (Id, "y"),
        (Colon, ":"),
        (Bool, "bool"),
        (Semi, ";"),
        (Print, "print"),
        (Num, "2"),
        (Semi, ";"),
        (Print, "print"),
        (Num, "1"),
        (Period, "."),
        (Eof, ""),
    ])
    .expect("Parsing failed");

    let expected = ast::Program {
        name: "P".to_string(),
        block: Block {
            val_decls: vec![ValDecl {
                name: "c".to_string(),
                value: 3,
            }],
            var_decls: vec![VarDecl {
                name: "v".to_string(),
                ty: Type::Int,
            }],
            fun_decls: vec![FunDecl {
                name: "f".to_string(),
                return_type: Type::Int,
                params: vec![Param {
                    name: "x".to_string(),
                    ty: Type::Int,
                }],
                block: Block {
                    val_decls: vec![],
                    var_decls: vec![VarDecl {
                        name: "y".to_string(),
                        ty: Type::Bool,
                    }],
                    fun_decls: vec![],
                    body: print_num(2),
                },
            }],
            body: print_num(1),
        },
    };

    assert_eq!(program, expected);
}

#[test]
fn test_token_vector_without_eof_is_accepted() {
    use TokenKind::*;

    // An exhausted stream keeps answering EOF
    let program = parse_tokens(&[
        (Program, "program"),
        (Id, "P"),
        (Semi, ";"),
        (Print, "print"),
        (Num, "0"),
        (Period, "."),
    ])
    .unwrap();
    assert_eq!(program.block.body, print_num(0));
}

#[test]
fn test_declaration_order_is_preserved() {
    let program = parse_source(
        r#"
        program Order;
        val a = 1; val b = -2; val c = 3;
        var x : int; var y : bool; var z : void;
        fun f() : void; print 1;
        fun g() : void; print 2;
        print 0.
    "#,
    )
    .unwrap();

    let block = &program.block;
    let vals: Vec<(&str, i32)> = block
        .val_decls
        .iter()
        .map(|d| (d.name.as_str(), d.value))
        .collect();
    assert_eq!(vals, vec![("a", 1), ("b", -2), ("c", 3)]);

    let vars: Vec<(&str, Type)> = block
        .var_decls
        .iter()
        .map(|d| (d.name.as_str(), d.ty))
        .collect();
    assert_eq!(
        vars,
        vec![("x", Type::Int), ("y", Type::Bool), ("z", Type::Void)]
    );

    let funs: Vec<&str> = block.fun_decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(funs, vec!["f", "g"]);
}

#[test]
fn test_missing_period_names_period() {
    let err = parse_source("program P; var x : int; x = 1").unwrap_err();

    match err {
        ParseError::Mismatch { expected, found } => {
            assert_eq!(expected, TokenKind::Period);
            assert_eq!(found.kind, TokenKind::Eof);
        }
        other => panic!("Expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_var_before_val_is_accepted() {
    let program = parse_source("program P; var x : int; x = 1.").unwrap();
    assert!(program.block.val_decls.is_empty());
    assert_eq!(program.block.var_decls.len(), 1);
}

#[test]
fn test_val_after_var_fails_at_val() {
    let err = parse_source("program P;\nvar x : int;\nval c = 1;\nx = c.").unwrap_err();

    match &err {
        ParseError::ExpectedOneOf { found, .. } => {
            assert_eq!(found.kind, TokenKind::Val);
            assert_eq!(found.location, SourceLocation::new(3, 1));
        }
        other => panic!("Expected error at 'val', got {:?}", other),
    }
    assert!(err.to_string().ends_with("but found VAL 'val'"));
}

#[test]
fn test_var_after_fun_fails() {
    let err = parse_source("program P; fun f() : void; print 1; var x : int; x = 1.").unwrap_err();

    match err {
        ParseError::ExpectedOneOf { found, .. } => assert_eq!(found.kind, TokenKind::Var),
        other => panic!("Expected error at 'var', got {:?}", other),
    }
}

#[test]
fn test_invalid_var_type_is_dedicated_error() {
    let err = parse_source("program P; var x : real; x = 1.").unwrap_err();

    assert!(matches!(err, ParseError::InvalidType { .. }));
    assert!(err.to_string().contains("INT, BOOL, or VOID"));
}

#[test]
fn test_trailing_comma_expects_id() {
    let err = parse_source("program P; fun f(a : int,) : int; print a; print 0.").unwrap_err();

    assert!(matches!(
        err,
        ParseError::Mismatch {
            expected: TokenKind::Id,
            ..
        }
    ));
}

#[test]
fn test_deep_function_nesting() {
    const DEPTH: usize = 50;

    let mut source = String::from("program Deep;\n");
    for i in 0..DEPTH {
        source.push_str(&format!("fun f{}() : void;\n", i));
    }
    source.push_str("print 0;\n");
    for _ in 1..DEPTH {
        source.push_str("print 1;\n");
    }
    source.push_str("print 2.");

    let program = parse_source(&source).expect("Parsing failed");

    let mut block = &program.block;
    for i in 0..DEPTH {
        assert_eq!(block.fun_decls.len(), 1);
        let fun = &block.fun_decls[0];
        assert_eq!(fun.name, format!("f{}", i));
        block = &fun.block;
    }
    assert!(block.fun_decls.is_empty());
    assert_eq!(block.body, print_num(0));
    assert_eq!(program.block.body, print_num(2));
}

#[test]
fn test_demo_program() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/counter.mp");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let program = parse_source(&source).expect("Parsing failed");

    assert_eq!(program.name, "Counter");
    assert_eq!(program.block.val_decls[1].value, -1);
    assert_eq!(program.block.var_decls.len(), 2);

    let greet = &program.block.fun_decls[1];
    assert_eq!(greet.name, "greet");
    assert_eq!(greet.params.len(), 2);
    assert_eq!(greet.block.fun_decls[0].name, "shout");
    assert!(matches!(greet.block.body, Stmt::Sequence(ref s) if s.len() == 2));

    match &program.block.body {
        Stmt::Sequence(stmts) => {
            assert_eq!(stmts.len(), 4);
            assert!(matches!(stmts[2], Stmt::While { .. }));
            assert!(matches!(stmts[3], Stmt::Call { ref name, .. } if name == "greet"));
        }
        other => panic!("Expected sequence, got {:?}", other),
    }
}

#[test]
fn test_ast_serializes_to_json() {
    let program = parse_source("program P; val c = -3; print c.").unwrap();
    let json = serde_json::to_value(&program).unwrap();

    assert_eq!(json["name"], "P");
    assert_eq!(json["block"]["val_decls"][0]["value"], -3);
}
