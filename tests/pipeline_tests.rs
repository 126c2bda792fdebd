//! End-to-end tests for the compilation pipeline.
//!
//! Each test drives source code through tokenization, parsing, checking
//! and, where it applies, IR lowering and marshalling, asserting between
//! phases.

use std::rc::Rc;

use quillc::{
    checker::checker::Checker,
    errors::errors::{Diagnostic, ErrorKind},
    ir::{gen::lower, marshal::marshal},
    lexer::lexer::{tokenize, Lexer},
    lexer::tokens::TokenKind,
    parser::parser::parse,
};

fn check_source(source: &str) -> Vec<Diagnostic> {
    let lexer = Lexer::new(source.to_string(), Rc::new("test.ql".to_string()));
    let ast = parse(lexer).expect("parse should succeed");
    let mut checker = Checker::new(Rc::new("test.ql".to_string()));
    checker.check_module(&ast);
    checker.into_diagnostics()
}

#[test]
fn test_compile_hello_world() {
    let source = "fn main(): int {\n print(\"hello, world\");\n return 0;\n}";

    let lexer = Lexer::new(source.to_string(), Rc::new("hello.ql".to_string()));
    let ast = parse(lexer).unwrap();

    let mut checker = Checker::new(Rc::new("hello.ql".to_string()));
    checker.check_module(&ast);
    assert!(checker.diagnostics().is_empty());

    let program = lower(&ast);
    assert!(program.functions.contains_key("main"));

    let bytes = marshal(&program).unwrap();
    assert!(!bytes.is_empty());
    // Pool: "main", "print", "hello, world", 0.
    assert_eq!(bytes[0], 4);
}

#[test]
fn test_token_sequence_for_main() {
    let tokens = tokenize(
        "fn main(): int {\n return 0;\n}".to_string(),
        Rc::new("test.ql".to_string()),
    )
    .unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Fn,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Colon,
            TokenKind::TypeInt,
            TokenKind::LeftBrace,
            TokenKind::Return,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_column_zero_after_newline_end_to_end() {
    let tokens = tokenize("fn\nmain".to_string(), Rc::new("test.ql".to_string())).unwrap();
    assert_eq!(tokens[1].position.line, 2);
    assert_eq!(tokens[1].position.column, 0);
}

#[test]
fn test_lex_error_stops_the_pipeline() {
    let lexer = Lexer::new(
        "fn main(): int { return €; }".to_string(),
        Rc::new("test.ql".to_string()),
    );
    let result = parse(lexer);
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().kind.name(), "SyntaxError");
}

#[test]
fn test_parse_error_aborts_without_recovery() {
    let lexer = Lexer::new(
        "fn main(): int { return 0 }\nfn later() {}".to_string(),
        Rc::new("test.ql".to_string()),
    );
    // One missing semicolon: a single error, nothing after it parses.
    let result = parse(lexer);
    assert!(result.is_err());
}

#[test]
fn test_clean_program_produces_no_diagnostics() {
    let source = "fn greet(name: string) {\n print(name);\n}\nfn main(): int {\n greet(\"quill\");\n return 0;\n}";
    let diagnostics = check_source(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_checker_collects_multiple_independent_errors() {
    let source = "fn first(): int { return \"one\"; }\nfn second() { ghost; }\nfn main(): int { return 0; }";
    let diagnostics = check_source(source);

    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::ReturnTypeMismatch { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::UnboundName { .. })));
}

#[test]
fn test_missing_main_aborts_compile() {
    let diagnostics = check_source("fn not_main(): int { return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::MissingMain);
    // Error severity is what makes the driver exit non-zero.
    assert!(diagnostics.iter().any(|d| d.is_error()));
}

#[test]
fn test_warnings_alone_do_not_fail_the_compile() {
    let source = "fn value(): i32 { return 1; }\nfn main(): int { value(); return 0; }";
    let diagnostics = check_source(source);

    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| !d.is_error()));
}

#[test]
fn test_lowered_bytecode_round_trips_through_marshal() {
    let source = "fn main(): int {\n print(\"a\");\n print(\"b\");\n return 0;\n}";
    let lexer = Lexer::new(source.to_string(), Rc::new("test.ql".to_string()));
    let ast = parse(lexer).unwrap();
    let program = lower(&ast);

    // "main", "print", "a", "print", "b", 0: first-use order, no dedup.
    assert_eq!(program.constants.len(), 6);

    let bytes = marshal(&program).unwrap();
    assert_eq!(bytes[0], 6);
    // Tag of the first pool entry is Str.
    assert_eq!(bytes[1], 0x01);
}
