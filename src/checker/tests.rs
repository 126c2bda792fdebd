//! Unit tests for the semantic checker.

use std::rc::Rc;

use crate::{
    errors::errors::{Diagnostic, ErrorKind, Severity},
    lexer::lexer::Lexer,
    parser::parser::parse,
};

use super::checker::Checker;

fn check(source: &str) -> Vec<Diagnostic> {
    let lexer = Lexer::new(source.to_string(), Rc::new("test.ql".to_string()));
    let ast = parse(lexer).unwrap();
    let mut checker = Checker::new(Rc::new("test.ql".to_string()));
    checker.check_module(&ast);
    checker.into_diagnostics()
}

fn count_kind(diagnostics: &[Diagnostic], name: &str) -> usize {
    diagnostics.iter().filter(|d| d.kind.name() == name).count()
}

const VALID_MAIN: &str = "fn main(): int { return 0; }";

#[test]
fn test_valid_main_has_no_diagnostics() {
    let diagnostics = check(VALID_MAIN);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_missing_main() {
    let diagnostics = check("fn helper(): int { return 1; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::MissingMain);
    assert!(diagnostics[0].is_error());
}

#[test]
fn test_empty_module_reports_missing_main() {
    let diagnostics = check("");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::MissingMain);
}

#[test]
fn test_main_with_parameter() {
    let diagnostics = check("fn main(x: i32): int { return 0; }");
    assert_eq!(count_kind(&diagnostics, "TypeMismatch"), 1);
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == ErrorKind::MainTakesArguments));
}

#[test]
fn test_main_with_wrong_return_type() {
    let diagnostics = check("fn main(): string { return \"zero\"; }");
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::MainReturnType { .. })));
}

#[test]
fn test_bad_main_reports_each_condition_independently() {
    let diagnostics = check("fn main(x: i32): string { return \"zero\"; }");
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::MainReturnType { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == ErrorKind::MainTakesArguments));
}

#[test]
fn test_duplicate_function_name() {
    let source = "fn twice(): int { return 1; }\nfn twice(): int { return 2; }\nfn main(): int { return 0; }";
    let diagnostics = check(source);

    assert_eq!(count_kind(&diagnostics, "UnboundName"), 1);
    let duplicate = diagnostics
        .iter()
        .find(|d| matches!(d.kind, ErrorKind::NameAlreadyBound { .. }))
        .unwrap();
    // Reported at the second declaration, pointing back at the first.
    assert_eq!(duplicate.position.line, 2);
    let secondary = duplicate.secondary.as_ref().unwrap();
    assert_eq!(secondary.position.line, 1);
    assert_eq!(secondary.message, "previously declared here");
}

#[test]
fn test_checking_continues_after_duplicate() {
    // The body of the second declaration is still checked: the unbound
    // name inside it is reported too.
    let source = "fn f(): int { return 1; }\nfn f(): int { return nope; }\nfn main(): int { return 0; }";
    let diagnostics = check(source);

    assert_eq!(count_kind(&diagnostics, "UnboundName"), 2);
}

#[test]
fn test_return_type_mismatch() {
    let source = "fn answer(): int { return \"forty-two\"; }\nfn main(): int { return 0; }";
    let diagnostics = check(source);

    let mismatches: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| matches!(d.kind, ErrorKind::ReturnTypeMismatch { .. }))
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert!(mismatches[0].message.contains("i32"));
    assert!(mismatches[0].message.contains("string"));
}

#[test]
fn test_void_function_returning_value() {
    let source = "fn noisy() { return 3; }\nfn main(): int { return 0; }";
    let diagnostics = check(source);
    assert_eq!(count_kind(&diagnostics, "TypeMismatch"), 1);
}

#[test]
fn test_variadic_builtin_missing_argument() {
    let source = "fn main(): int { print(); return 0; }";
    let diagnostics = check(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        ErrorKind::MissingArguments {
            expected: 1,
            received: 0
        }
    );
}

#[test]
fn test_variadic_builtin_with_correct_argument() {
    let source = "fn main(): int { print(\"hello\"); return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_variadic_builtin_accepts_extra_arguments() {
    let source = "fn main(): int { print(\"a\", \"b\", \"c\"); return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_argument_type_mismatch() {
    let source = "fn main(): int { print(42); return 0; }";
    let diagnostics = check(source);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0].kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_failed_argument_is_skipped_not_cascaded() {
    // `nope` is unbound: exactly one diagnostic, no follow-on type
    // mismatch for the same position.
    let source = "fn main(): int { print(nope); return 0; }";
    let diagnostics = check(source);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0].kind, ErrorKind::UnboundName { .. }));
}

#[test]
fn test_exact_arity_for_non_variadic() {
    let source = "fn add(a: i32, b: i32): i32 { return a; }\nfn main(): int { add(1); return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::MissingArguments { .. })));

    let source = "fn one(a: i32): i32 { return a; }\nfn main(): int { return one(1, 2); }";
    let diagnostics = check(source);
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::UnexpectedArguments { .. })));
}

#[test]
fn test_not_callable() {
    let source = "fn main(): int { let x: i32; x(); return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::NotCallable { .. })));
}

#[test]
fn test_unbound_name() {
    let source = "fn main(): int { ghost; return 0; }";
    let diagnostics = check(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        ErrorKind::UnboundName {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn test_parameter_resolves_in_body() {
    let source = "fn echo(text: string) { print(text); }\nfn main(): int { return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_scopes_do_not_leak_between_functions() {
    let source =
        "fn first(secret: string) { print(secret); }\nfn second() { print(secret); }\nfn main(): int { return 0; }";
    let diagnostics = check(source);
    assert_eq!(count_kind(&diagnostics, "UnboundName"), 1);
}

#[test]
fn test_recursive_function_resolves() {
    let source = "fn loop_forever() { loop_forever(); }\nfn main(): int { return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_dead_code_after_return() {
    let source = "fn main(): int { return 0; print(\"never\"); }";
    let diagnostics = check(source);

    assert_eq!(count_kind(&diagnostics, "DeadCode"), 1);
    let dead = diagnostics
        .iter()
        .find(|d| d.kind == ErrorKind::DeadCode)
        .unwrap();
    assert_eq!(dead.severity, Severity::Warn);
}

#[test]
fn test_final_return_is_not_dead_code() {
    let diagnostics = check(VALID_MAIN);
    assert_eq!(count_kind(&diagnostics, "DeadCode"), 0);
}

#[test]
fn test_unused_value_is_warned() {
    let source = "fn value(): i32 { return 4; }\nfn main(): int { value(); return 0; }";
    let diagnostics = check(source);

    assert_eq!(count_kind(&diagnostics, "UnusedValue"), 1);
    assert!(diagnostics.iter().all(|d| !d.is_error()));
}

#[test]
fn test_void_call_statement_is_not_flagged() {
    let source = "fn main(): int { print(\"ok\"); return 0; }";
    let diagnostics = check(source);
    assert_eq!(count_kind(&diagnostics, "UnusedValue"), 0);
}

#[test]
fn test_let_then_use() {
    let source = "fn main(): int { let message: string; print(message); return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_import_binds_name() {
    // Without a module manager attached the path is not resolved, but the
    // imported name still binds loosely.
    let source = "import helpers from \"helpers.ql\";\nfn main(): int { helpers(); return 0; }";
    let diagnostics = check(source);
    assert_eq!(count_kind(&diagnostics, "UnboundName"), 0);
    assert_eq!(count_kind(&diagnostics, "FilesystemError"), 0);
}

#[test]
fn test_nested_block_checks_inner_statements() {
    let source = "fn main(): int { { ghost; } return 0; }";
    let diagnostics = check(source);
    assert_eq!(count_kind(&diagnostics, "UnboundName"), 1);
}

#[test]
fn test_return_at_top_level() {
    let source = "return 1;\nfn main(): int { return 0; }";
    let diagnostics = check(source);
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == ErrorKind::ReturnOutsideFunction));
}
