//! Unit tests for diagnostics and the excerpt renderer.

use std::rc::Rc;

use super::errors::{Diagnostic, ErrorKind, Severity};
use super::render::render;
use crate::Position;

fn module() -> Rc<String> {
    Rc::new("test.ql".to_string())
}

#[test]
fn test_error_kind_names() {
    assert_eq!(
        ErrorKind::UnknownToken {
            token: "@".to_string()
        }
        .name(),
        "SyntaxError"
    );
    assert_eq!(ErrorKind::UnterminatedString.name(), "SyntaxError");
    assert_eq!(
        ErrorKind::UnboundName {
            name: "x".to_string()
        }
        .name(),
        "UnboundName"
    );
    assert_eq!(
        ErrorKind::TypeMismatch {
            expected: "i32".to_string(),
            found: "string".to_string()
        }
        .name(),
        "TypeMismatch"
    );
    assert_eq!(ErrorKind::MainTakesArguments.name(), "TypeMismatch");
    assert_eq!(ErrorKind::DeadCode.name(), "DeadCode");
    assert_eq!(ErrorKind::UnusedValue.name(), "UnusedValue");
    assert_eq!(
        ErrorKind::Filesystem {
            path: "lib.ql".to_string()
        }
        .name(),
        "FilesystemError"
    );
    assert_eq!(ErrorKind::OversizedPayload { len: 1 << 33 }.name(), "FormatError");
}

#[test]
fn test_default_severities() {
    assert_eq!(ErrorKind::DeadCode.default_severity(), Severity::Warn);
    assert_eq!(ErrorKind::UnusedValue.default_severity(), Severity::Warn);
    assert_eq!(
        ErrorKind::MissingMain.default_severity(),
        Severity::Error
    );
}

#[test]
fn test_diagnostic_message_comes_from_kind() {
    let diagnostic = Diagnostic::new(
        ErrorKind::UnboundName {
            name: "foo".to_string(),
        },
        module(),
        Position::null(),
    );
    assert_eq!(diagnostic.message, "name \"foo\" is not bound in this scope");
    assert!(diagnostic.is_error());
}

#[test]
fn test_render_header() {
    let diagnostic = Diagnostic::new(
        ErrorKind::UnusedValue,
        module(),
        Position::new(1, 1, 0, 2),
    );
    let rendered = render(&diagnostic, "abc\n");

    assert!(rendered.contains("test.ql:1:1 WARN:"));
    assert!(rendered.contains("\x1b[1;33m"));
}

#[test]
fn test_render_excerpt_context_and_caret() {
    // A 1-character identifier on line 2 of a 4-line file: the excerpt is
    // at most two context lines either side and the caret line under line 2
    // has exactly one caret, under the identifier's column.
    let source = "let a: i32;\nz;\nlet b: i32;\nlet c: i32;\n";
    let z_offset = source.find('z').unwrap();
    let diagnostic = Diagnostic::new(
        ErrorKind::UnboundName {
            name: "z".to_string(),
        },
        module(),
        Position::new(2, 0, z_offset, z_offset),
    );

    let rendered = render(&diagnostic, source);
    let lines: Vec<&str> = rendered.lines().collect();

    // Header, then lines 1-4 of context with one caret line after line 2.
    assert!(lines[0].contains("test.ql:2:0 ERROR:"));
    assert!(lines[1].contains("1 | let a: i32;"));
    assert!(lines[2].contains("2 | z;"));
    let caret_line = lines[3];
    assert_eq!(caret_line.matches('^').count(), 1);
    // The caret sits in the same column as `z` does on its line.
    let z_col = lines[2].find('z').unwrap();
    assert_eq!(caret_line.find('^').unwrap(), z_col);
    assert!(lines[4].contains("3 | let b: i32;"));
    assert!(lines[5].contains("4 | let c: i32;"));
}

#[test]
fn test_render_caret_covers_whole_span() {
    let source = "hello;\n";
    let diagnostic = Diagnostic::new(
        ErrorKind::UnboundName {
            name: "hello".to_string(),
        },
        module(),
        Position::new(1, 1, 0, 4),
    );

    let rendered = render(&diagnostic, source);
    assert_eq!(rendered.matches('^').count(), 5);
}

#[test]
fn test_render_multi_line_span() {
    let source = "fn f() {\nx\n}\n";
    let diagnostic = Diagnostic::new(
        ErrorKind::DeadCode,
        module(),
        Position::new(1, 1, 0, source.len() - 2),
    );

    let rendered = render(&diagnostic, source);
    // Every spanned line gets its own caret line.
    let caret_lines = rendered
        .lines()
        .filter(|line| line.contains('^'))
        .count();
    assert_eq!(caret_lines, 3);
}

#[test]
fn test_render_zero_width_span() {
    let source = "abc\n";
    // end < start encodes a zero-width span at offset 3 (end of line 1).
    let diagnostic = Diagnostic::new(
        ErrorKind::UnexpectedToken {
            found: "EOF".to_string(),
            expected: "Semicolon".to_string(),
        },
        module(),
        Position::new(1, 4, 3, 2),
    );

    let rendered = render(&diagnostic, source);
    assert_eq!(rendered.matches('^').count(), 1);
}

#[test]
fn test_render_offsets_clamped_to_content() {
    let source = "x";
    let diagnostic = Diagnostic::new(
        ErrorKind::UnusedValue,
        module(),
        Position::new(1, 1, 0, 400),
    );

    // Must not panic on spans reaching past the buffer.
    let rendered = render(&diagnostic, source);
    assert!(rendered.contains("1 | x"));
}

#[test]
fn test_render_secondary_reference() {
    let source = "fn a() {}\nfn a() {}\n";
    let second = source.rfind("fn").unwrap();
    let diagnostic = Diagnostic::new(
        ErrorKind::NameAlreadyBound {
            name: "a".to_string(),
        },
        module(),
        Position::new(2, 0, second, second + 8),
    )
    .with_secondary(
        module(),
        Position::new(1, 1, 0, 8),
        "previously declared here",
    );

    let rendered = render(&diagnostic, source);
    assert!(rendered.contains("test.ql:1:1 previously declared here"));
    // Secondary reference uses the info color.
    assert!(rendered.contains("\x1b[1;36m"));
}
