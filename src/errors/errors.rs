use std::rc::Rc;

use thiserror::Error;

use crate::Position;

/// Every problem the pipeline can report. The `Display` output doubles as
/// the diagnostic message; `name` maps each variant onto the coarse error
/// taxonomy shown in diagnostic headers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("unknown token {token:?}")]
    UnknownToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected token {found:?}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("integer literal {token:?} is out of range")]
    IntegerOverflow { token: String },
    #[error("name {name:?} is not bound in this scope")]
    UnboundName { name: String },
    #[error("name {name:?} is already bound in this scope")]
    NameAlreadyBound { name: String },
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
    #[error("return type mismatch: expected `{expected}`, found `{found}`")]
    ReturnTypeMismatch { expected: String, found: String },
    #[error("return outside of a function body")]
    ReturnOutsideFunction,
    #[error("`{callee}` is not callable")]
    NotCallable { callee: String },
    #[error("missing required argument: expected at least {expected}, received {received}")]
    MissingArguments { expected: usize, received: usize },
    #[error("unexpected arguments: expected {expected}, received {received}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("type `{ty}` has no field {field:?}")]
    UnknownField { ty: String, field: String },
    #[error("unreachable code after this return")]
    DeadCode,
    #[error("the value of this expression is never used")]
    UnusedValue,
    #[error("missing entry point: no function named `main`")]
    MissingMain,
    #[error("`main` must be a function")]
    MainNotAFunction,
    #[error("`main` must return an integer, found `{found}`")]
    MainReturnType { found: String },
    #[error("`main` cannot accept any argument")]
    MainTakesArguments,
    #[error("failed to read module {path:?}")]
    Filesystem { path: String },
    #[error("payload of {len} bytes exceeds the binary format limit")]
    OversizedPayload { len: usize },
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnknownToken { .. }
            | ErrorKind::UnterminatedString
            | ErrorKind::UnexpectedToken { .. }
            | ErrorKind::IntegerOverflow { .. } => "SyntaxError",
            ErrorKind::UnboundName { .. }
            | ErrorKind::NameAlreadyBound { .. }
            | ErrorKind::MissingMain => "UnboundName",
            ErrorKind::TypeMismatch { .. }
            | ErrorKind::ReturnTypeMismatch { .. }
            | ErrorKind::ReturnOutsideFunction
            | ErrorKind::NotCallable { .. }
            | ErrorKind::MissingArguments { .. }
            | ErrorKind::UnexpectedArguments { .. }
            | ErrorKind::UnknownField { .. }
            | ErrorKind::MainNotAFunction
            | ErrorKind::MainReturnType { .. }
            | ErrorKind::MainTakesArguments => "TypeMismatch",
            ErrorKind::DeadCode => "DeadCode",
            ErrorKind::UnusedValue => "UnusedValue",
            ErrorKind::Filesystem { .. } => "FilesystemError",
            ErrorKind::OversizedPayload { .. } => "FormatError",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorKind::DeadCode | ErrorKind::UnusedValue => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// A cross-reference to a related position, e.g. "previously declared
/// here". Rendered as an indented second excerpt.
#[derive(Debug, Clone)]
pub struct SecondaryLabel {
    pub kind: ErrorKind,
    pub module: Rc<String>,
    pub position: Position,
    pub message: String,
}

/// One reported problem. Diagnostics are plain values: the checker collects
/// them into a list and never prints anything itself.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub module: Rc<String>,
    pub position: Position,
    pub message: String,
    pub secondary: Option<SecondaryLabel>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, module: Rc<String>, position: Position) -> Self {
        let severity = kind.default_severity();
        let message = kind.to_string();
        Diagnostic {
            kind,
            severity,
            module,
            position,
            message,
            secondary: None,
        }
    }

    pub fn with_secondary(
        mut self,
        module: Rc<String>,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        self.secondary = Some(SecondaryLabel {
            kind: self.kind.clone(),
            module,
            position,
            message: message.into(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
