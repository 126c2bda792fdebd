use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    ast::{
        ast::{Assignment, Block, Call, Expr, FieldAccess, FnDecl, Import, Let, Return, Stmt},
        types::{FunctionType, IntWidth, Type},
    },
    errors::errors::{Diagnostic, ErrorKind},
    modules::ModuleManager,
    Position,
};

use super::scope::{Binding, Origin, Scope, ScopeKind};

/// Scope-stack semantic checker. Per-node checking returns either a
/// Binding or `None`, the "no binding" sentinel for an already-reported
/// error; the sentinel propagates silently so one root cause never fans
/// out into duplicate diagnostics.
pub struct Checker<'a> {
    scopes: Vec<Scope>,
    diagnostics: Vec<Diagnostic>,
    module: Rc<String>,
    modules: Option<&'a mut ModuleManager>,
    exports: HashMap<String, Binding>,
}

impl<'a> Checker<'a> {
    pub fn new(module: Rc<String>) -> Checker<'a> {
        Checker {
            scopes: vec![],
            diagnostics: vec![],
            module,
            modules: None,
            exports: HashMap::new(),
        }
    }

    pub fn with_modules(module: Rc<String>, modules: &'a mut ModuleManager) -> Checker<'a> {
        Checker {
            scopes: vec![],
            diagnostics: vec![],
            module,
            modules: Some(modules),
            exports: HashMap::new(),
        }
    }

    /// Checks a whole module: push the Global scope, register builtins,
    /// visit every top-level statement, validate the entry point, pop.
    pub fn check_module(&mut self, module: &Block) {
        self.scopes.push(Scope::global());
        self.register_builtins();

        self.check_block(module);
        self.check_entry_point(module);

        self.scopes.pop();
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Public bindings collected while checking, keyed by name.
    pub fn take_exports(&mut self) -> HashMap<String, Binding> {
        std::mem::take(&mut self.exports)
    }

    fn report(&mut self, kind: ErrorKind, position: Position) {
        self.diagnostics
            .push(Diagnostic::new(kind, Rc::clone(&self.module), position));
    }

    fn register_builtins(&mut self) {
        let print_type = Type::Function(FunctionType {
            return_type: Box::new(Type::Void),
            params: vec![Type::String],
            required_args: 1,
            is_variadic: true,
        });
        // The Global scope is empty here, so this cannot collide.
        let _ = self.scopes[0].declare(
            "print",
            Binding::new(print_type, Origin::Builtin, Position::null()),
        );
    }

    /// Declares into the innermost scope, reporting a NameAlreadyBound
    /// with a cross-reference to the first declaration on collision.
    fn declare(&mut self, name: &str, binding: Binding) {
        let position = binding.declared_at;
        let scope = self.scopes.last_mut().unwrap();
        if let Err(previous) = scope.declare(name, binding) {
            let diagnostic = Diagnostic::new(
                ErrorKind::NameAlreadyBound {
                    name: name.to_string(),
                },
                Rc::clone(&self.module),
                position,
            )
            .with_secondary(
                Rc::clone(&self.module),
                previous,
                "previously declared here",
            );
            self.diagnostics.push(diagnostic);
        }
    }

    /// Innermost-to-outermost name lookup; first match wins and is marked
    /// used.
    fn resolve(&mut self, name: &str) -> Option<Binding> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(binding) = scope.get_mut(name) {
                binding.used = true;
                return Some(binding.clone());
            }
        }
        None
    }

    fn enclosing_return_type(&self) -> Option<Type> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.kind == ScopeKind::Function)
            .and_then(|scope| scope.return_type.clone())
    }

    /// Block rules: dead code after a non-final return, unused statement
    /// values, and return values checked against the enclosing function's
    /// declared return type.
    fn check_block(&mut self, block: &Block) -> Option<Binding> {
        let last = block.body.len().saturating_sub(1);

        for (index, stmt) in block.body.iter().enumerate() {
            if matches!(stmt, Stmt::Return(_)) && index != last {
                self.report(ErrorKind::DeadCode, stmt.position());
            }

            let Some(binding) = self.check_stmt(stmt) else {
                continue;
            };

            match binding.origin {
                Origin::ReturnValue => {
                    let Some(expected) = self.enclosing_return_type() else {
                        self.report(ErrorKind::ReturnOutsideFunction, stmt.position());
                        continue;
                    };
                    if !expected.is_compatible_with(&binding.ty) {
                        self.report(
                            ErrorKind::ReturnTypeMismatch {
                                expected: expected.to_string(),
                                found: binding.ty.to_string(),
                            },
                            stmt.position(),
                        );
                    }
                }
                Origin::Expression | Origin::FunctionCallResult => {
                    self.report(ErrorKind::UnusedValue, stmt.position());
                }
                _ => {}
            }
        }

        None
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Option<Binding> {
        match stmt {
            Stmt::Block(block) => self.check_block(block),
            Stmt::FnDecl(decl) => self.check_fn_decl(decl),
            Stmt::Return(ret) => self.check_return(ret),
            Stmt::Let(stmt) => self.check_let(stmt),
            Stmt::Import(import) => self.check_import(import),
            Stmt::Expression(stmt) => self.check_expr(&stmt.expr),
        }
    }

    fn check_fn_decl(&mut self, decl: &FnDecl) -> Option<Binding> {
        let fn_type = Type::Function(FunctionType {
            return_type: Box::new(decl.return_type.clone()),
            params: decl.params.iter().map(|(_, ty)| ty.clone()).collect(),
            required_args: decl.params.len(),
            is_variadic: false,
        });
        let binding = Binding::new(fn_type, Origin::Declaration, decl.position);

        if decl.is_public && self.scopes.len() == 1 {
            self.exports.insert(decl.name.clone(), binding.clone());
        }
        // Declared before the body is checked so recursion resolves.
        self.declare(&decl.name, binding);

        self.scopes.push(Scope::function(decl.return_type.clone()));
        for (name, ty) in &decl.params {
            self.declare(name, Binding::new(ty.clone(), Origin::Parameter, decl.position));
        }
        self.check_block(&decl.body);
        self.scopes.pop();

        None
    }

    fn check_return(&mut self, ret: &Return) -> Option<Binding> {
        let ty = match &ret.value {
            Some(expr) => self.check_expr(expr)?.ty,
            None => Type::Void,
        };
        Some(Binding::new(ty, Origin::ReturnValue, ret.position))
    }

    fn check_let(&mut self, stmt: &Let) -> Option<Binding> {
        self.declare(
            &stmt.name,
            Binding::new(stmt.ty.clone(), Origin::Declaration, stmt.position),
        );
        None
    }

    /// Imports resolve through the module cache; deep cross-module linking
    /// is out of scope, so the imported name binds as `any`.
    fn check_import(&mut self, import: &Import) -> Option<Binding> {
        if let (Some(manager), Some(path)) = (self.modules.as_deref_mut(), &import.from) {
            if let Err(kind) = manager.load(path) {
                self.report(kind, import.position);
            }
        }
        self.declare(
            &import.name,
            Binding::new(Type::Any, Origin::Declaration, import.position),
        );
        None
    }

    fn check_expr(&mut self, expr: &Expr) -> Option<Binding> {
        match expr {
            Expr::Str(literal) => Some(Binding::new(
                Type::String,
                Origin::Literal,
                literal.position,
            )),
            Expr::Int(literal) => Some(Binding::new(
                Type::Int(IntWidth::I32),
                Origin::Literal,
                literal.position,
            )),
            Expr::Identifier(identifier) => match self.resolve(&identifier.name) {
                Some(binding) => Some(Binding::new(
                    binding.ty,
                    Origin::Expression,
                    identifier.position,
                )),
                None => {
                    self.report(
                        ErrorKind::UnboundName {
                            name: identifier.name.clone(),
                        },
                        identifier.position,
                    );
                    None
                }
            },
            Expr::Call(call) => self.check_call(call),
            Expr::Assignment(assignment) => self.check_assignment(assignment),
            Expr::FieldAccess(access) => self.check_field_access(access),
        }
    }

    /// Call contract: callable callee, arity (minimum for variadics, exact
    /// otherwise), and per-position argument compatibility. Positions whose
    /// argument already failed to resolve are skipped so one root cause
    /// reports once.
    fn check_call(&mut self, call: &Call) -> Option<Binding> {
        let callee = self.check_expr(&call.callee)?;

        let function = match callee.ty {
            Type::Function(function) => function,
            // An `any` callee (imports) accepts anything.
            Type::Any => {
                for argument in &call.arguments {
                    self.check_expr(argument);
                }
                return Some(Binding::new(
                    Type::Any,
                    Origin::FunctionCallResult,
                    call.position,
                ));
            }
            other => {
                self.report(
                    ErrorKind::NotCallable {
                        callee: other.to_string(),
                    },
                    call.position,
                );
                return None;
            }
        };

        let received = call.arguments.len();
        if function.is_variadic {
            if received < function.required_args {
                self.report(
                    ErrorKind::MissingArguments {
                        expected: function.required_args,
                        received,
                    },
                    call.position,
                );
            }
        } else if received < function.params.len() {
            self.report(
                ErrorKind::MissingArguments {
                    expected: function.params.len(),
                    received,
                },
                call.position,
            );
        } else if received > function.params.len() {
            self.report(
                ErrorKind::UnexpectedArguments {
                    expected: function.params.len(),
                    received,
                },
                call.position,
            );
        }

        let argument_bindings: Vec<Option<Binding>> = call
            .arguments
            .iter()
            .map(|argument| self.check_expr(argument))
            .collect();

        for (index, param) in function.params.iter().enumerate() {
            let Some(Some(argument)) = argument_bindings.get(index) else {
                continue;
            };
            if !param.is_compatible_with(&argument.ty) {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: param.to_string(),
                        found: argument.ty.to_string(),
                    },
                    call.arguments[index].position(),
                );
            }
        }

        if *function.return_type == Type::Void {
            // A void call cannot be used as a value.
            None
        } else {
            Some(Binding::new(
                *function.return_type,
                Origin::FunctionCallResult,
                call.position,
            ))
        }
    }

    fn check_assignment(&mut self, assignment: &Assignment) -> Option<Binding> {
        let value = self.check_expr(&assignment.value);
        let target = self.check_expr(&assignment.target)?;

        if let Some(value) = value {
            if !target.ty.is_compatible_with(&value.ty) {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: target.ty.to_string(),
                        found: value.ty.to_string(),
                    },
                    assignment.position,
                );
            }
        }

        Some(Binding::new(
            target.ty,
            Origin::Expression,
            assignment.position,
        ))
    }

    fn check_field_access(&mut self, access: &FieldAccess) -> Option<Binding> {
        let object = self.check_expr(&access.object)?;

        match object.ty {
            Type::Object(object_type) => match object_type.fields.get(&access.field) {
                Some(field_type) => Some(Binding::new(
                    field_type.clone(),
                    Origin::Expression,
                    access.position,
                )),
                None => {
                    self.report(
                        ErrorKind::UnknownField {
                            ty: Type::Object(object_type.clone()).to_string(),
                            field: access.field.clone(),
                        },
                        access.position,
                    );
                    None
                }
            },
            Type::Any => Some(Binding::new(Type::Any, Origin::Expression, access.position)),
            other => {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: "an object".to_string(),
                        found: other.to_string(),
                    },
                    access.position,
                );
                None
            }
        }
    }

    /// Entry-point contract, validated once after all top-level
    /// statements: `main` exists, is a function, returns an integer, and
    /// accepts no argument. Each violated condition reports independently.
    fn check_entry_point(&mut self, module: &Block) {
        let main = self.scopes[0].get("main").cloned();

        let Some(binding) = main else {
            self.report(ErrorKind::MissingMain, module.position);
            return;
        };

        let Type::Function(function) = &binding.ty else {
            self.report(ErrorKind::MainNotAFunction, binding.declared_at);
            return;
        };

        if !function.return_type.is_integer() {
            self.report(
                ErrorKind::MainReturnType {
                    found: function.return_type.to_string(),
                },
                binding.declared_at,
            );
        }
        if !function.params.is_empty() || function.is_variadic {
            self.report(ErrorKind::MainTakesArguments, binding.declared_at);
        }
    }
}
