use std::collections::HashMap;

use crate::{ast::types::Type, Position};

/// How a binding came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Literal,
    ReturnValue,
    FunctionCallResult,
    Declaration,
    Parameter,
    Builtin,
    Expression,
}

/// The record the checker attaches to every name it resolves and every
/// expression it evaluates. Created fresh per visit, never shared.
#[derive(Debug, Clone)]
pub struct Binding {
    pub ty: Type,
    pub declared_at: Position,
    pub origin: Origin,
    pub used: bool,
}

impl Binding {
    pub fn new(ty: Type, origin: Origin, declared_at: Position) -> Self {
        Binding {
            ty,
            declared_at,
            origin,
            used: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
}

/// A lexical name table. Scopes stack: one Global scope for the whole
/// module check, one Function scope per function body.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    bindings: HashMap<String, Binding>,
    /// Declared return type of the enclosing function. Only present on
    /// Function scopes.
    pub return_type: Option<Type>,
}

impl Scope {
    pub fn global() -> Self {
        Scope {
            kind: ScopeKind::Global,
            bindings: HashMap::new(),
            return_type: None,
        }
    }

    pub fn function(return_type: Type) -> Self {
        Scope {
            kind: ScopeKind::Function,
            bindings: HashMap::new(),
            return_type: Some(return_type),
        }
    }

    /// Declares a name in this scope. A name already bound here is an
    /// error; the existing binding's position comes back so the caller can
    /// point at the first declaration.
    pub fn declare(&mut self, name: &str, binding: Binding) -> Result<(), Position> {
        if let Some(existing) = self.bindings.get(name) {
            return Err(existing.declared_at);
        }
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings.get_mut(name)
    }
}
