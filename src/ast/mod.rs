//! AST (Abstract Syntax Tree) module.
//!
//! Nodes are closed tagged variants with exhaustive pattern matching in
//! every pass, one struct per node kind with a shared position field.
//!
//! Submodules:
//! - ast: statement and expression node definitions
//! - types: type values and the structural compatibility relation

pub mod ast;
pub mod types;
