//! Semantic analysis module.
//!
//! The checker walks the AST with a scope stack, resolving names and
//! enforcing call, return and entry-point contracts. It collects every
//! diagnostic it can find in one pass: after an error it substitutes a
//! "no binding" sentinel and keeps checking, so one run surfaces every
//! independent problem.

pub mod checker;
pub mod scope;

#[cfg(test)]
mod tests;
