//! AST → IR lowering.
//!
//! String and integer literals append pool constants in first-use order.
//! Each function declaration becomes a Function record with its own code;
//! statements outside any function become top-level code. Local slots are
//! assigned densely per function, parameters first.

use std::collections::HashMap;

use crate::ast::ast::{Block, Expr, Stmt};

use super::program::{Constant, Function, Instruction, Program};

/// Per-function lowering state: name → dense local slot.
#[derive(Default)]
struct Locals {
    slots: HashMap<String, u32>,
}

impl Locals {
    fn slot(&mut self, name: &str) -> u32 {
        let next = self.slots.len() as u32;
        *self.slots.entry(name.to_string()).or_insert(next)
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.slots.get(name).copied()
    }
}

/// Lowers a checked module into one Program.
pub fn lower(module: &Block) -> Program {
    let mut program = Program::new();
    let mut top_level = vec![];
    let mut locals = Locals::default();

    lower_block(&mut program, module, &mut top_level, &mut locals);
    program.top_level = top_level;
    program
}

fn lower_block(
    program: &mut Program,
    block: &Block,
    code: &mut Vec<Instruction>,
    locals: &mut Locals,
) {
    for stmt in &block.body {
        lower_stmt(program, stmt, code, locals);
    }
}

fn lower_stmt(
    program: &mut Program,
    stmt: &Stmt,
    code: &mut Vec<Instruction>,
    locals: &mut Locals,
) {
    match stmt {
        Stmt::FnDecl(decl) => {
            let name_constant = program.add_constant(Constant::Str(decl.name.clone()));

            let mut fn_code = vec![];
            let mut fn_locals = Locals::default();
            for (name, _) in &decl.params {
                fn_locals.slot(name);
            }
            lower_block(program, &decl.body, &mut fn_code, &mut fn_locals);

            program.functions.insert(
                decl.name.clone(),
                Function {
                    name: decl.name.clone(),
                    arity: decl.params.len(),
                    name_constant,
                    code: fn_code,
                },
            );
        }
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                lower_expr(program, value, code, locals);
            }
            code.push(Instruction::Return);
        }
        Stmt::Let(stmt) => {
            // Reserves the slot; the grammar has no initializer yet.
            locals.slot(&stmt.name);
        }
        Stmt::Import(_) => {}
        Stmt::Block(block) => lower_block(program, block, code, locals),
        Stmt::Expression(stmt) => lower_expr(program, &stmt.expr, code, locals),
    }
}

fn lower_expr(
    program: &mut Program,
    expr: &Expr,
    code: &mut Vec<Instruction>,
    locals: &mut Locals,
) {
    match expr {
        Expr::Str(literal) => {
            let index = program.add_constant(Constant::Str(literal.value.clone()));
            code.push(Instruction::LoadConstant(index));
        }
        Expr::Int(literal) => {
            let index = program.add_constant(Constant::Int(literal.value));
            code.push(Instruction::LoadConstant(index));
        }
        Expr::Identifier(identifier) => match locals.get(&identifier.name) {
            Some(slot) => code.push(Instruction::LoadLocal(slot)),
            None => {
                // Not a local: a function referenced by name.
                let index = program.add_constant(Constant::Str(identifier.name.clone()));
                code.push(Instruction::LoadConstant(index));
            }
        },
        Expr::Call(call) => {
            lower_expr(program, &call.callee, code, locals);
            for argument in &call.arguments {
                lower_expr(program, argument, code, locals);
            }
            code.push(Instruction::Call);
        }
        Expr::Assignment(assignment) => {
            lower_expr(program, &assignment.value, code, locals);
            if let Expr::Identifier(target) = assignment.target.as_ref() {
                let slot = locals.slot(&target.name);
                code.push(Instruction::Store(slot));
            }
        }
        Expr::FieldAccess(access) => {
            // No object instructions in this set; the base still lowers so
            // its effects are kept.
            lower_expr(program, &access.object, code, locals);
        }
    }
}
