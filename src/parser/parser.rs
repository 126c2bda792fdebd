//! Parser state and the parse entry point.
//!
//! The Parser owns the lexer and maintains the current token plus one
//! token of lookahead, advanced by `bump`. Lexer diagnostics propagate
//! through `bump`, so a malformed token aborts the parse exactly like a
//! grammar violation does.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Block,
    errors::errors::{Diagnostic, ErrorKind},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BindingPower, BpLookup, LedHandler, LedLookup, NudHandler, NudLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

pub struct Parser {
    lexer: Lexer,
    /// The token under the cursor.
    current: Token,
    /// One token of lookahead.
    lookahead: Token,
    file: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NudLookup,
    led_lookup: LedLookup,
    binding_power_lookup: BpLookup,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, Diagnostic> {
        let current = lexer.next_token()?;
        let lookahead = lexer.next_token()?;
        let file = lexer.file();

        Ok(Parser {
            lexer,
            current,
            lookahead,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        })
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn lookahead_kind(&self) -> TokenKind {
        self.lookahead.kind
    }

    /// Advances by one token and returns the token that was current.
    pub fn bump(&mut self) -> Result<Token, Diagnostic> {
        let next = if self.lookahead.kind == TokenKind::Eof {
            self.lookahead.clone()
        } else {
            self.lexer.next_token()?
        };
        let previous = std::mem::replace(&mut self.current, std::mem::replace(&mut self.lookahead, next));
        Ok(previous)
    }

    /// Consumes a token of the given kind or fails with a SyntaxError at
    /// the current token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Diagnostic> {
        if self.current.kind != expected_kind {
            return Err(self.unexpected(&expected_kind.to_string()));
        }
        self.bump()
    }

    /// A SyntaxError describing the current token; `expected` names what
    /// the grammar wanted instead.
    pub fn unexpected(&self, expected: &str) -> Diagnostic {
        Diagnostic::new(
            ErrorKind::UnexpectedToken {
                found: self.current.value.clone(),
                expected: expected.to_string(),
            },
            Rc::clone(&self.file),
            self.current.position,
        )
    }

    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::Eof
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NudLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LedLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BpLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LedHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NudHandler) {
        self.binding_power_lookup
            .insert(kind, BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a whole module into its top-level block. Fail-fast: the first
/// diagnostic aborts the parse.
pub fn parse(lexer: Lexer) -> Result<Block, Diagnostic> {
    let mut parser = Parser::new(lexer)?;
    create_token_lookups(&mut parser);

    let start = parser.current_token().position;
    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    let end = parser.current_token().position;
    Ok(Block {
        body,
        position: start.span_to(end),
    })
}
