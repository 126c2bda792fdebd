use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// The fixed, process-wide keyword table. Never mutated after init.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("import", TokenKind::Import);
        map.insert("fun", TokenKind::Fn);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("let", TokenKind::Let);
        map.insert("from", TokenKind::From);
        map.insert("pub", TokenKind::Pub);
        map.insert("class", TokenKind::Class);
        map.insert("i8", TokenKind::TypeI8);
        map.insert("i16", TokenKind::TypeI16);
        map.insert("i32", TokenKind::TypeI32);
        map.insert("i64", TokenKind::TypeI64);
        map.insert("u8", TokenKind::TypeU8);
        map.insert("u16", TokenKind::TypeU16);
        map.insert("u32", TokenKind::TypeU32);
        map.insert("u64", TokenKind::TypeU64);
        map.insert("float", TokenKind::TypeFloat);
        map.insert("void", TokenKind::TypeVoid);
        map.insert("string", TokenKind::TypeString);
        // Legacy alias, kept for sources that predate the sized widths.
        map.insert("int", TokenKind::TypeInt);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,
    Integer,
    String,
    Identifier,

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Colon,
    Comma,

    // Reserved
    Fn,
    Return,
    Let,
    Import,
    From,
    Pub,
    Class,

    // Type keywords
    TypeI8,
    TypeI16,
    TypeI32,
    TypeI64,
    TypeU8,
    TypeU16,
    TypeU32,
    TypeU64,
    TypeFloat,
    TypeVoid,
    TypeString,
    TypeInt,
}

impl TokenKind {
    /// Whether this kind names a type in annotation position.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeI8
                | TokenKind::TypeI16
                | TokenKind::TypeI32
                | TokenKind::TypeI64
                | TokenKind::TypeU8
                | TokenKind::TypeU16
                | TokenKind::TypeU32
                | TokenKind::TypeU64
                | TokenKind::TypeFloat
                | TokenKind::TypeVoid
                | TokenKind::TypeString
                | TokenKind::TypeInt
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, position: Position) -> Self {
        Token {
            kind,
            value,
            position,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::String | TokenKind::Integer => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
