//! Type annotation parsing.
//!
//! Annotations are single type keywords today; the function stays the one
//! seam to grow when composite annotations (arrays, objects) arrive.

use crate::{
    ast::types::{IntWidth, Type},
    errors::errors::Diagnostic,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<Type, Diagnostic> {
    let ty = match parser.current_token_kind() {
        TokenKind::TypeI8 => Type::Int(IntWidth::I8),
        TokenKind::TypeI16 => Type::Int(IntWidth::I16),
        TokenKind::TypeI32 => Type::Int(IntWidth::I32),
        TokenKind::TypeI64 => Type::Int(IntWidth::I64),
        TokenKind::TypeU8 => Type::Int(IntWidth::U8),
        TokenKind::TypeU16 => Type::Int(IntWidth::U16),
        TokenKind::TypeU32 => Type::Int(IntWidth::U32),
        TokenKind::TypeU64 => Type::Int(IntWidth::U64),
        // Legacy alias for i32.
        TokenKind::TypeInt => Type::Int(IntWidth::I32),
        TokenKind::TypeFloat => Type::Float,
        TokenKind::TypeVoid => Type::Void,
        TokenKind::TypeString => Type::String,
        _ => return Err(parser.unexpected("a type")),
    };

    parser.bump()?;
    Ok(ty)
}
