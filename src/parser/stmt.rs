use crate::{
    ast::ast::{Block, Expression, FnDecl, Import, Let, Return, Stmt},
    ast::types::Type,
    errors::errors::Diagnostic,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Lowest)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(Expression {
        position: expr.position().span_to(semicolon.position),
        expr,
    }))
}

/// `pub? (fn|fun) name(param: type, ...) (: type)? { ... }`
///
/// A missing return annotation right before the body means `void`.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.current_token().position;

    let is_public = parser.current_token_kind() == TokenKind::Pub;
    if is_public {
        if parser.lookahead_kind() != TokenKind::Fn {
            return Err(parser.unexpected("`fn` after `pub`"));
        }
        parser.bump()?;
    }
    parser.bump()?; // fn

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::LeftParen)?;
    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::RightParen {
        let param_name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::Colon)?;
        let param_type = parse_type(parser)?;
        params.push((param_name, param_type));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.bump()?;
        } else {
            break;
        }
    }
    parser.expect(TokenKind::RightParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.bump()?;
        parse_type(parser)?
    } else {
        Type::Void
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDecl {
        position: start.span_to(body.position),
        name,
        params,
        return_type,
        is_public,
        body,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.bump()?.position;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Lowest)?)
    } else {
        None
    };

    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(Return {
        value,
        position: start.span_to(semicolon.position),
    }))
}

/// `let name: type;`
///
/// The grammar has no assignment token, so a let declares a name and its
/// type only.
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.bump()?.position;

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let ty = parse_type(parser)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Let(Let {
        name,
        ty,
        position: start.span_to(semicolon.position),
    }))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.bump()?.position;

    let name = parser.expect(TokenKind::Identifier)?.value;

    let from = if parser.current_token_kind() == TokenKind::From {
        parser.bump()?;
        Some(parser.expect(TokenKind::String)?.value)
    } else {
        None
    };

    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Import(Import {
        name,
        from,
        position: start.span_to(semicolon.position),
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `{ stmt* }`, shared by function bodies and nested block statements.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Diagnostic> {
    let start = parser.expect(TokenKind::LeftBrace)?.position;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::RightBrace && parser.has_tokens() {
        body.push(parse_stmt(parser)?);
    }

    let close = parser.expect(TokenKind::RightBrace)?;

    Ok(Block {
        body,
        position: start.span_to(close.position),
    })
}
