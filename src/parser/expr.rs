use crate::{
    ast::ast::{Call, Expr, Identifier, IntegerLit, StringLit},
    errors::errors::{Diagnostic, ErrorKind},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Precedence climbing: parse a NUD as the left-hand side, then fold in
/// LED extensions while the next token binds tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("an expression"));
    };

    let mut left = nud_fn(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let power = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Lowest);
        if power <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };
        left = led_fn(parser, left, power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            let token = parser.current_token();
            let Ok(value) = token.value.parse::<u64>() else {
                return Err(Diagnostic::new(
                    ErrorKind::IntegerOverflow {
                        token: token.value.clone(),
                    },
                    parser.file(),
                    token.position,
                ));
            };
            let token = parser.bump()?;
            Ok(Expr::Int(IntegerLit {
                value,
                position: token.position,
            }))
        }
        TokenKind::Identifier => {
            let token = parser.bump()?;
            Ok(Expr::Identifier(Identifier {
                name: token.value,
                position: token.position,
            }))
        }
        TokenKind::String => {
            let token = parser.bump()?;
            Ok(Expr::Str(StringLit {
                value: token.value,
                position: token.position,
            }))
        }
        _ => Err(parser.unexpected("an expression")),
    }
}

/// Call application: `callee(arg, arg)`. Arguments parse at `Lowest`; no
/// trailing comma. The node's end extends to the closing parenthesis.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.bump()?; // (

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::RightParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Lowest)?);
            if parser.current_token_kind() == TokenKind::Comma {
                parser.bump()?;
            } else {
                break;
            }
        }
    }

    let close = parser.expect(TokenKind::RightParen)?;

    Ok(Expr::Call(Call {
        position: left.position().span_to(close.position),
        callee: Box::new(left),
        arguments,
    }))
}
