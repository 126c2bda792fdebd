use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Diagnostic, ErrorKind},
    Position,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    // Anchored so a match can only start at the cursor.
    static ref IDENT_PATTERN: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// A pull-based lexer. `next_token` hands out one token at a time; the only
/// state carried between calls is the cursor and the line/column counters.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Rc<String>) -> Lexer {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            file,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn at(&self) -> char {
        self.source.as_bytes()[self.pos] as char
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Consumes one byte. After a newline the column resets to 0, so the
    /// first character of every line but the first sits at column 0.
    fn advance(&mut self) {
        let byte = self.source.as_bytes()[self.pos];
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn skip_trivia(&mut self) {
        while !self.at_eof() {
            if self.at().is_ascii_whitespace() {
                self.advance();
            } else if self.remainder().starts_with("//") {
                while !self.at_eof() && self.at() != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn error(&self, kind: ErrorKind, position: Position) -> Diagnostic {
        Diagnostic::new(kind, Rc::clone(&self.file), position)
    }

    /// Returns the next token, or a fatal diagnostic. Once the end of input
    /// is reached every further call returns `Eof` again.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        self.skip_trivia();

        if self.at_eof() {
            let position = Position::new(self.line, self.column, self.pos, self.pos);
            return Ok(Token::new(TokenKind::Eof, String::from("EOF"), position));
        }

        let (line, column, start) = (self.line, self.column, self.pos);
        let c = self.at();

        let punctuation = match c {
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            '{' => Some(TokenKind::LeftBrace),
            '}' => Some(TokenKind::RightBrace),
            ';' => Some(TokenKind::Semicolon),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = punctuation {
            self.advance();
            let position = Position::new(line, column, start, start);
            return Ok(Token::new(kind, c.to_string(), position));
        }

        if c == '"' {
            return self.string_token(line, column, start);
        }

        if c.is_ascii_digit() {
            let matched = INTEGER_PATTERN.find(self.remainder()).unwrap().as_str();
            let value = matched.to_string();
            self.advance_n(value.len());
            let position = Position::new(line, column, start, start + value.len() - 1);
            return Ok(Token::new(TokenKind::Integer, value, position));
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let matched = IDENT_PATTERN.find(self.remainder()).unwrap().as_str();
            let value = matched.to_string();
            self.advance_n(value.len());
            let position = Position::new(line, column, start, start + value.len() - 1);
            let kind = RESERVED_LOOKUP
                .get(value.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier);
            return Ok(Token::new(kind, value, position));
        }

        let position = Position::new(line, column, start, start);
        Err(self.error(
            ErrorKind::UnknownToken {
                token: c.to_string(),
            },
            position,
        ))
    }

    /// String literals take their contents verbatim; escape substitution is
    /// a later concern. A newline or end-of-input before the closing quote
    /// is fatal.
    fn string_token(&mut self, line: u32, column: u32, start: usize) -> Result<Token, Diagnostic> {
        self.advance(); // opening quote

        let content_start = self.pos;
        while !self.at_eof() && self.at() != '"' && self.at() != '\n' {
            self.advance();
        }

        if self.at_eof() || self.at() == '\n' {
            let position = Position::new(line, column, start, self.pos.saturating_sub(1));
            return Err(self.error(ErrorKind::UnterminatedString, position));
        }

        let value = self.source[content_start..self.pos].to_string();
        self.advance(); // closing quote
        let position = Position::new(line, column, start, self.pos - 1);
        Ok(Token::new(TokenKind::String, value, position))
    }
}

/// Drains the whole stream. Convenience for tests and tooling; the parser
/// pulls tokens on demand instead.
pub fn tokenize(source: String, file: Rc<String>) -> Result<Vec<Token>, Diagnostic> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    Ok(tokens)
}
