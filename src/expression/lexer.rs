use std::iter::Peekable;
use std::str::CharIndices;

use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Eof,
}

/// Split a coordinate expression into tokens, ending with [`TokenKind::Eof`].
pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut chars = input.char_indices().peekable();
    let mut out = Vec::new();

    while let Some(&(start, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => lex_number(input, &mut chars)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = take_while(&mut chars, |ch| ch.is_ascii_alphanumeric() || ch == '_');
                TokenKind::Ident(input[start..end].to_owned())
            }
            '(' | ')' | '+' | '-' | '*' | '/' => {
                chars.next();
                match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    _ => TokenKind::Slash,
                }
            }
            other => {
                return Err(ExprError::at(start, format!("unexpected character '{other}'")));
            }
        };
        let end = chars.peek().map_or(input.len(), |&(i, _)| i);
        out.push(Token {
            kind,
            span: Span { start, end },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });
    Ok(out)
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, mut pred: impl FnMut(char) -> bool) -> usize {
    let mut end = 0;
    while let Some(&(i, ch)) = chars.peek() {
        if !pred(ch) {
            return i;
        }
        end = i + ch.len_utf8();
        chars.next();
    }
    end
}

// Digits with at most one decimal point: `12`, `1.5`, `.5`, `3.`.
fn lex_number(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<TokenKind, ExprError> {
    let start = chars.peek().map_or(input.len(), |&(i, _)| i);
    let mut seen_dot = false;
    let end = take_while(chars, |ch| {
        if ch == '.' && !seen_dot {
            seen_dot = true;
            true
        } else {
            ch.is_ascii_digit()
        }
    });
    let text = &input[start..end];
    text.parse::<f64>()
        .map(TokenKind::Number)
        .map_err(|_| ExprError::at(start, format!("invalid number '{text}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
