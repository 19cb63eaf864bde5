// ABOUTME: Reader building S-expression values from a token stream

use crate::error::SchemeError;
use crate::lexer::{PositionedToken, Token};
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

fn build_list(items: Vec<Value>, tail: Value) -> Value {
    items.into_iter().rfold(tail, |acc, item| Value::cons(item, acc))
}

fn wrap(tokens: &[PositionedToken], pos: usize, name: &str) -> Result<(Value, usize), SchemeError> {
    let (inner, next) = read_expr(tokens, pos)?;
    Ok((Value::list(vec![Value::symbol(name), inner].into_iter()), next))
}

fn read_list(tokens: &[PositionedToken], start: usize) -> Result<(Value, usize), SchemeError> {
    let mut items = Vec::new();
    let mut pos = start;
    loop {
        match tokens.get(pos) {
            None => return Err(SchemeError::syntax("unexpected end of input inside a list")),
            Some(t) if t.token == Token::RParen => {
                return Ok((build_list(items, Value::Nil), pos + 1));
            }
            Some(t) if matches!(&t.token, Token::Symbol(s) if s == ".") => {
                if items.is_empty() {
                    return Err(SchemeError::syntax("dotted pair with no head elements"));
                }
                let (tail, next) = read_expr(tokens, pos + 1)?;
                match tokens.get(next) {
                    Some(t2) if t2.token == Token::RParen => {
                        return Ok((build_list(items, tail), next + 1));
                    }
                    _ => {
                        return Err(SchemeError::syntax(
                            "malformed dotted list: expected ) after the tail",
                        ))
                    }
                }
            }
            _ => {
                let (value, next) = read_expr(tokens, pos)?;
                items.push(value);
                pos = next;
            }
        }
    }
}

fn read_vector(tokens: &[PositionedToken], start: usize) -> Result<(Value, usize), SchemeError> {
    let mut items = Vec::new();
    let mut pos = start;
    loop {
        match tokens.get(pos) {
            None => return Err(SchemeError::syntax("unexpected end of input inside a vector")),
            Some(t) if t.token == Token::RParen => {
                return Ok((Value::Vector(Rc::new(RefCell::new(items))), pos + 1));
            }
            _ => {
                let (value, next) = read_expr(tokens, pos)?;
                items.push(value);
                pos = next;
            }
        }
    }
}

fn read_expr(tokens: &[PositionedToken], pos: usize) -> Result<(Value, usize), SchemeError> {
    let tok = tokens
        .get(pos)
        .ok_or_else(|| SchemeError::syntax("unexpected end of input"))?;
    match &tok.token {
        Token::Integer(n) => Ok((Value::Integer(*n), pos + 1)),
        Token::Float(f) => Ok((Value::Float(*f), pos + 1)),
        Token::Boolean(b) => Ok((Value::Boolean(*b), pos + 1)),
        Token::Character(c) => Ok((Value::Character(*c), pos + 1)),
        Token::String(s) => Ok((Value::string(s.clone()), pos + 1)),
        Token::Symbol(s) => Ok((Value::symbol(s.as_str()), pos + 1)),
        Token::Quote => wrap(tokens, pos + 1, "quote"),
        Token::Quasiquote => wrap(tokens, pos + 1, "quasiquote"),
        Token::Unquote => wrap(tokens, pos + 1, "unquote"),
        Token::UnquoteSplicing => wrap(tokens, pos + 1, "unquote-splicing"),
        Token::LParen => read_list(tokens, pos + 1),
        Token::HashParen => read_vector(tokens, pos + 1),
        Token::RParen => Err(SchemeError::syntax(format!(
            "unexpected ) at token position {pos}"
        ))),
    }
}

/// Reads every top-level form out of a token stream.
pub fn read_all(tokens: &[PositionedToken]) -> Result<Vec<Value>, SchemeError> {
    let mut forms = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let (value, next) = read_expr(tokens, pos)?;
        forms.push(value);
        pos = next;
    }
    Ok(forms)
}

/// Reads a single top-level form, erroring if there is trailing input left
/// over (used for the REPL, which reads one form per prompt cycle).
pub fn read_one(tokens: &[PositionedToken]) -> Result<Value, SchemeError> {
    let (value, next) = read_expr(tokens, 0)?;
    if next != tokens.len() {
        return Err(SchemeError::syntax("unexpected trailing input after expression"));
    }
    Ok(value)
}
