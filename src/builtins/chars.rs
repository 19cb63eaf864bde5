//! Character predicate and comparison builtins.

use crate::error::SchemeError;
use crate::value::Value;

fn as_char(v: &Value, func: &str) -> Result<char, SchemeError> {
    match v {
        Value::Character(c) => Ok(*c),
        other => Err(SchemeError::type_error(func, "character", other)),
    }
}

pub fn builtin_char_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Character(_))))
}

fn pairwise(args: &[Value], func: &str, op: fn(char, char) -> bool) -> Result<Value, SchemeError> {
    for window in args.windows(2) {
        let a = as_char(&window[0], func)?;
        let b = as_char(&window[1], func)?;
        if !op(a, b) {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

pub fn builtin_char_eq(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "char=?", |a, b| a == b)
}

pub fn builtin_char_lt(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "char<?", |a, b| a < b)
}

pub fn builtin_char_gt(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "char>?", |a, b| a > b)
}

pub fn builtin_char_le(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "char<=?", |a, b| a <= b)
}

pub fn builtin_char_ge(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "char>=?", |a, b| a >= b)
}
