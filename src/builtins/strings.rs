//! String operations: predicate, construction, length, indexed access and
//! mutation.

use crate::error::SchemeError;
use crate::value::Value;

fn as_string_ref(v: &Value, func: &str) -> Result<&crate::value::SchemeString, SchemeError> {
    match v {
        Value::String(s) => Ok(s),
        other => Err(SchemeError::type_error(func, "string", other)),
    }
}

fn as_index(v: &Value, func: &str) -> Result<usize, SchemeError> {
    match v {
        Value::Integer(n) if *n >= 0 => Ok(*n as usize),
        other => Err(SchemeError::type_error(func, "non-negative integer", other)),
    }
}

pub fn builtin_string_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::String(_))))
}

/// `(make-string len [fill])`; fill defaults to `#\space`.
pub fn builtin_make_string(args: &[Value]) -> Result<Value, SchemeError> {
    let len = as_index(&args[0], "make-string")?;
    let fill = match args.get(1) {
        Some(Value::Character(c)) => *c,
        Some(other) => return Err(SchemeError::type_error("make-string", "character", other)),
        None => ' ',
    };
    Ok(Value::string(std::iter::repeat(fill).take(len).collect::<String>()))
}

pub fn builtin_string_length(args: &[Value]) -> Result<Value, SchemeError> {
    let s = as_string_ref(&args[0], "string-length")?;
    Ok(Value::Integer(s.borrow().chars().count() as i64))
}

pub fn builtin_string_ref(args: &[Value]) -> Result<Value, SchemeError> {
    let s = as_string_ref(&args[0], "string-ref")?;
    let index = as_index(&args[1], "string-ref")?;
    s.borrow()
        .chars()
        .nth(index)
        .map(Value::Character)
        .ok_or_else(|| SchemeError::invalid_argument("string-ref", "index out of bounds"))
}

pub fn builtin_string_set(args: &[Value]) -> Result<Value, SchemeError> {
    let s = as_string_ref(&args[0], "string-set!")?;
    let index = as_index(&args[1], "string-set!")?;
    let c = match &args[2] {
        Value::Character(c) => *c,
        other => return Err(SchemeError::type_error("string-set!", "character", other)),
    };
    let mut chars: Vec<char> = s.borrow().chars().collect();
    if index >= chars.len() {
        return Err(SchemeError::invalid_argument("string-set!", "index out of bounds"));
    }
    chars[index] = c;
    *s.borrow_mut() = chars.into_iter().collect();
    Ok(Value::Unspecified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_string_defaults_to_spaces() {
        let v = builtin_make_string(&[Value::Integer(3)]).unwrap();
        match v {
            Value::String(s) => assert_eq!(&*s.borrow(), "   "),
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn string_ref_and_set_roundtrip() {
        let s = Value::string("abc");
        assert!(matches!(
            builtin_string_ref(&[s.clone(), Value::Integer(1)]).unwrap(),
            Value::Character('b')
        ));
        builtin_string_set(&[s.clone(), Value::Integer(1), Value::Character('Z')]).unwrap();
        match &s {
            Value::String(inner) => assert_eq!(&*inner.borrow(), "aZc"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn string_ref_out_of_bounds_is_an_error() {
        assert!(builtin_string_ref(&[Value::string("ab"), Value::Integer(5)]).is_err());
    }
}
