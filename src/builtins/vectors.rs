//! Vector operations: construction, predicate, indexed access and mutation.

use crate::error::SchemeError;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

fn as_vector_ref(v: &Value, func: &str) -> Result<&crate::value::SchemeVector, SchemeError> {
    match v {
        Value::Vector(items) => Ok(items),
        other => Err(SchemeError::type_error(func, "vector", other)),
    }
}

fn as_index(v: &Value, func: &str) -> Result<usize, SchemeError> {
    match v {
        Value::Integer(n) if *n >= 0 => Ok(*n as usize),
        other => Err(SchemeError::type_error(func, "non-negative integer", other)),
    }
}

/// `(make-vector len [fill])`; fill defaults to Nil, matching the
/// "unspecified" default the grammar leaves open.
pub fn builtin_make_vector(args: &[Value]) -> Result<Value, SchemeError> {
    let len = as_index(&args[0], "make-vector")?;
    let fill = args.get(1).cloned().unwrap_or(Value::Nil);
    Ok(Value::Vector(Rc::new(RefCell::new(vec![fill; len]))))
}

pub fn builtin_vector_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Vector(_))))
}

pub fn builtin_vector_ref(args: &[Value]) -> Result<Value, SchemeError> {
    let items = as_vector_ref(&args[0], "vector-ref")?;
    let index = as_index(&args[1], "vector-ref")?;
    items
        .borrow()
        .get(index)
        .cloned()
        .ok_or_else(|| SchemeError::invalid_argument("vector-ref", "index out of bounds"))
}

pub fn builtin_vector_set(args: &[Value]) -> Result<Value, SchemeError> {
    let items = as_vector_ref(&args[0], "vector-set!")?;
    let index = as_index(&args[1], "vector-set!")?;
    let mut items = items.borrow_mut();
    if index >= items.len() {
        return Err(SchemeError::invalid_argument("vector-set!", "index out of bounds"));
    }
    items[index] = args[2].clone();
    Ok(Value::Unspecified)
}

pub fn builtin_vector_length(args: &[Value]) -> Result<Value, SchemeError> {
    let items = as_vector_ref(&args[0], "vector-length")?;
    Ok(Value::Integer(items.borrow().len() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_vector_fills_with_default() {
        let v = builtin_make_vector(&[Value::Integer(3)]).unwrap();
        match v {
            Value::Vector(items) => assert_eq!(items.borrow().len(), 3),
            _ => panic!("expected vector"),
        }
    }

    #[test]
    fn vector_set_then_ref_roundtrips() {
        let v = builtin_make_vector(&[Value::Integer(2)]).unwrap();
        builtin_vector_set(&[v.clone(), Value::Integer(0), Value::Integer(9)]).unwrap();
        assert!(matches!(
            builtin_vector_ref(&[v, Value::Integer(0)]).unwrap(),
            Value::Integer(9)
        ));
    }

    #[test]
    fn vector_ref_out_of_bounds_is_an_error() {
        let v = builtin_make_vector(&[Value::Integer(1)]).unwrap();
        assert!(builtin_vector_ref(&[v, Value::Integer(5)]).is_err());
    }
}
