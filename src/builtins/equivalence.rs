//! `eq?` and `eqv?` -- atoms compare by value, pairs/vectors/strings by
//! identity. Unlike the structural equality the interpreter was originally
//! modeled on, this implementation never walks into a pair's contents: two
//! separately-built `(1 2)` lists are not `eq?`.

use crate::error::SchemeError;
use crate::value::Value;
use std::rc::Rc;

fn scheme_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Character(x), Value::Character(y)) => x == y,
        (Value::Nil, Value::Nil) => true,
        (Value::Pair(x), Value::Pair(y)) => Rc::ptr_eq(x, y),
        (Value::Vector(x), Value::Vector(y)) => Rc::ptr_eq(x, y),
        (Value::String(x), Value::String(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

pub fn builtin_eq_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(scheme_eq(&args[0], &args[1])))
}

pub fn builtin_eqv_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(scheme_eq(&args[0], &args[1])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_compare_by_value() {
        assert!(matches!(
            builtin_eq_p(&[Value::Integer(2), Value::Integer(2)]).unwrap(),
            Value::Boolean(true)
        ));
    }

    #[test]
    fn separately_built_pairs_are_not_eq() {
        let a = Value::cons(Value::Integer(1), Value::Nil);
        let b = Value::cons(Value::Integer(1), Value::Nil);
        assert!(matches!(builtin_eq_p(&[a, b]).unwrap(), Value::Boolean(false)));
    }

    #[test]
    fn shared_pair_is_eq_to_itself() {
        let a = Value::cons(Value::Integer(1), Value::Nil);
        assert!(matches!(builtin_eq_p(&[a.clone(), a]).unwrap(), Value::Boolean(true)));
    }
}
