//! Numeric comparisons: `= < <= > >=`, applied pairwise across all arguments.

use crate::error::SchemeError;
use crate::value::Value;

fn as_f64(v: &Value, func: &str) -> Result<f64, SchemeError> {
    match v {
        Value::Integer(n) => Ok(*n as f64),
        Value::Float(f) => Ok(*f),
        other => Err(SchemeError::type_error(func, "number", other)),
    }
}

fn pairwise(args: &[Value], func: &str, op: fn(f64, f64) -> bool) -> Result<Value, SchemeError> {
    for window in args.windows(2) {
        let a = as_f64(&window[0], func)?;
        let b = as_f64(&window[1], func)?;
        if !op(a, b) {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

pub fn builtin_num_eq(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "=", |a, b| a == b)
}

pub fn builtin_lt(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "<", |a, b| a < b)
}

pub fn builtin_gt(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, ">", |a, b| a > b)
}

pub fn builtin_le(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, "<=", |a, b| a <= b)
}

pub fn builtin_ge(args: &[Value]) -> Result<Value, SchemeError> {
    pairwise(args, ">=", |a, b| a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_less_than() {
        let v = builtin_lt(&[Value::Integer(1), Value::Integer(2), Value::Integer(3)]).unwrap();
        assert!(matches!(v, Value::Boolean(true)));
        let v = builtin_lt(&[Value::Integer(1), Value::Integer(3), Value::Integer(2)]).unwrap();
        assert!(matches!(v, Value::Boolean(false)));
    }

    #[test]
    fn equality_across_mixed_numeric_types() {
        let v = builtin_num_eq(&[Value::Integer(2), Value::Float(2.0)]).unwrap();
        assert!(matches!(v, Value::Boolean(true)));
    }
}
