//! Numeric tower: `+ - * /`, `quotient`/`remainder`/`modulo`, `exp`/`log`, and
//! the exactness predicates.
//!
//! Mixed Integer/Float operands promote the result to Float; `/` always
//! yields a Float even when its operands are exact.

use crate::error::SchemeError;
use crate::value::Value;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Integer(n),
            Num::Float(f) => Value::Float(f),
        }
    }

    fn add(self, other: Num) -> Num {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Num::Int(a + b),
            (a, b) => Num::Float(a.as_f64() + b.as_f64()),
        }
    }

    fn sub(self, other: Num) -> Num {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Num::Int(a - b),
            (a, b) => Num::Float(a.as_f64() - b.as_f64()),
        }
    }

    fn mul(self, other: Num) -> Num {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Num::Int(a * b),
            (a, b) => Num::Float(a.as_f64() * b.as_f64()),
        }
    }

    fn neg(self) -> Num {
        match self {
            Num::Int(a) => Num::Int(-a),
            Num::Float(a) => Num::Float(-a),
        }
    }
}

fn to_num(v: &Value, func: &str) -> Result<Num, SchemeError> {
    match v {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Float(f) => Ok(Num::Float(*f)),
        other => Err(SchemeError::type_error(func, "number", other)),
    }
}

fn to_int(v: &Value, func: &str) -> Result<i64, SchemeError> {
    match v {
        Value::Integer(n) => Ok(*n),
        other => Err(SchemeError::type_error(func, "integer", other)),
    }
}

pub fn builtin_add(args: &[Value]) -> Result<Value, SchemeError> {
    let mut acc = Num::Int(0);
    for arg in args {
        acc = acc.add(to_num(arg, "+")?);
    }
    Ok(acc.into_value())
}

pub fn builtin_sub(args: &[Value]) -> Result<Value, SchemeError> {
    let first = to_num(&args[0], "-")?;
    if args.len() == 1 {
        return Ok(first.neg().into_value());
    }
    let mut acc = first;
    for arg in &args[1..] {
        acc = acc.sub(to_num(arg, "-")?);
    }
    Ok(acc.into_value())
}

pub fn builtin_mul(args: &[Value]) -> Result<Value, SchemeError> {
    let mut acc = Num::Int(1);
    for arg in args {
        acc = acc.mul(to_num(arg, "*")?);
    }
    Ok(acc.into_value())
}

/// Division always yields a Float, even `(/ 4 2)`.
pub fn builtin_div(args: &[Value]) -> Result<Value, SchemeError> {
    let first = to_num(&args[0], "/")?.as_f64();
    if args.len() == 1 {
        if first == 0.0 {
            return Err(SchemeError::invalid_argument("/", "division by zero"));
        }
        return Ok(Value::Float(1.0 / first));
    }
    let mut acc = first;
    for arg in &args[1..] {
        let n = to_num(arg, "/")?.as_f64();
        if n == 0.0 {
            return Err(SchemeError::invalid_argument("/", "division by zero"));
        }
        acc /= n;
    }
    Ok(Value::Float(acc))
}

/// Truncates toward zero, matching Rust's native integer division.
pub fn builtin_quotient(args: &[Value]) -> Result<Value, SchemeError> {
    let a = to_int(&args[0], "quotient")?;
    let b = to_int(&args[1], "quotient")?;
    if b == 0 {
        return Err(SchemeError::invalid_argument("quotient", "division by zero"));
    }
    Ok(Value::Integer(a / b))
}

pub fn builtin_remainder(args: &[Value]) -> Result<Value, SchemeError> {
    let a = to_int(&args[0], "remainder")?;
    let b = to_int(&args[1], "remainder")?;
    if b == 0 {
        return Err(SchemeError::invalid_argument("remainder", "division by zero"));
    }
    Ok(Value::Integer(a % b))
}

/// Result carries the sign of the divisor, unlike `remainder`.
pub fn builtin_modulo(args: &[Value]) -> Result<Value, SchemeError> {
    let a = to_int(&args[0], "modulo")?;
    let b = to_int(&args[1], "modulo")?;
    if b == 0 {
        return Err(SchemeError::invalid_argument("modulo", "division by zero"));
    }
    Ok(Value::Integer(((a % b) + b) % b))
}

pub fn builtin_exp(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Float(to_num(&args[0], "exp")?.as_f64().exp()))
}

pub fn builtin_log(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Float(to_num(&args[0], "log")?.as_f64().ln()))
}

pub fn builtin_number_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Integer(_) | Value::Float(_))))
}

pub fn builtin_exact_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Integer(_))))
}

pub fn builtin_inexact_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Float(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_with_no_args_is_zero() {
        assert!(matches!(builtin_add(&[]).unwrap(), Value::Integer(0)));
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        let v = builtin_add(&[Value::Integer(1), Value::Float(2.5)]).unwrap();
        assert!(matches!(v, Value::Float(f) if f == 3.5));
    }

    #[test]
    fn division_always_yields_float() {
        let v = builtin_div(&[Value::Integer(4), Value::Integer(2)]).unwrap();
        assert!(matches!(v, Value::Float(f) if f == 2.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(builtin_div(&[Value::Integer(1), Value::Integer(0)]).is_err());
    }

    #[test]
    fn modulo_takes_sign_of_divisor() {
        let v = builtin_modulo(&[Value::Integer(-7), Value::Integer(3)]).unwrap();
        assert!(matches!(v, Value::Integer(2)));
    }

    #[test]
    fn remainder_takes_sign_of_dividend() {
        let v = builtin_remainder(&[Value::Integer(-7), Value::Integer(3)]).unwrap();
        assert!(matches!(v, Value::Integer(-1)));
    }
}
