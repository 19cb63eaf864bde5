//! Pair and list operations: constructors, accessors, mutators, predicates,
//! and the `c[ad]+r` combinators up to four levels deep.

use crate::error::SchemeError;
use crate::value::Value;

fn as_pair<'a>(v: &'a Value, func: &str) -> Result<&'a crate::value::Pair, SchemeError> {
    v.as_pair().ok_or_else(|| SchemeError::type_error(func, "pair", v))
}

pub fn builtin_cons(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

pub fn builtin_car(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(as_pair(&args[0], "car")?.borrow().car.clone())
}

pub fn builtin_cdr(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(as_pair(&args[0], "cdr")?.borrow().cdr.clone())
}

pub fn builtin_set_car(args: &[Value]) -> Result<Value, SchemeError> {
    as_pair(&args[0], "set-car!")?.borrow_mut().car = args[1].clone();
    Ok(Value::Unspecified)
}

pub fn builtin_set_cdr(args: &[Value]) -> Result<Value, SchemeError> {
    as_pair(&args[0], "set-cdr!")?.borrow_mut().cdr = args[1].clone();
    Ok(Value::Unspecified)
}

pub fn builtin_null_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(args[0].is_nil()))
}

pub fn builtin_pair_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Pair(_))))
}

pub fn builtin_list(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::list(args.iter().cloned()))
}

/// Walks the `cdr` spine, mirroring the cycle-aware walk `list_to_vec` uses,
/// so `(length (circular list))` raises *circular-list* instead of diverging
/// or being mistaken for an ordinary type error.
pub fn builtin_length(args: &[Value]) -> Result<Value, SchemeError> {
    match args[0].list_to_vec() {
        Some(items) => Ok(Value::Integer(items.len() as i64)),
        None => {
            if let Value::Pair(p) = &args[0] {
                if Value::is_circular(p) {
                    return Err(SchemeError::circular_list(
                        "length: list is circular",
                    ));
                }
            }
            Err(SchemeError::type_error("length", "proper list", &args[0]))
        }
    }
}

pub fn builtin_list_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(args[0].list_to_vec().is_some()))
}

fn cxr(path: &str, v: &Value) -> Result<Value, SchemeError> {
    let mut current = v.clone();
    for op in path.chars().rev() {
        let pair = as_pair(&current, "c..r")?;
        let cell = pair.borrow();
        current = if op == 'a' { cell.car.clone() } else { cell.cdr.clone() };
    }
    Ok(current)
}

macro_rules! define_cxr {
    ($fn_name:ident, $path:literal) => {
        pub fn $fn_name(args: &[Value]) -> Result<Value, SchemeError> {
            cxr($path, &args[0])
        }
    };
}

define_cxr!(builtin_caar, "aa");
define_cxr!(builtin_cadr, "ad");
define_cxr!(builtin_cdar, "da");
define_cxr!(builtin_cddr, "dd");

define_cxr!(builtin_caaar, "aaa");
define_cxr!(builtin_caadr, "aad");
define_cxr!(builtin_cadar, "ada");
define_cxr!(builtin_caddr, "add");
define_cxr!(builtin_cdaar, "daa");
define_cxr!(builtin_cdadr, "dad");
define_cxr!(builtin_cddar, "dda");
define_cxr!(builtin_cdddr, "ddd");

define_cxr!(builtin_caaaar, "aaaa");
define_cxr!(builtin_caaadr, "aaad");
define_cxr!(builtin_caadar, "aada");
define_cxr!(builtin_caaddr, "aadd");
define_cxr!(builtin_cadaar, "adaa");
define_cxr!(builtin_cadadr, "adad");
define_cxr!(builtin_caddar, "adda");
define_cxr!(builtin_cadddr, "addd");
define_cxr!(builtin_cdaaar, "daaa");
define_cxr!(builtin_cdaadr, "daad");
define_cxr!(builtin_cdadar, "dada");
define_cxr!(builtin_cdaddr, "dadd");
define_cxr!(builtin_cddaar, "ddaa");
define_cxr!(builtin_cddadr, "ddad");
define_cxr!(builtin_cdddar, "ddda");
define_cxr!(builtin_cddddr, "dddd");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_car_cdr_roundtrip() {
        let p = builtin_cons(&[Value::Integer(1), Value::Integer(2)]).unwrap();
        assert!(matches!(builtin_car(&[p.clone()]).unwrap(), Value::Integer(1)));
        assert!(matches!(builtin_cdr(&[p]).unwrap(), Value::Integer(2)));
    }

    #[test]
    fn set_car_mutates_in_place() {
        let p = builtin_cons(&[Value::Integer(1), Value::Integer(2)]).unwrap();
        builtin_set_car(&[p.clone(), Value::Integer(9)]).unwrap();
        assert!(matches!(builtin_car(&[p]).unwrap(), Value::Integer(9)));
    }

    #[test]
    fn cadr_unpacks_second_element() {
        let list = builtin_list(&[Value::Integer(1), Value::Integer(2), Value::Integer(3)]).unwrap();
        assert!(matches!(builtin_cadr(&[list]).unwrap(), Value::Integer(2)));
    }

    #[test]
    fn length_rejects_improper_list_with_a_type_error() {
        let improper = Value::cons(Value::Integer(1), Value::Integer(2));
        assert!(matches!(
            builtin_length(&[improper]).unwrap_err(),
            SchemeError::Type { .. }
        ));
    }

    #[test]
    fn length_rejects_circular_list_with_a_circular_list_error() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let cell = Rc::new(RefCell::new(crate::value::PairCell {
            car: Value::Integer(1),
            cdr: Value::Nil,
        }));
        cell.borrow_mut().cdr = Value::Pair(cell.clone());
        let cyclic = Value::Pair(cell);
        assert!(matches!(
            builtin_length(&[cyclic]).unwrap_err(),
            SchemeError::CircularList { .. }
        ));
    }

    #[test]
    fn list_p_is_false_for_dotted_pairs() {
        let improper = Value::cons(Value::Integer(1), Value::Integer(2));
        assert!(matches!(builtin_list_p(&[improper]).unwrap(), Value::Boolean(false)));
    }
}
