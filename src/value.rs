// ABOUTME: Value types representing Scheme data and runtime values

use crate::env::Environment;
use std::cell::RefCell;
use std::rc::Rc;

/// A mutable cons cell. `car`/`cdr` access and `set-car!`/`set-cdr!` mutation
/// both go through the `RefCell`; identity comparisons (`eq?`) compare the
/// `Rc` pointer, not the contents.
pub struct PairCell {
    pub car: Value,
    pub cdr: Value,
}

pub type Pair = Rc<RefCell<PairCell>>;
pub type SchemeString = Rc<RefCell<String>>;
pub type SchemeVector = Rc<RefCell<Vec<Value>>>;

pub type BuiltinFn = fn(&[Value]) -> Result<Value, crate::error::SchemeError>;
pub type PrimitiveFn = fn(&[Value], &Rc<Environment>) -> Result<Value, crate::error::SchemeError>;

/// The four kinds of callable described by the data model: built-ins receive
/// pre-evaluated arguments, primitives receive raw argument forms plus the
/// calling environment, user-defined procedures close over their defining
/// frame, and macros expand into a new form evaluated in the caller's
/// environment.
#[derive(Clone)]
pub enum Procedure {
    BuiltIn {
        name: Rc<str>,
        min_args: usize,
        max_args: Option<usize>,
        func: BuiltinFn,
    },
    Primitive {
        name: Rc<str>,
        func: PrimitiveFn,
    },
    UserDefined {
        name: Option<Rc<str>>,
        params: Rc<[Rc<str>]>,
        rest: Option<Rc<str>>,
        body: Rc<[Value]>,
        env: Rc<Environment>,
    },
    Macro {
        name: Rc<str>,
        params: Rc<[Rc<str>]>,
        rest: Option<Rc<str>>,
        body: Rc<[Value]>,
        env: Rc<Environment>,
    },
}

impl Procedure {
    pub fn name(&self) -> Option<&str> {
        match self {
            Procedure::BuiltIn { name, .. } => Some(name),
            Procedure::Primitive { name, .. } => Some(name),
            Procedure::UserDefined { name, .. } => name.as_deref(),
            Procedure::Macro { name, .. } => Some(name),
        }
    }
}

#[derive(Clone)]
pub enum Value {
    Symbol(Rc<str>),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Character(char),
    String(SchemeString),
    Pair(Pair),
    Nil,
    Vector(SchemeVector),
    Procedure(Procedure),
    /// The result of a form whose value carries no meaning (`define`, `set!`,
    /// `defmacro`, an else-less `if` taking its false branch, `(begin)`, and
    /// the mutator builtins like `set-car!`/`vector-set!`). Kept distinct
    /// from `Nil` (the empty list) so the REPL can tell "no result to print"
    /// from "the result was `()`".
    Unspecified,
}

impl Value {
    pub fn symbol(name: impl Into<Rc<str>>) -> Value {
        Value::Symbol(name.into())
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(Rc::new(RefCell::new(s.into())))
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(RefCell::new(PairCell { car, cdr })))
    }

    /// Builds a proper list from evaluated values.
    pub fn list(items: impl DoubleEndedIterator<Item = Value>) -> Value {
        items.rfold(Value::Nil, |tail, head| Value::cons(head, tail))
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Value::Unspecified)
    }

    /// Human-readable type name used inside type-error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Symbol(_) => "symbol",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Character(_) => "character",
            Value::String(_) => "string",
            Value::Pair(_) => "pair",
            Value::Nil => "nil",
            Value::Vector(_) => "vector",
            Value::Procedure(_) => "procedure",
            Value::Unspecified => "unspecified",
        }
    }

    /// Floyd's cycle detection over the `cdr` spine starting at `pair`,
    /// mirroring the source's identity-set-based `is_circular`. Used by both
    /// the printer and `length` to avoid diverging on a list mutated into a
    /// cycle via `set-cdr!`.
    pub fn is_circular(pair: &Pair) -> bool {
        let mut slow = pair.borrow().cdr.clone();
        let mut fast = pair.borrow().cdr.clone();
        loop {
            fast = match fast {
                Value::Pair(p) => p.borrow().cdr.clone(),
                _ => return false,
            };
            fast = match fast {
                Value::Pair(p) => p.borrow().cdr.clone(),
                _ => return false,
            };
            slow = match slow {
                Value::Pair(p) => p.borrow().cdr.clone(),
                _ => return false,
            };
            if let (Value::Pair(a), Value::Pair(b)) = (&slow, &fast) {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
            } else {
                return false;
            }
        }
    }

    /// Walks a proper list into a `Vec<Value>`. Returns `None` if the list is
    /// improper (does not terminate in `Nil`) or circular.
    pub fn list_to_vec(&self) -> Option<Vec<Value>> {
        if let Value::Pair(p) = self {
            if Value::is_circular(p) {
                return None;
            }
        }
        let mut items = Vec::new();
        let mut current = self.clone();
        loop {
            match current {
                Value::Nil => return Some(items),
                Value::Pair(p) => {
                    let cell = p.borrow();
                    items.push(cell.car.clone());
                    let next = cell.cdr.clone();
                    drop(cell);
                    current = next;
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_builds_right_associated_chain() {
        let v = Value::list(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)].into_iter());
        let items = v.list_to_vec().expect("proper list");
        assert_eq!(items.len(), 3);
        match &items[0] {
            Value::Integer(1) => {}
            _ => panic!("expected 1"),
        }
    }

    #[test]
    fn empty_list_is_nil() {
        let v = Value::list(std::iter::empty());
        assert!(v.is_nil());
    }

    #[test]
    fn list_to_vec_rejects_improper_list() {
        let improper = Value::cons(Value::Integer(1), Value::Integer(2));
        assert!(improper.list_to_vec().is_none());
    }

    #[test]
    fn list_to_vec_detects_cycle() {
        let cell = Rc::new(RefCell::new(PairCell {
            car: Value::Integer(1),
            cdr: Value::Nil,
        }));
        cell.borrow_mut().cdr = Value::Pair(cell.clone());
        let cyclic = Value::Pair(cell);
        assert!(cyclic.list_to_vec().is_none());
    }

    #[test]
    fn type_name_reports_tag() {
        assert_eq!(Value::Integer(1).type_name(), "integer");
        assert_eq!(Value::Nil.type_name(), "nil");
    }
}
