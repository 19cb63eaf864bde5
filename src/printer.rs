// ABOUTME: Renders values in their canonical Scheme external representation

use crate::value::{Procedure, Value};
use std::fmt;

pub fn external_repr(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_character(out: &mut String, c: char) {
    match c {
        ' ' => out.push_str("#\\space"),
        '\n' => out.push_str("#\\newline"),
        '\t' => out.push_str("#\\tab"),
        c => {
            out.push_str("#\\");
            out.push(c);
        }
    }
}

fn write_string_literal(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_float(out: &mut String, f: f64) {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        out.push_str(&format!("{f:.1}"));
    } else {
        out.push_str(&f.to_string());
    }
}

fn write_procedure(out: &mut String, proc: &Procedure) {
    match proc {
        Procedure::BuiltIn { name, .. } => out.push_str(&format!("#<built-in function {name}>")),
        Procedure::Primitive { name, .. } => out.push_str(&format!("#<primitive function {name}>")),
        Procedure::UserDefined { name: Some(name), .. } => {
            out.push_str(&format!("#<user function {name}>"))
        }
        Procedure::UserDefined { name: None, .. } => out.push_str("#<anonymous function>"),
        Procedure::Macro { name, .. } => out.push_str(&format!("#<macro {name}>")),
    }
}

fn write_pair(out: &mut String, pair: &crate::value::Pair) {
    if Value::is_circular(pair) {
        out.push_str("#<circular list>");
        return;
    }
    out.push('(');
    write_value(out, &pair.borrow().car);
    let mut tail = pair.borrow().cdr.clone();
    loop {
        match tail {
            Value::Nil => break,
            Value::Pair(next) => {
                out.push(' ');
                write_value(out, &next.borrow().car);
                let new_tail = next.borrow().cdr.clone();
                tail = new_tail;
            }
            other => {
                out.push_str(" . ");
                write_value(out, &other);
                break;
            }
        }
    }
    out.push(')');
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Symbol(s) => out.push_str(s),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => write_float(out, *f),
        Value::Boolean(b) => out.push_str(if *b { "#t" } else { "#f" }),
        Value::Character(c) => write_character(out, *c),
        Value::String(s) => write_string_literal(out, &s.borrow()),
        Value::Nil => out.push_str("()"),
        Value::Pair(p) => write_pair(out, p),
        Value::Vector(items) => {
            out.push_str("#(");
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, item);
            }
            out.push(')');
        }
        Value::Procedure(p) => write_procedure(out, p),
        Value::Unspecified => {}
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", external_repr(self))
    }
}
