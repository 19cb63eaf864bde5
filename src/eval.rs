// ABOUTME: The tree-walking evaluator: special forms, application, and macro expansion

use crate::config::MAX_EVAL_DEPTH;
use crate::env::Environment;
use crate::error::{SchemeError, ARITY_TWO};
use crate::value::{Pair, PrimitiveFn, Procedure, Value};
use std::cell::Cell;
use std::rc::Rc;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Result<DepthGuard, SchemeError> {
        EVAL_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_EVAL_DEPTH {
                return Err(SchemeError::StackOverflow);
            }
            depth.set(current + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Evaluates every top-level form in order, returning the value of the last.
pub fn eval_program(forms: Vec<Value>, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let mut result = Value::Nil;
    for form in forms {
        result = eval(form, env)?;
    }
    Ok(result)
}

pub fn eval(form: Value, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let _guard = DepthGuard::enter()?;
    match form {
        // `()` reads as Nil but may not be evaluated directly; only
        // `(quote ())` produces the empty list as a value.
        Value::Nil => Err(SchemeError::syntax(
            "() is not a valid expression; did you mean (quote ())?",
        )),
        Value::Symbol(name) => {
            if let Some(func) = primitive_impl(&name) {
                return Ok(Value::Procedure(Procedure::Primitive { name, func }));
            }
            env.lookup(&name)
        }
        Value::Pair(pair) => eval_pair(pair, env),
        atom => Ok(atom),
    }
}

fn eval_pair(pair: Pair, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let (op_form, args_list) = {
        let cell = pair.borrow();
        (cell.car.clone(), cell.cdr.clone())
    };

    if let Value::Symbol(name) = &op_form {
        if let Some(func) = primitive_impl(name) {
            let args = args_list
                .list_to_vec()
                .ok_or_else(|| SchemeError::syntax(format!("{name}: malformed special form")))?;
            return func(&args, env);
        }
    }

    let op_value = eval(op_form, env)?;
    apply(op_value, &args_list, env)
}

fn apply(op_value: Value, args_list: &Value, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    match op_value {
        Value::Procedure(Procedure::Macro {
            params,
            rest,
            body,
            env: def_env,
            ..
        }) => {
            let arg_forms = args_list
                .list_to_vec()
                .ok_or_else(|| SchemeError::syntax("macro call: malformed argument list"))?;
            let frame = Environment::with_parent(def_env);
            bind_params(&frame, &params, &rest, arg_forms, "macro")?;
            let expansion = eval_body(&body, &frame)?;
            eval(expansion, env)
        }
        Value::Procedure(Procedure::Primitive { func, .. }) => {
            let args = args_list
                .list_to_vec()
                .ok_or_else(|| SchemeError::syntax("malformed special form"))?;
            func(&args, env)
        }
        Value::Procedure(Procedure::BuiltIn {
            func,
            name,
            min_args,
            max_args,
        }) => {
            let args = eval_args(args_list, env)?;
            check_arity(&name, min_args, max_args, args.len())?;
            func(&args)
        }
        Value::Procedure(Procedure::UserDefined {
            params,
            rest,
            body,
            env: closure_env,
            name,
        }) => {
            let args = eval_args(args_list, env)?;
            let frame = Environment::with_parent(closure_env);
            let proc_name = name.as_deref().unwrap_or("#<anonymous function>");
            bind_params(&frame, &params, &rest, args, proc_name)?;
            eval_body(&body, &frame)
        }
        other => Err(SchemeError::type_message(
            "application",
            format!(
                "attempt to apply a non-procedure value of type {}",
                other.type_name()
            ),
        )),
    }
}

fn eval_body(body: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let mut result = Value::Unspecified;
    for form in body {
        result = eval(form.clone(), env)?;
    }
    Ok(result)
}

fn eval_args(args_list: &Value, env: &Rc<Environment>) -> Result<Vec<Value>, SchemeError> {
    let forms = args_list
        .list_to_vec()
        .ok_or_else(|| SchemeError::syntax("malformed argument list"))?;
    forms.into_iter().map(|f| eval(f, env)).collect()
}

fn describe_arity(min_args: usize, max_args: Option<usize>) -> String {
    match max_args {
        None => format!("at least {min_args}"),
        Some(max) if max == min_args => format!("exactly {min_args}"),
        Some(max) => format!("{min_args} to {max}"),
    }
}

fn check_arity(
    name: &str,
    min_args: usize,
    max_args: Option<usize>,
    actual: usize,
) -> Result<(), SchemeError> {
    let within_max = max_args.map(|max| actual <= max).unwrap_or(true);
    if actual < min_args || !within_max {
        return Err(SchemeError::arity_error(
            name,
            describe_arity(min_args, max_args),
            actual,
        ));
    }
    Ok(())
}

/// Parses a parameter list form: `()`, `(p1 p2 ...)`, `(p1 ... . rest)`, or a
/// bare symbol standing for a single catch-all rest parameter.
fn parse_params(params_form: &Value) -> Result<(Vec<Rc<str>>, Option<Rc<str>>), SchemeError> {
    let mut params = Vec::new();
    let mut current = params_form.clone();
    loop {
        match current {
            Value::Nil => return Ok((params, None)),
            Value::Symbol(s) => return Ok((params, Some(s))),
            Value::Pair(p) => {
                let cell = p.borrow();
                let name = cell
                    .car
                    .as_symbol()
                    .ok_or_else(|| SchemeError::syntax("parameter must be a symbol"))?;
                params.push(Rc::from(name));
                let next = cell.cdr.clone();
                drop(cell);
                current = next;
            }
            _ => return Err(SchemeError::syntax("malformed parameter list")),
        }
    }
}

fn bind_params(
    frame: &Rc<Environment>,
    params: &[Rc<str>],
    rest: &Option<Rc<str>>,
    mut args: Vec<Value>,
    proc_name: &str,
) -> Result<(), SchemeError> {
    let k = params.len();
    match rest {
        None => {
            if args.len() != k {
                return Err(SchemeError::arity_error(proc_name, k.to_string(), args.len()));
            }
        }
        Some(_) => {
            if args.len() < k {
                return Err(SchemeError::arity_error(
                    proc_name,
                    format!("at least {k}"),
                    args.len(),
                ));
            }
        }
    }
    let tail_args = args.split_off(k);
    for (param, value) in params.iter().zip(args.into_iter()) {
        frame.define(param.clone(), value)?;
    }
    if let Some(rest_name) = rest {
        frame.define(rest_name.clone(), Value::list(tail_args.into_iter()))?;
    }
    Ok(())
}

// ===== Special forms =====
//
// Primitive names are resolved unconditionally by literal match, before any
// environment lookup happens, so `if`/`define`/etc. can never be shadowed by
// a user binding at any frame -- matching the precedence order primitives ->
// environment -> built-ins.

fn primitive_impl(name: &str) -> Option<PrimitiveFn> {
    Some(match name {
        "define" => prim_define,
        "set!" => prim_set,
        "if" => prim_if,
        "lambda" => prim_lambda,
        "quote" => prim_quote,
        "quasiquote" => prim_quasiquote,
        "begin" => prim_begin,
        "defmacro" => prim_defmacro,
        _ => return None,
    })
}

fn prim_define(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.is_empty() {
        return Err(SchemeError::syntax("define requires a target and a value"));
    }
    match &args[0] {
        Value::Symbol(name) => {
            if args.len() != 2 {
                return Err(SchemeError::arity_error("define", ARITY_TWO, args.len()));
            }
            let value = eval(args[1].clone(), env)?;
            env.define(name.clone(), value)?;
            Ok(Value::Unspecified)
        }
        Value::Pair(header) => {
            let cell = header.borrow();
            let name: Rc<str> = Rc::from(
                cell.car
                    .as_symbol()
                    .ok_or_else(|| SchemeError::syntax("define: function name must be a symbol"))?,
            );
            let params_form = cell.cdr.clone();
            drop(cell);
            let (params, rest) = parse_params(&params_form)?;
            let body = &args[1..];
            if body.is_empty() {
                return Err(SchemeError::syntax("define: function body is required"));
            }
            let procedure = Value::Procedure(Procedure::UserDefined {
                name: Some(name.clone()),
                params: params.into(),
                rest,
                body: body.to_vec().into(),
                env: env.clone(),
            });
            env.define(name, procedure)?;
            Ok(Value::Unspecified)
        }
        _ => Err(SchemeError::syntax(
            "define: target must be a symbol or (name . params)",
        )),
    }
}

fn prim_set(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.len() != 2 {
        return Err(SchemeError::arity_error("set!", ARITY_TWO, args.len()));
    }
    let name = args[0]
        .as_symbol()
        .ok_or_else(|| SchemeError::syntax("set!: first argument must be a symbol"))?;
    let value = eval(args[1].clone(), env)?;
    env.assign(name, value)?;
    Ok(Value::Unspecified)
}

fn prim_if(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(SchemeError::arity_error("if", "2 or 3", args.len()));
    }
    let test = eval(args[0].clone(), env)?;
    if test.is_truthy() {
        eval(args[1].clone(), env)
    } else if args.len() == 3 {
        eval(args[2].clone(), env)
    } else {
        Ok(Value::Unspecified)
    }
}

fn prim_lambda(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.is_empty() {
        return Err(SchemeError::syntax("lambda requires a parameter list"));
    }
    let (params, rest) = parse_params(&args[0])?;
    let body = &args[1..];
    if body.is_empty() {
        return Err(SchemeError::syntax("lambda requires at least one body form"));
    }
    Ok(Value::Procedure(Procedure::UserDefined {
        name: None,
        params: params.into(),
        rest,
        body: body.to_vec().into(),
        env: env.clone(),
    }))
}

fn prim_quote(args: &[Value], _env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.len() != 1 {
        return Err(SchemeError::arity_error("quote", "exactly 1", args.len()));
    }
    Ok(args[0].clone())
}

fn prim_quasiquote(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.len() != 1 {
        return Err(SchemeError::arity_error("quasiquote", "exactly 1", args.len()));
    }
    quasiquote(&args[0], env)
}

fn prim_begin(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    eval_body(args, env)
}

fn prim_defmacro(args: &[Value], env: &Rc<Environment>) -> Result<Value, SchemeError> {
    if args.len() != 3 {
        return Err(SchemeError::arity_error("defmacro", "exactly 3", args.len()));
    }
    let name: Rc<str> = Rc::from(
        args[0]
            .as_symbol()
            .ok_or_else(|| SchemeError::syntax("defmacro: name must be a symbol"))?,
    );
    let (params, rest) = parse_params(&args[1])?;
    let macro_value = Value::Procedure(Procedure::Macro {
        name: name.clone(),
        params: params.into(),
        rest,
        body: vec![args[2].clone()].into(),
        env: env.clone(),
    });
    env.define(name, macro_value)?;
    Ok(Value::Unspecified)
}

/// Recursively expands a quasiquote template. `(unquote x)` evaluates `x`;
/// `(unquote-splicing x)` evaluates `x` (must be a proper list) and splices
/// its elements in place; everything else is copied structurally. Nested
/// `quasiquote` forms are not depth-tracked: an inner `(quasiquote ...)` is
/// walked like any other list, so an `unquote` underneath it is resolved by
/// this same pass rather than deferred.
fn quasiquote(tmpl: &Value, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let pair = match tmpl {
        Value::Pair(p) => p,
        other => return Ok(other.clone()),
    };
    let (car, cdr) = {
        let cell = pair.borrow();
        (cell.car.clone(), cell.cdr.clone())
    };

    if let Value::Symbol(s) = &car {
        if s.as_ref() == "unquote" {
            let inner = cdr
                .list_to_vec()
                .filter(|v| v.len() == 1)
                .ok_or_else(|| SchemeError::syntax("unquote requires exactly one argument"))?;
            return eval(inner[0].clone(), env);
        }
    }

    if let Value::Pair(car_pair) = &car {
        let (inner_car, inner_cdr) = {
            let cell = car_pair.borrow();
            (cell.car.clone(), cell.cdr.clone())
        };
        if let Value::Symbol(s) = &inner_car {
            if s.as_ref() == "unquote-splicing" {
                let inner = inner_cdr.list_to_vec().filter(|v| v.len() == 1).ok_or_else(|| {
                    SchemeError::syntax("unquote-splicing requires exactly one argument")
                })?;
                let spliced_value = eval(inner[0].clone(), env)?;
                let spliced_items = spliced_value.list_to_vec().ok_or_else(|| {
                    SchemeError::type_message(
                        "unquote-splicing",
                        "expression did not evaluate to a proper list",
                    )
                })?;
                let rest = quasiquote(&cdr, env)?;
                return Ok(spliced_items
                    .into_iter()
                    .rev()
                    .fold(rest, |acc, item| Value::cons(item, acc)));
            }
        }
    }

    let new_car = quasiquote(&car, env)?;
    let new_cdr = quasiquote(&cdr, env)?;
    Ok(Value::cons(new_car, new_cdr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn run(src: &str) -> Value {
        let env = Environment::new();
        let forms = parse_program(src).unwrap();
        eval_program(forms, &env).unwrap()
    }

    fn run_err(src: &str) -> SchemeError {
        let env = Environment::new();
        let forms = parse_program(src).unwrap();
        eval_program(forms, &env).unwrap_err()
    }

    #[test]
    fn factorial_recursion() {
        let v = run("(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)");
        assert!(matches!(v, Value::Integer(120)));
    }

    #[test]
    fn dotted_rest_parameter_collects_args() {
        let v = run("(define (foo . xs) xs) (foo 1 2 3)");
        let items = v.list_to_vec().unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn lambda_application() {
        let v = run("((lambda (x) (+ x x)) 4)");
        assert!(matches!(v, Value::Integer(8)));
    }

    #[test]
    fn quasiquote_splices_and_unquotes() {
        let v = run("(quasiquote (1 (unquote (+ 2 2)) (unquote-splicing (quote (5 6)))))");
        let items = v.list_to_vec().unwrap();
        assert_eq!(items.len(), 4);
        assert!(matches!(items[0], Value::Integer(1)));
        assert!(matches!(items[1], Value::Integer(4)));
        assert!(matches!(items[2], Value::Integer(5)));
        assert!(matches!(items[3], Value::Integer(6)));
    }

    #[test]
    fn defmacro_inc() {
        let v = run("(defmacro inc (a) `(+ 1 ,a)) (inc 5)");
        assert!(matches!(v, Value::Integer(6)));
    }

    #[test]
    fn applying_non_procedure_is_a_type_error() {
        let err = run_err("(2 2)");
        assert!(matches!(err, SchemeError::TypeMessage { .. }));
    }

    #[test]
    fn evaluating_empty_list_is_a_syntax_error() {
        let err = run_err("()");
        assert!(matches!(err, SchemeError::Syntax { .. }));
    }

    #[test]
    fn self_recursive_loop_overflows_the_stack() {
        let err = run_err("(define (loop) (loop)) (loop)");
        assert!(matches!(err, SchemeError::StackOverflow));
    }

    #[test]
    fn lexical_capture_survives_rebinding() {
        let env = Environment::new();
        let forms = parse_program(
            "(define x 1) (define make-getter (lambda (x) (lambda () x))) (define getter (make-getter 1)) (set! x 99) (getter)",
        )
        .unwrap();
        let result = eval_program(forms, &env).unwrap();
        assert!(matches!(result, Value::Integer(1)));
    }

    #[test]
    fn truthiness_only_false_is_falsy() {
        assert!(matches!(run("(if #f 'a 'b)"), Value::Symbol(s) if &*s == "b"));
        assert!(matches!(run("(if (quote ()) 'a 'b)"), Value::Symbol(s) if &*s == "a"));
    }

    #[test]
    fn redefinition_at_top_level_is_rejected() {
        let err = run_err("(define x 1) (define x 2)");
        assert!(matches!(err, SchemeError::RedefinedVariable { .. }));
    }

    #[test]
    fn define_set_and_else_less_if_yield_unspecified_not_nil() {
        assert!(run("(define x 1)").is_unspecified());
        assert!(run("(define x 1) (set! x 2)").is_unspecified());
        assert!(run("(if #f 1)").is_unspecified());
        assert!(run("(begin)").is_unspecified());
    }

    #[test]
    fn quoted_empty_list_is_still_nil_not_unspecified() {
        assert!(run("(quote ())").is_nil());
    }
}
