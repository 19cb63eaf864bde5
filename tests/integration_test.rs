//! End-to-end scenarios run through the full parse -> eval pipeline, one
//! process-wide environment per test with builtins and the bundled stdlib
//! loaded, mirroring what `main` wires up at startup.

use minischeme::builtins::register_builtins;
use minischeme::env::Environment;
use minischeme::error::SchemeError;
use minischeme::eval::eval_program;
use minischeme::parser::parse_program;
use minischeme::stdlib;
use minischeme::value::Value;
use std::rc::Rc;

fn fresh_env() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    stdlib::load(&env).expect("bundled stdlib must load cleanly");
    env
}

fn run(source: &str, env: &Rc<Environment>) -> Result<Value, SchemeError> {
    let forms = parse_program(source)?;
    eval_program(forms, env)
}

#[test]
fn factorial_recursion() {
    let env = fresh_env();
    let v = run(
        "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)",
        &env,
    )
    .unwrap();
    assert!(matches!(v, Value::Integer(120)));
}

#[test]
fn variadic_rest_args_collect_into_a_proper_list() {
    let env = fresh_env();
    let v = run("(define (foo . xs) xs) (foo 1 2 3)", &env).unwrap();
    assert_eq!(v.list_to_vec().unwrap().len(), 3);
}

#[test]
fn lambda_application() {
    let env = fresh_env();
    let v = run("((lambda (x) (+ x x)) 4)", &env).unwrap();
    assert!(matches!(v, Value::Integer(8)));
}

#[test]
fn quasiquote_with_unquote_and_splicing() {
    let env = fresh_env();
    let v = run(
        "`(1 ,(+ 2 2) ,@(list 5 6))",
        &env,
    )
    .unwrap();
    let items = v.list_to_vec().unwrap();
    let ints: Vec<i64> = items
        .iter()
        .map(|x| match x {
            Value::Integer(n) => *n,
            _ => panic!("expected integer"),
        })
        .collect();
    assert_eq!(ints, vec![1, 4, 5, 6]);
}

#[test]
fn defmacro_expands_before_evaluation() {
    let env = fresh_env();
    let v = run("(defmacro inc (a) `(+ 1 ,a)) (inc 5)", &env).unwrap();
    assert!(matches!(v, Value::Integer(6)));
}

#[test]
fn vector_mutation() {
    let env = fresh_env();
    let v = run("(let ((v (make-vector 2 0))) (vector-set! v 0 9) v)", &env).unwrap();
    match v {
        Value::Vector(items) => {
            let items = items.borrow();
            assert!(matches!(items[0], Value::Integer(9)));
            assert!(matches!(items[1], Value::Integer(0)));
        }
        other => panic!("expected vector, got {other}"),
    }
}

#[test]
fn unbounded_self_recursion_raises_stack_overflow() {
    let env = fresh_env();
    let err = run("(define (loop) (loop)) (loop)", &env).unwrap_err();
    assert!(matches!(err, SchemeError::StackOverflow));
}

#[test]
fn applying_a_non_procedure_is_a_type_error() {
    let env = fresh_env();
    let err = run("(2 2)", &env).unwrap_err();
    assert!(matches!(err, SchemeError::TypeMessage { .. }));
}

#[test]
fn empty_list_is_a_syntax_error() {
    let env = fresh_env();
    let err = run("()", &env).unwrap_err();
    assert!(matches!(err, SchemeError::Syntax { .. }));
}

#[test]
fn lexical_capture_survives_rebinding_of_the_outer_name() {
    let env = fresh_env();
    let v = run(
        "(define make-getter (lambda (x) (lambda () x))) \
         (define get (make-getter 1)) \
         (define x 999) \
         (get)",
        &env,
    )
    .unwrap();
    assert!(matches!(v, Value::Integer(1)));
}

#[test]
fn redefinition_at_top_level_is_rejected() {
    let env = fresh_env();
    let err = run("(define y 1) (define y 2)", &env).unwrap_err();
    assert!(matches!(err, SchemeError::RedefinedVariable { .. }));
}

#[test]
fn redefinition_inside_a_lambda_body_is_permitted() {
    let env = fresh_env();
    let v = run("((lambda () (define z 1) (define z 2) z))", &env).unwrap();
    assert!(matches!(v, Value::Integer(2)));
}

#[test]
fn division_always_yields_a_float() {
    let env = fresh_env();
    let v = run("(/ 4 2)", &env).unwrap();
    assert!(matches!(v, Value::Float(f) if f == 2.0));
}
