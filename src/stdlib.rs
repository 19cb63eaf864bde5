// ABOUTME: Loads the bundled Scheme-source standard library into the global environment

use crate::env::Environment;
use crate::error::SchemeError;
use crate::eval::eval_program;
use crate::parser::parse_program;
use std::rc::Rc;

const PRELUDE_SOURCE: &str = include_str!("../stdlib_source/prelude.lisp");

/// Parses and evaluates the bundled prelude into `env`. A failure here is an
/// internal defect in the shipped library source, not a normal program
/// error, so callers should treat it as fatal at startup.
pub fn load(env: &Rc<Environment>) -> Result<(), SchemeError> {
    let forms = parse_program(PRELUDE_SOURCE)?;
    eval_program(forms, env)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_stdlib() -> Rc<Environment> {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        load(&env).expect("prelude must load cleanly");
        env
    }

    fn run(src: &str, env: &Rc<Environment>) -> crate::value::Value {
        let forms = parse_program(src).unwrap();
        eval_program(forms, env).unwrap()
    }

    #[test]
    fn let_binds_locally() {
        let env = env_with_stdlib();
        let v = run("(let ((x 1) (y 2)) (+ x y))", &env);
        assert!(matches!(v, crate::value::Value::Integer(3)));
    }

    #[test]
    fn cond_picks_first_matching_clause() {
        let env = env_with_stdlib();
        let v = run("(cond (#f 1) (#t 2) (else 3))", &env);
        assert!(matches!(v, crate::value::Value::Integer(2)));
    }

    #[test]
    fn and_short_circuits_on_false() {
        let env = env_with_stdlib();
        let v = run("(and #t #f (error-would-blow-up))", &env);
        assert!(matches!(v, crate::value::Value::Boolean(false)));
    }

    #[test]
    fn map_and_for_each_over_a_list() {
        let env = env_with_stdlib();
        let v = run("(map (lambda (x) (* x x)) (list 1 2 3))", &env);
        let items = v.list_to_vec().unwrap();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[2], crate::value::Value::Integer(9)));
    }

    #[test]
    fn vector_round_trips_through_list() {
        let env = env_with_stdlib();
        let v = run("(vector->list (list->vector (list 1 2 3)))", &env);
        let items = v.list_to_vec().unwrap();
        assert_eq!(items.len(), 3);
    }
}
