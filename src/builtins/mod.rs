//! The built-in registry: a fixed table of named primitive procedures for
//! arithmetic, pairs/lists, characters, strings, vectors, equivalence, I/O,
//! and type predicates, installed into the global environment at startup.

use crate::env::Environment;
use crate::value::{BuiltinFn, Procedure, Value};
use std::rc::Rc;

pub mod arithmetic;
pub mod chars;
pub mod comparison;
pub mod control;
pub mod equivalence;
pub mod io;
pub mod lists;
pub mod strings;
pub mod vectors;

fn def(env: &Rc<Environment>, name: &str, min_args: usize, max_args: Option<usize>, func: BuiltinFn) {
    let name: Rc<str> = Rc::from(name);
    env.define(
        name.clone(),
        Value::Procedure(Procedure::BuiltIn {
            name,
            min_args,
            max_args,
            func,
        }),
    )
    .expect("built-in registration names must be unique");
}

/// Installs every built-in named in the registry into `env`, which must be
/// the top-level frame (a fresh `Environment::new()`).
pub fn register_builtins(env: &Rc<Environment>) {
    use arithmetic::*;
    def(env, "+", 0, None, builtin_add);
    def(env, "-", 1, None, builtin_sub);
    def(env, "*", 0, None, builtin_mul);
    def(env, "/", 1, None, builtin_div);
    def(env, "quotient", 2, Some(2), builtin_quotient);
    def(env, "remainder", 2, Some(2), builtin_remainder);
    def(env, "modulo", 2, Some(2), builtin_modulo);
    def(env, "exp", 1, Some(1), builtin_exp);
    def(env, "log", 1, Some(1), builtin_log);
    def(env, "number?", 1, Some(1), builtin_number_p);
    def(env, "complex?", 1, Some(1), builtin_number_p);
    def(env, "real?", 1, Some(1), builtin_number_p);
    def(env, "rational?", 1, Some(1), builtin_number_p);
    def(env, "exact?", 1, Some(1), builtin_exact_p);
    def(env, "inexact?", 1, Some(1), builtin_inexact_p);

    use comparison::*;
    def(env, "=", 1, None, builtin_num_eq);
    def(env, "<", 1, None, builtin_lt);
    def(env, ">", 1, None, builtin_gt);
    def(env, "<=", 1, None, builtin_le);
    def(env, ">=", 1, None, builtin_ge);

    use equivalence::*;
    def(env, "eq?", 2, Some(2), builtin_eq_p);
    def(env, "eqv?", 2, Some(2), builtin_eqv_p);

    use chars::*;
    def(env, "char?", 1, Some(1), builtin_char_p);
    def(env, "char=?", 1, None, builtin_char_eq);
    def(env, "char<?", 1, None, builtin_char_lt);
    def(env, "char>?", 1, None, builtin_char_gt);
    def(env, "char<=?", 1, None, builtin_char_le);
    def(env, "char>=?", 1, None, builtin_char_ge);

    use strings::*;
    def(env, "string?", 1, Some(1), builtin_string_p);
    def(env, "make-string", 1, Some(2), builtin_make_string);
    def(env, "string-length", 1, Some(1), builtin_string_length);
    def(env, "string-ref", 2, Some(2), builtin_string_ref);
    def(env, "string-set!", 3, Some(3), builtin_string_set);

    use vectors::*;
    def(env, "make-vector", 1, Some(2), builtin_make_vector);
    def(env, "vector?", 1, Some(1), builtin_vector_p);
    def(env, "vector-ref", 2, Some(2), builtin_vector_ref);
    def(env, "vector-set!", 3, Some(3), builtin_vector_set);
    def(env, "vector-length", 1, Some(1), builtin_vector_length);

    def(env, "procedure?", 1, Some(1), control::builtin_procedure_p);

    use io::*;
    def(env, "display", 1, Some(1), builtin_display);
    def(env, "newline", 0, Some(0), builtin_newline);

    use lists::*;
    def(env, "cons", 2, Some(2), builtin_cons);
    def(env, "car", 1, Some(1), builtin_car);
    def(env, "cdr", 1, Some(1), builtin_cdr);
    def(env, "set-car!", 2, Some(2), builtin_set_car);
    def(env, "set-cdr!", 2, Some(2), builtin_set_cdr);
    def(env, "null?", 1, Some(1), builtin_null_p);
    def(env, "pair?", 1, Some(1), builtin_pair_p);
    def(env, "list", 0, None, builtin_list);
    def(env, "length", 1, Some(1), builtin_length);
    def(env, "list?", 1, Some(1), builtin_list_p);

    def(env, "caar", 1, Some(1), builtin_caar);
    def(env, "cadr", 1, Some(1), builtin_cadr);
    def(env, "cdar", 1, Some(1), builtin_cdar);
    def(env, "cddr", 1, Some(1), builtin_cddr);
    def(env, "caaar", 1, Some(1), builtin_caaar);
    def(env, "caadr", 1, Some(1), builtin_caadr);
    def(env, "cadar", 1, Some(1), builtin_cadar);
    def(env, "caddr", 1, Some(1), builtin_caddr);
    def(env, "cdaar", 1, Some(1), builtin_cdaar);
    def(env, "cdadr", 1, Some(1), builtin_cdadr);
    def(env, "cddar", 1, Some(1), builtin_cddar);
    def(env, "cdddr", 1, Some(1), builtin_cdddr);
    def(env, "caaaar", 1, Some(1), builtin_caaaar);
    def(env, "caaadr", 1, Some(1), builtin_caaadr);
    def(env, "caadar", 1, Some(1), builtin_caadar);
    def(env, "caaddr", 1, Some(1), builtin_caaddr);
    def(env, "cadaar", 1, Some(1), builtin_cadaar);
    def(env, "cadadr", 1, Some(1), builtin_cadadr);
    def(env, "caddar", 1, Some(1), builtin_caddar);
    def(env, "cadddr", 1, Some(1), builtin_cadddr);
    def(env, "cdaaar", 1, Some(1), builtin_cdaaar);
    def(env, "cdaadr", 1, Some(1), builtin_cdaadr);
    def(env, "cdadar", 1, Some(1), builtin_cdadar);
    def(env, "cdaddr", 1, Some(1), builtin_cdaddr);
    def(env, "cddaar", 1, Some(1), builtin_cddaar);
    def(env, "cddadr", 1, Some(1), builtin_cddadr);
    def(env, "cdddar", 1, Some(1), builtin_cdddar);
    def(env, "cddddr", 1, Some(1), builtin_cddddr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_without_panicking_on_duplicate_names() {
        let env = Environment::new();
        register_builtins(&env);
        assert!(env.get("car").is_some());
        assert!(env.get("vector-ref").is_some());
    }
}
