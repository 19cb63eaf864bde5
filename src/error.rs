// ABOUTME: Error types for lexing, reading, and evaluation failures

use crate::value::Value;
use thiserror::Error;

// ===== Arity description strings (eliminates allocations in error paths) =====
pub const ARITY_ONE: &str = "exactly 1";
pub const ARITY_TWO: &str = "exactly 2";
pub const ARITY_THREE: &str = "exactly 3";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_ONE_OR_TWO: &str = "1 or 2";
pub const ARITY_TWO_OR_THREE: &str = "2 or 3";

/// The eight error kinds named by the data model, each carrying its own
/// human-readable message. Construction goes through the helpers below so the
/// wording stays centralized.
#[derive(Error, Debug, Clone)]
pub enum SchemeError {
    #[error("{message}")]
    Syntax { message: String },

    #[error("Unbound variable: {name}")]
    UndefinedVariable { name: String },

    #[error("{name} is already defined")]
    RedefinedVariable { name: String },

    #[error("{function}: expected {expected}, got {actual}")]
    Type {
        function: String,
        expected: String,
        actual: &'static str,
    },

    #[error("{function}: {message}")]
    TypeMessage { function: String, message: String },

    #[error("{function} requires {expected} argument(s), but received {actual}")]
    Arity {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("{function}: {message}")]
    InvalidArgument { function: String, message: String },

    #[error("Maximum recursion depth exceeded")]
    StackOverflow,

    #[error("{message}")]
    CircularList { message: String },
}

impl SchemeError {
    pub fn syntax(message: impl Into<String>) -> Self {
        SchemeError::Syntax {
            message: message.into(),
        }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        SchemeError::UndefinedVariable { name: name.into() }
    }

    pub fn redefined_variable(name: impl Into<String>) -> Self {
        SchemeError::RedefinedVariable { name: name.into() }
    }

    /// Type mismatch reported against a concrete `Value`, e.g. a builtin
    /// rejecting one of its own arguments.
    pub fn type_error(function: &str, expected: &str, actual: &Value) -> Self {
        SchemeError::Type {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name(),
        }
    }

    /// Type mismatch that does not fit the `function/expected/actual` shape,
    /// e.g. "applying a non-procedure".
    pub fn type_message(function: &str, message: impl Into<String>) -> Self {
        SchemeError::TypeMessage {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        SchemeError::Arity {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        SchemeError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn circular_list(message: impl Into<String>) -> Self {
        SchemeError::CircularList {
            message: message.into(),
        }
    }

    /// Renders the line the REPL/file-mode runner prints, with the
    /// three-way prefix the external interface promises.
    pub fn report(&self) -> String {
        match self {
            SchemeError::Syntax { .. } => format!("Syntax error: {self}"),
            SchemeError::Type { .. } | SchemeError::TypeMessage { .. } => {
                format!("Type error: {self}")
            }
            _ => format!("Error: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_get_syntax_prefix() {
        let e = SchemeError::syntax("unexpected EOF");
        assert_eq!(e.report(), "Syntax error: unexpected EOF");
    }

    #[test]
    fn type_errors_get_type_prefix() {
        let e = SchemeError::type_error("car", "pair", &Value::Integer(1));
        assert_eq!(e.report(), "Type error: car: expected pair, got integer");
    }

    #[test]
    fn everything_else_gets_generic_prefix() {
        let e = SchemeError::undefined_variable("x");
        assert_eq!(e.report(), "Error: Unbound variable: x");

        let e = SchemeError::arity_error("cons", ARITY_TWO, 1);
        assert!(e.report().starts_with("Error: "));
    }
}
