//! Type predicates that don't belong to a more specific category.

use crate::error::SchemeError;
use crate::value::Value;

pub fn builtin_procedure_p(args: &[Value]) -> Result<Value, SchemeError> {
    Ok(Value::Boolean(matches!(args[0], Value::Procedure(_))))
}
