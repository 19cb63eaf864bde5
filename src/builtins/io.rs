//! `display` and `newline` -- direct program output, independent of the
//! structured logging the ambient diagnostics stack emits.

use crate::error::SchemeError;
use crate::printer::external_repr;
use crate::value::Value;
use std::io::Write;

pub fn builtin_display(args: &[Value]) -> Result<Value, SchemeError> {
    print!("{}", external_repr(&args[0]));
    let _ = std::io::stdout().flush();
    Ok(Value::Unspecified)
}

pub fn builtin_newline(_args: &[Value]) -> Result<Value, SchemeError> {
    println!();
    Ok(Value::Unspecified)
}
