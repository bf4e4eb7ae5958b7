//! Host system access: `system`.

use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Cell;
use std::process::Command;

/// Shells out to `sh -c <command>` and returns the child's exit code as an
/// Integer, or nil if the child could not be spawned, was killed by a
/// signal (`status.code()` is `None`), or somehow reported a negative code.
pub fn builtin_system(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("system".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let bytes = match args[0].string_bytes() {
        Some(b) => b,
        None => return interp.fail(&EvalError::TypeMismatch("system".into()).to_string(), file!(), line!()),
    };
    let cmd = String::from_utf8_lossy(&bytes).into_owned();
    match Command::new("sh").arg("-c").arg(&cmd).status() {
        Ok(status) => match status.code() {
            Some(code) if code >= 0 => interp.alloc.mkint(code as i64),
            _ => interp.nil.clone(),
        },
        Err(_) => interp.fail("system: failed to spawn shell", file!(), line!()),
    }
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "system", builtin_system);
}
