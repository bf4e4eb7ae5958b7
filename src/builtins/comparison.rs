//! Comparison primitives: `= eqt`.

use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Cell;

/// Variadic numeric equality: every argument must be an Integer, and all
/// must be equal. `(=)` and `(= 1)` are both true.
pub fn builtin_eq(args: &[Cell], interp: &mut Interpreter) -> Cell {
    let mut ints = Vec::with_capacity(args.len());
    for arg in args {
        match arg.as_integer() {
            Some(n) => ints.push(n),
            None => {
                let msg = EvalError::TypeMismatch("=".into()).to_string();
                return interp.fail(&msg, file!(), line!());
            }
        }
    }
    let all_equal = ints.windows(2).all(|w| w[0] == w[1]);
    if all_equal {
        interp.t.clone()
    } else {
        interp.nil.clone()
    }
}

/// Variadic tag identity: true when every argument shares the same Tag.
/// Unlike `=`, this does not inspect the payload, only the type.
pub fn builtin_eqt(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.is_empty() {
        return interp.t.clone();
    }
    let first = args[0].tag();
    if args.iter().all(|a| a.tag() == first) {
        interp.t.clone()
    } else {
        interp.nil.clone()
    }
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "=", builtin_eq);
    super::register_primitive(interp, "eqt", builtin_eqt);
}
