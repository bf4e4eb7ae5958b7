//! Arithmetic primitives: `+ - * / mod`.
//!
//! Every argument must be an Integer cell; a non-integer argument
//! diagnoses a type mismatch and the whole call returns nil.

use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Cell;

fn as_int(interp: &mut Interpreter, fname: &str, arg: &Cell) -> Option<i64> {
    match arg.as_integer() {
        Some(n) => Some(n),
        None => {
            let msg = EvalError::TypeMismatch(fname.to_string()).to_string();
            interp.fail(&msg, file!(), line!());
            None
        }
    }
}

/// Sums every argument; `(+)` is 0.
pub fn builtin_add(args: &[Cell], interp: &mut Interpreter) -> Cell {
    let mut sum: i64 = 0;
    for arg in args {
        match as_int(interp, "+", arg) {
            Some(n) => sum = sum.wrapping_add(n),
            None => return interp.nil.clone(),
        }
    }
    interp.alloc.mkint(sum)
}

/// Subtracts every subsequent argument from the first.
pub fn builtin_sub(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.is_empty() {
        let msg = EvalError::Arity("-".into(), "at least 1".into(), 0).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let mut result = match as_int(interp, "-", &args[0]) {
        Some(n) => n,
        None => return interp.nil.clone(),
    };
    for arg in &args[1..] {
        match as_int(interp, "-", arg) {
            Some(n) => result = result.wrapping_sub(n),
            None => return interp.nil.clone(),
        }
    }
    interp.alloc.mkint(result)
}

/// Multiplies every argument; `(*)` is 1.
pub fn builtin_mul(args: &[Cell], interp: &mut Interpreter) -> Cell {
    let mut product: i64 = 1;
    for arg in args {
        match as_int(interp, "*", arg) {
            Some(n) => product = product.wrapping_mul(n),
            None => return interp.nil.clone(),
        }
    }
    interp.alloc.mkint(product)
}

/// Divides the first argument by every subsequent one. Division by zero
/// diagnoses and returns nil rather than panicking.
pub fn builtin_div(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() < 2 {
        let msg = EvalError::Arity("/".into(), "at least 2".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let mut result = match as_int(interp, "/", &args[0]) {
        Some(n) => n,
        None => return interp.nil.clone(),
    };
    for arg in &args[1..] {
        let n = match as_int(interp, "/", arg) {
            Some(n) => n,
            None => return interp.nil.clone(),
        };
        if n == 0 {
            return interp.fail(&EvalError::DivideByZero.to_string(), file!(), line!());
        }
        result /= n;
    }
    interp.alloc.mkint(result)
}

/// Remainder of the first argument divided by the second. Arity is exactly 2.
pub fn builtin_mod(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 2 {
        let msg = EvalError::Arity("mod".into(), "2".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let a = match as_int(interp, "mod", &args[0]) {
        Some(n) => n,
        None => return interp.nil.clone(),
    };
    let b = match as_int(interp, "mod", &args[1]) {
        Some(n) => n,
        None => return interp.nil.clone(),
    };
    if b == 0 {
        return interp.fail(&EvalError::DivideByZero.to_string(), file!(), line!());
    }
    interp.alloc.mkint(a % b)
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "+", builtin_add);
    super::register_primitive(interp, "-", builtin_sub);
    super::register_primitive(interp, "*", builtin_mul);
    super::register_primitive(interp, "/", builtin_div);
    super::register_primitive(interp, "mod", builtin_mod);
}
