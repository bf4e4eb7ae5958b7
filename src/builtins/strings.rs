//! String primitives: `scar scdr scons`. Named distinctly from the list
//! family (`car`/`cdr`/`cons`) since strings are a byte buffer, not a
//! cons chain, but the operations mirror the same shape.

use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Cell;

fn as_bytes(interp: &mut Interpreter, fname: &str, arg: &Cell) -> Option<Vec<u8>> {
    match arg.string_bytes() {
        Some(b) => Some(b),
        None => {
            let msg = EvalError::TypeMismatch(fname.to_string()).to_string();
            interp.fail(&msg, file!(), line!());
            None
        }
    }
}

/// First byte of a String, as a one-byte String. Nil on empty input.
pub fn builtin_scar(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("scar".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let bytes = match as_bytes(interp, "scar", &args[0]) {
        Some(b) => b,
        None => return interp.nil.clone(),
    };
    if bytes.is_empty() {
        interp.nil.clone()
    } else {
        interp.alloc.mkstr(vec![bytes[0]])
    }
}

/// Every byte after the first. Nil on empty or single-byte input.
pub fn builtin_scdr(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("scdr".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let bytes = match as_bytes(interp, "scdr", &args[0]) {
        Some(b) => b,
        None => return interp.nil.clone(),
    };
    if bytes.len() <= 1 {
        interp.nil.clone()
    } else {
        interp.alloc.mkstr(bytes[1..].to_vec())
    }
}

/// Concatenates two Strings. Both arguments must already be String cells;
/// there is no implicit conversion from other tags.
pub fn builtin_scons(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 2 {
        let msg = EvalError::Arity("scons".into(), "2".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let mut a = match as_bytes(interp, "scons", &args[0]) {
        Some(b) => b,
        None => return interp.nil.clone(),
    };
    let b = match as_bytes(interp, "scons", &args[1]) {
        Some(b) => b,
        None => return interp.nil.clone(),
    };
    a.extend(b);
    interp.alloc.mkstr(a)
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "scar", builtin_scar);
    super::register_primitive(interp, "scdr", builtin_scdr);
    super::register_primitive(interp, "scons", builtin_scons);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    #[test]
    fn scar_returns_the_first_byte() {
        let mut interp = Interpreter::init();
        let s = interp.alloc.mkstr(b"hello".to_vec());
        assert_eq!(builtin_scar(&[s], &mut interp).string_bytes().unwrap(), b"h");
    }

    #[test]
    fn scdr_drops_the_first_byte() {
        let mut interp = Interpreter::init();
        let s = interp.alloc.mkstr(b"hello".to_vec());
        assert_eq!(builtin_scdr(&[s], &mut interp).string_bytes().unwrap(), b"ello");
    }

    #[test]
    fn scons_concatenates_two_strings() {
        let mut interp = Interpreter::init();
        let a = interp.alloc.mkstr(b"foo".to_vec());
        let b = interp.alloc.mkstr(b"bar".to_vec());
        assert_eq!(builtin_scons(&[a, b], &mut interp).string_bytes().unwrap(), b"foobar");
    }

    #[test]
    fn scons_rejects_a_non_string_argument() {
        let mut interp = Interpreter::init();
        let a = interp.alloc.mkstr(b"foo".to_vec());
        let n = interp.alloc.mkint(1);
        assert!(builtin_scons(&[a, n], &mut interp).is_nil());
    }
}
