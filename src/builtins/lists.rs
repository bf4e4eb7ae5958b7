//! List surgery primitives: `car cdr cons nth length reverse`.

use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::{Cell, Tag};

/// Returns the first element of a list, or nil for an empty list.
pub fn builtin_car(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("car".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    match args[0].tag() {
        Tag::List => args[0].nth(0).unwrap_or_else(|| interp.nil.clone()),
        Tag::Nil => interp.nil.clone(),
        _ => interp.fail(&EvalError::TypeMismatch("car".into()).to_string(), file!(), line!()),
    }
}

/// Returns a new list of all but the first element, or nil if length <= 1.
pub fn builtin_cdr(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("cdr".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    match args[0].tag() {
        Tag::List => {
            let items = args[0].items();
            if items.len() <= 1 {
                interp.nil.clone()
            } else {
                interp.alloc.mklist(items[1..].to_vec())
            }
        }
        Tag::Nil => interp.nil.clone(),
        _ => interp.fail(&EvalError::TypeMismatch("cdr".into()).to_string(), file!(), line!()),
    }
}

/// Prepends an element onto a list. A nil second argument yields a
/// singleton; any other non-list second argument yields a two-element list.
pub fn builtin_cons(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 2 {
        let msg = EvalError::Arity("cons".into(), "2".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let head = args[0].clone();
    match args[1].tag() {
        Tag::Nil => interp.alloc.mklist(vec![head]),
        Tag::List => {
            let mut items = vec![head];
            items.extend(args[1].items());
            interp.alloc.mklist(items)
        }
        _ => interp.alloc.mklist(vec![head, args[1].clone()]),
    }
}

fn resolve_index(idx: i64, len: usize) -> Option<usize> {
    let i = if idx < 0 { len as i64 + idx } else { idx };
    if i < 0 || i as usize >= len {
        None
    } else {
        Some(i as usize)
    }
}

/// Indexed access into a List or String; negative indices count from the
/// tail. Out-of-range indices return nil rather than diagnosing.
pub fn builtin_nth(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 2 {
        let msg = EvalError::Arity("nth".into(), "2".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    let idx = match args[0].as_integer() {
        Some(n) => n,
        None => return interp.fail(&EvalError::TypeMismatch("nth".into()).to_string(), file!(), line!()),
    };
    match args[1].tag() {
        Tag::List | Tag::Nil => {
            let items = args[1].items();
            match resolve_index(idx, items.len()) {
                Some(i) => items[i].clone(),
                None => interp.nil.clone(),
            }
        }
        Tag::String => {
            let bytes = args[1].string_bytes().unwrap_or_default();
            match resolve_index(idx, bytes.len()) {
                Some(i) => interp.alloc.mkstr(vec![bytes[i]]),
                None => interp.nil.clone(),
            }
        }
        _ => interp.fail(&EvalError::TypeMismatch("nth".into()).to_string(), file!(), line!()),
    }
}

/// Number of elements in a List, or bytes in a String.
pub fn builtin_length(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("length".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    match args[0].tag() {
        Tag::List | Tag::Nil | Tag::String => interp.alloc.mkint(args[0].len() as i64),
        _ => interp.fail(&EvalError::TypeMismatch("length".into()).to_string(), file!(), line!()),
    }
}

/// Reverses a List or String.
pub fn builtin_reverse(args: &[Cell], interp: &mut Interpreter) -> Cell {
    if args.len() != 1 {
        let msg = EvalError::Arity("reverse".into(), "1".into(), args.len()).to_string();
        return interp.fail(&msg, file!(), line!());
    }
    match args[0].tag() {
        Tag::List => {
            let mut items = args[0].items();
            items.reverse();
            interp.alloc.mklist(items)
        }
        Tag::Nil => interp.nil.clone(),
        Tag::String => {
            let mut bytes = args[0].string_bytes().unwrap_or_default();
            bytes.reverse();
            interp.alloc.mkstr(bytes)
        }
        _ => interp.fail(&EvalError::TypeMismatch("reverse".into()).to_string(), file!(), line!()),
    }
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "car", builtin_car);
    super::register_primitive(interp, "cdr", builtin_cdr);
    super::register_primitive(interp, "cons", builtin_cons);
    super::register_primitive(interp, "nth", builtin_nth);
    super::register_primitive(interp, "length", builtin_length);
    super::register_primitive(interp, "reverse", builtin_reverse);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    #[test]
    fn car_of_cons_returns_the_first_element() {
        let mut interp = Interpreter::init();
        let a = interp.alloc.mkint(1);
        let b = interp.alloc.mkint(2);
        let tail = interp.alloc.mklist(vec![b]);
        let consed = builtin_cons(&[a, tail], &mut interp);
        assert_eq!(builtin_car(&[consed], &mut interp).as_integer(), Some(1));
    }

    #[test]
    fn length_of_cons_is_one_plus_tail_length() {
        let mut interp = Interpreter::init();
        let a = interp.alloc.mkint(1);
        let b = interp.alloc.mkint(2);
        let tail = interp.alloc.mklist(vec![b]);
        let consed = builtin_cons(&[a, tail.clone()], &mut interp);
        let consed_len = builtin_length(&[consed], &mut interp).as_integer().unwrap();
        let tail_len = builtin_length(&[tail], &mut interp).as_integer().unwrap();
        assert_eq!(consed_len, 1 + tail_len);
    }

    #[test]
    fn reverse_is_its_own_inverse() {
        let mut interp = Interpreter::init();
        let items: Vec<Cell> = (1..=3).map(|n| interp.alloc.mkint(n)).collect();
        let list = interp.alloc.mklist(items);
        let once = builtin_reverse(&[list.clone()], &mut interp);
        let twice = builtin_reverse(&[once], &mut interp);
        let original: Vec<i64> = list.items().iter().map(|c| c.as_integer().unwrap()).collect();
        let roundtripped: Vec<i64> = twice.items().iter().map(|c| c.as_integer().unwrap()).collect();
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn nth_supports_negative_indices() {
        let mut interp = Interpreter::init();
        let items: Vec<Cell> = (1..=3).map(|n| interp.alloc.mkint(n)).collect();
        let list = interp.alloc.mklist(items);
        let neg_one = interp.alloc.mkint(-1);
        let result = builtin_nth(&[neg_one, list], &mut interp);
        assert_eq!(result.as_integer(), Some(3));
    }

    #[test]
    fn cdr_of_a_singleton_is_nil() {
        let mut interp = Interpreter::init();
        let items = vec![interp.alloc.mkint(1)];
        let list = interp.alloc.mklist(items);
        assert!(builtin_cdr(&[list], &mut interp).is_nil());
    }
}
