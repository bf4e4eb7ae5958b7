//! The tree-walking evaluator.
//!
//! Self-evaluating tags return immediately. A Symbol is looked up through
//! `env`, falling back to `global`. A List is either one of six special
//! forms (`if`, `begin`, `quote`, `set`, `define`, `lambda`, recognized by
//! the unevaluated head symbol's name, never by evaluating it) or an
//! ordinary application: evaluate the head and every argument, then
//! `apply`. There is no tail-call optimization, no macro system, and no
//! continuations — nothing here should try to reclaim stack depth that the
//! host call stack already accounts for.

use crate::env;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::{Cell, Tag};

pub fn eval(interp: &mut Interpreter, x: Cell, env_cell: Cell) -> Cell {
    if interp.expression_aborted() {
        return interp.nil.clone();
    }
    match x.tag() {
        Tag::Nil | Tag::Tee | Tag::Integer | Tag::String | Tag::Proc | Tag::Primitive => x,
        Tag::Symbol => eval_symbol(interp, &x, &env_cell),
        Tag::List => eval_list(interp, &x, env_cell),
        Tag::File | Tag::Error | Tag::Quote => {
            interp.fail("unimplemented tag", file!(), line!())
        }
    }
}

fn eval_symbol(interp: &mut Interpreter, x: &Cell, env_cell: &Cell) -> Cell {
    let name = x.symbol_name().unwrap_or_default();
    let global = interp.global.clone();
    match env::lookup(env_cell, &global, &name) {
        Some(pair) => pair.nth(1).unwrap_or_else(|| interp.nil.clone()),
        None => {
            let msg = EvalError::UnboundSymbol(name).to_string();
            interp.fail(&msg, file!(), line!())
        }
    }
}

fn eval_list(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    if x.is_empty() {
        return interp.nil.clone();
    }
    let head0 = x.nth(0).unwrap();
    if head0.tag() != Tag::Symbol {
        return interp.fail(&EvalError::CannotApply.to_string(), file!(), line!());
    }
    match head0.symbol_name().unwrap_or_default().as_str() {
        "if" => eval_if(interp, x, env_cell),
        "begin" => eval_begin(interp, x, env_cell),
        "quote" => eval_quote(interp, x),
        "set" => eval_set(interp, x, env_cell),
        "define" => eval_define(interp, x, env_cell),
        "lambda" => eval_lambda(interp, x, env_cell),
        _ => eval_application(interp, x, env_cell),
    }
}

fn arity_fail(interp: &mut Interpreter, form: &str, expected: &str, got: usize) -> Cell {
    let msg = EvalError::Arity(form.into(), expected.into(), got).to_string();
    interp.fail(&msg, file!(), line!())
}

/// `(if test c a)`. Evaluates `a` when `test` evaluates to nil, `c`
/// otherwise. There is no three-argument form; the alternative is mandatory.
fn eval_if(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    if x.len() != 4 {
        return arity_fail(interp, "if", "4", x.len());
    }
    let test = x.nth(1).unwrap();
    let consequent = x.nth(2).unwrap();
    let alternative = x.nth(3).unwrap();
    let test_result = eval(interp, test, env_cell.clone());
    if test_result.is_nil() {
        eval(interp, alternative, env_cell)
    } else {
        eval(interp, consequent, env_cell)
    }
}

/// `(begin e1 e2 ... en)`. Evaluates every expression in order for effect,
/// returning the last result, or nil given no expressions.
fn eval_begin(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    let n = x.len();
    if n == 1 {
        return interp.nil.clone();
    }
    let mut result = interp.nil.clone();
    for i in 1..n {
        result = eval(interp, x.nth(i).unwrap(), env_cell.clone());
    }
    result
}

/// `(quote e)`. Returns `e` unevaluated.
fn eval_quote(interp: &mut Interpreter, x: &Cell) -> Cell {
    if x.len() != 2 {
        return arity_fail(interp, "quote", "2", x.len());
    }
    x.nth(1).unwrap()
}

/// `(set s v)`. Mutates an existing binding in place; diagnoses if `s` is
/// unbound rather than creating one (that is `define`'s job).
fn eval_set(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    if x.len() != 3 {
        return arity_fail(interp, "set", "3", x.len());
    }
    let sym = x.nth(1).unwrap();
    let name = match sym.symbol_name() {
        Some(n) => n,
        None => return interp.fail("set: first argument must be a symbol", file!(), line!()),
    };
    let global = interp.global.clone();
    match env::lookup(&env_cell, &global, &name) {
        Some(pair) => {
            let value = eval(interp, x.nth(2).unwrap(), env_cell);
            pair.set_nth(1, value.clone());
            value
        }
        None => {
            let msg = EvalError::UnboundSymbol(name).to_string();
            interp.fail(&msg, file!(), line!())
        }
    }
}

/// `(define s v)`. Always binds in the global environment, even when
/// evaluated from within a nested lexical scope. Returns the new `[s, v]`
/// pair, not `v` itself.
fn eval_define(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    if x.len() != 3 {
        return arity_fail(interp, "define", "3", x.len());
    }
    let sym = x.nth(1).unwrap();
    if sym.tag() != Tag::Symbol {
        return interp.fail("define: first argument must be a symbol", file!(), line!());
    }
    let value = eval(interp, x.nth(2).unwrap(), env_cell);
    let pair = interp.alloc.mklist(vec![sym, value]);
    interp.global.append(pair.clone());
    pair
}

/// `(lambda params body)`. Captures a snapshot of the defining environment;
/// every parameter must be a Symbol.
fn eval_lambda(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    if x.len() != 3 {
        return arity_fail(interp, "lambda", "3", x.len());
    }
    let params = x.nth(1).unwrap();
    if params.tag() != Tag::List && params.tag() != Tag::Nil {
        return interp.fail("lambda: params must be a list", file!(), line!());
    }
    for p in params.items() {
        if p.tag() != Tag::Symbol {
            return interp.fail("lambda: params must be symbols", file!(), line!());
        }
    }
    let body = x.nth(2).unwrap();
    interp.alloc.mkproc(params, body, env_cell)
}

fn eval_application(interp: &mut Interpreter, x: &Cell, env_cell: Cell) -> Cell {
    let head0 = x.nth(0).unwrap();
    let head = eval(interp, head0, env_cell.clone());
    let mut evaluated = Vec::with_capacity(x.len().saturating_sub(1));
    for i in 1..x.len() {
        evaluated.push(eval(interp, x.nth(i).unwrap(), env_cell.clone()));
    }
    let args = interp.alloc.mklist(evaluated);
    apply(interp, head, args)
}

/// Calls `head` (a Primitive or Proc) with `args` (a List). Anything else
/// diagnoses "apply failed" and returns nil.
pub fn apply(interp: &mut Interpreter, head: Cell, args: Cell) -> Cell {
    match head.tag() {
        Tag::Primitive => {
            let f = head.primitive_fn().expect("Primitive tag implies primitive_fn");
            let items = args.items();
            f(&items, interp)
        }
        Tag::Proc => apply_proc(interp, &head, args),
        _ => interp.fail(&EvalError::ApplyFailed.to_string(), file!(), line!()),
    }
}

fn apply_proc(interp: &mut Interpreter, proc_cell: &Cell, args: Cell) -> Cell {
    let (params, body, captured_env) = proc_cell.proc_parts().expect("Proc tag implies proc_parts");
    let param_items = params.items();
    let arg_items = args.items();
    if param_items.len() != arg_items.len() {
        return arity_fail(interp, "lambda", &param_items.len().to_string(), arg_items.len());
    }
    // Copy the captured environment's pairs into a fresh List before
    // extending it with this call's arguments. Extending `captured_env` in
    // place would let a recursive or re-entrant call corrupt bindings a
    // still-running call depends on, since every call would share the same
    // underlying Vec.
    let call_env = interp.alloc.mklist(captured_env.items());
    if env::extensions(&mut interp.alloc, &call_env, &param_items, &arg_items).is_err() {
        return interp.fail("apply: arity mismatch", file!(), line!());
    }
    eval(interp, body, call_env)
}
