//! Built-in primitive functions.
//!
//! Each sub-module owns one category and exposes a `register(interp)`
//! function that binds its symbols into the global environment. This
//! mirrors the sub-module-per-category layout used for every other builtin
//! family in this codebase; only the categories named by the primitive
//! table survive here.

use crate::interpreter::Interpreter;
use crate::value::{Cell, PrimitiveFn};
use std::rc::Rc;

pub mod arithmetic;
pub mod comparison;
pub mod console;
pub mod lists;
pub mod strings;
pub mod system;

/// Wraps a plain function pointer as the opaque primitive payload and binds
/// it under `name` in the global environment.
pub fn register_primitive(interp: &mut Interpreter, name: &str, f: fn(&[Cell], &mut Interpreter) -> Cell) {
    let boxed: PrimitiveFn = Rc::new(f);
    interp.register_function(name, boxed);
}

/// Registers every builtin category in the core primitive table.
pub fn register_builtins(interp: &mut Interpreter) {
    arithmetic::register(interp);
    comparison::register(interp);
    lists::register(interp);
    strings::register(interp);
    console::register(interp);
    system::register(interp);
}
