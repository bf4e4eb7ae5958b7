//! The `Interpreter`: owns the allocator, the three I/O streams, the
//! global and current environments, and the two singletons. Every other
//! module operates on a `&mut Interpreter` rather than touching free-floating
//! global state, so embedding more than one interpreter in a process (or
//! resetting one) is just constructing another value.

use crate::alloc::Allocator;
use crate::builtins;
use crate::eval;
use crate::gc;
use crate::io::Stream;
use crate::printer;
use crate::reader;
use crate::value::{Cell, Payload, PrimitiveFn};
use std::cell::Cell as StdCell;
use std::rc::Rc;

/// The six special-form symbols, interned once at startup and kept alive as
/// GC roots regardless of whether user code ever references them by name.
pub struct SpecialForms {
    pub if_: Cell,
    pub begin: Cell,
    pub quote: Cell,
    pub set: Cell,
    pub define: Cell,
    pub lambda: Cell,
}

impl SpecialForms {
    fn new(alloc: &mut Allocator) -> Self {
        SpecialForms {
            if_: alloc.mksym(b"if"),
            begin: alloc.mksym(b"begin"),
            quote: alloc.mksym(b"quote"),
            set: alloc.mksym(b"set"),
            define: alloc.mksym(b"define"),
            lambda: alloc.mksym(b"lambda"),
        }
    }

    pub fn roots(&self) -> Vec<Cell> {
        vec![
            self.if_.clone(),
            self.begin.clone(),
            self.quote.clone(),
            self.set.clone(),
            self.define.clone(),
            self.lambda.clone(),
        ]
    }
}

pub struct Interpreter {
    pub alloc: Allocator,
    pub input: Stream,
    pub output: Stream,
    pub logging: Stream,
    /// Top-level environment; `define` always binds here.
    pub global: Cell,
    /// Current lexical environment; starts empty and is replaced by
    /// `apply` while evaluating a Proc's body.
    pub env: Cell,
    pub nil: Cell,
    pub t: Cell,
    pub special_forms: SpecialForms,
    /// Checked by the REPL loop between top-level expressions only. Shared
    /// via `Rc<Cell<bool>>` rather than a plain `bool` so a host embedding
    /// this interpreter can hold its own handle and request a halt without
    /// needing a `&mut Interpreter` in scope (e.g. from a signal handler
    /// thread, though this interpreter does not install one itself).
    pub should_halt: Rc<StdCell<bool>>,
    /// Set by `abort_expression` to unwind the remainder of the *current*
    /// top-level expression only; cleared at the start of every `eval_cell`.
    /// Distinct from `should_halt`, which stops the whole REPL.
    should_abort_expr: bool,
}

impl Interpreter {
    /// Allocates the singletons and special-form symbols, registers every
    /// primitive, and returns an interpreter wired to stdio.
    pub fn init() -> Self {
        let mut alloc = Allocator::new();
        let nil = alloc.mkobj(Payload::Nil);
        let t = alloc.mkobj(Payload::Tee);
        let global = alloc.mklist(vec![]);
        let env = alloc.mklist(vec![]);
        let special_forms = SpecialForms::new(&mut alloc);

        let mut interp = Interpreter {
            alloc,
            input: Stream::stdin(),
            output: Stream::stdout(),
            logging: Stream::stderr(),
            global,
            env,
            nil,
            t,
            special_forms,
            should_halt: Rc::new(StdCell::new(false)),
            should_abort_expr: false,
        };
        builtins::register_builtins(&mut interp);
        interp
    }

    pub fn set_input(&mut self, s: Stream) {
        self.input = s;
    }

    pub fn set_output(&mut self, s: Stream) {
        self.output = s;
    }

    pub fn set_logging(&mut self, s: Stream) {
        self.logging = s;
    }

    /// Writes a diagnostic of the form `(error "<message>" "<file>" <line>)`
    /// to the logging stream and returns nil, the standard failure shape
    /// for a primitive or special form.
    pub fn fail(&mut self, message: &str, file: &str, line: u32) -> Cell {
        self.diagnose(message, file, line);
        self.nil.clone()
    }

    pub fn diagnose(&mut self, message: &str, file: &str, line: u32) {
        let text = format!("(error \"{}\" \"{}\" {})\n", message, file, line);
        self.logging.write_bytes(text.as_bytes());
    }

    /// Fatal-to-expression: diagnoses and unwinds the remainder of the
    /// current top-level expression, returning nil to every enclosing
    /// caller without further evaluation. Distinct from `fail`, whose nil
    /// is an ordinary recoverable value that sibling forms keep evaluating
    /// around.
    pub fn abort_expression(&mut self, message: &str, file: &str, line: u32) -> Cell {
        self.diagnose(message, file, line);
        self.should_abort_expr = true;
        self.nil.clone()
    }

    pub(crate) fn expression_aborted(&self) -> bool {
        self.should_abort_expr
    }

    /// Reads one top-level expression from the current input stream.
    pub fn read(&mut self) -> Option<Cell> {
        reader::read(self)
    }

    /// Evaluates `x` in the current environment. Clears any abort request
    /// left over from a previous top-level expression first.
    pub fn eval_cell(&mut self, x: Cell) -> Cell {
        self.should_abort_expr = false;
        let env = self.env.clone();
        eval::eval(self, x, env)
    }

    /// Prints `x` to the current output stream.
    pub fn print_cell(&mut self, x: &Cell) {
        printer::print_cell(self, x)
    }

    /// Binds `name` to a host function in the global environment. Returns 0
    /// on success, mirroring the C-shaped `register_function(i, name, fn)`
    /// contract.
    pub fn register_function(&mut self, name: &str, f: PrimitiveFn) -> i32 {
        let sym = self.alloc.mksym(name.as_bytes());
        let prim = self.alloc.mkobj(Payload::Primitive(f));
        let global = self.global.clone();
        crate::env::extend(&mut self.alloc, &global, sym, prim);
        0
    }

    /// Runs one mark-and-sweep cycle.
    pub fn clean(&mut self) {
        gc::clean(self);
    }

    /// Read-eval-print loop over the current input/output streams. Runs
    /// until EOF or a halt request, collecting garbage after each
    /// top-level form.
    pub fn repl(&mut self) -> i32 {
        loop {
            if self.should_halt.get() {
                break;
            }
            match self.read() {
                Some(expr) => {
                    let result = self.eval_cell(expr);
                    self.print_cell(&result);
                    self.output.write_bytes(b"\n");
                    self.clean();
                }
                None => break,
            }
        }
        0
    }

    /// Flushes every stream and frees the entire heap unconditionally.
    pub fn end(&mut self) {
        self.input.flush();
        self.output.flush();
        self.logging.flush();
        self.alloc.sweep_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_registers_the_core_primitive_table() {
        let mut interp = Interpreter::init();
        let global = interp.global.clone();
        assert!(crate::env::find(&global, "+").is_some());
        assert!(crate::env::find(&global, "car").is_some());
        assert!(crate::env::find(&global, "print").is_some());
    }

    #[test]
    fn abort_expression_unwinds_without_stopping_the_repl() {
        let mut interp = Interpreter::init();
        interp.abort_expression("simulated fault", file!(), line!());
        assert!(interp.expression_aborted());
        interp.set_input(Stream::string_in(b"1".to_vec()));
        let expr = interp.read().unwrap();
        let result = interp.eval_cell(expr);
        assert_eq!(result.as_integer(), Some(1));
        assert!(!interp.expression_aborted());
    }

    #[test]
    fn should_halt_is_a_shared_handle_a_host_can_set_independently() {
        let interp = Interpreter::init();
        let handle = interp.should_halt.clone();
        assert!(!interp.should_halt.get());
        handle.set(true);
        assert!(interp.should_halt.get());
    }

    #[test]
    fn register_function_adds_a_host_callback() {
        let mut interp = Interpreter::init();
        let f: PrimitiveFn = std::rc::Rc::new(|_args, interp| interp.alloc.mkint(7));
        interp.register_function("seven", f);
        interp.set_input(Stream::string_in(b"(seven)".to_vec()));
        let expr = interp.read().unwrap();
        let result = interp.eval_cell(expr);
        assert_eq!(result.as_integer(), Some(7));
    }
}
