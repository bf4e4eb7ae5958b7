//! Console output: `print`.

use crate::interpreter::Interpreter;
use crate::printer;
use crate::value::Cell;

/// Prints every argument to `interp.output`, space-separated, followed by a
/// newline. Returns the last argument, or nil given none.
pub fn builtin_print(args: &[Cell], interp: &mut Interpreter) -> Cell {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            let _ = interp.output.putc(b' ');
        }
        printer::print_cell(interp, arg);
    }
    let _ = interp.output.putc(b'\n');
    args.last().cloned().unwrap_or_else(|| interp.nil.clone())
}

pub fn register(interp: &mut Interpreter) {
    super::register_primitive(interp, "print", builtin_print);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use crate::io::Stream;

    #[test]
    fn print_writes_arguments_space_separated_with_a_trailing_newline() {
        let mut interp = Interpreter::init();
        interp.set_output(Stream::string_out(64));
        let args: Vec<Cell> = vec![interp.alloc.mkint(1), interp.alloc.mkint(2)];
        builtin_print(&args, &mut interp);
        assert_eq!(interp.output.take_string_out().unwrap(), b"1 2\n");
    }

    #[test]
    fn print_of_nothing_returns_nil() {
        let mut interp = Interpreter::init();
        interp.set_output(Stream::string_out(64));
        assert!(builtin_print(&[], &mut interp).is_nil());
    }
}
