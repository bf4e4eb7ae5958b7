//! Recursive printer: the inverse of the reader for every tag the
//! evaluator actually produces.

use crate::interpreter::Interpreter;
use crate::value::Tag;
use crate::value::Cell;

pub fn print_cell(interp: &mut Interpreter, x: &Cell) {
    match x.tag() {
        Tag::Nil => interp.output.write_bytes(b"()"),
        Tag::Tee => interp.output.write_bytes(b"t"),
        Tag::Integer => {
            let n = x.as_integer().unwrap_or(0);
            let _ = interp.output.printd(n);
        }
        Tag::Symbol => {
            if let Some(name) = x.symbol_name() {
                interp.output.write_bytes(name.as_bytes());
            }
        }
        Tag::String => print_string(interp, x),
        Tag::List => print_list(interp, x),
        Tag::Proc => print_proc(interp, x),
        Tag::Primitive => interp.output.write_bytes(b"#<primitive>"),
        Tag::File => interp.output.write_bytes(b"#<file>"),
        Tag::Error => interp.output.write_bytes(b"#<error>"),
        Tag::Quote => interp.output.write_bytes(b"#<quote>"),
    }
}

fn print_string(interp: &mut Interpreter, x: &Cell) {
    interp.output.write_bytes(b"\"");
    if let Some(bytes) = x.string_bytes() {
        for b in bytes {
            match b {
                b'"' => interp.output.write_bytes(b"\\\""),
                b'\\' => interp.output.write_bytes(b"\\\\"),
                b'\n' => interp.output.write_bytes(b"\\n"),
                other => {
                    let _ = interp.output.putc(other);
                }
            }
        }
    }
    interp.output.write_bytes(b"\"");
}

fn print_list(interp: &mut Interpreter, x: &Cell) {
    interp.output.write_bytes(b"(");
    let items = x.items();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            interp.output.write_bytes(b" ");
        }
        print_cell(interp, item);
    }
    interp.output.write_bytes(b")");
}

fn print_proc(interp: &mut Interpreter, x: &Cell) {
    let (params, body, _env) = x.proc_parts().expect("Proc tag implies proc_parts");
    interp.output.write_bytes(b"(lambda ");
    print_cell(interp, &params);
    interp.output.write_bytes(b" ");
    print_cell(interp, &body);
    interp.output.write_bytes(b")");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Stream;

    fn rendered(interp: &mut Interpreter, cell: &Cell) -> String {
        interp.set_output(Stream::string_out(256));
        print_cell(interp, cell);
        String::from_utf8(interp.output.take_string_out().unwrap()).unwrap()
    }

    #[test]
    fn prints_integers_and_nested_lists() {
        let mut interp = Interpreter::init();
        let a = interp.alloc.mkint(1);
        let b = interp.alloc.mkint(2);
        let inner = interp.alloc.mklist(vec![a, b]);
        let sym = interp.alloc.mksym(b"x");
        let outer = interp.alloc.mklist(vec![sym, inner]);
        assert_eq!(rendered(&mut interp, &outer), "(x (1 2))");
    }

    #[test]
    fn prints_nil_as_empty_parens_and_tee_as_t() {
        let mut interp = Interpreter::init();
        let nil = interp.nil.clone();
        let t = interp.t.clone();
        assert_eq!(rendered(&mut interp, &nil), "()");
        assert_eq!(rendered(&mut interp, &t), "t");
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_strings() {
        let mut interp = Interpreter::init();
        let s = interp.alloc.mkstr(b"a\"b\\c".to_vec());
        assert_eq!(rendered(&mut interp, &s), "\"a\\\"b\\\\c\"");
    }
}
