//! Hand-written recursive-descent reader, driven one byte at a time through
//! the `Stream` abstraction rather than over a borrowed `&str` slice. A
//! combinator parser (`nom`) operates on string slices and has no natural
//! way to model a shared pushback cursor over a stream that may be a host
//! file handle; the reader below trades combinator brevity for a direct
//! translation of the I/O model the rest of the interpreter is built on.

use crate::config;
use crate::error::ReaderError;
use crate::interpreter::Interpreter;
use crate::value::Cell;

/// Reads one top-level expression from `interp.input`. Returns `None` only
/// on a clean EOF before any token is seen. A malformed form (unmatched
/// `)`, EOF inside a list or string, an oversized string) is a Recoverable
/// reader error per spec: it diagnoses and yields `Some(nil)`, discarding
/// the malformed form rather than handing back whatever was parsed of it,
/// so the caller can tell "nothing left to read" from "that form was bad"
/// and keep reading.
pub fn read(interp: &mut Interpreter) -> Option<Cell> {
    skip_whitespace(interp);
    match interp.input.getc() {
        None => None,
        Some(b'(') => Some(parse_list(interp).unwrap_or_else(|| interp.nil.clone())),
        Some(b'"') => Some(parse_string(interp).unwrap_or_else(|| interp.nil.clone())),
        Some(b')') => {
            interp.diagnose(&ReaderError::UnmatchedParen.to_string(), file!(), line!());
            Some(interp.nil.clone())
        }
        Some(byte) => {
            let _ = interp.input.ungetc(byte);
            Some(parse_atom(interp))
        }
    }
}

fn skip_whitespace(interp: &mut Interpreter) {
    loop {
        match interp.input.getc() {
            Some(b) if b.is_ascii_whitespace() => continue,
            Some(b) => {
                let _ = interp.input.ungetc(b);
                break;
            }
            None => break,
        }
    }
}

/// Parses until the matching `)`. An empty `()` reads as the nil singleton
/// rather than a zero-length List cell, so that `(if (quote ()) ...)` and
/// similar idioms see it as falsy. Returns `None` on EOF before the
/// matching `)`, diagnosing first; a list that never closes is a failed
/// read, not a value built from whatever elements happened to precede the
/// EOF, and a nested failure propagates out as a failure of the whole
/// enclosing form rather than a hole silently patched with nil.
fn parse_list(interp: &mut Interpreter) -> Option<Cell> {
    let list = interp.alloc.mklist(vec![]);
    loop {
        skip_whitespace(interp);
        match interp.input.getc() {
            Some(b')') => {
                return Some(if list.is_empty() { interp.nil.clone() } else { list });
            }
            Some(b'(') => match parse_list(interp) {
                Some(child) => list.append(child),
                None => return None,
            },
            Some(b'"') => match parse_string(interp) {
                Some(child) => list.append(child),
                None => return None,
            },
            None => {
                interp.diagnose(&ReaderError::EofInList.to_string(), file!(), line!());
                return None;
            }
            Some(byte) => {
                let _ = interp.input.ungetc(byte);
                let child = parse_atom(interp);
                list.append(child);
            }
        }
    }
}

/// Parses until the closing `"`. Returns `None`, having already diagnosed,
/// on EOF before the closing quote or once the literal grows past
/// `config::MAX_STRING_LEN` — a string that never terminates is a failed
/// read, not a value truncated to whatever bytes were seen first.
fn parse_string(interp: &mut Interpreter) -> Option<Cell> {
    let mut bytes = Vec::new();
    loop {
        if bytes.len() > config::MAX_STRING_LEN {
            interp.diagnose(&ReaderError::StringTooLong.to_string(), file!(), line!());
            return None;
        }
        match interp.input.getc() {
            None => {
                interp.diagnose(&ReaderError::EofInString.to_string(), file!(), line!());
                return None;
            }
            Some(b'"') => break,
            Some(b'\\') => match interp.input.getc() {
                None => {
                    interp.diagnose(&ReaderError::EofInString.to_string(), file!(), line!());
                    return None;
                }
                Some(b'n') => bytes.push(b'\n'),
                Some(b't') => bytes.push(b'\t'),
                Some(b'\\') => bytes.push(b'\\'),
                Some(b'"') => bytes.push(b'"'),
                Some(b'(') => bytes.push(b'('),
                Some(b')') => bytes.push(b')'),
                Some(d) if (b'0'..=b'7').contains(&d) => bytes.push(parse_octal_escape(interp, d)),
                Some(other) => bytes.push(other),
            },
            Some(b) => bytes.push(b),
        }
    }
    Some(interp.alloc.mkstr(bytes))
}

/// Consumes up to two more octal digits after `first` and returns the byte
/// they encode together.
fn parse_octal_escape(interp: &mut Interpreter, first: u8) -> u8 {
    let mut val: u32 = (first - b'0') as u32;
    for _ in 0..2 {
        match interp.input.getc() {
            Some(d) if (b'0'..=b'7').contains(&d) => {
                val = val * 8 + (d - b'0') as u32;
            }
            Some(other) => {
                let _ = interp.input.ungetc(other);
                break;
            }
            None => break,
        }
    }
    (val & 0xFF) as u8
}

fn parse_atom(interp: &mut Interpreter) -> Cell {
    let mut bytes = Vec::new();
    loop {
        match interp.input.getc() {
            None => break,
            Some(b) if b.is_ascii_whitespace() || b == b'(' || b == b')' => {
                let _ = interp.input.ungetc(b);
                break;
            }
            Some(b) => bytes.push(b),
        }
    }
    if bytes.is_empty() {
        interp.diagnose(&ReaderError::EmptyToken.to_string(), file!(), line!());
        return interp.nil.clone();
    }
    match parse_integer(&bytes) {
        Some(n) => interp.alloc.mkint(n),
        None => interp.alloc.mksym(&bytes),
    }
}

/// Matches `[+-]?(0|0[xX][0-9a-fA-F]+|[1-9][0-9]*|0[0-7]+)` by hand, without
/// a regex engine.
fn parse_integer(bytes: &[u8]) -> Option<i64> {
    let (neg, rest) = match bytes.first() {
        Some(b'+') => (false, &bytes[1..]),
        Some(b'-') => (true, &bytes[1..]),
        _ => (false, bytes),
    };
    if rest.is_empty() {
        return None;
    }
    let value: i64 = if rest == b"0" {
        0
    } else if rest.len() > 2 && rest[0] == b'0' && (rest[1] == b'x' || rest[1] == b'X') {
        let hex = &rest[2..];
        if hex.is_empty() || !hex.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        i64::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?
    } else if rest[0] == b'0' {
        let oct = &rest[1..];
        if oct.is_empty() || !oct.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return None;
        }
        i64::from_str_radix(std::str::from_utf8(oct).ok()?, 8).ok()?
    } else if rest[0].is_ascii_digit() {
        if !rest.iter().all(u8::is_ascii_digit) {
            return None;
        }
        std::str::from_utf8(rest).ok()?.parse().ok()?
    } else {
        return None;
    };
    Some(if neg { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Stream;
    use crate::value::Tag;

    fn read_one(src: &[u8]) -> (Cell, Interpreter) {
        let mut interp = Interpreter::init();
        interp.set_input(Stream::string_in(src.to_vec()));
        let result = read(&mut interp).expect("expected a value");
        (result, interp)
    }

    #[test]
    fn reads_decimal_hex_and_octal_integers() {
        let (c, _i) = read_one(b"42");
        assert_eq!(c.as_integer(), Some(42));
        let (c, _i) = read_one(b"-7");
        assert_eq!(c.as_integer(), Some(-7));
        let (c, _i) = read_one(b"0x1F");
        assert_eq!(c.as_integer(), Some(31));
        let (c, _i) = read_one(b"010");
        assert_eq!(c.as_integer(), Some(8));
    }

    #[test]
    fn reads_a_symbol() {
        let (c, _i) = read_one(b"foo-bar?");
        assert_eq!(c.tag(), Tag::Symbol);
        assert_eq!(c.symbol_name().unwrap(), "foo-bar?");
    }

    #[test]
    fn reads_a_nested_list() {
        let (c, _i) = read_one(b"(+ 1 (* 2 3))");
        assert_eq!(c.tag(), Tag::List);
        assert_eq!(c.len(), 3);
        let inner = c.nth(2).unwrap();
        assert_eq!(inner.len(), 3);
    }

    #[test]
    fn reads_a_string_with_escapes() {
        let (c, _i) = read_one(b"\"a\\nb\"");
        assert_eq!(c.string_bytes().unwrap(), b"a\nb");
    }

    #[test]
    fn round_trips_through_print() {
        let mut interp = Interpreter::init();
        interp.set_input(Stream::string_in(b"(foo 1 2)".to_vec()));
        let expr = read(&mut interp).unwrap();
        interp.set_output(Stream::string_out(64));
        crate::printer::print_cell(&mut interp, &expr);
        assert_eq!(interp.output.take_string_out().unwrap(), b"(foo 1 2)");
    }

    #[test]
    fn eof_inside_list_diagnoses_and_discards_the_partial_form() {
        let (c, _i) = read_one(b"(1 2");
        assert!(c.is_nil());
    }

    #[test]
    fn eof_inside_a_nested_list_fails_the_whole_enclosing_form() {
        let (c, _i) = read_one(b"(1 (2 3");
        assert!(c.is_nil());
    }

    #[test]
    fn unterminated_string_diagnoses_and_yields_nil() {
        let (c, _i) = read_one(b"\"ab");
        assert!(c.is_nil());
    }

    #[test]
    fn a_stray_closing_paren_is_recoverable_and_evaluation_continues() {
        let mut interp = Interpreter::init();
        interp.set_input(Stream::string_in(b") 42".to_vec()));
        let first = read(&mut interp).expect("a stray ) is recoverable, not EOF");
        assert!(first.is_nil());
        let second = read(&mut interp).expect("reading continues after the error");
        assert_eq!(second.as_integer(), Some(42));
    }

    #[test]
    fn clean_eof_before_any_token_returns_none() {
        let mut interp = Interpreter::init();
        interp.set_input(Stream::string_in(b"   ".to_vec()));
        assert!(read(&mut interp).is_none());
    }
}
