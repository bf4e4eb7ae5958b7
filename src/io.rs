//! Byte-oriented I/O abstraction.
//!
//! Every reader, printer, and diagnostic call goes through a `Stream`
//! rather than directly touching `std::io`. A stream may back a host file
//! handle, the process's stdio, or a fixed-size in-memory buffer, and
//! supports exactly one byte of pushback.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Write};

enum Kind {
    FileIn(File),
    FileOut(File),
    StdIn,
    StdOut,
    StdErr,
    StringIn { buf: Vec<u8>, pos: usize },
    StringOut { buf: RefCell<Vec<u8>>, max: usize },
}

pub struct Stream {
    kind: Kind,
    pushback: Option<u8>,
}

impl Stream {
    pub fn stdin() -> Self {
        Stream {
            kind: Kind::StdIn,
            pushback: None,
        }
    }

    pub fn stdout() -> Self {
        Stream {
            kind: Kind::StdOut,
            pushback: None,
        }
    }

    pub fn stderr() -> Self {
        Stream {
            kind: Kind::StdErr,
            pushback: None,
        }
    }

    pub fn file_in(path: &std::path::Path) -> io::Result<Self> {
        Ok(Stream {
            kind: Kind::FileIn(File::open(path)?),
            pushback: None,
        })
    }

    pub fn file_out(path: &std::path::Path) -> io::Result<Self> {
        Ok(Stream {
            kind: Kind::FileOut(File::create(path)?),
            pushback: None,
        })
    }

    pub fn string_in(data: Vec<u8>) -> Self {
        Stream {
            kind: Kind::StringIn { buf: data, pos: 0 },
            pushback: None,
        }
    }

    pub fn string_out(max: usize) -> Self {
        Stream {
            kind: Kind::StringOut {
                buf: RefCell::new(Vec::new()),
                max,
            },
            pushback: None,
        }
    }

    /// Snapshot of a StringOut buffer's contents; `None` for every other kind.
    pub fn take_string_out(&self) -> Option<Vec<u8>> {
        match &self.kind {
            Kind::StringOut { buf, .. } => Some(buf.borrow().clone()),
            _ => None,
        }
    }

    pub fn getc(&mut self) -> Option<u8> {
        if let Some(b) = self.pushback.take() {
            return Some(b);
        }
        match &mut self.kind {
            Kind::FileIn(f) => {
                let mut b = [0u8; 1];
                match f.read(&mut b) {
                    Ok(1) => Some(b[0]),
                    _ => None,
                }
            }
            Kind::StdIn => {
                let mut b = [0u8; 1];
                match io::stdin().read(&mut b) {
                    Ok(1) => Some(b[0]),
                    _ => None,
                }
            }
            Kind::StringIn { buf, pos } => {
                if *pos >= buf.len() {
                    None
                } else {
                    let c = buf[*pos];
                    *pos += 1;
                    Some(c)
                }
            }
            _ => None,
        }
    }

    /// Pushes one byte back onto the stream. Fails if a byte is already
    /// pending.
    pub fn ungetc(&mut self, b: u8) -> Result<(), ()> {
        if self.pushback.is_some() {
            return Err(());
        }
        self.pushback = Some(b);
        Ok(())
    }

    pub fn putc(&mut self, b: u8) -> Result<(), ()> {
        match &mut self.kind {
            Kind::FileOut(f) => f.write_all(&[b]).map_err(|_| ()),
            Kind::StdOut => io::stdout().write_all(&[b]).map_err(|_| ()),
            Kind::StdErr => io::stderr().write_all(&[b]).map_err(|_| ()),
            Kind::StringOut { buf, max } => {
                let mut buf = buf.borrow_mut();
                if buf.len() >= *max {
                    Err(())
                } else {
                    buf.push(b);
                    Ok(())
                }
            }
            _ => Err(()),
        }
    }

    /// Writes bytes until a NUL terminator or the end of the slice; returns
    /// the count written.
    pub fn puts(&mut self, bytes: &[u8]) -> Result<usize, ()> {
        let mut count = 0;
        for &b in bytes {
            if b == 0 {
                break;
            }
            self.putc(b)?;
            count += 1;
        }
        Ok(count)
    }

    /// Writes an exact byte slice, ignoring individual putc failures. Used
    /// internally by the printer and diagnostics, which already know their
    /// byte counts and have no NUL-termination convention to honor.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            let _ = self.putc(b);
        }
    }

    /// Emits a signed integer in base 10 without going through the host's
    /// formatted-printing machinery.
    pub fn printd(&mut self, n: i64) -> Result<(), ()> {
        if n == 0 {
            return self.putc(b'0');
        }
        let neg = n < 0;
        let mut val = n.unsigned_abs();
        let mut digits = Vec::new();
        while val > 0 {
            digits.push(b'0' + (val % 10) as u8);
            val /= 10;
        }
        if neg {
            self.putc(b'-')?;
        }
        for &d in digits.iter().rev() {
            self.putc(d)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) {
        match &mut self.kind {
            Kind::FileOut(f) => {
                let _ = f.flush();
            }
            Kind::StdOut => {
                let _ = io::stdout().flush();
            }
            Kind::StdErr => {
                let _ = io::stderr().flush();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getc_then_ungetc_replays_the_same_byte() {
        let mut s = Stream::string_in(b"ab".to_vec());
        let first = s.getc().unwrap();
        s.ungetc(first).unwrap();
        assert_eq!(s.getc(), Some(first));
        assert_eq!(s.getc(), Some(b'b'));
        assert_eq!(s.getc(), None);
    }

    #[test]
    fn ungetc_rejects_a_second_pushback() {
        let mut s = Stream::string_in(b"a".to_vec());
        assert!(s.ungetc(b'x').is_ok());
        assert!(s.ungetc(b'y').is_err());
    }

    #[test]
    fn string_out_enforces_its_capacity() {
        let mut s = Stream::string_out(2);
        assert!(s.putc(b'a').is_ok());
        assert!(s.putc(b'b').is_ok());
        assert!(s.putc(b'c').is_err());
        assert_eq!(s.take_string_out().unwrap(), b"ab");
    }

    #[test]
    fn printd_handles_zero_and_negative_values() {
        let mut s = Stream::string_out(16);
        s.printd(0).unwrap();
        s.printd(-42).unwrap();
        assert_eq!(s.take_string_out().unwrap(), b"0-42");
    }
}
