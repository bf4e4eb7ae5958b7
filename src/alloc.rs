//! The allocator owns the heap registry: every live cell is reachable
//! through it, and it is the sole place that exits the process on
//! out-of-memory.

use crate::config;
use crate::value::{Cell, Payload, PrimitiveFn};

pub struct Allocator {
    registry: Vec<Cell>,
}

impl Allocator {
    pub fn new() -> Self {
        Allocator {
            registry: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    fn alloc(&mut self, payload: Payload) -> Cell {
        if self.registry.len() >= config::MAX_CELLS {
            fatal_oom();
        }
        let cell = Cell::new(payload);
        self.registry.push(cell.clone());
        cell
    }

    pub fn mkobj(&mut self, payload: Payload) -> Cell {
        self.alloc(payload)
    }

    pub fn mksym(&mut self, name: &[u8]) -> Cell {
        self.alloc(Payload::Symbol(name.to_vec()))
    }

    pub fn mkstr(&mut self, bytes: Vec<u8>) -> Cell {
        self.alloc(Payload::Str(bytes))
    }

    pub fn mkint(&mut self, n: i64) -> Cell {
        self.alloc(Payload::Integer(n))
    }

    pub fn mkprimop(&mut self, f: PrimitiveFn) -> Cell {
        self.alloc(Payload::Primitive(f))
    }

    pub fn mklist(&mut self, items: Vec<Cell>) -> Cell {
        self.alloc(Payload::List(items))
    }

    /// Builds a closure over a snapshot of `env`'s current bindings, copying
    /// element references rather than deep-copying cells.
    pub fn mkproc(&mut self, params: Cell, body: Cell, env: Cell) -> Cell {
        let snapshot = self.mklist(env.items());
        self.alloc(Payload::Proc {
            params,
            body,
            env: snapshot,
        })
    }

    pub fn registry(&self) -> &[Cell] {
        &self.registry
    }

    /// Retains only cells marked reachable by the last `gc::mark` pass,
    /// clearing their bit for the next cycle.
    pub fn sweep(&mut self) {
        self.registry.retain(|c| {
            let mut data = c.0.borrow_mut();
            if data.marked {
                data.marked = false;
                true
            } else {
                false
            }
        });
    }

    /// Drops every cell unconditionally. Used at interpreter teardown.
    pub fn sweep_all(&mut self) {
        self.registry.clear();
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

fn fatal_oom() -> ! {
    eprintln!("(error \"out of memory\" \"{}\" {})", file!(), line!());
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_drops_unmarked_cells() {
        let mut alloc = Allocator::new();
        let kept = alloc.mkint(1);
        let _dropped = alloc.mkint(2);
        assert_eq!(alloc.len(), 2);
        kept.0.borrow_mut().marked = true;
        alloc.sweep();
        assert_eq!(alloc.len(), 1);
    }

    #[test]
    fn sweep_all_clears_the_registry() {
        let mut alloc = Allocator::new();
        alloc.mkint(1);
        alloc.mkint(2);
        alloc.sweep_all();
        assert_eq!(alloc.len(), 0);
    }
}
