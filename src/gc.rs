//! Mark-and-sweep collection over the allocator's heap registry.
//!
//! Roots are the two singletons, the six special-form symbols, and the
//! global and current environments. `mark` short-circuits on an
//! already-marked cell before recursing into its children, so shared and
//! cyclic structure is visited at most once per cell.

use crate::interpreter::Interpreter;
use crate::value::{Cell, Payload};

pub fn mark(cell: &Cell) {
    {
        let mut data = cell.0.borrow_mut();
        if data.marked {
            return;
        }
        data.marked = true;
    }
    let children: Vec<Cell> = match &cell.0.borrow().payload {
        Payload::List(items) => items.clone(),
        Payload::Proc { params, body, env } => vec![params.clone(), body.clone(), env.clone()],
        Payload::File(Some(inner)) => vec![inner.clone()],
        Payload::Quote(inner) => vec![inner.clone()],
        _ => Vec::new(),
    };
    for child in children {
        mark(&child);
    }
}

/// Marks every root reachable from the interpreter, then sweeps the heap.
pub fn clean(interp: &mut Interpreter) {
    mark(&interp.nil);
    mark(&interp.t);
    for root in interp.special_forms.roots() {
        mark(&root);
    }
    mark(&interp.global.clone());
    mark(&interp.env.clone());
    interp.alloc.sweep();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Allocator;

    #[test]
    fn mark_tolerates_a_cycle() {
        let mut alloc = Allocator::new();
        let list = alloc.mklist(vec![]);
        list.append(list.clone());
        mark(&list);
        assert!(list.0.borrow().marked);
    }

    #[test]
    fn unreachable_cells_are_swept() {
        let mut alloc = Allocator::new();
        let root = alloc.mklist(vec![]);
        let reachable = alloc.mkint(1);
        root.append(reachable.clone());
        let _orphan = alloc.mkint(2);
        mark(&root);
        alloc.sweep();
        assert_eq!(alloc.len(), 2); // root + reachable
    }
}
