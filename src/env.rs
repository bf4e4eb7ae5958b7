//! Environments.
//!
//! An environment is itself a List cell of two-element `[symbol, value]`
//! pairs, walked newest-to-oldest so that shadowing falls out of ordinary
//! list order rather than needing a dedicated lookup structure.

use crate::alloc::Allocator;
use crate::value::Cell;

/// Allocates a `[sym, val]` pair and appends it to `env`, returning `val`.
pub fn extend(alloc: &mut Allocator, env: &Cell, sym: Cell, val: Cell) -> Cell {
    let pair = alloc.mklist(vec![sym, val.clone()]);
    env.append(pair);
    val
}

/// Scans `env`'s pairs from newest to oldest for a binding named `name`.
pub fn find(env: &Cell, name: &str) -> Option<Cell> {
    for pair in env.items().iter().rev() {
        if let Some(sym) = pair.nth(0) {
            if sym.symbol_name().as_deref() == Some(name) {
                return Some(pair.clone());
            }
        }
    }
    None
}

/// Looks up `name` in `env`, falling back to `global` on a miss.
pub fn lookup(env: &Cell, global: &Cell, name: &str) -> Option<Cell> {
    find(env, name).or_else(|| find(global, name))
}

/// Binds each of `syms` to the corresponding entry in `vals`. Fails if the
/// two slices differ in length.
pub fn extensions(alloc: &mut Allocator, env: &Cell, syms: &[Cell], vals: &[Cell]) -> Result<(), ()> {
    if syms.len() != vals.len() {
        return Err(());
    }
    for (s, v) in syms.iter().zip(vals.iter()) {
        extend(alloc, env, s.clone(), v.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_prefers_the_most_recent_binding() {
        let mut alloc = Allocator::new();
        let env = alloc.mklist(vec![]);
        let x = alloc.mksym(b"x");
        let one = alloc.mkint(1);
        let two = alloc.mkint(2);
        extend(&mut alloc, &env, x.clone(), one);
        extend(&mut alloc, &env, x, two);
        let pair = find(&env, "x").unwrap();
        assert_eq!(pair.nth(1).unwrap().as_integer(), Some(2));
    }

    #[test]
    fn lookup_falls_back_to_global() {
        let mut alloc = Allocator::new();
        let env = alloc.mklist(vec![]);
        let global = alloc.mklist(vec![]);
        let y = alloc.mksym(b"y");
        let nine = alloc.mkint(9);
        extend(&mut alloc, &global, y, nine);
        let pair = lookup(&env, &global, "y").unwrap();
        assert_eq!(pair.nth(1).unwrap().as_integer(), Some(9));
    }

    #[test]
    fn extensions_rejects_mismatched_arity() {
        let mut alloc = Allocator::new();
        let env = alloc.mklist(vec![]);
        let syms = vec![alloc.mksym(b"a"), alloc.mksym(b"b")];
        let vals = vec![alloc.mkint(1)];
        assert!(extensions(&mut alloc, &env, &syms, &vals).is_err());
    }
}
