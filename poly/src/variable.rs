//! Variable identifiers and a pool that hands out fresh ones.
//!
//! Mirrors the teacher's convention of small `Copy` identifier newtypes
//! (`Variable` here plays the role `algebraeon_sets`' interned symbols play
//! elsewhere): cheap to compare, cheap to order, cheap to hash.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(usize);

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

impl Variable {
    pub fn new() -> Self {
        Variable(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> usize {
        self.0
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Hands out fresh variables and remembers the names a caller assigned them,
/// purely for `Display` purposes; equality and ordering never depend on names.
#[derive(Debug, Default)]
pub struct VariablePool {
    named: std::collections::HashMap<Variable, String>,
    anonymous_counter: Cell<usize>,
}

impl VariablePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&self) -> Variable {
        self.anonymous_counter.set(self.anonymous_counter.get() + 1);
        Variable::new()
    }

    pub fn fresh_named(&mut self, name: impl Into<String>) -> Variable {
        let v = Variable::new();
        self.named.insert(v, name.into());
        v
    }

    pub fn name_of(&self, v: Variable) -> String {
        self.named
            .get(&v)
            .cloned()
            .unwrap_or_else(|| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_variables_are_distinct() {
        let pool = VariablePool::new();
        let a = pool.fresh();
        let b = pool.fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn named_lookup() {
        let mut pool = VariablePool::new();
        let x = pool.fresh_named("x");
        assert_eq!(pool.name_of(x), "x");
    }
}
