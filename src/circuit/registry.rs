#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The signal registry: a stable `name -> variable id` interning table.
//!
//! Ids are handed out monotonically from 1 and never reused or
//! renumbered, so a name means the same variable for the whole lifetime
//! of a translation session. Gate encodings draw anonymous ids from the
//! same counter, which keeps the id space contiguous for the solver.

use crate::sat::literal::Variable;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct SignalRegistry {
    ids: FxHashMap<String, Variable>,
    names: Vec<String>,
    count: Variable,
}

impl SignalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id already assigned to `name`, or assigns the next one.
    pub fn intern(&mut self, name: &str) -> Variable {
        if let Some(&var) = self.ids.get(name) {
            return var;
        }
        self.count += 1;
        self.ids.insert(name.to_owned(), self.count);
        self.names.push(name.to_owned());
        self.count
    }

    /// Allocates an id with no name attached, for derived gate outputs.
    pub fn fresh(&mut self) -> Variable {
        self.count += 1;
        self.count
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Variable> {
        self.ids.get(name).copied()
    }

    /// Total ids issued, named and anonymous.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count as usize
    }

    /// Named signals in interning order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn num_named(&self) -> usize {
        self.names.len()
    }
}
