//! Name interner for constant names and literal payloads.
//!
//! Class and module names, and the text of string and symbol literals, are
//! stored once and handed out as `Atom`s. Atoms are dense indices into one
//! append-only list, so resolving is a bounds-checked load, and the reverse
//! map is a `DashMap` so concurrent interning only contends per shard.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Handle to an interned name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty name. Always present, never allocated.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names of the built-in hierarchy, pre-interned by `intern_common`.
const BUILTIN_NAMES: &[&str] = &[
    "BasicObject",
    "Object",
    "Kernel",
    "Comparable",
    "Module",
    "Class",
    "Numeric",
    "Integer",
    "Float",
    "String",
    "Symbol",
    "TrueClass",
    "FalseClass",
    "NilClass",
];

/// Concurrent, append-only name table.
pub struct NameInterner {
    atoms: DashMap<Arc<str>, Atom, FxBuildHasher>,
    names: RwLock<Vec<Arc<str>>>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self {
            atoms: DashMap::with_hasher(FxBuildHasher),
            names: RwLock::new(vec![Arc::from("")]),
        }
    }

    /// Intern `name`, returning the existing atom if it was seen before.
    pub fn intern(&self, name: &str) -> Atom {
        if name.is_empty() {
            return Atom::NONE;
        }
        if let Some(atom) = self.atoms.get(name) {
            return *atom;
        }

        // The entry keeps its shard locked, so two threads racing on the same
        // name cannot both append it.
        match self.atoms.entry(Arc::from(name)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
                let atom = Atom(names.len() as u32);
                names.push(entry.key().clone());
                entry.insert(atom);
                atom
            }
        }
    }

    /// Look up `name` without interning it.
    pub fn get(&self, name: &str) -> Option<Atom> {
        if name.is_empty() {
            return Some(Atom::NONE);
        }
        self.atoms.get(name).map(|atom| *atom)
    }

    /// The text of `atom`, or `""` for an atom this interner never produced.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.get(atom.0 as usize).cloned()
    }

    /// Number of names, counting the empty one.
    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether only the empty name is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Pre-intern the names of the built-in hierarchy.
    pub fn intern_common(&self) {
        for name in BUILTIN_NAMES {
            self.intern(name);
        }
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NameInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
