//! Memoized subtype results.
//!
//! Keys are ordered `(source, target)` pairs. Entries are valid for one
//! `(TypeInterner, HierarchyResolver)` pair, which is why a cache is owned
//! by the `TypeLattice` that fills it.

use crate::types::TypeId;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of cache effectiveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelationCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
pub struct RelationCache {
    entries: DashMap<(TypeId, TypeId), bool, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RelationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: TypeId, target: TypeId) -> Option<bool> {
        match self.entries.get(&(source, target)) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(*entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, source: TypeId, target: TypeId, result: bool) {
        self.entries.insert((source, target), result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> RelationCacheStats {
        RelationCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl std::fmt::Debug for RelationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationCache")
            .field("stats", &self.stats())
            .finish()
    }
}
