//! Type interning for structural deduplication.
//!
//! Converts `TypeData` structures into `TypeId` handles. Equal structures
//! always map to the same id, so structural identity is an integer compare.
//! The sentinels (`Top`, `Bottom`, both `Untyped` tags) have fixed ids and
//! never touch the shards.

use crate::types::{LiteralValue, TypeData, TypeId, UntypedTag};
use rbz_binder::SymbolId;
use rbz_common::{Atom, NameInterner};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::error;

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeData, u32>>,
    index_to_key: RwLock<Vec<TypeData>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

/// Type interning table.
/// Thread-safe via sharded `RwLock`s, so construction may run concurrently.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// Payloads of string and symbol literals.
    string_interner: NameInterner,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInterner")
            .field("types", &self.len())
            .field("strings", &self.string_interner.len())
            .finish()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: NameInterner::new(),
        }
    }

    /// Number of interned types, sentinels included.
    pub fn len(&self) -> usize {
        let user: usize = self
            .shards
            .iter()
            .map(|shard| {
                shard
                    .index_to_key
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .len()
            })
            .sum();
        TypeId::FIRST_USER as usize + user
    }

    /// Always false: the sentinels are interned from the start.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Intern a structure. Only this module builds `TypeData` directly.
    pub(crate) fn intern(&self, key: TypeData) -> TypeId {
        if let Some(id) = Self::get_intrinsic_id(&key) {
            return id;
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard
                .key_to_index
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(&local_index) = map.get(&key) {
                return Self::make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard
            .key_to_index
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut storage = shard
            .index_to_key
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(&local_index) = map.get(&key) {
            return Self::make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index > ((u32::MAX - TypeId::FIRST_USER) >> SHARD_BITS) {
            error!(shard = shard_idx, "TypeInterner::intern - shard exhausted");
            return TypeId::UNTYPED_UNTRACKED;
        }

        storage.push(key);
        map.insert(key, local_index);

        Self::make_id(local_index, shard_idx as u32)
    }

    /// Look up the structure behind an id. `None` for ids this interner
    /// never produced.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        if let Some(key) = Self::get_intrinsic_key(id) {
            return Some(key);
        }

        let raw_val = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw_val & SHARD_MASK) as usize;
        let local_index = raw_val >> SHARD_BITS;

        let shard = self.shards.get(shard_idx)?;
        let storage = shard
            .index_to_key
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        storage.get(local_index as usize).copied()
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    #[inline]
    pub fn top(&self) -> TypeId {
        TypeId::TOP
    }

    #[inline]
    pub fn bottom(&self) -> TypeId {
        TypeId::BOTTOM
    }

    #[inline]
    pub fn untyped(&self, tag: UntypedTag) -> TypeId {
        TypeId::untyped(tag)
    }

    /// Nominal instance type. Does not validate `symbol`; `TypeFactory`
    /// offers the checked variant.
    pub fn class(&self, symbol: SymbolId) -> TypeId {
        self.intern(TypeData::Class(symbol))
    }

    /// Unchecked literal constructor, reachable only through `TypeFactory`.
    pub(crate) fn literal(&self, class: SymbolId, value: LiteralValue) -> TypeId {
        self.intern(TypeData::Literal(class, value))
    }

    /// Intersection. Never normalized; only the lattice builds these.
    pub(crate) fn and(&self, left: TypeId, right: TypeId) -> TypeId {
        self.intern(TypeData::And(left, right))
    }

    /// Union. Never normalized; only the lattice builds these.
    pub(crate) fn or(&self, left: TypeId, right: TypeId) -> TypeId {
        self.intern(TypeData::Or(left, right))
    }

    fn make_id(local_index: u32, shard_idx: u32) -> TypeId {
        let raw_val = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        TypeId(TypeId::FIRST_USER + raw_val)
    }

    fn get_intrinsic_id(key: &TypeData) -> Option<TypeId> {
        match key {
            TypeData::Top => Some(TypeId::TOP),
            TypeData::Bottom => Some(TypeId::BOTTOM),
            TypeData::Untyped(tag) => Some(TypeId::untyped(*tag)),
            _ => None,
        }
    }

    fn get_intrinsic_key(id: TypeId) -> Option<TypeData> {
        match id {
            TypeId::TOP => Some(TypeData::Top),
            TypeId::BOTTOM => Some(TypeData::Bottom),
            TypeId::UNTYPED => Some(TypeData::Untyped(UntypedTag::Tracked)),
            TypeId::UNTYPED_UNTRACKED => Some(TypeData::Untyped(UntypedTag::Untracked)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
