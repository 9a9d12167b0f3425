//! Free-function query entry points.
//!
//! Convenience wrappers for callers that ask one question and do not want
//! to hold a `TypeLattice`. Each call builds a lattice with default options,
//! so nothing is cached between calls.

use crate::db::HierarchyResolver;
use crate::intern::TypeInterner;
use crate::lattice::TypeLattice;
use crate::types::TypeId;

pub fn is_subtype_of(
    interner: &TypeInterner,
    hierarchy: &dyn HierarchyResolver,
    source: TypeId,
    target: TypeId,
) -> bool {
    TypeLattice::new(interner, hierarchy).is_subtype(source, target)
}

pub fn types_equivalent(
    interner: &TypeInterner,
    hierarchy: &dyn HierarchyResolver,
    left: TypeId,
    right: TypeId,
) -> bool {
    TypeLattice::new(interner, hierarchy).equiv(left, right)
}

/// `T.any(left, right)` in simplest form.
pub fn join_types(
    interner: &TypeInterner,
    hierarchy: &dyn HierarchyResolver,
    left: TypeId,
    right: TypeId,
) -> TypeId {
    TypeLattice::new(interner, hierarchy).any(left, right)
}

/// `T.all(left, right)` in simplest form.
pub fn meet_types(
    interner: &TypeInterner,
    hierarchy: &dyn HierarchyResolver,
    left: TypeId,
    right: TypeId,
) -> TypeId {
    TypeLattice::new(interner, hierarchy).all(left, right)
}
