//! Join (`any`) and meet (`all`) over the type lattice.
//!
//! Results are as simple as possible: a compound `Or`/`And` is built only
//! when no single class, literal, top or bottom captures the result exactly.
//! Both operations are commutative up to `equiv`; with
//! `canonicalize_compounds` they are also structurally commutative.
//!
//! Every ancestor chain ends at the root, so two classes or modules always
//! join to a single class. An `Or` only comes from literals of different
//! classes, and joining into an `Or` first tries to merge the new operand
//! with one of its members, so `any(any(1, 1.5), Integer)` is `Numeric`
//! just like `any(1, any(1.5, Integer))`.
//!
//! Join follows the nearest common ancestor of the two chains. When two
//! classes mix in the same modules in different orders, that ancestor
//! depends on which pair is joined first, and a different grouping can
//! land on a different (equally near) module.

use crate::caches::query_trace;
use crate::caches::{RelationCache, RelationCacheStats};
use crate::db::HierarchyResolver;
use crate::diagnostics::SubtypeFailureReason;
use crate::intern::TypeInterner;
use crate::options::SolverOptions;
use crate::recursion::RecursionProfile;
use crate::relations::subtype::SubtypeChecker;
use crate::types::{TypeData, TypeId, UntypedTag};
use rbz_binder::SymbolId;
use smallvec::{SmallVec, smallvec};
use tracing::{trace, warn};

/// Lattice operations bound to one interner and one hierarchy.
///
/// `TypeLattice` is `Sync`: every query creates its own `SubtypeChecker`,
/// and the optional relation cache is internally synchronized.
pub struct TypeLattice<'a> {
    interner: &'a TypeInterner,
    hierarchy: &'a dyn HierarchyResolver,
    options: SolverOptions,
    cache: Option<RelationCache>,
}

impl<'a> TypeLattice<'a> {
    pub fn new(interner: &'a TypeInterner, hierarchy: &'a dyn HierarchyResolver) -> Self {
        Self::with_options(interner, hierarchy, SolverOptions::default())
    }

    pub fn with_options(
        interner: &'a TypeInterner,
        hierarchy: &'a dyn HierarchyResolver,
        options: SolverOptions,
    ) -> Self {
        let cache = options.cache_relations.then(RelationCache::new);
        Self {
            interner,
            hierarchy,
            options,
            cache,
        }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn relation_cache_stats(&self) -> Option<RelationCacheStats> {
        self.cache.as_ref().map(RelationCache::stats)
    }

    fn checker(&self, profile: RecursionProfile) -> SubtypeChecker<'_> {
        let checker = SubtypeChecker::with_profile(self.interner, self.hierarchy, profile);
        match &self.cache {
            Some(cache) => checker.with_cache(cache),
            None => checker,
        }
    }

    // -----------------------------------------------------------------
    // Relations
    // -----------------------------------------------------------------

    /// `source <: target`.
    pub fn is_subtype(&self, source: TypeId, target: TypeId) -> bool {
        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::relation_start(query_id, "is_subtype", source, target);
        }

        let result = self
            .checker(self.options.subtype_profile())
            .is_subtype_of(source, target);

        if let Some(query_id) = query_id {
            query_trace::relation_end(query_id, "is_subtype", result);
        }
        result
    }

    /// Mutual subtyping. Weaker than `TypeId` equality: `T.any(A, B)` and
    /// `T.any(B, A)` are equivalent but distinct.
    pub fn equiv(&self, left: TypeId, right: TypeId) -> bool {
        self.is_subtype(left, right) && self.is_subtype(right, left)
    }

    /// Why `source` is not a subtype of `target`; `None` if it is.
    pub fn explain_subtype_failure(
        &self,
        source: TypeId,
        target: TypeId,
    ) -> Option<SubtypeFailureReason> {
        self.checker(RecursionProfile::FailureExplanation)
            .explain_failure(source, target)
    }

    // -----------------------------------------------------------------
    // Join / meet
    // -----------------------------------------------------------------

    /// Least upper bound of `left` and `right`.
    pub fn any(&self, left: TypeId, right: TypeId) -> TypeId {
        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::lattice_start(query_id, "any", left, right);
        }

        let result = self.join(left, right);

        if let Some(query_id) = query_id {
            query_trace::lattice_end(query_id, "any", result);
        }
        trace!(left = left.0, right = right.0, result = result.0, "TypeLattice::any");
        result
    }

    /// Greatest lower bound of `left` and `right`.
    pub fn all(&self, left: TypeId, right: TypeId) -> TypeId {
        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::lattice_start(query_id, "all", left, right);
        }

        let result = self.meet(left, right);

        if let Some(query_id) = query_id {
            query_trace::lattice_end(query_id, "all", result);
        }
        trace!(left = left.0, right = right.0, result = result.0, "TypeLattice::all");
        result
    }

    /// Join of every type in `types`; `T.noreturn` for an empty input.
    pub fn any_of(&self, types: impl IntoIterator<Item = TypeId>) -> TypeId {
        types
            .into_iter()
            .fold(TypeId::BOTTOM, |acc, ty| self.any(acc, ty))
    }

    /// Meet of every type in `types`; `T.anything` for an empty input.
    pub fn all_of(&self, types: impl IntoIterator<Item = TypeId>) -> TypeId {
        types
            .into_iter()
            .fold(TypeId::TOP, |acc, ty| self.all(acc, ty))
    }

    fn join(&self, left: TypeId, right: TypeId) -> TypeId {
        self.try_join(left, right)
            .unwrap_or_else(|| self.make_or(left, right))
    }

    /// Join without the `Or` fallback. `None` when no single type or
    /// re-association captures `left ∨ right`.
    fn try_join(&self, left: TypeId, right: TypeId) -> Option<TypeId> {
        if left == right {
            return Some(left);
        }
        let (Some(l), Some(r)) = (self.interner.lookup(left), self.interner.lookup(right)) else {
            warn!(left = left.0, right = right.0, "TypeLattice::any - type id was never interned");
            return None;
        };
        if let Some(untyped) = absorb_untyped(l, r) {
            return Some(untyped);
        }
        if self.is_subtype(left, right) {
            return Some(right);
        }
        if self.is_subtype(right, left) {
            return Some(left);
        }

        match (l, r) {
            (TypeData::Class(a), TypeData::Class(b)) => self.common_ancestor(a, b),
            // Distinct values of one class (they are not subtypes of each other).
            (TypeData::Literal(a, _), TypeData::Literal(b, _)) if a == b => {
                Some(self.interner.class(a))
            }
            (TypeData::Literal(a, _), TypeData::Class(_)) => {
                self.try_join(self.interner.class(a), right)
            }
            (TypeData::Class(_), TypeData::Literal(b, _)) => {
                self.try_join(left, self.interner.class(b))
            }
            (TypeData::Or(..), _) => self.fold_into_union(left, right),
            (_, TypeData::Or(..)) => self.fold_into_union(right, left),
            // Literals of different classes: the union of the two values is exact.
            _ => None,
        }
    }

    /// `T.any(m1, ..., mn) ∨ other`. If `other` joins with some member into a
    /// single type, the remaining members are folded into that result, which
    /// is the same join grouped differently.
    fn fold_into_union(&self, union: TypeId, other: TypeId) -> Option<TypeId> {
        let members = self.union_members(union);
        members.iter().enumerate().find_map(|(index, &member)| {
            let joined = self.try_join(member, other)?;
            Some(
                members
                    .iter()
                    .enumerate()
                    .filter(|&(rest, _)| rest != index)
                    .fold(joined, |acc, (_, &rest)| self.join(acc, rest)),
            )
        })
    }

    /// Leaves of a nest of `Or`s, left to right.
    fn union_members(&self, union: TypeId) -> SmallVec<[TypeId; 4]> {
        let mut members = SmallVec::new();
        let mut pending: SmallVec<[TypeId; 8]> = smallvec![union];
        while let Some(id) = pending.pop() {
            match self.interner.lookup(id) {
                Some(TypeData::Or(left, right)) => {
                    pending.push(right);
                    pending.push(left);
                }
                _ => members.push(id),
            }
        }
        members
    }

    fn meet(&self, left: TypeId, right: TypeId) -> TypeId {
        if left == right {
            return left;
        }
        let (Some(l), Some(r)) = (self.interner.lookup(left), self.interner.lookup(right)) else {
            warn!(left = left.0, right = right.0, "TypeLattice::all - type id was never interned");
            return self.make_and(left, right);
        };
        if let Some(untyped) = absorb_untyped(l, r) {
            return untyped;
        }
        if self.is_subtype(left, right) {
            return left;
        }
        if self.is_subtype(right, left) {
            return right;
        }

        match (l, r) {
            // A literal's runtime class is exactly its class, so a literal
            // outside `right` shares no value with it.
            (TypeData::Literal(..), TypeData::Literal(..) | TypeData::Class(_))
            | (TypeData::Class(_), TypeData::Literal(..)) => TypeId::BOTTOM,
            _ => self.make_and(left, right),
        }
    }

    /// Nearest common ancestor as a class type. The chain of the operand
    /// with the smaller `SymbolId` is scanned, so mixin ties resolve the
    /// same way regardless of argument order.
    fn common_ancestor(&self, a: SymbolId, b: SymbolId) -> Option<TypeId> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        self.hierarchy
            .nearest_common_ancestor(first, second)
            .map(|ancestor| self.interner.class(ancestor))
    }

    fn make_or(&self, left: TypeId, right: TypeId) -> TypeId {
        let (left, right) = self.ordered(left, right);
        self.interner.or(left, right)
    }

    fn make_and(&self, left: TypeId, right: TypeId) -> TypeId {
        let (left, right) = self.ordered(left, right);
        self.interner.and(left, right)
    }

    fn ordered(&self, left: TypeId, right: TypeId) -> (TypeId, TypeId) {
        if self.options.canonicalize_compounds && right < left {
            (right, left)
        } else {
            (left, right)
        }
    }
}

/// `T.untyped` absorbs the other operand; a tracked tag wins over an
/// untracked one so blame survives.
fn absorb_untyped(left: TypeData, right: TypeData) -> Option<TypeId> {
    match (left, right) {
        (TypeData::Untyped(a), TypeData::Untyped(b)) => {
            let tracked = a == UntypedTag::Tracked || b == UntypedTag::Tracked;
            Some(if tracked {
                TypeId::UNTYPED
            } else {
                TypeId::UNTYPED_UNTRACKED
            })
        }
        (TypeData::Untyped(tag), _) | (_, TypeData::Untyped(tag)) => Some(TypeId::untyped(tag)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/lattice_tests.rs"]
mod tests;
