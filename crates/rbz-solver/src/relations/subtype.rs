//! Subtype checking.
//!
//! Nominal rules come from the precomputed ancestor chains; compound rules
//! recurse through `And`/`Or` operands under a `WalkGuard`.
//!
//! Rule order for a query `source <: target`:
//!
//! 1. either side untyped: related
//! 2. target `Top` or source `Bottom`: related
//! 3. source `Or`: every member must be related (invertible)
//! 4. target `And`: related to every member (invertible)
//! 5. source `Top` or target `Bottom`: unrelated
//! 6. target `Or`: related to some member
//! 7. source `And`: some member related
//! 8. leaves: class ancestry, literal widening, literal identity
//!
//! The invertible splits run first so that, e.g., `T.any(A, B) <: T.any(B, A)`
//! decomposes the source before committing to one target member.

use crate::caches::RelationCache;
use crate::db::HierarchyResolver;
use crate::intern::TypeInterner;
use crate::recursion::{RecursionProfile, WalkGuard};
use crate::types::{TypeData, TypeId};
use tracing::{trace, warn};

/// Answers `source <: target` for one hierarchy.
///
/// A checker is cheap to create; create one per top-level query or reuse it
/// for a batch. It is not `Sync` (the guard is mutable state), but several
/// checkers may share one `RelationCache`.
pub struct SubtypeChecker<'a> {
    pub(crate) interner: &'a TypeInterner,
    pub(crate) hierarchy: &'a dyn HierarchyResolver,
    pub(crate) guard: WalkGuard,
    cache: Option<&'a RelationCache>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(interner: &'a TypeInterner, hierarchy: &'a dyn HierarchyResolver) -> Self {
        Self::with_profile(interner, hierarchy, RecursionProfile::SubtypeCheck)
    }

    pub fn with_profile(
        interner: &'a TypeInterner,
        hierarchy: &'a dyn HierarchyResolver,
        profile: RecursionProfile,
    ) -> Self {
        Self {
            interner,
            hierarchy,
            guard: WalkGuard::new(profile),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: &'a RelationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Whether a recursion limit tripped since the last reset. Answers given
    /// after that point may be `false` where the full walk would say `true`.
    pub fn limit_exceeded(&self) -> bool {
        self.guard.is_exceeded()
    }

    /// Top-level query: resets the work budget before checking.
    pub fn is_subtype_of(&mut self, source: TypeId, target: TypeId) -> bool {
        self.guard.reset();
        self.check_subtype(source, target)
    }

    /// `source <: target ∧ target <: source`.
    pub fn types_equivalent(&mut self, left: TypeId, right: TypeId) -> bool {
        self.is_subtype_of(left, right) && self.is_subtype_of(right, left)
    }

    pub(crate) fn check_subtype(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some(s), Some(t)) = (self.interner.lookup(source), self.interner.lookup(target))
        else {
            warn!(
                source = source.0,
                target = target.0,
                "SubtypeChecker::check_subtype - type id was never interned"
            );
            return false;
        };

        if matches!(s, TypeData::Untyped(_)) || matches!(t, TypeData::Untyped(_)) {
            return true;
        }
        if source == target {
            return true;
        }
        if matches!(t, TypeData::Top) || matches!(s, TypeData::Bottom) {
            return true;
        }

        if let Some(cache) = self.cache
            && let Some(cached) = cache.get(source, target)
        {
            return cached;
        }

        let result = match self.guard.descend() {
            Ok(()) => {
                let result = self.check_structural(source, target, s, t);
                self.guard.ascend();
                result
            }
            Err(limit) => {
                warn!(
                    source = source.0,
                    target = target.0,
                    ?limit,
                    depth = self.guard.depth(),
                    iterations = self.guard.iterations(),
                    "SubtypeChecker::check_subtype - recursion limit exceeded"
                );
                false
            }
        };

        if let Some(cache) = self.cache
            && !self.guard.is_exceeded()
        {
            cache.insert(source, target, result);
        }
        trace!(source = source.0, target = target.0, result, "SubtypeChecker::check_subtype");
        result
    }

    fn check_structural(
        &mut self,
        source: TypeId,
        target: TypeId,
        s: TypeData,
        t: TypeData,
    ) -> bool {
        match (s, t) {
            (TypeData::Untyped(_), _) | (_, TypeData::Untyped(_)) => true,
            (_, TypeData::Top) | (TypeData::Bottom, _) => true,

            (TypeData::Or(left, right), _) => {
                self.check_subtype(left, target) && self.check_subtype(right, target)
            }
            (_, TypeData::And(left, right)) => {
                self.check_subtype(source, left) && self.check_subtype(source, right)
            }

            (TypeData::Top, _) | (_, TypeData::Bottom) => false,

            (TypeData::And(s_left, s_right), TypeData::Or(t_left, t_right)) => {
                self.check_subtype(source, t_left)
                    || self.check_subtype(source, t_right)
                    || self.check_subtype(s_left, target)
                    || self.check_subtype(s_right, target)
            }
            (_, TypeData::Or(left, right)) => {
                self.check_subtype(source, left) || self.check_subtype(source, right)
            }
            (TypeData::And(left, right), _) => {
                self.check_subtype(left, target) || self.check_subtype(right, target)
            }

            (TypeData::Class(sub), TypeData::Class(sup)) => self.hierarchy.derives_from(sub, sup),
            (TypeData::Literal(class, _), TypeData::Class(sup)) => {
                self.hierarchy.derives_from(class, sup)
            }
            (TypeData::Literal(s_class, s_value), TypeData::Literal(t_class, t_value)) => {
                s_class == t_class && s_value == t_value
            }
            (TypeData::Class(_), TypeData::Literal(..)) => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/subtype_tests.rs"]
mod tests;
