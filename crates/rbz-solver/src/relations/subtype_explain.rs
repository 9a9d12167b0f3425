//! Failure explanation for subtype checks.
//!
//! This is the slow path: it runs only after a check answered `false` and a
//! diagnostic is wanted. It follows the same rule order as `check_subtype`
//! and reports the first rule that rejected the pair.

use crate::diagnostics::SubtypeFailureReason;
use crate::relations::subtype::SubtypeChecker;
use crate::types::{TypeData, TypeId};

impl SubtypeChecker<'_> {
    /// Explain why `source` is not a subtype of `target`.
    ///
    /// Returns `None` if the types are related.
    pub fn explain_failure(
        &mut self,
        source: TypeId,
        target: TypeId,
    ) -> Option<SubtypeFailureReason> {
        if self.is_subtype_of(source, target) {
            return None;
        }
        self.guard.reset();
        Some(self.explain_failure_inner(source, target))
    }

    fn explain_failure_inner(&mut self, source: TypeId, target: TypeId) -> SubtypeFailureReason {
        let Some(s) = self.interner.lookup(source) else {
            return SubtypeFailureReason::UnknownType { type_id: source };
        };
        let Some(t) = self.interner.lookup(target) else {
            return SubtypeFailureReason::UnknownType { type_id: target };
        };

        match self.guard.descend() {
            Ok(()) => {
                let reason = self.explain_structural(source, target, s, t);
                self.guard.ascend();
                reason
            }
            Err(_) => SubtypeFailureReason::TooDeep {
                source_type: source,
                target_type: target,
            },
        }
    }

    /// First failing member of a compound, explained recursively.
    fn first_failure(
        &mut self,
        pairs: [(TypeId, TypeId); 2],
    ) -> Option<(TypeId, TypeId, SubtypeFailureReason)> {
        for (source, target) in pairs {
            if !self.check_subtype(source, target) {
                let reason = self.explain_failure_inner(source, target);
                return Some((source, target, reason));
            }
        }
        None
    }

    fn explain_structural(
        &mut self,
        source: TypeId,
        target: TypeId,
        s: TypeData,
        t: TypeData,
    ) -> SubtypeFailureReason {
        let mismatch = |source_type, target_type| SubtypeFailureReason::TypeMismatch {
            source_type,
            target_type,
        };

        match (s, t) {
            (TypeData::Or(left, right), _) => {
                match self.first_failure([(left, target), (right, target)]) {
                    Some((member, _, reason)) => SubtypeFailureReason::UnionMemberFailed {
                        member,
                        target_type: target,
                        reason: Box::new(reason),
                    },
                    None => mismatch(source, target),
                }
            }
            (_, TypeData::And(left, right)) => {
                match self.first_failure([(source, left), (source, right)]) {
                    Some((_, member, reason)) => SubtypeFailureReason::IntersectionMemberFailed {
                        source_type: source,
                        member,
                        reason: Box::new(reason),
                    },
                    None => mismatch(source, target),
                }
            }
            (TypeData::Top, _) => SubtypeFailureReason::TopNotSubtype {
                target_type: target,
            },
            (_, TypeData::Bottom) => SubtypeFailureReason::NotBottom {
                source_type: source,
            },
            (_, TypeData::Or(..)) => SubtypeFailureReason::NoUnionMember {
                source_type: source,
                target_type: target,
            },
            (TypeData::And(..), _) => SubtypeFailureReason::NoIntersectionMember {
                source_type: source,
                target_type: target,
            },
            (TypeData::Class(sub), TypeData::Class(sup))
            | (TypeData::Literal(sub, _), TypeData::Class(sup)) => {
                SubtypeFailureReason::NotDerived {
                    source_type: source,
                    target_type: target,
                    source_symbol: sub,
                    target_symbol: sup,
                }
            }
            (TypeData::Literal(..), TypeData::Literal(..)) => {
                SubtypeFailureReason::LiteralMismatch {
                    source_type: source,
                    target_type: target,
                }
            }
            (TypeData::Class(_), TypeData::Literal(..)) => SubtypeFailureReason::ClassNotLiteral {
                source_type: source,
                target_type: target,
            },
            // Related pairs never reach the explainer; the walk only descends
            // into members that failed `check_subtype`.
            (TypeData::Untyped(_), _)
            | (_, TypeData::Untyped(_))
            | (_, TypeData::Top)
            | (TypeData::Bottom, _) => mismatch(source, target),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/subtype_explain_tests.rs"]
mod tests;
