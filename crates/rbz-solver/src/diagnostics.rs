//! Structured subtype failure reasons.
//!
//! Reasons hold `TypeId`s and `SymbolId`s only; strings are produced lazily
//! by [`SubtypeFailureReason::render`], so explaining a failure that is later
//! discarded costs no formatting.

use crate::db::{HierarchyResolver, TypeDatabase};
use crate::format::TypeFormatter;
use crate::types::TypeId;
use rbz_binder::SymbolId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubtypeFailureReason {
    /// The source class (or the class of a source literal) does not have
    /// the target class or module among its ancestors.
    NotDerived {
        source_type: TypeId,
        target_type: TypeId,
        source_symbol: SymbolId,
        target_symbol: SymbolId,
    },
    /// Two literals differ in class or value.
    LiteralMismatch {
        source_type: TypeId,
        target_type: TypeId,
    },
    /// A class type is never a subtype of a literal.
    ClassNotLiteral {
        source_type: TypeId,
        target_type: TypeId,
    },
    /// `T.anything` is only below itself and `T.untyped`.
    TopNotSubtype { target_type: TypeId },
    /// Only `T.noreturn` is below `T.noreturn`.
    NotBottom { source_type: TypeId },
    /// A member of a source union fails against the target.
    UnionMemberFailed {
        member: TypeId,
        target_type: TypeId,
        reason: Box<SubtypeFailureReason>,
    },
    /// The source fails against one member of a target intersection.
    IntersectionMemberFailed {
        source_type: TypeId,
        member: TypeId,
        reason: Box<SubtypeFailureReason>,
    },
    /// The source is below no member of a target union.
    NoUnionMember {
        source_type: TypeId,
        target_type: TypeId,
    },
    /// No member of a source intersection is below the target.
    NoIntersectionMember {
        source_type: TypeId,
        target_type: TypeId,
    },
    /// Fallback when no more specific rule applies.
    TypeMismatch {
        source_type: TypeId,
        target_type: TypeId,
    },
    /// A type id that was never interned.
    UnknownType { type_id: TypeId },
    /// The explanation walk hit its recursion limit.
    TooDeep {
        source_type: TypeId,
        target_type: TypeId,
    },
}

impl SubtypeFailureReason {
    /// Human-readable message, types printed with `TypeFormatter`.
    pub fn render(&self, db: &dyn TypeDatabase, hierarchy: &dyn HierarchyResolver) -> String {
        let fmt = TypeFormatter::new(db, hierarchy);
        match self {
            SubtypeFailureReason::NotDerived {
                source_type,
                source_symbol,
                target_symbol,
                ..
            } => format!(
                "`{}` is not a subtype of `{}`: `{}` does not derive from `{}`",
                fmt.format(*source_type),
                hierarchy.display_name(*target_symbol),
                hierarchy.display_name(*source_symbol),
                hierarchy.display_name(*target_symbol),
            ),
            SubtypeFailureReason::LiteralMismatch {
                source_type,
                target_type,
            } => format!(
                "`{}` is a different literal than `{}`",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
            SubtypeFailureReason::ClassNotLiteral {
                source_type,
                target_type,
            } => format!(
                "`{}` is a class type and cannot be narrowed to the literal `{}`",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
            SubtypeFailureReason::TopNotSubtype { target_type } => format!(
                "`T.anything` is not a subtype of `{}`",
                fmt.format(*target_type)
            ),
            SubtypeFailureReason::NotBottom { source_type } => format!(
                "`{}` is not a subtype of `T.noreturn`",
                fmt.format(*source_type)
            ),
            SubtypeFailureReason::UnionMemberFailed {
                member,
                target_type,
                reason,
            } => format!(
                "union member `{}` is not a subtype of `{}`: {}",
                fmt.format(*member),
                fmt.format(*target_type),
                reason.render(db, hierarchy),
            ),
            SubtypeFailureReason::IntersectionMemberFailed {
                source_type,
                member,
                reason,
            } => format!(
                "`{}` is not a subtype of intersection member `{}`: {}",
                fmt.format(*source_type),
                fmt.format(*member),
                reason.render(db, hierarchy),
            ),
            SubtypeFailureReason::NoUnionMember {
                source_type,
                target_type,
            } => format!(
                "`{}` is not a subtype of any member of `{}`",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
            SubtypeFailureReason::NoIntersectionMember {
                source_type,
                target_type,
            } => format!(
                "no member of `{}` is a subtype of `{}`",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
            SubtypeFailureReason::TypeMismatch {
                source_type,
                target_type,
            } => format!(
                "`{}` is not a subtype of `{}`",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
            SubtypeFailureReason::UnknownType { type_id } => {
                format!("{type_id} is not an interned type")
            }
            SubtypeFailureReason::TooDeep {
                source_type,
                target_type,
            } => format!(
                "gave up relating `{}` to `{}`: types are nested too deeply",
                fmt.format(*source_type),
                fmt.format(*target_type),
            ),
        }
    }
}
