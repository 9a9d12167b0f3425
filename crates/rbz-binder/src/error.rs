//! Hierarchy validation errors.

use crate::SymbolId;
use thiserror::Error;

/// A malformed hierarchy reported by the builder.
///
/// These are resolver-contract violations: a correct resolver never produces
/// them, and the solver assumes none of them hold for a built table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("constant `{name}` is already declared as a {existing}")]
    DuplicateConstant { name: String, existing: &'static str },

    #[error("superclass mismatch for class `{name}`: was `{previous}`, now `{requested}`")]
    SuperclassMismatch {
        name: String,
        previous: String,
        requested: String,
    },

    #[error("unknown symbol {0}")]
    UnknownSymbol(SymbolId),

    #[error("superclass `{superclass}` of `{name}` is a module, not a class")]
    SuperclassIsModule { name: String, superclass: String },

    #[error("`{module}` is a class and cannot be included into `{target}`")]
    IncludeNonModule { target: String, module: String },

    #[error("`{name}` cannot include itself")]
    SelfInclude { name: String },

    #[error("inheritance cycle detected through `{name}`")]
    InheritanceCycle { name: String },

    #[error("ancestor chain of `{name}` exceeds {limit} entries")]
    AncestorChainTooLong { name: String, limit: usize },
}
