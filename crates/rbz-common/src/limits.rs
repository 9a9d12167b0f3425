//! Centralized limits and thresholds.
//!
//! Shared constants for ancestry depth and compound nesting. The binder uses
//! them to reject malformed hierarchies, the solver to bound its recursion.
//!
//! The solver reads its defaults through
//! `rbz_solver::recursion::RecursionProfile`.

// =============================================================================
// Hierarchy limits (binder)
// =============================================================================

/// Maximum length of a linearized ancestor chain.
///
/// A chain longer than this almost certainly means the external resolver fed
/// us a cyclic or runaway hierarchy. `SymbolTableBuilder::build` reports
/// `HierarchyError::AncestorChainTooLong` instead of linearizing it.
///
/// ```ruby
/// class A1 < BasicObject; end
/// class A2 < A1; end
/// # ... 1024 levels ...
/// ```
pub const MAX_ANCESTOR_CHAIN_LEN: usize = 1024;

/// Inline capacity for ancestor chains before spilling to the heap.
///
/// Typical application classes sit five or six levels under `BasicObject`
/// (`Foo < Bar < Object`, plus `Kernel` and a few mixins).
pub const ANCESTOR_CHAIN_INLINE: usize = 8;

// =============================================================================
// Type limits (solver)
// =============================================================================

/// Stack guard for walks through nested `And`/`Or` compounds.
///
/// Compounds are only produced by join/meet, so depth grows at most linearly
/// with the number of chained lattice calls, and a walk over interned
/// compounds always terminates. This only keeps a pathological caller from
/// exhausting the thread stack; real programs stay far below it.
pub const MAX_COMPOUND_DEPTH: u32 = 1_000;

/// Maximum number of subtype sub-queries a single top-level query may issue.
pub const MAX_SUBTYPE_ITERATIONS: u32 = 100_000;
