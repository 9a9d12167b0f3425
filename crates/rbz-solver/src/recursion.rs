//! Work limits for walks through `And`/`Or` compounds.
//!
//! Interned compounds form a DAG (a compound can only reference ids that
//! were interned before it), so a structural walk always terminates and no
//! visiting set is needed. `WalkGuard` only bounds the cost of one query:
//!
//! - nesting depth, as a stack guard far above what chained join/meet calls
//!   produce in practice
//! - total sub-queries, since `And`-vs-`Or` pairs can fan out
//!
//! A tripped limit is sticky until `reset`, so callers can refuse to cache
//! answers computed after it.

use rbz_common::limits::{MAX_COMPOUND_DEPTH, MAX_SUBTYPE_ITERATIONS};

/// Named limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// `SubtypeChecker` answering `is_subtype`.
    SubtypeCheck,
    /// Failure explanation follows one failing branch per level.
    FailureExplanation,
    /// Limits taken from `SolverOptions` or tests.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SubtypeCheck | Self::FailureExplanation => MAX_COMPOUND_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SubtypeCheck => MAX_SUBTYPE_ITERATIONS,
            Self::FailureExplanation => MAX_SUBTYPE_ITERATIONS / 10,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Which limit stopped a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitHit {
    Depth,
    Iterations,
}

/// Depth and work budget of one top-level query.
#[derive(Debug, Clone)]
pub struct WalkGuard {
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    tripped: bool,
}

impl WalkGuard {
    pub fn new(profile: RecursionProfile) -> Self {
        Self {
            depth: 0,
            iterations: 0,
            max_depth: profile.max_depth(),
            max_iterations: profile.max_iterations(),
            tripped: false,
        }
    }

    /// Step into a sub-query. On `Ok`, pair it with `ascend`.
    pub fn descend(&mut self) -> Result<(), LimitHit> {
        self.iterations = self.iterations.saturating_add(1);
        let hit = if self.iterations > self.max_iterations {
            LimitHit::Iterations
        } else if self.depth >= self.max_depth {
            LimitHit::Depth
        } else {
            self.depth += 1;
            return Ok(());
        };
        self.tripped = true;
        Err(hit)
    }

    pub fn ascend(&mut self) {
        debug_assert!(self.depth > 0, "WalkGuard::ascend without descend");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether a limit tripped since the last `reset`.
    pub fn is_exceeded(&self) -> bool {
        self.tripped
    }

    pub fn reset(&mut self) {
        self.depth = 0;
        self.iterations = 0;
        self.tripped = false;
    }
}
