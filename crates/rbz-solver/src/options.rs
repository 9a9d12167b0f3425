//! Solver configuration.
//!
//! Options are plain data; embedders usually deserialize them from the
//! `solver` section of a JSON config:
//!
//! ```json
//! { "canonicalizeCompounds": true, "cacheRelations": true, "maxCompoundDepth": 64 }
//! ```

use crate::recursion::RecursionProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid solver options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("maxCompoundDepth must be at least 1")]
    ZeroCompoundDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverOptions {
    /// Order the operands of `And`/`Or` results by `TypeId`, so that
    /// `any(A, B)` and `any(B, A)` intern to the same compound.
    pub canonicalize_compounds: bool,
    /// Memoize subtype results in a `RelationCache`.
    pub cache_relations: bool,
    /// Nesting limit for compound walks.
    pub max_compound_depth: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            canonicalize_compounds: true,
            cache_relations: false,
            max_compound_depth: RecursionProfile::SubtypeCheck.max_depth(),
        }
    }
}

impl SolverOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, OptionsError> {
        let options: SolverOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_compound_depth == 0 {
            return Err(OptionsError::ZeroCompoundDepth);
        }
        Ok(())
    }

    pub fn with_canonicalize_compounds(mut self, canonicalize: bool) -> Self {
        self.canonicalize_compounds = canonicalize;
        self
    }

    pub fn with_cache_relations(mut self, cache: bool) -> Self {
        self.cache_relations = cache;
        self
    }

    pub fn with_max_compound_depth(mut self, depth: u32) -> Self {
        self.max_compound_depth = depth;
        self
    }

    /// Recursion limits for subtype checks under these options.
    pub fn subtype_profile(&self) -> RecursionProfile {
        RecursionProfile::Custom {
            max_depth: self.max_compound_depth,
            max_iterations: RecursionProfile::SubtypeCheck.max_iterations(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
