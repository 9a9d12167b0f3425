//! Symbol table for the rbz type checker.
//!
//! The namer and resolver passes (external to this workspace) discover every
//! class and module and link their ancestry. This crate holds their output:
//!
//! - **Symbols**: an arena of classes and modules addressed by `SymbolId`
//! - **Builder**: `SymbolTableBuilder`, the programmatic surface the resolver
//!   populates (declare, nest, include)
//! - **Linearization**: one precomputed ancestor chain per symbol, following
//!   `include` semantics (most recently included module first)
//! - **Well-known symbols**: the built-in hierarchy rooted at `BasicObject`
//!
//! Once built, a `SymbolTable` is immutable and can be shared across threads.

mod builder;
mod error;
mod linearize;
mod symbols;
mod table;
mod well_known;

pub use builder::SymbolTableBuilder;
pub use error::HierarchyError;
pub use symbols::{AncestorChain, Symbol, SymbolFlags, SymbolId};
pub use table::SymbolTable;
pub use well_known::WellKnownSymbols;

#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod table_tests;

#[cfg(test)]
#[path = "../tests/linearize_tests.rs"]
mod linearize_tests;
