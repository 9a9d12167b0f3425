//! Type lattice for the rbz type checker.
//!
//! Types are nominal classes, singleton literals, the gradual `T.untyped`,
//! `T.anything`/`T.noreturn`, and binary `And`/`Or` compounds. This crate
//! answers three questions about them:
//!
//! - **Subtyping**: `is_subtype(A, B)` and `equiv(A, B)`
//! - **Join**: `any(A, B)`, the least upper bound (nearest common ancestor
//!   for classes)
//! - **Meet**: `all(A, B)`, the greatest lower bound
//!
//! Types are hash-consed by `TypeInterner`, so structural identity is
//! `TypeId` equality. The class hierarchy is read through
//! `HierarchyResolver`, implemented by `rbz_binder::SymbolTable`.
//!
//! ```
//! use rbz_binder::SymbolTableBuilder;
//! use rbz_solver::{TypeFactory, TypeInterner, TypeLattice};
//!
//! let mut builder = SymbolTableBuilder::new();
//! let bar = builder.declare_class("Bar", None).unwrap();
//! let foo1 = builder.declare_class("Foo1", Some(bar)).unwrap();
//! let foo2 = builder.declare_class("Foo2", Some(bar)).unwrap();
//! let table = builder.build().unwrap();
//!
//! let interner = TypeInterner::new();
//! let types = TypeFactory::new(&interner, &table);
//! let lattice = TypeLattice::new(&interner, &table);
//!
//! let joined = lattice.any(types.class(foo1).unwrap(), types.class(foo2).unwrap());
//! assert_eq!(joined, types.class(bar).unwrap());
//! ```

mod caches;
mod db;
mod diagnostics;
mod format;
mod intern;
pub mod lattice;
pub mod options;
pub mod recursion;
mod relations;
mod type_factory;
pub mod types;

pub use caches::{RelationCache, RelationCacheStats};
pub use db::{HierarchyResolver, TypeDatabase};
pub use diagnostics::SubtypeFailureReason;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use lattice::TypeLattice;
pub use options::{OptionsError, SolverOptions};
pub use relations::relation_queries::{is_subtype_of, join_types, meet_types, types_equivalent};
pub use relations::subtype::SubtypeChecker;
pub use type_factory::{TypeError, TypeFactory};
pub use types::{LiteralValue, OrderedFloat, TypeData, TypeId, TypeKind, UntypedTag};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
mod test_fixtures;

#[cfg(test)]
#[path = "../tests/typedata_contract_tests.rs"]
mod typedata_contract_tests;

#[cfg(test)]
#[path = "../tests/concurrency_tests.rs"]
mod concurrency_tests;
