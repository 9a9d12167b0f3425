//! rbz: the nominal, literal and gradual type lattice of a Ruby-like
//! type checker.
//!
//! The workspace is split the way the checker pipeline is:
//!
//! - [`common`]: string interning and shared limits
//! - [`binder`]: symbol table, ancestor linearization, built-in hierarchy
//! - [`solver`]: type interning, subtyping, join (`any`) and meet (`all`)
//!
//! ```
//! use rbz::binder::SymbolTableBuilder;
//! use rbz::solver::{TypeFactory, TypeInterner, TypeLattice};
//!
//! let mut builder = SymbolTableBuilder::new();
//! let bar = builder.declare_class("Bar", None).unwrap();
//! let foo = builder.declare_class("Foo", Some(bar)).unwrap();
//! let table = builder.build().unwrap();
//!
//! let interner = TypeInterner::new();
//! let types = TypeFactory::new(&interner, &table);
//! let lattice = TypeLattice::new(&interner, &table);
//!
//! let (foo, bar) = (types.class(foo).unwrap(), types.class(bar).unwrap());
//! assert!(lattice.is_subtype(foo, bar));
//! assert!(!lattice.is_subtype(bar, foo));
//! ```

pub use rbz_binder as binder;
pub use rbz_common as common;
pub use rbz_solver as solver;

pub mod tracing_config;

pub use rbz_binder::{HierarchyError, SymbolId, SymbolTable, SymbolTableBuilder};
pub use rbz_solver::{
    SolverOptions, TypeError, TypeFactory, TypeFormatter, TypeId, TypeInterner, TypeKind,
    TypeLattice,
};
