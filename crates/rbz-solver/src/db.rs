//! Database traits consumed by the solver.
//!
//! - `TypeDatabase`: read access to interned types.
//! - `HierarchyResolver`: the read surface of the resolved class hierarchy.
//!
//! Both are object safe; solver components hold them as `&dyn` references so
//! tests can substitute mocks.

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId, TypeKind};
use rbz_binder::{SymbolId, SymbolTable, WellKnownSymbols};
use rbz_common::Atom;
use std::sync::Arc;

/// Read access to interned types.
pub trait TypeDatabase {
    fn lookup(&self, id: TypeId) -> Option<TypeData>;
    fn intern_string(&self, s: &str) -> Atom;
    fn resolve_atom(&self, atom: Atom) -> Arc<str>;

    /// Structural tag of `id`, `None` if it was never interned.
    fn type_kind(&self, id: TypeId) -> Option<TypeKind> {
        self.lookup(id).map(|data| data.kind())
    }

    /// Tag string such as `"ClassType"`.
    fn type_name(&self, id: TypeId) -> &'static str {
        self.type_kind(id)
            .map(TypeKind::type_name)
            .unwrap_or("<unknown>")
    }
}

impl TypeDatabase for TypeInterner {
    fn lookup(&self, id: TypeId) -> Option<TypeData> {
        TypeInterner::lookup(self, id)
    }

    fn intern_string(&self, s: &str) -> Atom {
        TypeInterner::intern_string(self, s)
    }

    fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        TypeInterner::resolve_atom(self, atom)
    }
}

/// Read-only view of a linearized class/module hierarchy.
///
/// Implementations must be shareable across threads: lattice queries may run
/// concurrently against one hierarchy.
pub trait HierarchyResolver: Send + Sync {
    /// `id` followed by its ancestors, most specific first. Empty for
    /// unknown ids.
    fn ancestor_chain(&self, id: SymbolId) -> &[SymbolId];
    fn is_root(&self, id: SymbolId) -> bool;
    fn contains(&self, id: SymbolId) -> bool;
    fn is_module(&self, id: SymbolId) -> bool;
    fn well_known(&self) -> &WellKnownSymbols;
    fn display_name(&self, id: SymbolId) -> String;

    /// Whether `ancestor` appears in the chain of `id`. Reflexive.
    fn derives_from(&self, id: SymbolId, ancestor: SymbolId) -> bool {
        self.ancestor_chain(id).contains(&ancestor)
    }

    /// First entry of `first`'s chain that also appears in `second`'s chain.
    ///
    /// Order matters when mixins make several candidates equally near;
    /// callers wanting a symmetric answer must pick `first` canonically.
    fn nearest_common_ancestor(&self, first: SymbolId, second: SymbolId) -> Option<SymbolId> {
        let other = self.ancestor_chain(second);
        self.ancestor_chain(first)
            .iter()
            .copied()
            .find(|ancestor| other.contains(ancestor))
    }
}

impl HierarchyResolver for SymbolTable {
    fn ancestor_chain(&self, id: SymbolId) -> &[SymbolId] {
        SymbolTable::ancestor_chain(self, id)
    }

    fn is_root(&self, id: SymbolId) -> bool {
        SymbolTable::is_root(self, id)
    }

    fn contains(&self, id: SymbolId) -> bool {
        SymbolTable::contains(self, id)
    }

    fn is_module(&self, id: SymbolId) -> bool {
        SymbolTable::is_module(self, id)
    }

    fn well_known(&self) -> &WellKnownSymbols {
        SymbolTable::well_known(self)
    }

    fn display_name(&self, id: SymbolId) -> String {
        SymbolTable::display_name(self, id)
    }
}
