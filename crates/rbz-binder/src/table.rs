//! The frozen, linearized symbol table.

use crate::builder::ConstantMap;
use crate::symbols::{AncestorChain, Symbol, SymbolId, qualified_name};
use crate::well_known::WellKnownSymbols;
use rbz_common::NameInterner;
use std::sync::Arc;

/// Resolved class/module hierarchy.
///
/// Read-only after `SymbolTableBuilder::build`. Every symbol carries a
/// precomputed ancestor chain, so subtype and common-ancestor queries are a
/// linear scan over a small id slice.
#[derive(Debug)]
pub struct SymbolTable {
    names: NameInterner,
    symbols: Vec<Symbol>,
    ancestors: Vec<AncestorChain>,
    constants: ConstantMap,
    well_known: WellKnownSymbols,
}

impl SymbolTable {
    pub(crate) fn new(
        names: NameInterner,
        symbols: Vec<Symbol>,
        ancestors: Vec<AncestorChain>,
        constants: ConstantMap,
        well_known: WellKnownSymbols,
    ) -> Self {
        Self {
            names,
            symbols,
            ancestors,
            constants,
            well_known,
        }
    }

    #[inline]
    pub fn well_known(&self) -> &WellKnownSymbols {
        &self.well_known
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: SymbolId) -> bool {
        id.index() < self.symbols.len()
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// `id` followed by its linearized ancestors. Empty for unknown ids.
    #[inline]
    pub fn ancestor_chain(&self, id: SymbolId) -> &[SymbolId] {
        self.ancestors
            .get(id.index())
            .map(|chain| chain.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn is_root(&self, id: SymbolId) -> bool {
        id == self.well_known.root
    }

    pub fn is_module(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(Symbol::is_module)
    }

    pub fn is_class(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(Symbol::is_class)
    }

    pub fn superclass(&self, id: SymbolId) -> Option<SymbolId> {
        self.symbol(id).and_then(|s| s.superclass)
    }

    pub fn mixins(&self, id: SymbolId) -> &[SymbolId] {
        self.symbol(id).map(|s| s.mixins.as_slice()).unwrap_or(&[])
    }

    /// Whether `ancestor` appears in the ancestor chain of `id` (reflexive).
    pub fn is_subclass_of(&self, id: SymbolId, ancestor: SymbolId) -> bool {
        self.ancestor_chain(id).contains(&ancestor)
    }

    /// Unqualified constant name.
    pub fn name(&self, id: SymbolId) -> Arc<str> {
        self.symbol(id)
            .map(|s| self.names.resolve(s.name))
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Fully qualified name, e.g. `Outer::Inner`.
    pub fn display_name(&self, id: SymbolId) -> String {
        qualified_name(&self.symbols, &self.names, id)
    }

    /// Find a top-level constant by name.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.find_member(None, name)
    }

    /// Find a constant declared directly in `owner` (`None` for top level).
    pub fn find_member(&self, owner: Option<SymbolId>, name: &str) -> Option<SymbolId> {
        let atom = self.names.get(name)?;
        self.constants.get(&(owner, atom)).copied()
    }

    /// Resolve a `::`-separated path starting at the top level.
    pub fn resolve_path(&self, path: &str) -> Option<SymbolId> {
        let mut owner = None;
        for segment in path.split("::") {
            owner = Some(self.find_member(owner, segment)?);
        }
        owner
    }

    pub fn names(&self) -> &NameInterner {
        &self.names
    }
}
