//! Symbol identities and per-symbol data.

use bitflags::bitflags;
use rbz_common::Atom;
use rbz_common::limits::ANCESTOR_CHAIN_INLINE;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Identity of a class or module.
///
/// A dense index into the symbol arena. Ids are assigned in declaration
/// order and never reused, so the built-in hierarchy always occupies the
/// same low ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Kind and provenance of a symbol.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u8 {
        const CLASS = 1 << 0;
        const MODULE = 1 << 1;
        /// Declared by the table bootstrap rather than by user code.
        const BUILTIN = 1 << 2;
    }
}

/// Linearized ancestors of a symbol, the symbol itself first.
pub type AncestorChain = SmallVec<[SymbolId; ANCESTOR_CHAIN_INLINE]>;

/// A class or module as seen by the type checker.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub id: SymbolId,
    /// Unqualified constant name.
    pub name: Atom,
    pub flags: SymbolFlags,
    /// Lexically enclosing class/module; `None` for top-level constants.
    pub owner: Option<SymbolId>,
    /// Direct superclass. `None` for the hierarchy root and for modules.
    pub superclass: Option<SymbolId>,
    /// Included modules, most recently included first.
    pub mixins: SmallVec<[SymbolId; 4]>,
}

impl Symbol {
    #[inline]
    pub fn is_class(&self) -> bool {
        self.flags.contains(SymbolFlags::CLASS)
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        self.flags.contains(SymbolFlags::MODULE)
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.flags.contains(SymbolFlags::BUILTIN)
    }
}

/// Render `Outer::Inner` for a symbol by walking its lexical owners.
pub(crate) fn qualified_name(
    symbols: &[Symbol],
    names: &rbz_common::NameInterner,
    id: SymbolId,
) -> String {
    let mut parts = Vec::new();
    let mut current = Some(id);
    while let Some(sym_id) = current {
        let Some(symbol) = symbols.get(sym_id.index()) else {
            break;
        };
        parts.push(names.resolve(symbol.name));
        current = symbol.owner;
    }
    if parts.is_empty() {
        return format!("<unknown {id}>");
    }
    parts.reverse();
    parts.join("::")
}
