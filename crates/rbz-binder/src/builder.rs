//! Programmatic surface the resolver populates.
//!
//! `SymbolTableBuilder` plays the part of the namer/resolver output: it
//! allocates symbols, records lexical nesting, superclasses and `include`s,
//! and on `build()` validates and linearizes the whole hierarchy into an
//! immutable `SymbolTable`.

use crate::error::HierarchyError;
use crate::linearize::linearize_all;
use crate::symbols::{Symbol, SymbolFlags, SymbolId, qualified_name};
use crate::table::SymbolTable;
use crate::well_known::{WellKnownSymbols, bootstrap};
use indexmap::IndexMap;
use rbz_common::{Atom, NameInterner};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Constants are keyed by their lexical owner and unqualified name.
pub(crate) type ConstantKey = (Option<SymbolId>, Atom);
pub(crate) type ConstantMap = IndexMap<ConstantKey, SymbolId, FxBuildHasher>;

/// Raw symbol storage shared by the builder and the bootstrap.
pub(crate) struct SymbolArena {
    pub(crate) names: NameInterner,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) constants: ConstantMap,
}

impl SymbolArena {
    fn new() -> Self {
        let names = NameInterner::new();
        names.intern_common();
        Self {
            names,
            symbols: Vec::with_capacity(64),
            constants: ConstantMap::default(),
        }
    }

    fn allocate(
        &mut self,
        name: Atom,
        flags: SymbolFlags,
        owner: Option<SymbolId>,
        superclass: Option<SymbolId>,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name,
            flags,
            owner,
            superclass,
            mixins: SmallVec::new(),
        });
        self.constants.insert((owner, name), id);
        trace!(symbol_id = id.0, ?flags, "SymbolArena::allocate");
        id
    }

    pub(crate) fn declare_builtin(
        &mut self,
        name: &str,
        superclass: Option<SymbolId>,
        is_module: bool,
    ) -> SymbolId {
        let kind = if is_module {
            SymbolFlags::MODULE
        } else {
            SymbolFlags::CLASS
        };
        let atom = self.names.intern(name);
        self.allocate(atom, kind | SymbolFlags::BUILTIN, None, superclass)
    }

    /// Record `module` as the most recently included mixin of `target`.
    /// Re-including a module that is already mixed in is a no-op.
    pub(crate) fn push_mixin(&mut self, target: SymbolId, module: SymbolId) {
        let mixins = &mut self.symbols[target.index()].mixins;
        if !mixins.contains(&module) {
            mixins.insert(0, module);
        }
    }

    fn get(&self, id: SymbolId) -> Result<&Symbol, HierarchyError> {
        self.symbols
            .get(id.index())
            .ok_or(HierarchyError::UnknownSymbol(id))
    }

    fn display(&self, id: SymbolId) -> String {
        qualified_name(&self.symbols, &self.names, id)
    }

    fn display_nested(&self, owner: Option<SymbolId>, name: &str) -> String {
        match owner {
            Some(owner) => format!("{}::{name}", self.display(owner)),
            None => name.to_string(),
        }
    }
}

/// Builder for a resolved class/module hierarchy.
///
/// # Example
///
/// ```
/// use rbz_binder::SymbolTableBuilder;
///
/// let mut builder = SymbolTableBuilder::new();
/// let bar = builder.declare_class("Bar", None).unwrap();
/// let foo = builder.declare_class("Foo", Some(bar)).unwrap();
/// let table = builder.build().unwrap();
///
/// assert!(table.is_subclass_of(foo, bar));
/// assert_eq!(table.display_name(foo), "Foo");
/// ```
pub struct SymbolTableBuilder {
    arena: SymbolArena,
    well_known: WellKnownSymbols,
}

impl Default for SymbolTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTableBuilder {
    /// Create a builder with the built-in hierarchy already declared.
    pub fn new() -> Self {
        let mut arena = SymbolArena::new();
        let well_known = bootstrap(&mut arena);
        debug!(
            builtins = arena.symbols.len(),
            "SymbolTableBuilder::new - bootstrapped built-in hierarchy"
        );
        Self { arena, well_known }
    }

    pub fn well_known(&self) -> &WellKnownSymbols {
        &self.well_known
    }

    /// Declare (or reopen) a top-level class.
    ///
    /// A `None` superclass means `Object`. Reopening an existing class with
    /// `None` keeps its superclass; naming a different one is an error.
    pub fn declare_class(
        &mut self,
        name: &str,
        superclass: Option<SymbolId>,
    ) -> Result<SymbolId, HierarchyError> {
        self.declare_class_inner(None, name, superclass)
    }

    /// Declare (or reopen) a class nested in `owner`.
    pub fn declare_class_in(
        &mut self,
        owner: SymbolId,
        name: &str,
        superclass: Option<SymbolId>,
    ) -> Result<SymbolId, HierarchyError> {
        self.arena.get(owner)?;
        self.declare_class_inner(Some(owner), name, superclass)
    }

    /// Declare (or reopen) a top-level module.
    pub fn declare_module(&mut self, name: &str) -> Result<SymbolId, HierarchyError> {
        self.declare_module_inner(None, name)
    }

    /// Declare (or reopen) a module nested in `owner`.
    pub fn declare_module_in(
        &mut self,
        owner: SymbolId,
        name: &str,
    ) -> Result<SymbolId, HierarchyError> {
        self.arena.get(owner)?;
        self.declare_module_inner(Some(owner), name)
    }

    /// Mix `module` into `target`. Later includes take precedence in the
    /// linearization.
    pub fn include(&mut self, target: SymbolId, module: SymbolId) -> Result<(), HierarchyError> {
        self.arena.get(target)?;
        let included = self.arena.get(module)?;
        if !included.is_module() {
            return Err(HierarchyError::IncludeNonModule {
                target: self.arena.display(target),
                module: self.arena.display(module),
            });
        }
        if target == module {
            return Err(HierarchyError::SelfInclude {
                name: self.arena.display(target),
            });
        }
        trace!(target = target.0, module = module.0, "SymbolTableBuilder::include");
        self.arena.push_mixin(target, module);
        Ok(())
    }

    /// Find a top-level constant.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.lookup_inner(None, name)
    }

    /// Find a constant nested directly in `owner`.
    pub fn lookup_in(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        self.lookup_inner(Some(owner), name)
    }

    /// Validate and linearize the hierarchy.
    pub fn build(self) -> Result<SymbolTable, HierarchyError> {
        let ancestors = linearize_all(&self.arena.symbols, &self.arena.names, self.well_known)?;
        debug!(
            symbols = self.arena.symbols.len(),
            "SymbolTableBuilder::build - hierarchy linearized"
        );
        Ok(SymbolTable::new(
            self.arena.names,
            self.arena.symbols,
            ancestors,
            self.arena.constants,
            self.well_known,
        ))
    }

    fn lookup_inner(&self, owner: Option<SymbolId>, name: &str) -> Option<SymbolId> {
        let atom = self.arena.names.get(name)?;
        self.arena.constants.get(&(owner, atom)).copied()
    }

    fn declare_class_inner(
        &mut self,
        owner: Option<SymbolId>,
        name: &str,
        superclass: Option<SymbolId>,
    ) -> Result<SymbolId, HierarchyError> {
        let requested = superclass.unwrap_or(self.well_known.object);
        if self.arena.get(requested)?.is_module() {
            return Err(HierarchyError::SuperclassIsModule {
                name: self.arena.display_nested(owner, name),
                superclass: self.arena.display(requested),
            });
        }

        if let Some(existing) = self.lookup_inner(owner, name) {
            let symbol = self.arena.get(existing)?;
            if symbol.is_module() {
                return Err(HierarchyError::DuplicateConstant {
                    name: self.arena.display(existing),
                    existing: "module",
                });
            }
            if superclass.is_some() && symbol.superclass != Some(requested) {
                let previous = symbol
                    .superclass
                    .map(|s| self.arena.display(s))
                    .unwrap_or_else(|| "<none>".to_string());
                return Err(HierarchyError::SuperclassMismatch {
                    name: self.arena.display(existing),
                    previous,
                    requested: self.arena.display(requested),
                });
            }
            trace!(symbol_id = existing.0, "SymbolTableBuilder::declare_class - reopened");
            return Ok(existing);
        }

        let atom = self.arena.names.intern(name);
        Ok(self
            .arena
            .allocate(atom, SymbolFlags::CLASS, owner, Some(requested)))
    }

    fn declare_module_inner(
        &mut self,
        owner: Option<SymbolId>,
        name: &str,
    ) -> Result<SymbolId, HierarchyError> {
        if let Some(existing) = self.lookup_inner(owner, name) {
            if self.arena.get(existing)?.is_class() {
                return Err(HierarchyError::DuplicateConstant {
                    name: self.arena.display(existing),
                    existing: "class",
                });
            }
            return Ok(existing);
        }

        let atom = self.arena.names.intern(name);
        Ok(self.arena.allocate(atom, SymbolFlags::MODULE, owner, None))
    }
}
