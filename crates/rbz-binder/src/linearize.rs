//! Ancestor linearization.
//!
//! For a class `C < S` with mixins `[Mk, ..., M1]` (most recent first):
//!
//! ```text
//! chain(C) = [C]
//!          ++ own(Mk) ++ ... ++ own(M1)   (minus entries already present or in chain(S))
//!          ++ chain(S)
//! ```
//!
//! `own(M)` is the module part of a module's chain: the module and the
//! modules it includes, without its base. A module already mixed into a
//! superclass is not repeated, which matches how `include` skips modules an
//! ancestor already has.
//!
//! Modules have no superclass, but every chain still ends at the root. A
//! module's base is `Object`, except for modules that `Object` or the root
//! itself mixes in (`Kernel`), whose chains would otherwise contain
//! themselves:
//!
//! ```text
//! chain(Comparable) = [Comparable, Object, Kernel, BasicObject]
//! chain(Kernel)     = [Kernel, BasicObject]
//! ```
//!
//! The walk uses an explicit stack, so a runaway `include` nesting is
//! reported as `AncestorChainTooLong` instead of exhausting the call stack.

use crate::error::HierarchyError;
use crate::symbols::{AncestorChain, Symbol, SymbolId, qualified_name};
use crate::well_known::WellKnownSymbols;
use rbz_common::NameInterner;
use rbz_common::limits::MAX_ANCESTOR_CHAIN_LEN;
use rustc_hash::FxHashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Pending work on the explicit DFS stack.
#[derive(Clone, Copy)]
enum Step {
    /// Mark the symbol and schedule its dependencies.
    Expand(SymbolId),
    /// Dependencies are done; build the chain.
    Finish(SymbolId),
}

struct Linearizer<'a> {
    symbols: &'a [Symbol],
    names: &'a NameInterner,
    well_known: WellKnownSymbols,
    /// Modules mixed (transitively) into the root.
    root_mixins: FxHashSet<SymbolId>,
    /// Modules mixed (transitively) into `Object`.
    object_mixins: FxHashSet<SymbolId>,
    state: Vec<VisitState>,
    chains: Vec<AncestorChain>,
    /// Length of the module part of each chain (see `own`).
    own_len: Vec<usize>,
}

/// Compute the ancestor chain of every symbol, detecting cycles.
pub(crate) fn linearize_all(
    symbols: &[Symbol],
    names: &NameInterner,
    well_known: WellKnownSymbols,
) -> Result<Vec<AncestorChain>, HierarchyError> {
    let mut linearizer = Linearizer {
        symbols,
        names,
        well_known,
        root_mixins: mixin_closure(symbols, well_known.root),
        object_mixins: mixin_closure(symbols, well_known.object),
        state: vec![VisitState::Unvisited; symbols.len()],
        chains: vec![AncestorChain::new(); symbols.len()],
        own_len: vec![0; symbols.len()],
    };
    for symbol in symbols {
        linearizer.linearize(symbol.id)?;
    }
    Ok(linearizer.chains)
}

/// Modules reachable from `id` through `include`, at any depth.
fn mixin_closure(symbols: &[Symbol], id: SymbolId) -> FxHashSet<SymbolId> {
    let mut seen = FxHashSet::default();
    let mut pending: Vec<SymbolId> = symbols
        .get(id.index())
        .map(|s| s.mixins.to_vec())
        .unwrap_or_default();
    while let Some(module) = pending.pop() {
        if seen.insert(module)
            && let Some(symbol) = symbols.get(module.index())
        {
            pending.extend(symbol.mixins.iter().copied());
        }
    }
    seen
}

impl<'a> Linearizer<'a> {
    fn linearize(&mut self, start: SymbolId) -> Result<(), HierarchyError> {
        let mut stack = vec![Step::Expand(start)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Expand(id) => {
                    let symbol = self.symbol(id)?;
                    match self.state[id.index()] {
                        VisitState::Done => continue,
                        // Still expanding lower in the stack: `id` reaches itself.
                        VisitState::InProgress => return Err(self.cycle(id)),
                        VisitState::Unvisited => {}
                    }
                    self.state[id.index()] = VisitState::InProgress;
                    stack.push(Step::Finish(id));

                    let base = self.base_of(symbol);
                    for dependency in base.into_iter().chain(symbol.mixins.iter().copied()) {
                        match self.state.get(dependency.index()) {
                            Some(VisitState::Done) => {}
                            Some(VisitState::InProgress) => return Err(self.cycle(dependency)),
                            Some(VisitState::Unvisited) => stack.push(Step::Expand(dependency)),
                            None => return Err(HierarchyError::UnknownSymbol(dependency)),
                        }
                    }
                }
                Step::Finish(id) => {
                    let symbol = self.symbol(id)?;
                    let (chain, own_len) = self.compute_chain(symbol);
                    if chain.len() > MAX_ANCESTOR_CHAIN_LEN {
                        return Err(HierarchyError::AncestorChainTooLong {
                            name: qualified_name(self.symbols, self.names, id),
                            limit: MAX_ANCESTOR_CHAIN_LEN,
                        });
                    }
                    self.chains[id.index()] = chain;
                    self.own_len[id.index()] = own_len;
                    self.state[id.index()] = VisitState::Done;
                }
            }
        }
        Ok(())
    }

    fn symbol(&self, id: SymbolId) -> Result<&'a Symbol, HierarchyError> {
        self.symbols
            .get(id.index())
            .ok_or(HierarchyError::UnknownSymbol(id))
    }

    fn cycle(&self, id: SymbolId) -> HierarchyError {
        HierarchyError::InheritanceCycle {
            name: qualified_name(self.symbols, self.names, id),
        }
    }

    /// The chain a symbol's own entries are placed in front of.
    fn base_of(&self, symbol: &Symbol) -> Option<SymbolId> {
        if !symbol.is_module() {
            return symbol.superclass;
        }
        if self.root_mixins.contains(&symbol.id) {
            None
        } else if self.object_mixins.contains(&symbol.id) {
            Some(self.well_known.root)
        } else {
            Some(self.well_known.object)
        }
    }

    /// Module part of a finished chain.
    fn own(&self, id: SymbolId) -> &[SymbolId] {
        let chain = &self.chains[id.index()];
        &chain[..self.own_len[id.index()].min(chain.len())]
    }

    /// Dependencies (base and mixins) must already be linearized.
    fn compute_chain(&self, symbol: &Symbol) -> (AncestorChain, usize) {
        let base_chain: &[SymbolId] = match self.base_of(symbol) {
            Some(base) => &self.chains[base.index()],
            None => &[],
        };

        let mut chain = AncestorChain::new();
        let mut seen = FxHashSet::default();
        chain.push(symbol.id);
        seen.insert(symbol.id);

        for &mixin in &symbol.mixins {
            for &ancestor in self.own(mixin) {
                if !base_chain.contains(&ancestor) && seen.insert(ancestor) {
                    chain.push(ancestor);
                }
            }
        }
        let own_len = chain.len();
        for &ancestor in base_chain {
            if seen.insert(ancestor) {
                chain.push(ancestor);
            }
        }
        (chain, own_len)
    }
}
