//! Built-in hierarchy shared by every symbol table.
//!
//! ```text
//! BasicObject                      (root)
//! Kernel, Comparable               (modules)
//! Object < BasicObject             include Kernel
//! Module < Object
//! Class < Module
//! Numeric < Object                 include Comparable
//! Integer, Float < Numeric
//! String, Symbol < Object          include Comparable
//! TrueClass, FalseClass, NilClass < Object
//! ```

use crate::SymbolId;
use crate::builder::SymbolArena;
use serde::Serialize;

/// Ids of the built-in classes and modules.
///
/// The bootstrap declares them before any user constant, so the ids are the
/// same in every table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WellKnownSymbols {
    /// `BasicObject`, the root of the class hierarchy.
    pub root: SymbolId,
    pub kernel: SymbolId,
    pub comparable: SymbolId,
    pub object: SymbolId,
    pub module: SymbolId,
    pub class: SymbolId,
    pub numeric: SymbolId,
    pub integer: SymbolId,
    pub float: SymbolId,
    pub string: SymbolId,
    pub symbol: SymbolId,
    pub true_class: SymbolId,
    pub false_class: SymbolId,
    pub nil_class: SymbolId,
}

impl WellKnownSymbols {
    /// All well-known ids in declaration order.
    pub fn all(&self) -> [SymbolId; 14] {
        [
            self.root,
            self.kernel,
            self.comparable,
            self.object,
            self.module,
            self.class,
            self.numeric,
            self.integer,
            self.float,
            self.string,
            self.symbol,
            self.true_class,
            self.false_class,
            self.nil_class,
        ]
    }
}

/// Declare the built-in hierarchy into a fresh arena.
pub(crate) fn bootstrap(arena: &mut SymbolArena) -> WellKnownSymbols {
    let root = arena.declare_builtin("BasicObject", None, false);
    let kernel = arena.declare_builtin("Kernel", None, true);
    let comparable = arena.declare_builtin("Comparable", None, true);

    let object = arena.declare_builtin("Object", Some(root), false);
    arena.push_mixin(object, kernel);

    let module = arena.declare_builtin("Module", Some(object), false);
    let class = arena.declare_builtin("Class", Some(module), false);

    let numeric = arena.declare_builtin("Numeric", Some(object), false);
    arena.push_mixin(numeric, comparable);
    let integer = arena.declare_builtin("Integer", Some(numeric), false);
    let float = arena.declare_builtin("Float", Some(numeric), false);

    let string = arena.declare_builtin("String", Some(object), false);
    arena.push_mixin(string, comparable);
    let symbol = arena.declare_builtin("Symbol", Some(object), false);
    arena.push_mixin(symbol, comparable);

    let true_class = arena.declare_builtin("TrueClass", Some(object), false);
    let false_class = arena.declare_builtin("FalseClass", Some(object), false);
    let nil_class = arena.declare_builtin("NilClass", Some(object), false);

    WellKnownSymbols {
        root,
        kernel,
        comparable,
        object,
        module,
        class,
        numeric,
        integer,
        float,
        string,
        symbol,
        true_class,
        false_class,
        nil_class,
    }
}
