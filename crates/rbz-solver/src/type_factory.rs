//! Checked type constructors.
//!
//! `TypeFactory` is the public way to build leaf types. Class types are
//! validated against the hierarchy, and literal types must name a class that
//! derives from the built-in class of their value kind (a `String` literal
//! may have class `String` or a subclass of it, never `Integer`).

use crate::db::HierarchyResolver;
use crate::intern::TypeInterner;
use crate::types::{LiteralValue, OrderedFloat, TypeId, UntypedTag};
use rbz_binder::SymbolId;
use thiserror::Error;

/// Rejected type construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("unknown class or module {0}")]
    UnknownClass(SymbolId),
    #[error("`{name}` is a module and cannot be the class of a literal")]
    NotAClass { name: String },
    #[error("a {kind} literal cannot have class `{class}` (expected `{expected}` or a subclass)")]
    LiteralKindMismatch {
        kind: &'static str,
        class: String,
        expected: String,
    },
}

#[derive(Clone, Copy)]
pub struct TypeFactory<'a> {
    db: &'a TypeInterner,
    hierarchy: &'a dyn HierarchyResolver,
}

impl<'a> TypeFactory<'a> {
    pub fn new(db: &'a TypeInterner, hierarchy: &'a dyn HierarchyResolver) -> Self {
        Self { db, hierarchy }
    }

    #[inline]
    pub fn top(&self) -> TypeId {
        TypeId::TOP
    }

    #[inline]
    pub fn bottom(&self) -> TypeId {
        TypeId::BOTTOM
    }

    /// `T.untyped` written in user code.
    #[inline]
    pub fn untyped(&self) -> TypeId {
        TypeId::untyped(UntypedTag::Tracked)
    }

    /// `T.untyped` introduced by the checker itself.
    #[inline]
    pub fn untyped_untracked(&self) -> TypeId {
        TypeId::untyped(UntypedTag::Untracked)
    }

    /// Instance type of a class or module.
    pub fn class(&self, symbol: SymbolId) -> Result<TypeId, TypeError> {
        if !self.hierarchy.contains(symbol) {
            return Err(TypeError::UnknownClass(symbol));
        }
        Ok(self.db.class(symbol))
    }

    /// Singleton type with an explicit underlying class.
    pub fn literal(&self, class: SymbolId, value: LiteralValue) -> Result<TypeId, TypeError> {
        if !self.hierarchy.contains(class) {
            return Err(TypeError::UnknownClass(class));
        }
        if self.hierarchy.is_module(class) {
            return Err(TypeError::NotAClass {
                name: self.hierarchy.display_name(class),
            });
        }
        let expected = value.expected_class(self.hierarchy.well_known());
        if !self.hierarchy.derives_from(class, expected) {
            return Err(TypeError::LiteralKindMismatch {
                kind: value.kind_name(),
                class: self.hierarchy.display_name(class),
                expected: self.hierarchy.display_name(expected),
            });
        }
        Ok(self.db.literal(class, value))
    }

    pub fn integer(&self, value: i64) -> TypeId {
        self.builtin_literal(LiteralValue::Integer(value))
    }

    pub fn float(&self, value: f64) -> TypeId {
        self.builtin_literal(LiteralValue::Float(OrderedFloat(value)))
    }

    pub fn boolean(&self, value: bool) -> TypeId {
        self.builtin_literal(LiteralValue::Boolean(value))
    }

    pub fn string(&self, value: &str) -> TypeId {
        let atom = self.db.intern_string(value);
        self.builtin_literal(LiteralValue::String(atom))
    }

    /// A `Symbol` literal; `name` excludes the leading colon.
    pub fn symbol(&self, name: &str) -> TypeId {
        let atom = self.db.intern_string(name);
        self.builtin_literal(LiteralValue::Symbol(atom))
    }

    pub fn object(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().object)
    }

    pub fn integer_class(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().integer)
    }

    pub fn float_class(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().float)
    }

    pub fn string_class(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().string)
    }

    pub fn symbol_class(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().symbol)
    }

    pub fn nil_class(&self) -> TypeId {
        self.db.class(self.hierarchy.well_known().nil_class)
    }

    // Built-in literal classes satisfy every literal check by construction.
    fn builtin_literal(&self, value: LiteralValue) -> TypeId {
        let class = value.expected_class(self.hierarchy.well_known());
        self.db.literal(class, value)
    }
}

#[cfg(test)]
#[path = "../tests/type_factory_tests.rs"]
mod tests;
