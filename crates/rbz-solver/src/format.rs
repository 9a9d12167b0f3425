//! Type printing in signature annotation syntax.
//!
//! ```text
//! Foo                      Class(Foo)
//! Integer(1)               Literal(Integer, 1)
//! T.any(Integer, String)   Or(Integer, String)
//! T.all(Foo, Kernel)       And(Foo, Kernel)
//! ```

use crate::db::{HierarchyResolver, TypeDatabase};
use crate::types::{LiteralValue, TypeData, TypeId};
use rbz_binder::SymbolId;
use smallvec::SmallVec;
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
    hierarchy: &'a dyn HierarchyResolver,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase, hierarchy: &'a dyn HierarchyResolver) -> Self {
        Self { db, hierarchy }
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        let Some(data) = self.db.lookup(id) else {
            let _ = write!(out, "<unknown {}>", id.0);
            return;
        };
        match data {
            TypeData::Class(symbol) => out.push_str(&self.hierarchy.display_name(symbol)),
            TypeData::Literal(class, value) => self.write_literal(out, class, value),
            TypeData::Top => out.push_str("T.anything"),
            TypeData::Bottom => out.push_str("T.noreturn"),
            TypeData::Untyped(_) => out.push_str("T.untyped"),
            TypeData::Or(..) => self.write_compound(out, "T.any", id, false),
            TypeData::And(..) => self.write_compound(out, "T.all", id, true),
        }
    }

    fn write_literal(&self, out: &mut String, class: SymbolId, value: LiteralValue) {
        let class_name = self.hierarchy.display_name(class);
        let _ = match value {
            LiteralValue::Integer(v) => write!(out, "{class_name}({v})"),
            LiteralValue::Float(v) => write!(out, "{class_name}({:?})", v.get()),
            LiteralValue::Boolean(_) => write!(out, "{class_name}"),
            LiteralValue::String(atom) => {
                write!(out, "{class_name}({:?})", &*self.db.resolve_atom(atom))
            }
            LiteralValue::Symbol(atom) => {
                write!(out, "{class_name}(:{})", self.db.resolve_atom(atom))
            }
        };
    }

    /// Nested compounds of the same kind print as one flat list.
    fn write_compound(&self, out: &mut String, head: &str, id: TypeId, intersection: bool) {
        let mut members: SmallVec<[TypeId; 4]> = SmallVec::new();
        self.flatten(id, intersection, &mut members);

        out.push_str(head);
        out.push('(');
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, member);
        }
        out.push(')');
    }

    fn flatten(&self, id: TypeId, intersection: bool, members: &mut SmallVec<[TypeId; 4]>) {
        match self.db.lookup(id) {
            Some(TypeData::And(left, right)) if intersection => {
                self.flatten(left, intersection, members);
                self.flatten(right, intersection, members);
            }
            Some(TypeData::Or(left, right)) if !intersection => {
                self.flatten(left, intersection, members);
                self.flatten(right, intersection, members);
            }
            _ => members.push(id),
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
