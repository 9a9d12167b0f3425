//! Type representation for the lattice.
//!
//! Types are hash-consed: every structurally distinct `TypeData` is stored
//! once in the `TypeInterner` and referred to by a `TypeId`. Two types are
//! structurally identical exactly when their ids are equal.

use rbz_binder::{SymbolId, WellKnownSymbols};
use rbz_common::Atom;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// `T.anything`: the universal supertype.
    pub const TOP: TypeId = TypeId(0);
    /// `T.noreturn`: the empty type.
    pub const BOTTOM: TypeId = TypeId(1);
    /// `T.untyped` originating from user code (tracked).
    pub const UNTYPED: TypeId = TypeId(2);
    /// `T.untyped` synthesized by the checker itself (untracked).
    pub const UNTYPED_UNTRACKED: TypeId = TypeId(3);

    /// Number of pre-interned sentinel types.
    pub const FIRST_USER: u32 = 4;

    #[inline]
    pub const fn is_top(self) -> bool {
        self.0 == Self::TOP.0
    }

    #[inline]
    pub const fn is_bottom(self) -> bool {
        self.0 == Self::BOTTOM.0
    }

    #[inline]
    pub const fn is_untyped(self) -> bool {
        self.0 == Self::UNTYPED.0 || self.0 == Self::UNTYPED_UNTRACKED.0
    }

    /// The sentinel for a given untyped provenance.
    #[inline]
    pub const fn untyped(tag: UntypedTag) -> TypeId {
        match tag {
            UntypedTag::Tracked => Self::UNTYPED,
            UntypedTag::Untracked => Self::UNTYPED_UNTRACKED,
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Where a `T.untyped` came from. Carried for blame tracking only; the
/// lattice treats both tags identically except when choosing which one
/// survives absorption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum UntypedTag {
    Tracked,
    Untracked,
}

/// An `f64` that compares and hashes by bit pattern, so float literals can
/// be used as interner keys. `NaN` equals itself and `0.0 != -0.0`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for OrderedFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Payload of a singleton type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralValue {
    Integer(i64),
    Float(OrderedFloat),
    Boolean(bool),
    String(Atom),
    Symbol(Atom),
}

impl LiteralValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralValue::Integer(_) => "integer",
            LiteralValue::Float(_) => "float",
            LiteralValue::Boolean(true) => "true",
            LiteralValue::Boolean(false) => "false",
            LiteralValue::String(_) => "string",
            LiteralValue::Symbol(_) => "symbol",
        }
    }

    /// The built-in class every literal of this kind must derive from.
    pub fn expected_class(&self, well_known: &WellKnownSymbols) -> SymbolId {
        match self {
            LiteralValue::Integer(_) => well_known.integer,
            LiteralValue::Float(_) => well_known.float,
            LiteralValue::Boolean(true) => well_known.true_class,
            LiteralValue::Boolean(false) => well_known.false_class,
            LiteralValue::String(_) => well_known.string,
            LiteralValue::Symbol(_) => well_known.symbol,
        }
    }
}

/// Structural representation of a type.
///
/// Construction goes through `TypeInterner`; compounds are only produced by
/// the lattice operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeData {
    /// All instances of a class or module (and of its descendants).
    Class(SymbolId),
    /// A single value whose runtime class is exactly the given symbol.
    Literal(SymbolId, LiteralValue),
    Top,
    Bottom,
    Untyped(UntypedTag),
    /// Intersection.
    And(TypeId, TypeId),
    /// Union.
    Or(TypeId, TypeId),
}

impl TypeData {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeData::Class(_) => TypeKind::Class,
            TypeData::Literal(..) => TypeKind::Literal,
            TypeData::Top => TypeKind::Top,
            TypeData::Bottom => TypeKind::Bottom,
            TypeData::Untyped(_) => TypeKind::Untyped,
            TypeData::And(..) => TypeKind::And,
            TypeData::Or(..) => TypeKind::Or,
        }
    }

    #[inline]
    pub fn is_compound(&self) -> bool {
        matches!(self, TypeData::And(..) | TypeData::Or(..))
    }
}

/// Structural tag of a type, independent of its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Class,
    Literal,
    Top,
    Bottom,
    Untyped,
    And,
    Or,
}

impl TypeKind {
    /// Human-readable tag used by diagnostics and tests.
    pub const fn type_name(self) -> &'static str {
        match self {
            TypeKind::Class => "ClassType",
            TypeKind::Literal => "LiteralType",
            TypeKind::Top => "TopType",
            TypeKind::Bottom => "BottomType",
            TypeKind::Untyped => "UntypedType",
            TypeKind::And => "AndType",
            TypeKind::Or => "OrType",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
