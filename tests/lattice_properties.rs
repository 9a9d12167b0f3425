//! Algebraic laws of the lattice, checked exhaustively over a small
//! universe of types drawn from every variant.

use rbz::binder::SymbolTableBuilder;
use rbz::solver::{TypeFactory, TypeId, TypeInterner, TypeLattice};
use rbz::{SymbolTable, TypeFormatter};

struct Universe {
    table: SymbolTable,
    interner: TypeInterner,
}

impl Universe {
    fn new() -> Self {
        let mut builder = SymbolTableBuilder::new();
        let animal = builder.declare_class("Animal", None).unwrap();
        builder.declare_class("Dog", Some(animal)).unwrap();
        builder.declare_class("Cat", Some(animal)).unwrap();
        builder.declare_class("Rock", None).unwrap();
        let pet = builder.declare_module("Pet").unwrap();
        let dog = builder.lookup("Dog").unwrap();
        builder.include(dog, pet).unwrap();
        Self {
            table: builder.build().unwrap(),
            interner: TypeInterner::new(),
        }
    }

    fn lattice(&self) -> TypeLattice<'_> {
        TypeLattice::new(&self.interner, &self.table)
    }

    fn name(&self, id: TypeId) -> String {
        TypeFormatter::new(&self.interner, &self.table).format(id)
    }

    /// Leaves of every kind plus a few compounds built by the lattice.
    fn samples(&self) -> Vec<TypeId> {
        let types = TypeFactory::new(&self.interner, &self.table);
        let class = |name: &str| types.class(self.table.lookup(name).unwrap()).unwrap();
        let lattice = self.lattice();

        let mut samples = vec![
            TypeId::TOP,
            TypeId::BOTTOM,
            class("Animal"),
            class("Dog"),
            class("Cat"),
            class("Rock"),
            class("Pet"),
            types.object(),
            types.integer_class(),
            types.integer(1),
            types.integer(2),
            types.float(1.5),
            types.string("a"),
            types.symbol("a"),
            types.boolean(true),
        ];
        samples.push(lattice.any(types.integer(1), types.string("a")));
        samples.push(lattice.all(class("Animal"), class("Pet")));
        samples.push(lattice.all(class("Dog"), class("Cat")));
        samples
    }
}

#[test]
fn test_subtyping_is_reflexive() {
    let u = Universe::new();
    let lattice = u.lattice();
    for ty in u.samples() {
        assert!(lattice.is_subtype(ty, ty), "{}", u.name(ty));
    }
}

#[test]
fn test_subtyping_is_transitive() {
    let u = Universe::new();
    let lattice = u.lattice();
    let samples = u.samples();
    for &a in &samples {
        for &b in &samples {
            if !lattice.is_subtype(a, b) {
                continue;
            }
            for &c in &samples {
                if lattice.is_subtype(b, c) {
                    assert!(
                        lattice.is_subtype(a, c),
                        "{} <: {} <: {}",
                        u.name(a),
                        u.name(b),
                        u.name(c)
                    );
                }
            }
        }
    }
}

#[test]
fn test_join_is_commutative_upper_bound() {
    let u = Universe::new();
    let lattice = u.lattice();
    let samples = u.samples();
    for &a in &samples {
        for &b in &samples {
            let joined = lattice.any(a, b);
            let context = format!("any({}, {}) = {}", u.name(a), u.name(b), u.name(joined));
            assert!(lattice.is_subtype(a, joined), "{context}");
            assert!(lattice.is_subtype(b, joined), "{context}");
            assert!(lattice.equiv(joined, lattice.any(b, a)), "{context}");
        }
    }
}

#[test]
fn test_meet_is_commutative_lower_bound() {
    let u = Universe::new();
    let lattice = u.lattice();
    let samples = u.samples();
    for &a in &samples {
        for &b in &samples {
            let met = lattice.all(a, b);
            let context = format!("all({}, {}) = {}", u.name(a), u.name(b), u.name(met));
            assert!(lattice.is_subtype(met, a), "{context}");
            assert!(lattice.is_subtype(met, b), "{context}");
            assert!(lattice.equiv(met, lattice.all(b, a)), "{context}");
        }
    }
}

#[test]
fn test_join_and_meet_respect_subtyping() {
    let u = Universe::new();
    let lattice = u.lattice();
    let samples = u.samples();
    for &a in &samples {
        for &b in &samples {
            if lattice.is_subtype(a, b) {
                assert!(lattice.equiv(lattice.any(a, b), b), "{} {}", u.name(a), u.name(b));
                assert!(lattice.equiv(lattice.all(a, b), a), "{} {}", u.name(a), u.name(b));
            }
        }
    }
}

#[test]
fn test_join_is_associative() {
    let u = Universe::new();
    let lattice = u.lattice();
    let types = TypeFactory::new(&u.interner, &u.table);
    let comparable = u.table.well_known().comparable;
    let leaves: Vec<TypeId> = ["Animal", "Dog", "Cat", "Rock", "Pet"]
        .iter()
        .map(|name| types.class(u.table.lookup(name).unwrap()).unwrap())
        .chain([
            types.class(comparable).unwrap(),
            types.integer_class(),
            types.string_class(),
            types.integer(1),
            types.integer(2),
            types.float(1.5),
            types.string("a"),
        ])
        .collect();

    for &a in &leaves {
        for &b in &leaves {
            for &c in &leaves {
                let left = lattice.any(lattice.any(a, b), c);
                let right = lattice.any(a, lattice.any(b, c));
                assert!(
                    lattice.equiv(left, right),
                    "({} | {}) | {}",
                    u.name(a),
                    u.name(b),
                    u.name(c)
                );
            }
        }
    }
}

#[test]
fn test_untyped_is_absorbing_and_compatible() {
    let u = Universe::new();
    let lattice = u.lattice();
    for ty in u.samples() {
        for untyped in [TypeId::UNTYPED, TypeId::UNTYPED_UNTRACKED] {
            assert!(lattice.is_subtype(ty, untyped));
            assert!(lattice.is_subtype(untyped, ty));
            assert_eq!(lattice.any(ty, untyped), untyped);
            assert_eq!(lattice.all(untyped, ty), untyped);
        }
    }
}

#[test]
fn test_top_and_bottom_are_identities() {
    let u = Universe::new();
    let lattice = u.lattice();
    for ty in u.samples() {
        assert_eq!(lattice.any(ty, TypeId::BOTTOM), ty);
        assert_eq!(lattice.all(TypeId::TOP, ty), ty);
        assert_eq!(lattice.any(TypeId::TOP, ty), TypeId::TOP);
        assert_eq!(lattice.all(ty, TypeId::BOTTOM), TypeId::BOTTOM);
    }
}
