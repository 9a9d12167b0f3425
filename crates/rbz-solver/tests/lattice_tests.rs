use super::*;
use crate::TypeDatabase;
use crate::test_fixtures::Fixture;
use crate::types::{LiteralValue, TypeKind};

#[test]
fn test_join_of_siblings_is_parent_class() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, foo2) = (fx.class(fx.foo1), fx.class(fx.foo2));

    let joined = lattice.any(foo1, foo2);
    assert_eq!(joined, fx.class(fx.bar));
    assert_eq!(fx.interner.type_name(joined), "ClassType");
    assert!(lattice.is_subtype(foo1, joined));
    assert!(lattice.is_subtype(foo2, joined));
    assert!(lattice.equiv(joined, lattice.any(foo2, foo1)));
}

#[test]
fn test_join_absorbs_into_ancestor() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let (foo1, foo2, bar) = (fx.class(fx.foo1), fx.class(fx.foo2), fx.class(fx.bar));
    let integer = types.integer_class();

    let left = lattice.any(lattice.any(foo1, integer), bar);
    let right = lattice.any(bar, integer);
    assert!(lattice.equiv(left, right));

    let reassociated = lattice.any(lattice.any(lattice.any(foo1, integer), foo2), bar);
    assert!(lattice.equiv(reassociated, right));
}

#[test]
fn test_join_of_unrelated_classes_is_nearest_shared_ancestor() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();

    assert_eq!(lattice.any(fx.class(fx.foo1), fx.class(fx.baz)), types.object());
    // Both include Comparable, which sits below Object in their chains.
    assert_eq!(
        lattice.any(types.integer_class(), types.string_class()),
        fx.class(fx.wk().comparable)
    );
}

#[test]
fn test_join_with_subtype_returns_supertype() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, bar) = (fx.class(fx.foo1), fx.class(fx.bar));

    assert_eq!(lattice.any(foo1, bar), bar);
    assert_eq!(lattice.any(bar, foo1), bar);
    assert_eq!(lattice.any(bar, bar), bar);
    assert_eq!(lattice.any(TypeId::BOTTOM, bar), bar);
    assert_eq!(lattice.any(bar, TypeId::TOP), TypeId::TOP);
}

#[test]
fn test_join_of_literals() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();

    assert_eq!(lattice.any(types.integer(1), types.integer(1)), types.integer(1));
    assert_eq!(lattice.any(types.integer(1), types.integer(2)), types.integer_class());
    assert_eq!(lattice.any(types.integer(1), types.integer_class()), types.integer_class());
    assert_eq!(lattice.any(types.string("a"), fx.class(fx.bar)), types.object());
    assert_eq!(
        lattice.any(types.float(1.5), types.integer_class()),
        fx.class(fx.wk().numeric)
    );
}

#[test]
fn test_join_of_literals_of_different_classes_is_union() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let (one, a) = (types.integer(1), types.string("a"));

    let joined = lattice.any(one, a);
    assert_eq!(fx.interner.type_kind(joined), Some(TypeKind::Or));
    assert_eq!(fx.interner.type_name(joined), "OrType");
    assert!(lattice.is_subtype(one, joined));
    assert!(lattice.is_subtype(a, joined));
    assert!(!lattice.is_subtype(types.integer(2), joined));

    let numbers = lattice.any(one, types.float(1.0));
    assert_eq!(fx.interner.type_kind(numbers), Some(TypeKind::Or));
    assert!(!lattice.is_subtype(types.float(2.0), numbers));
}

#[test]
fn test_join_of_booleans_is_union() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();

    let joined = lattice.any(types.boolean(true), types.boolean(false));
    assert_eq!(fx.interner.type_kind(joined), Some(TypeKind::Or));
    assert!(!lattice.is_subtype(types.nil_class(), joined));
    assert!(!lattice.is_subtype(types.object(), joined));
    assert!(lattice.is_subtype(joined, types.object()));
}

#[test]
fn test_join_with_module_operand() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let walkable = fx.class(fx.walkable);

    assert_eq!(lattice.any(fx.class(fx.duck), walkable), walkable);

    // Module chains end at the root too, through Object.
    let joined = lattice.any(walkable, fx.class(fx.bar));
    assert_eq!(joined, fx.types().object());
    assert_eq!(fx.interner.type_name(joined), "ClassType");
    assert_eq!(lattice.any(walkable, fx.class(fx.swimmable)), joined);
}

#[test]
fn test_join_through_shared_module_is_associative() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let (integer, string, bar) = (types.integer_class(), types.string_class(), fx.class(fx.bar));
    let comparable = fx.class(fx.wk().comparable);

    assert_eq!(lattice.any(integer, string), comparable);
    let joined = lattice.any(comparable, bar);
    assert_eq!(joined, types.object());
    assert_eq!(fx.interner.type_name(joined), "ClassType");

    let left = lattice.any(lattice.any(integer, string), bar);
    let right = lattice.any(integer, lattice.any(string, bar));
    assert!(lattice.equiv(left, right), "{} vs {}", fx.format(left), fx.format(right));
}

#[test]
fn test_join_tie_break_on_mixins_is_order_independent() {
    // Duck's chain is [Duck, Swimmable, Walkable, ...], Goose's is
    // [Goose, Walkable, Swimmable, ...]; both modules are equally near.
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (duck, goose) = (fx.class(fx.duck), fx.class(fx.goose));

    let joined = lattice.any(duck, goose);
    assert_eq!(joined, lattice.any(goose, duck));
    // Duck was declared first, so its linearization decides.
    assert_eq!(joined, fx.class(fx.swimmable));
    assert!(lattice.is_subtype(duck, joined));
    assert!(lattice.is_subtype(goose, joined));
}

#[test]
fn test_untyped_absorbs_join_and_meet() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let bar = fx.class(fx.bar);

    for ty in [bar, TypeId::TOP, TypeId::BOTTOM] {
        assert_eq!(lattice.any(TypeId::UNTYPED, ty), TypeId::UNTYPED);
        assert_eq!(lattice.any(ty, TypeId::UNTYPED), TypeId::UNTYPED);
        assert_eq!(lattice.all(TypeId::UNTYPED, ty), TypeId::UNTYPED);
        assert_eq!(lattice.all(ty, TypeId::UNTYPED_UNTRACKED), TypeId::UNTYPED_UNTRACKED);
    }

    assert_eq!(
        lattice.any(TypeId::UNTYPED_UNTRACKED, TypeId::UNTYPED),
        TypeId::UNTYPED
    );
    assert_eq!(
        lattice.all(TypeId::UNTYPED, TypeId::UNTYPED_UNTRACKED),
        TypeId::UNTYPED
    );
}

#[test]
fn test_absorb_untyped_helper() {
    let tracked = TypeData::Untyped(UntypedTag::Tracked);
    let untracked = TypeData::Untyped(UntypedTag::Untracked);

    assert_eq!(absorb_untyped(TypeData::Top, TypeData::Bottom), None);
    assert_eq!(absorb_untyped(untracked, untracked), Some(TypeId::UNTYPED_UNTRACKED));
    assert_eq!(absorb_untyped(untracked, tracked), Some(TypeId::UNTYPED));
    assert_eq!(absorb_untyped(TypeData::Top, untracked), Some(TypeId::UNTYPED_UNTRACKED));
}

#[test]
fn test_meet_with_subtype_returns_subtype() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, bar) = (fx.class(fx.foo1), fx.class(fx.bar));

    assert_eq!(lattice.all(foo1, bar), foo1);
    assert_eq!(lattice.all(bar, foo1), foo1);
    assert_eq!(lattice.all(TypeId::TOP, bar), bar);
    assert_eq!(lattice.all(bar, TypeId::BOTTOM), TypeId::BOTTOM);
}

#[test]
fn test_meet_of_siblings_is_intersection() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, foo2) = (fx.class(fx.foo1), fx.class(fx.foo2));

    let met = lattice.all(foo1, foo2);
    assert_eq!(fx.interner.type_name(met), "AndType");
    assert_ne!(met, foo1);
    assert_ne!(met, foo2);
    assert!(lattice.is_subtype(met, foo1));
    assert!(lattice.is_subtype(met, foo2));
    assert!(lattice.equiv(met, lattice.all(foo2, foo1)));
}

#[test]
fn test_meet_of_literals() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();

    assert_eq!(lattice.all(types.integer(1), types.integer(1)), types.integer(1));
    assert_eq!(lattice.all(types.integer(1), types.integer(2)), TypeId::BOTTOM);
    assert_eq!(lattice.all(types.integer(1), types.integer_class()), types.integer(1));
    assert_eq!(lattice.all(types.integer(1), types.string_class()), TypeId::BOTTOM);
    assert_eq!(lattice.all(fx.class(fx.walkable), types.integer(1)), TypeId::BOTTOM);
}

#[test]
fn test_compounds_are_canonical_by_default() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let (one, a) = (types.integer(1), types.string("a"));

    assert_eq!(lattice.any(one, a), lattice.any(a, one));
    assert_eq!(
        lattice.all(fx.class(fx.foo1), fx.class(fx.foo2)),
        lattice.all(fx.class(fx.foo2), fx.class(fx.foo1))
    );
}

#[test]
fn test_compound_order_kept_without_canonicalization() {
    let fx = Fixture::new();
    let lattice = fx.lattice_with(SolverOptions::default().with_canonicalize_compounds(false));
    let (foo1, foo2) = (fx.class(fx.foo1), fx.class(fx.foo2));

    let ab = lattice.all(foo1, foo2);
    let ba = lattice.all(foo2, foo1);
    assert_ne!(ab, ba);
    assert!(lattice.equiv(ab, ba));
    assert_eq!(fx.interner.lookup(ab), Some(TypeData::And(foo1, foo2)));
}

#[test]
fn test_join_of_compound_and_member() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let a = types.string("a");
    let or = lattice.any(types.integer(1), a);

    assert_eq!(lattice.any(or, a), or);
    assert_eq!(lattice.any(types.integer(1), or), or);
    assert_eq!(lattice.all(or, a), a);
}

#[test]
fn test_join_folds_operand_into_union_member() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let types = fx.types();
    let (one, half, integer) = (types.integer(1), types.float(1.5), types.integer_class());
    let numeric = fx.class(fx.wk().numeric);

    assert_eq!(lattice.any(lattice.any(one, half), integer), numeric);
    assert_eq!(lattice.any(integer, lattice.any(half, one)), numeric);
    assert_eq!(lattice.any(one, lattice.any(half, integer)), numeric);

    // 2 merges with 1 into Integer, then Integer with "a" into Comparable.
    let mixed = lattice.any(one, types.string("a"));
    assert_eq!(lattice.any(mixed, types.integer(2)), fx.class(fx.wk().comparable));

    // Nothing merges: the union just grows.
    let grown = lattice.any(mixed, types.symbol("s"));
    assert_eq!(fx.interner.type_kind(grown), Some(TypeKind::Or));
    let shown = fx.format(grown);
    for member in ["Integer(1)", r#"String("a")"#, "Symbol(:s)"] {
        assert!(shown.contains(member), "{shown}");
    }
    assert!(!lattice.is_subtype(types.integer(2), grown));
}

#[test]
fn test_join_of_deep_unions_stays_an_upper_bound() {
    // 160 literals of distinct classes never merge, so the fold nests 160
    // `Or`s deep.
    let mut builder = rbz_binder::SymbolTableBuilder::new();
    let string = builder.well_known().string;
    let classes: Vec<_> = (0..160)
        .map(|i| {
            builder
                .declare_class(&format!("Str{i}"), Some(string))
                .expect("String subclass")
        })
        .collect();
    let table = builder.build().expect("valid hierarchy");
    let interner = TypeInterner::new();
    let types = crate::TypeFactory::new(&interner, &table);
    let lattice = TypeLattice::new(&interner, &table);
    let literals: Vec<TypeId> = classes
        .iter()
        .map(|&class| {
            types
                .literal(class, LiteralValue::String(interner.intern_string("x")))
                .expect("literal of a String subclass")
        })
        .collect();

    let joined = lattice.any_of(literals.iter().copied());
    assert_eq!(interner.type_kind(joined), Some(TypeKind::Or));
    for &literal in &literals {
        assert!(lattice.is_subtype(literal, joined));
        assert_eq!(lattice.any(joined, literal), joined);
    }
    assert!(lattice.is_subtype(joined, types.string_class()));
    assert_eq!(lattice.any(joined, types.string_class()), types.string_class());
}

#[test]
fn test_join_of_many_modules_is_one_class() {
    let mut builder = rbz_binder::SymbolTableBuilder::new();
    let modules: Vec<_> = (0..160)
        .map(|i| builder.declare_module(&format!("M{i}")).expect("module"))
        .collect();
    let table = builder.build().expect("valid hierarchy");
    let interner = TypeInterner::new();
    let lattice = TypeLattice::new(&interner, &table);
    let types: Vec<TypeId> = modules.iter().map(|&m| interner.class(m)).collect();

    let joined = lattice.any_of(types.iter().copied());
    assert_eq!(joined, interner.class(table.well_known().object));
    for &module in &types {
        assert!(lattice.is_subtype(module, joined));
    }
}

#[test]
fn test_variadic_helpers() {
    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, foo2, bar) = (fx.class(fx.foo1), fx.class(fx.foo2), fx.class(fx.bar));

    assert_eq!(lattice.any_of(Vec::new()), TypeId::BOTTOM);
    assert_eq!(lattice.all_of(Vec::new()), TypeId::TOP);
    assert_eq!(lattice.any_of([foo1, foo2, bar]), bar);
    assert_eq!(lattice.all_of([foo1, bar, TypeId::TOP]), foo1);
}

#[test]
fn test_explain_through_lattice() {
    let fx = Fixture::new();
    let lattice = fx.lattice();

    assert_eq!(
        lattice.explain_subtype_failure(fx.class(fx.foo1), fx.class(fx.bar)),
        None
    );
    assert!(
        lattice
            .explain_subtype_failure(fx.class(fx.bar), fx.class(fx.foo1))
            .is_some()
    );
}

#[test]
fn test_relation_cache_is_opt_in() {
    let fx = Fixture::new();
    assert_eq!(fx.lattice().relation_cache_stats(), None);

    let lattice = fx.lattice_with(SolverOptions::default().with_cache_relations(true));
    let (foo1, foo2) = (fx.class(fx.foo1), fx.class(fx.foo2));
    lattice.any(foo1, foo2);
    lattice.any(foo1, foo2);

    let stats = lattice.relation_cache_stats().expect("cache enabled");
    assert!(stats.entries >= 2);
    assert!(stats.hits >= 2);
}

#[test]
fn test_free_function_entry_points() {
    let fx = Fixture::new();
    let (foo1, foo2, bar) = (fx.class(fx.foo1), fx.class(fx.foo2), fx.class(fx.bar));

    assert!(crate::is_subtype_of(&fx.interner, &fx.table, foo1, bar));
    assert!(!crate::is_subtype_of(&fx.interner, &fx.table, bar, foo1));
    assert!(crate::types_equivalent(&fx.interner, &fx.table, bar, bar));
    assert_eq!(crate::join_types(&fx.interner, &fx.table, foo1, foo2), bar);
    assert_eq!(crate::meet_types(&fx.interner, &fx.table, foo1, bar), foo1);
}

#[test]
fn test_query_events_are_traced_as_json() {
    use crate::test_fixtures::CapturedLogs;

    let fx = Fixture::new();
    let lattice = fx.lattice();
    let (foo1, foo2) = (fx.class(fx.foo1), fx.class(fx.foo2));

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        lattice.any(foo1, foo2);
    });

    let text = logs.text();
    assert!(text.contains("rbz::query_json"), "{text}");
    assert!(text.contains(r#""op":"any""#), "{text}");
    assert!(text.contains(r#""op":"is_subtype""#), "{text}");
    assert!(text.contains(&format!(r#""result_type_id":{}"#, fx.class(fx.bar).0)), "{text}");
}
