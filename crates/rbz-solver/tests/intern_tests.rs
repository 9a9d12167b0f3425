use super::*;
use crate::types::{OrderedFloat, TypeKind};

#[test]
fn test_interner_sentinels() {
    let interner = TypeInterner::new();

    assert_eq!(interner.lookup(TypeId::TOP), Some(TypeData::Top));
    assert_eq!(interner.lookup(TypeId::BOTTOM), Some(TypeData::Bottom));
    assert_eq!(
        interner.lookup(TypeId::UNTYPED),
        Some(TypeData::Untyped(UntypedTag::Tracked))
    );
    assert_eq!(
        interner.lookup(TypeId::UNTYPED_UNTRACKED),
        Some(TypeData::Untyped(UntypedTag::Untracked))
    );
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_sentinel_data_maps_to_fixed_ids() {
    let interner = TypeInterner::new();

    assert_eq!(interner.intern(TypeData::Top), TypeId::TOP);
    assert_eq!(interner.intern(TypeData::Bottom), TypeId::BOTTOM);
    assert_eq!(interner.untyped(UntypedTag::Untracked), TypeId::UNTYPED_UNTRACKED);
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();
    let one = LiteralValue::Integer(1);

    let a = interner.literal(SymbolId(7), one);
    let b = interner.literal(SymbolId(7), one);
    let c = interner.literal(SymbolId(7), LiteralValue::Integer(2));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.class(SymbolId(3)), interner.class(SymbolId(3)));
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 3);
}

#[test]
fn test_compound_operand_order_is_structural() {
    let interner = TypeInterner::new();
    let a = interner.class(SymbolId(10));
    let b = interner.class(SymbolId(11));

    assert_ne!(interner.or(a, b), interner.or(b, a));
    assert_ne!(interner.or(a, b), interner.and(a, b));
    assert_eq!(interner.lookup(interner.and(a, b)), Some(TypeData::And(a, b)));
}

#[test]
fn test_float_literals_intern_by_bits() {
    let interner = TypeInterner::new();
    let float = |v: f64| interner.literal(SymbolId(8), LiteralValue::Float(OrderedFloat(v)));

    assert_eq!(float(1.5), float(1.5));
    assert_eq!(float(f64::NAN), float(f64::NAN));
    assert_ne!(float(0.0), float(-0.0));
}

#[test]
fn test_string_payloads() {
    let interner = TypeInterner::new();
    let hello = interner.intern_string("hello");

    assert_eq!(hello, interner.intern_string("hello"));
    assert_eq!(&*interner.resolve_atom(hello), "hello");

    let s = interner.literal(SymbolId(9), LiteralValue::String(hello));
    let sym = interner.literal(SymbolId(9), LiteralValue::Symbol(hello));
    assert_ne!(s, sym);
}

#[test]
fn test_unknown_id_lookup() {
    let interner = TypeInterner::new();
    interner.class(SymbolId(1));

    assert_eq!(interner.lookup(TypeId(TypeId::FIRST_USER + 64 * 5)), None);
    assert_eq!(interner.lookup(TypeId(u32::MAX)), None);
}

#[test]
fn test_kind_tags() {
    let interner = TypeInterner::new();
    let class = interner.class(SymbolId(1));
    let literal = interner.literal(SymbolId(1), LiteralValue::Boolean(true));
    let or = interner.or(class, literal);

    let kind = |id| interner.lookup(id).map(|data| data.kind());
    assert_eq!(kind(class), Some(TypeKind::Class));
    assert_eq!(kind(literal), Some(TypeKind::Literal));
    assert_eq!(kind(or), Some(TypeKind::Or));
    assert_eq!(kind(TypeId::UNTYPED), Some(TypeKind::Untyped));

    assert_eq!(TypeKind::Class.type_name(), "ClassType");
    assert_eq!(TypeKind::Literal.type_name(), "LiteralType");
    assert_eq!(TypeKind::Top.type_name(), "TopType");
    assert_eq!(TypeKind::Bottom.type_name(), "BottomType");
    assert_eq!(TypeKind::Untyped.type_name(), "UntypedType");
    assert_eq!(TypeKind::And.type_name(), "AndType");
    assert_eq!(TypeKind::Or.type_name(), "OrType");
}

#[test]
fn test_concurrent_interning_agrees() {
    use rayon::prelude::*;

    let interner = TypeInterner::new();
    let ids: Vec<TypeId> = (0..1_000u32)
        .into_par_iter()
        .map(|i| interner.class(SymbolId(i % 50)))
        .collect();

    for (i, id) in ids.iter().enumerate() {
        assert_eq!(*id, interner.class(SymbolId(i as u32 % 50)));
    }
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 50);
}
