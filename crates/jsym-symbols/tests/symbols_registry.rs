//! Well-Known Registry Tests
//!
//! Every well-known type must exist exactly once per process, whichever path
//! it is reached through.

mod common;

use common::{assert_same, classpath_factory, SourceFixture};
use jsym_symbols::reflect::builtins;
use jsym_symbols::{initialize, well_known, ClassKind, Modifiers, SymRef, SymbolFactory, WellKnown};

/// ============================================================================
/// IDENTITY
/// ============================================================================

#[test]
fn test_two_lookups_yield_the_same_object() {
    for (wk, sym) in well_known().iter() {
        let again = well_known().lookup(wk.binary_name().as_str()).unwrap();
        assert_same(sym, again);
        assert_same(sym, wk.sym());
    }
}

#[test]
fn test_reflection_round_trip_is_identity() {
    let factory = classpath_factory();
    for &wk in WellKnown::ALL {
        let Some(desc) = builtins::descriptor(wk) else {
            continue;
        };
        let sym = factory.get_class_symbol(Some(&desc)).unwrap();
        assert_same(&sym, wk.sym());
    }
}

#[test]
fn test_both_adapters_share_singletons() {
    let classpath = classpath_factory();
    let source = SourceFixture::new().factory(classpath.clone());

    assert!(std::ptr::eq(classpath.well_known(), source.well_known()));
    assert_same(classpath.well_known().object(), source.well_known().object());

    let outer = source.get_class_symbol(Some(&SourceFixture::new().outer)).unwrap();
    let base = outer.superclass().unwrap();
    assert_same(base.superclass().unwrap(), well_known().object());
}

#[test]
fn test_initialize_is_idempotent() {
    let before: Vec<SymRef> = well_known().iter().map(|(_, sym)| sym.clone()).collect();
    for _ in 0..3 {
        initialize();
    }
    let after: Vec<SymRef> = initialize().iter().map(|(_, sym)| sym.clone()).collect();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_same(a, b);
    }
}

/// ============================================================================
/// CONTENTS
/// ============================================================================

#[test]
fn test_primitive_set() {
    let names: Vec<&str> = well_known()
        .iter()
        .filter(|(wk, _)| wk.is_primitive())
        .map(|(_, sym)| sym.binary_name().as_str())
        .collect();
    assert_eq!(
        names,
        vec!["boolean", "byte", "char", "double", "float", "int", "long", "short", "void"]
    );
    for name in names {
        let sym = well_known().primitive(name).unwrap();
        assert_eq!(sym.kind(), ClassKind::Primitive);
        assert!(sym.super_interfaces().is_empty());
    }
}

#[test]
fn test_boxes_are_final_classes() {
    for &wk in WellKnown::ALL.iter().filter(|wk| wk.is_primitive()) {
        let boxed = well_known().boxed(wk.sym()).unwrap();
        assert_eq!(boxed.kind(), ClassKind::Class);
        assert!(boxed.modifiers().contains(Modifiers::PUBLIC | Modifiers::FINAL));
        assert_eq!(boxed.package_name().as_str(), "java.lang");
        assert!(boxed.field("TYPE").is_some());
    }
}

#[test]
fn test_array_supertype_pair() {
    let pair = well_known().array_super_interfaces();
    assert_eq!(common::binary_names(pair), vec!["java.lang.Cloneable", "java.io.Serializable"]);
    assert!(pair.iter().all(|sym| sym.is_interface()));
}

#[test]
fn test_common_types() {
    let registry = well_known();
    let class = registry.get(WellKnown::Class);
    let iterable = registry.get(WellKnown::Iterable);
    let enum_ = registry.get(WellKnown::Enum);

    assert!(class.modifiers().is_final());
    assert!(iterable.is_interface());
    assert!(iterable.methods_named("iterator").next().is_some());
    assert!(enum_.modifiers().is_abstract());
    assert_same(enum_.superclass().unwrap(), registry.object());
    assert_eq!(registry.string().methods_named("substring").count(), 2);
}

#[test]
fn test_builtin_origin() {
    for (_, sym) in well_known().iter() {
        assert!(sym.origin().is_builtin(), "{:?}", sym);
    }
}
