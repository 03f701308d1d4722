//! Adapter Integration Tests
//!
//! A source set resolved against a classpath: imports, member types,
//! anonymous classes and graceful degradation for missing types.

mod common;

use common::{assert_same, assert_unresolved, binary_names, classpath_factory, SourceFixture};
use jsym_symbols::{
    well_known, ClassDescriptor, FactoryConfig, Name, ReflectSymbolFactory, SymRef, SymbolFactory, TypeRef,
    WellKnown,
};

/// ============================================================================
/// CLASSPATH
/// ============================================================================

#[test]
fn test_classpath_hierarchy() {
    let factory = classpath_factory();
    let list = factory.resolve_name(Name::intern("java.util.ArrayList"));

    assert!(!list.is_unresolved());
    assert_eq!(list.simple_name().as_str(), "ArrayList");
    assert_eq!(
        binary_names(list.super_interfaces()),
        vec!["java.util.List", "java.lang.Cloneable", "java.io.Serializable"]
    );
    assert_same(&list.super_interfaces()[1], WellKnown::Cloneable.sym());

    let abstract_list = list.superclass().unwrap();
    assert!(abstract_list.modifiers().is_abstract());
    assert_same(&abstract_list.super_interfaces()[0], &list.super_interfaces()[0]);

    let collection = &list.super_interfaces()[0].super_interfaces()[0];
    assert_same(&collection.super_interfaces()[0], WellKnown::Iterable.sym());
}

#[test]
fn test_classpath_missing_supertype() {
    let factory = classpath_factory();
    let derived = factory.resolve_name(Name::intern("com.acme.Derived"));

    assert_eq!(derived.superclass().unwrap().binary_name().as_str(), "com.acme.Base");
    assert_unresolved(&derived.super_interfaces()[0], "com.acme.MissingApi");
}

#[test]
fn test_classpath_nested_names() {
    let factory = classpath_factory();
    let entry = factory.resolve_name(Name::intern("java.util.Map$Entry"));

    assert_eq!(entry.simple_name().as_str(), "Entry");
    assert_eq!(entry.canonical_name().map(|n| n.as_str()), Some("java.util.Map.Entry"));
    assert_eq!(entry.package_name().as_str(), "java.util");
}

#[test]
fn test_classpath_member_types_stay_textual() {
    let factory = classpath_factory();
    let list = factory.resolve_name(Name::intern("java.util.ArrayList"));
    let size = list.methods_named("size").next().unwrap();

    assert_eq!(size.return_type, TypeRef::new("int"));
    let resolved = factory.resolve_type_ref(&size.return_type).unwrap();
    assert_same(&resolved, WellKnown::Int.sym());
}

#[test]
fn test_separate_factories_build_separate_classes() {
    let a = classpath_factory();
    let b = classpath_factory();
    let x = a.resolve_name(Name::intern("com.acme.Base"));
    let y = b.resolve_name(Name::intern("com.acme.Base"));

    assert!(!SymRef::ptr_eq(&x, &y));
    assert_ne!(x.origin(), y.origin());
}

/// ============================================================================
/// SOURCE SET
/// ============================================================================

#[test]
fn test_source_imports() {
    let classpath = classpath_factory();
    let fixture = SourceFixture::new();
    let factory = fixture.factory(classpath.clone());

    let outer = factory.get_class_symbol(Some(&fixture.outer)).unwrap();
    assert_same(
        outer.superclass().unwrap(),
        &classpath.resolve_name(Name::intern("com.acme.Base")),
    );

    let inner = factory.get_class_symbol(Some(&fixture.inner)).unwrap();
    assert_eq!(inner.binary_name().as_str(), "app.Outer$Inner");
    assert_eq!(inner.canonical_name().map(|n| n.as_str()), Some("app.Outer.Inner"));
    assert_same(
        inner.superclass().unwrap(),
        &classpath.resolve_name(Name::intern("java.util.ArrayList")),
    );
}

#[test]
fn test_source_anonymous_class() {
    let fixture = SourceFixture::new();
    let factory = fixture.factory(classpath_factory());

    let anonymous = factory.get_class_symbol(Some(&fixture.anonymous)).unwrap();
    let listener = factory.get_class_symbol(Some(&fixture.listener)).unwrap();

    assert_eq!(anonymous.binary_name().as_str(), "app.Outer$1");
    assert!(anonymous.canonical_name().is_none());
    assert_same(anonymous.superclass().unwrap(), well_known().object());
    assert_same(&anonymous.super_interfaces()[0], &listener);
}

#[test]
fn test_source_qualified_member_and_degradation() {
    let fixture = SourceFixture::new();
    let factory = fixture.factory(classpath_factory());

    let repository = factory.get_class_symbol(Some(&fixture.repository)).unwrap();
    assert!(repository.is_interface());
    assert!(repository.superclass().is_none());

    let interfaces = repository.super_interfaces();
    assert_eq!(interfaces[0].binary_name().as_str(), "java.util.Map$Entry");
    assert!(!interfaces[0].is_unresolved());
    assert_unresolved(&interfaces[1], "Unknown");
    assert_eq!(interfaces[1].origin(), factory.factory_id());
}

#[test]
fn test_source_without_classpath() {
    let fixture = SourceFixture::new();
    let factory = jsym_symbols::AstSymbolFactory::new(FactoryConfig::default(), fixture.decls());

    let inner = factory.get_class_symbol(Some(&fixture.inner)).unwrap();
    assert_unresolved(inner.superclass().unwrap(), "ArrayList");

    let outer = factory.get_class_symbol(Some(&fixture.outer)).unwrap();
    assert_unresolved(outer.superclass().unwrap(), "com.acme.Base");
}

#[test]
fn test_source_resolve_in_scope_arrays() {
    let fixture = SourceFixture::new();
    let factory = fixture.factory(classpath_factory());

    let entries = factory
        .resolve_in_scope(&fixture.repository, &TypeRef::parse("Map.Entry[]").unwrap())
        .unwrap();
    assert_eq!(entries.binary_name().as_str(), "java.util.Map$Entry[]");
    assert_eq!(entries.canonical_name().map(|n| n.as_str()), Some("java.util.Map.Entry[]"));

    let listeners = factory
        .resolve_in_scope(&fixture.inner, &TypeRef::parse("Listener...").unwrap())
        .unwrap();
    assert_eq!(listeners.array_dimensions(), 1);
    assert_eq!(listeners.element_type().unwrap().binary_name().as_str(), "app.Outer$Listener");
}

#[test]
fn test_config_from_file_drives_factory() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "label = \"strict\"").unwrap();
    writeln!(file, "implicit_java_lang = false").unwrap();
    let config = FactoryConfig::load(file.path()).unwrap();

    let classpath = ReflectSymbolFactory::with_classpath(config.clone(), vec![ClassDescriptor::class("a.B")]);
    assert_eq!(classpath.config().label, "strict");

    let decl = jsym_symbols::TypeDeclNode::new("a", "C", jsym_symbols::ClassKind::Class).extends(TypeRef::new("String"));
    let factory = jsym_symbols::AstSymbolFactory::new(config, vec![decl.clone()]);
    let sym = factory.get_class_symbol(Some(&decl)).unwrap();
    assert_unresolved(sym.superclass().unwrap(), "String");
}
