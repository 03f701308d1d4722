//! Shared fixtures for the jsym-symbols integration tests
//!
//! Each integration test binary compiles this module on its own, so not every
//! helper is used everywhere.

#![allow(dead_code)]

use jsym_symbols::{
    AstSymbolFactory, ClassDescriptor, ClassKind, FactoryConfig, Import, Modifiers, ReflectSymbolFactory,
    SymRef, TypeDeclNode, TypeRef,
};
use std::sync::Arc;

/// Thread count for the concurrency tests
pub const THREADS: usize = 8;

/// ============================================================================
/// CLASSPATH FIXTURE
/// ============================================================================

/// A small slice of `java.util` plus an application class hierarchy
pub fn classpath_classes() -> Vec<ClassDescriptor> {
    vec![
        ClassDescriptor::interface("java.util.Collection").implements("java.lang.Iterable"),
        ClassDescriptor::interface("java.util.List").implements("java.util.Collection"),
        ClassDescriptor::interface("java.util.Map"),
        ClassDescriptor::interface("java.util.Map$Entry"),
        ClassDescriptor::class("java.util.AbstractList")
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .implements("java.util.List"),
        ClassDescriptor::class("java.util.ArrayList")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements("java.lang.Cloneable")
            .implements("java.io.Serializable")
            .method("size", vec![], TypeRef::new("int"), Modifiers::PUBLIC),
        ClassDescriptor::class("com.acme.Base"),
        ClassDescriptor::class("com.acme.Derived")
            .extends("com.acme.Base")
            .implements("com.acme.MissingApi"),
    ]
}

pub fn classpath_factory() -> Arc<ReflectSymbolFactory> {
    Arc::new(ReflectSymbolFactory::with_classpath(
        FactoryConfig::labeled("classpath"),
        classpath_classes(),
    ))
}

/// ============================================================================
/// SOURCE FIXTURE
/// ============================================================================

/// Declarations of a small source set in package `app`
pub struct SourceFixture {
    pub outer: TypeDeclNode,
    pub inner: TypeDeclNode,
    pub listener: TypeDeclNode,
    pub anonymous: TypeDeclNode,
    pub repository: TypeDeclNode,
}

impl SourceFixture {
    pub fn new() -> Self {
        let outer = TypeDeclNode::new("app", "Outer", ClassKind::Class)
            .with_import(Import::parse("java.util.*"))
            .with_import(Import::parse("com.acme.Base"))
            .extends(TypeRef::new("Base"));
        let inner = TypeDeclNode::nested_in(&outer, "Inner", ClassKind::Class).extends(TypeRef::new("ArrayList"));
        let listener = TypeDeclNode::nested_in(&outer, "Listener", ClassKind::Interface);
        let anonymous = TypeDeclNode::anonymous_in(&outer, 1, TypeRef::new("Listener"));
        let repository = TypeDeclNode::new("app", "Repository", ClassKind::Interface)
            .with_import(Import::parse("java.util.Map"))
            .implements(TypeRef::new("Map.Entry"))
            .implements(TypeRef::new("Unknown"));

        Self {
            outer,
            inner,
            listener,
            anonymous,
            repository,
        }
    }

    pub fn decls(&self) -> Vec<TypeDeclNode> {
        vec![
            self.outer.clone(),
            self.inner.clone(),
            self.listener.clone(),
            self.anonymous.clone(),
            self.repository.clone(),
        ]
    }

    pub fn factory(&self, classpath: Arc<ReflectSymbolFactory>) -> AstSymbolFactory {
        AstSymbolFactory::new(FactoryConfig::labeled("source"), self.decls()).with_classpath(classpath)
    }
}

/// ============================================================================
/// ASSERTIONS
/// ============================================================================

/// Identity, not mere equality
pub fn assert_same(a: &SymRef, b: &SymRef) {
    assert!(
        SymRef::ptr_eq(a, b),
        "expected the same symbol, got {:?} and {:?}",
        a,
        b
    );
}

pub fn assert_unresolved(sym: &SymRef, name: &str) {
    assert!(sym.is_unresolved(), "expected an unresolved symbol, got {:?}", sym);
    assert_eq!(sym.binary_name().as_str(), name);
}

pub fn binary_names(syms: &[SymRef]) -> Vec<&'static str> {
    syms.iter().map(|sym| sym.binary_name().as_str()).collect()
}
