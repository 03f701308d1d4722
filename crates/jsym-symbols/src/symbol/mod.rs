//! Symbol data model.
//!
//! A [`SymRef`] is a shared, immutable handle to a [`ClassSymbol`]. Symbols
//! are produced by the registry and the factories and never mutated
//! afterwards.
//!
//! # Identity vs. equality
//!
//! | Variant      | `==` / `Hash`                         | Singleton |
//! |--------------|---------------------------------------|-----------|
//! | `Resolved`   | identity (same allocation)            | well-known types only |
//! | `Unresolved` | canonical name                        | no        |
//! | `Array`      | component and number of dimensions    | no        |
//!
//! [`SymRef::ptr_eq`] is always identity, whatever the variant.

mod array;
mod resolved;
mod unresolved;

pub use array::ArraySymbol;
pub use resolved::{ResolvedClass, ResolvedClassBuilder};
pub use unresolved::UnresolvedClass;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use jsym_util::{FactoryId, Name};

use crate::modifiers::Modifiers;
use crate::type_ref::TypeRef;

/// Shape of a class symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
    Primitive,
    Array,
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSig {
    pub name: Name,
    pub ty: TypeRef,
    pub modifiers: Modifiers,
}

impl FieldSig {
    pub fn new(name: impl Into<Name>, ty: TypeRef, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers,
        }
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSig {
    pub name: Name,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub modifiers: Modifiers,
}

impl MethodSig {
    pub fn new(
        name: impl Into<Name>,
        params: Vec<TypeRef>,
        return_type: TypeRef,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            modifiers,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Shared handle to an immutable symbol
#[derive(Clone)]
pub struct SymRef(Arc<ClassSymbol>);

impl SymRef {
    pub(crate) fn new(symbol: ClassSymbol) -> Self {
        SymRef(Arc::new(symbol))
    }

    /// Identity comparison
    #[inline]
    pub fn ptr_eq(a: &SymRef, b: &SymRef) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn symbol(&self) -> &ClassSymbol {
        &self.0
    }
}

impl Deref for SymRef {
    type Target = ClassSymbol;

    fn deref(&self) -> &ClassSymbol {
        &self.0
    }
}

impl PartialEq for SymRef {
    fn eq(&self, other: &SymRef) -> bool {
        SymRef::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl Eq for SymRef {}

impl Hash for SymRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl fmt::Debug for SymRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SymRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name().as_str())
    }
}

/// A class, interface, primitive, array or placeholder type
pub enum ClassSymbol {
    Resolved(ResolvedClass),
    Unresolved(UnresolvedClass),
    Array(ArraySymbol),
}

impl ClassSymbol {
    /// Binary name (`java.util.Map$Entry`, `int`, `java.lang.String[]`)
    pub fn binary_name(&self) -> Name {
        match self {
            ClassSymbol::Resolved(class) => class.binary_name(),
            ClassSymbol::Unresolved(class) => class.canonical_name(),
            ClassSymbol::Array(array) => array.binary_name(),
        }
    }

    /// Canonical name, absent for anonymous classes and arrays of them
    pub fn canonical_name(&self) -> Option<Name> {
        match self {
            ClassSymbol::Resolved(class) => class.canonical_name(),
            ClassSymbol::Unresolved(class) => Some(class.canonical_name()),
            ClassSymbol::Array(array) => array.canonical_name(),
        }
    }

    /// Simple name; empty for anonymous classes
    pub fn simple_name(&self) -> Name {
        match self {
            ClassSymbol::Resolved(class) => class.simple_name(),
            ClassSymbol::Unresolved(class) => class.simple_name(),
            ClassSymbol::Array(array) => array.simple_name(),
        }
    }

    /// Package name; empty for primitives and the default package
    pub fn package_name(&self) -> Name {
        match self {
            ClassSymbol::Resolved(class) => class.package_name(),
            ClassSymbol::Unresolved(class) => class.package_name(),
            ClassSymbol::Array(array) => array.component().package_name(),
        }
    }

    pub fn kind(&self) -> ClassKind {
        match self {
            ClassSymbol::Resolved(class) => class.kind(),
            ClassSymbol::Unresolved(_) => ClassKind::Class,
            ClassSymbol::Array(_) => ClassKind::Array,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            ClassSymbol::Resolved(class) => class.modifiers(),
            ClassSymbol::Unresolved(_) => UnresolvedClass::MODIFIERS,
            ClassSymbol::Array(array) => array.modifiers(),
        }
    }

    /// Factory that produced this symbol
    pub fn origin(&self) -> FactoryId {
        match self {
            ClassSymbol::Resolved(class) => class.origin(),
            ClassSymbol::Unresolved(class) => class.origin(),
            ClassSymbol::Array(array) => array.origin(),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ClassSymbol::Unresolved(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ClassSymbol::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == ClassKind::Primitive
    }

    /// True for interfaces and annotation types
    pub fn is_interface(&self) -> bool {
        matches!(self.kind(), ClassKind::Interface | ClassKind::Annotation)
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == ClassKind::Enum
    }

    pub fn is_annotation(&self) -> bool {
        self.kind() == ClassKind::Annotation
    }

    pub fn is_anonymous(&self) -> bool {
        match self {
            ClassSymbol::Resolved(class) => class.is_anonymous(),
            _ => false,
        }
    }

    /// Direct superclass; `None` for `Object`, primitives, interfaces and
    /// unresolved symbols
    pub fn superclass(&self) -> Option<&SymRef> {
        match self {
            ClassSymbol::Resolved(class) => class.superclass(),
            ClassSymbol::Unresolved(_) => None,
            ClassSymbol::Array(array) => Some(array.superclass()),
        }
    }

    /// Directly implemented (or extended, for interfaces) interfaces
    pub fn super_interfaces(&self) -> &[SymRef] {
        match self {
            ClassSymbol::Resolved(class) => class.interfaces(),
            ClassSymbol::Unresolved(_) => &[],
            ClassSymbol::Array(array) => array.super_interfaces(),
        }
    }

    /// Component one dimension down, for arrays
    pub fn array_component(&self) -> Option<&SymRef> {
        match self {
            ClassSymbol::Array(array) => Some(array.component()),
            _ => None,
        }
    }

    /// Number of array dimensions; 0 for non-array symbols
    pub fn array_dimensions(&self) -> usize {
        match self {
            ClassSymbol::Array(array) => array.dimensions(),
            _ => 0,
        }
    }

    /// Innermost non-array component, for arrays
    pub fn element_type(&self) -> Option<&SymRef> {
        let mut current = self.array_component()?;
        while let Some(next) = current.array_component() {
            current = next;
        }
        Some(current)
    }

    pub fn fields(&self) -> &[FieldSig] {
        match self {
            ClassSymbol::Resolved(class) => class.fields(),
            ClassSymbol::Unresolved(_) => &[],
            ClassSymbol::Array(array) => array.fields(),
        }
    }

    pub fn methods(&self) -> &[MethodSig] {
        match self {
            ClassSymbol::Resolved(class) => class.methods(),
            ClassSymbol::Unresolved(_) => &[],
            ClassSymbol::Array(array) => array.methods(),
        }
    }

    /// Declared field with the given name
    pub fn field(&self, name: &str) -> Option<&FieldSig> {
        self.fields().iter().find(|field| field.name.eq_str(name))
    }

    /// Declared methods with the given name, in declaration order
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodSig> + 'a {
        self.methods().iter().filter(move |method| method.name.eq_str(name))
    }

    pub fn as_resolved(&self) -> Option<&ResolvedClass> {
        match self {
            ClassSymbol::Resolved(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_unresolved(&self) -> Option<&UnresolvedClass> {
        match self {
            ClassSymbol::Unresolved(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySymbol> {
        match self {
            ClassSymbol::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl PartialEq for ClassSymbol {
    fn eq(&self, other: &ClassSymbol) -> bool {
        match (self, other) {
            (ClassSymbol::Resolved(_), ClassSymbol::Resolved(_)) => std::ptr::eq(self, other),
            (ClassSymbol::Unresolved(a), ClassSymbol::Unresolved(b)) => a == b,
            (ClassSymbol::Array(a), ClassSymbol::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ClassSymbol {}

impl Hash for ClassSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ClassSymbol::Resolved(class) => class.binary_name().hash(state),
            ClassSymbol::Unresolved(class) => class.hash(state),
            ClassSymbol::Array(array) => array.hash(state),
        }
    }
}

impl fmt::Debug for ClassSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassSymbol::Resolved(class) => fmt::Debug::fmt(class, f),
            ClassSymbol::Unresolved(class) => fmt::Debug::fmt(class, f),
            ClassSymbol::Array(array) => fmt::Debug::fmt(array, f),
        }
    }
}
