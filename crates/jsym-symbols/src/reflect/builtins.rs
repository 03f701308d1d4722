//! Descriptors of the well-known JDK types.
//!
//! These stand in for the runtime class metadata the registry is built from.
//! Only the members commonly relied on by later analysis are listed.

use super::ClassDescriptor;
use crate::modifiers::Modifiers;
use crate::registry::WellKnown;
use crate::symbol::ClassKind;
use crate::type_ref::TypeRef;

const PUBLIC: Modifiers = Modifiers::PUBLIC;
const PUBLIC_FINAL: Modifiers = Modifiers::PUBLIC.union(Modifiers::FINAL);
const PUBLIC_ABSTRACT: Modifiers = Modifiers::PUBLIC.union(Modifiers::ABSTRACT);
const PUBLIC_STATIC: Modifiers = Modifiers::PUBLIC.union(Modifiers::STATIC);
const CONSTANT: Modifiers = PUBLIC_STATIC.union(Modifiers::FINAL);

fn ty(name: &str) -> TypeRef {
    TypeRef::new(name)
}

/// Descriptor for a well-known type; `None` for the unresolved marker
pub fn descriptor(wk: WellKnown) -> Option<ClassDescriptor> {
    let desc = match wk {
        WellKnown::Object => object(),
        WellKnown::UnresolvedClass => return None,

        WellKnown::Boolean
        | WellKnown::Byte
        | WellKnown::Char
        | WellKnown::Double
        | WellKnown::Float
        | WellKnown::Int
        | WellKnown::Long
        | WellKnown::Short
        | WellKnown::Void => ClassDescriptor::primitive(wk.binary_name().as_str()),

        WellKnown::BoxedBoolean => boxed(wk, "java.lang.Object", "boolean", "booleanValue"),
        WellKnown::BoxedChar => boxed(wk, "java.lang.Object", "char", "charValue"),
        WellKnown::BoxedByte => numeric(wk, "byte"),
        WellKnown::BoxedDouble => numeric(wk, "double"),
        WellKnown::BoxedFloat => numeric(wk, "float"),
        WellKnown::BoxedInt => numeric(wk, "int"),
        WellKnown::BoxedLong => numeric(wk, "long"),
        WellKnown::BoxedShort => numeric(wk, "short"),
        WellKnown::BoxedVoid => ClassDescriptor::class("java.lang.Void")
            .with_modifiers(PUBLIC_FINAL)
            .field("TYPE", ty("java.lang.Class"), CONSTANT),

        WellKnown::Cloneable => ClassDescriptor::interface("java.lang.Cloneable"),
        WellKnown::Serializable => ClassDescriptor::interface("java.io.Serializable"),

        WellKnown::Class => ClassDescriptor::class("java.lang.Class")
            .with_modifiers(PUBLIC_FINAL)
            .implements("java.io.Serializable")
            .implements("java.lang.reflect.GenericDeclaration")
            .implements("java.lang.reflect.Type")
            .implements("java.lang.reflect.AnnotatedElement")
            .method("getName", vec![], ty("java.lang.String"), PUBLIC)
            .method("getSimpleName", vec![], ty("java.lang.String"), PUBLIC)
            .method("getSuperclass", vec![], ty("java.lang.Class"), PUBLIC | Modifiers::NATIVE)
            .method("isArray", vec![], ty("boolean"), PUBLIC | Modifiers::NATIVE)
            .method("isInterface", vec![], ty("boolean"), PUBLIC | Modifiers::NATIVE),

        WellKnown::Iterable => ClassDescriptor::interface("java.lang.Iterable")
            .method("iterator", vec![], ty("java.util.Iterator"), PUBLIC_ABSTRACT)
            .method("forEach", vec![ty("java.util.function.Consumer")], ty("void"), PUBLIC),

        WellKnown::Enum => ClassDescriptor::class("java.lang.Enum")
            .with_modifiers(PUBLIC_ABSTRACT)
            .implements("java.lang.Comparable")
            .implements("java.io.Serializable")
            .method("name", vec![], ty("java.lang.String"), PUBLIC_FINAL)
            .method("ordinal", vec![], ty("int"), PUBLIC_FINAL)
            .method("compareTo", vec![ty("java.lang.Enum")], ty("int"), PUBLIC_FINAL),

        WellKnown::String => ClassDescriptor::class("java.lang.String")
            .with_modifiers(PUBLIC_FINAL)
            .implements("java.io.Serializable")
            .implements("java.lang.Comparable")
            .implements("java.lang.CharSequence")
            .method("length", vec![], ty("int"), PUBLIC)
            .method("charAt", vec![ty("int")], ty("char"), PUBLIC)
            .method("isEmpty", vec![], ty("boolean"), PUBLIC)
            .method("substring", vec![ty("int")], ty("java.lang.String"), PUBLIC)
            .method("substring", vec![ty("int"), ty("int")], ty("java.lang.String"), PUBLIC)
            .method("valueOf", vec![ty("java.lang.Object")], ty("java.lang.String"), PUBLIC_STATIC),
    };
    Some(desc)
}

fn object() -> ClassDescriptor {
    ClassDescriptor::new("java.lang.Object", ClassKind::Class)
        .method("getClass", vec![], ty("java.lang.Class"), PUBLIC_FINAL | Modifiers::NATIVE)
        .method("hashCode", vec![], ty("int"), PUBLIC | Modifiers::NATIVE)
        .method("equals", vec![ty("java.lang.Object")], ty("boolean"), PUBLIC)
        .method("clone", vec![], ty("java.lang.Object"), Modifiers::PROTECTED | Modifiers::NATIVE)
        .method("toString", vec![], ty("java.lang.String"), PUBLIC)
        .method("notify", vec![], ty("void"), PUBLIC_FINAL | Modifiers::NATIVE)
        .method("notifyAll", vec![], ty("void"), PUBLIC_FINAL | Modifiers::NATIVE)
        .method("wait", vec![], ty("void"), PUBLIC_FINAL)
        .method("wait", vec![ty("long")], ty("void"), PUBLIC_FINAL | Modifiers::NATIVE)
        .method("finalize", vec![], ty("void"), Modifiers::PROTECTED)
}

fn boxed(wk: WellKnown, superclass: &str, primitive: &str, unbox: &str) -> ClassDescriptor {
    let binary_name = wk.binary_name().as_str();
    ClassDescriptor::new(binary_name, ClassKind::Class)
        .with_modifiers(PUBLIC_FINAL)
        .extends(superclass)
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable")
        .field("TYPE", ty("java.lang.Class"), CONSTANT)
        .method("valueOf", vec![ty(primitive)], ty(binary_name), PUBLIC_STATIC)
        .method(unbox, vec![], ty(primitive), PUBLIC)
}

fn numeric(wk: WellKnown, primitive: &str) -> ClassDescriptor {
    boxed(wk, "java.lang.Number", primitive, &format!("{primitive}Value"))
        .field("MIN_VALUE", ty(primitive), CONSTANT)
        .field("MAX_VALUE", ty(primitive), CONSTANT)
}
