use std::fmt;
use std::hash::{Hash, Hasher};

use jsym_util::{name, FactoryId, Name};

use super::{ClassSymbol, FieldSig, MethodSig, SymRef};
use crate::error::{SymbolError, SymbolResult};
use crate::modifiers::Modifiers;
use crate::registry::{well_known, WellKnown};
use crate::type_ref::TypeRef;

/// One array dimension over a component symbol.
///
/// `int[][]` is an array whose component is the array symbol for `int[]`.
/// The superclass is `Object` and the super interfaces are the registry's
/// shared `[Cloneable, Serializable]` pair.
pub struct ArraySymbol {
    component: SymRef,
    dimensions: usize,
    binary_name: Name,
    canonical_name: Option<Name>,
    simple_name: Name,
    modifiers: Modifiers,
    superclass: &'static SymRef,
    interfaces: &'static [SymRef],
    fields: Vec<FieldSig>,
    methods: Vec<MethodSig>,
    origin: FactoryId,
}

impl ArraySymbol {
    /// Build the array type whose component is `component`.
    ///
    /// `origin` is the factory the array is attributed to; it is a handle,
    /// not an owner.
    ///
    /// # Errors
    ///
    /// `MissingArgument` if the component is `None`, `InvalidArgument` if it
    /// is an anonymous class.
    pub fn new(component: Option<&SymRef>, origin: FactoryId) -> SymbolResult<SymRef> {
        const OP: &str = "make_array_symbol";

        let component = component.ok_or_else(|| SymbolError::missing(OP, "component"))?;
        if component.is_anonymous() {
            return Err(SymbolError::invalid(
                OP,
                format!("anonymous class `{}` cannot be an array component", component.binary_name()),
            ));
        }

        let registry = well_known();
        let dimensions = component.array_dimensions() + 1;
        let binary_name = Name::intern(&format!("{}[]", component.binary_name()));
        let canonical_name = component
            .canonical_name()
            .map(|canonical| Name::intern(&format!("{}[]", canonical)));
        let simple_name = Name::intern(&format!("{}[]", component.simple_name()));

        let element = component.element_type().unwrap_or(component);
        let fields = vec![FieldSig::new(
            name::LENGTH,
            TypeRef::new(name::INT),
            Modifiers::PUBLIC | Modifiers::FINAL,
        )];
        let methods = vec![MethodSig::new(
            name::CLONE,
            Vec::new(),
            TypeRef::array(element.binary_name(), dimensions),
            Modifiers::PUBLIC,
        )];

        log::trace!("array symbol {} (dimensions: {}, origin: {:?})", binary_name, dimensions, origin);

        Ok(SymRef::new(ClassSymbol::Array(ArraySymbol {
            component: component.clone(),
            dimensions,
            binary_name,
            canonical_name,
            simple_name,
            modifiers: component.modifiers().access() | Modifiers::FINAL | Modifiers::ABSTRACT,
            superclass: registry.get(WellKnown::Object),
            interfaces: registry.array_super_interfaces(),
            fields,
            methods,
            origin,
        })))
    }

    pub fn component(&self) -> &SymRef {
        &self.component
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn binary_name(&self) -> Name {
        self.binary_name
    }

    pub fn canonical_name(&self) -> Option<Name> {
        self.canonical_name
    }

    pub fn simple_name(&self) -> Name {
        self.simple_name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn superclass(&self) -> &'static SymRef {
        self.superclass
    }

    pub fn super_interfaces(&self) -> &'static [SymRef] {
        self.interfaces
    }

    pub fn fields(&self) -> &[FieldSig] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }

    /// Factory that created this array
    pub fn origin(&self) -> FactoryId {
        self.origin
    }
}

impl PartialEq for ArraySymbol {
    fn eq(&self, other: &ArraySymbol) -> bool {
        self.dimensions == other.dimensions && self.component == other.component
    }
}

impl Eq for ArraySymbol {}

impl Hash for ArraySymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.component.hash(state);
        self.dimensions.hash(state);
    }
}

impl fmt::Debug for ArraySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySymbol")
            .field("component", &self.component)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::symbol::{ClassKind, ResolvedClass};

    #[test]
    fn test_int_array() {
        let int = WellKnown::Int.sym();
        let array = ArraySymbol::new(Some(int), FactoryId(1)).unwrap();

        assert!(array.is_array());
        assert_eq!(array.kind(), ClassKind::Array);
        assert!(SymRef::ptr_eq(array.array_component().unwrap(), int));
        assert_eq!(array.array_dimensions(), 1);
        assert_eq!(array.binary_name().as_str(), "int[]");
        assert_eq!(array.simple_name().as_str(), "int[]");
        assert!(array.package_name().is_empty());
    }

    #[test]
    fn test_supertypes_are_shared_singletons() {
        let array = ArraySymbol::new(Some(WellKnown::String.sym()), FactoryId(1)).unwrap();
        let interfaces = array.super_interfaces();

        assert_eq!(interfaces.len(), 2);
        assert!(SymRef::ptr_eq(&interfaces[0], WellKnown::Cloneable.sym()));
        assert!(SymRef::ptr_eq(&interfaces[1], WellKnown::Serializable.sym()));
        assert!(SymRef::ptr_eq(array.superclass().unwrap(), WellKnown::Object.sym()));
    }

    #[test]
    fn test_nested_dimensions() {
        let string = WellKnown::String.sym();
        let inner = ArraySymbol::new(Some(string), FactoryId(1)).unwrap();
        let outer = ArraySymbol::new(Some(&inner), FactoryId(1)).unwrap();

        assert_eq!(outer.array_dimensions(), 2);
        assert_eq!(outer.binary_name().as_str(), "java.lang.String[][]");
        assert_eq!(outer.canonical_name().map(|n| n.as_str()), Some("java.lang.String[][]"));
        assert_eq!(outer.package_name().as_str(), "java.lang");
        assert!(SymRef::ptr_eq(outer.array_component().unwrap(), &inner));
        assert!(SymRef::ptr_eq(outer.element_type().unwrap(), string));
    }

    #[test]
    fn test_structural_equality() {
        let a = ArraySymbol::new(Some(WellKnown::Long.sym()), FactoryId(1)).unwrap();
        let b = ArraySymbol::new(Some(WellKnown::Long.sym()), FactoryId(2)).unwrap();
        let c = ArraySymbol::new(Some(WellKnown::Int.sym()), FactoryId(1)).unwrap();
        let aa = ArraySymbol::new(Some(&a), FactoryId(1)).unwrap();

        assert_eq!(a, b);
        assert!(!SymRef::ptr_eq(&a, &b));
        assert_ne!(a, c);
        assert_ne!(a, aa);
    }

    #[test]
    fn test_array_members() {
        let inner = ArraySymbol::new(Some(WellKnown::Char.sym()), FactoryId(1)).unwrap();
        let array = ArraySymbol::new(Some(&inner), FactoryId(1)).unwrap();

        let length = array.field("length").unwrap();
        assert_eq!(length.ty, TypeRef::new("int"));
        assert!(length.modifiers.is_final());

        let clone: Vec<_> = array.methods_named("clone").collect();
        assert_eq!(clone.len(), 1);
        assert_eq!(clone[0].return_type, TypeRef::array("char", 2));
    }

    #[test]
    fn test_modifiers_follow_component_access() {
        let hidden = ResolvedClass::builder("a.Hidden", ClassKind::Class)
            .modifiers(Modifiers::PRIVATE | Modifiers::STATIC)
            .build()
            .unwrap();
        let array = ArraySymbol::new(Some(&hidden), FactoryId(1)).unwrap();

        assert_eq!(
            array.modifiers(),
            Modifiers::PRIVATE | Modifiers::FINAL | Modifiers::ABSTRACT
        );
    }

    #[test]
    fn test_rejects_missing_component() {
        let err = ArraySymbol::new(None, FactoryId(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
    }

    #[test]
    fn test_rejects_anonymous_component() {
        let anon = ResolvedClass::builder("a.Outer$1", ClassKind::Class)
            .anonymous(true)
            .build()
            .unwrap();
        let err = ArraySymbol::new(Some(&anon), FactoryId(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unresolved_component() {
        let missing = crate::symbol::UnresolvedClass::new(Some("x.Gone"), FactoryId(1)).unwrap();
        let array = ArraySymbol::new(Some(&missing), FactoryId(1)).unwrap();
        assert_eq!(array.binary_name().as_str(), "x.Gone[]");
        assert_eq!(array.super_interfaces().len(), 2);
    }
}
