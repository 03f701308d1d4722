//! Well-known symbol registry.
//!
//! One process-wide table holds the canonical symbol of every well-known
//! type: `Object`, the unresolved marker, the nine primitives and their boxes,
//! the array supertypes and `Class`, `Iterable`, `Enum`, `String`. The table
//! is built on first access through [`reflect::create_shared_sym`], the same
//! path the classpath adapter uses, and is read-only afterwards.
//!
//! Every lookup of a well-known type returns the same allocation, so callers
//! may compare them with [`SymRef::ptr_eq`].

use std::sync::LazyLock;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};

use jsym_util::name::{self, NAME_TABLE};
use jsym_util::{FactoryId, Name};

use crate::reflect::{self, builtins};
use crate::symbol::{ClassSymbol, SymRef, UnresolvedClass};

macro_rules! well_known_types {
    ($($(#[$attr:meta])* $variant:ident => $name:expr,)*) => {
        /// A well-known type
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum WellKnown {
            $($(#[$attr])* $variant,)*
        }

        impl WellKnown {
            /// Every well-known type in registry order
            pub const ALL: &'static [WellKnown] = &[$(WellKnown::$variant,)*];

            pub const fn binary_name(self) -> Name {
                match self {
                    $(WellKnown::$variant => $name,)*
                }
            }
        }
    };
}

well_known_types! {
    Object => name::JAVA_LANG_OBJECT,
    /// Placeholder returned for malformed adapter input
    UnresolvedClass => name::UNRESOLVED_MARKER,

    Boolean => name::BOOLEAN,
    Byte => name::BYTE,
    Char => name::CHAR,
    Double => name::DOUBLE,
    Float => name::FLOAT,
    Int => name::INT,
    Long => name::LONG,
    Short => name::SHORT,
    Void => name::VOID,

    BoxedBoolean => name::JAVA_LANG_BOOLEAN,
    BoxedByte => name::JAVA_LANG_BYTE,
    BoxedChar => name::JAVA_LANG_CHARACTER,
    BoxedDouble => name::JAVA_LANG_DOUBLE,
    BoxedFloat => name::JAVA_LANG_FLOAT,
    BoxedInt => name::JAVA_LANG_INTEGER,
    BoxedLong => name::JAVA_LANG_LONG,
    BoxedShort => name::JAVA_LANG_SHORT,
    BoxedVoid => name::JAVA_LANG_VOID,

    Cloneable => name::JAVA_LANG_CLONEABLE,
    Serializable => name::JAVA_IO_SERIALIZABLE,

    Class => name::JAVA_LANG_CLASS,
    Iterable => name::JAVA_LANG_ITERABLE,
    Enum => name::JAVA_LANG_ENUM,
    String => name::JAVA_LANG_STRING,
}

const BOXING: [(WellKnown, WellKnown); 9] = [
    (WellKnown::Boolean, WellKnown::BoxedBoolean),
    (WellKnown::Byte, WellKnown::BoxedByte),
    (WellKnown::Char, WellKnown::BoxedChar),
    (WellKnown::Double, WellKnown::BoxedDouble),
    (WellKnown::Float, WellKnown::BoxedFloat),
    (WellKnown::Int, WellKnown::BoxedInt),
    (WellKnown::Long, WellKnown::BoxedLong),
    (WellKnown::Short, WellKnown::BoxedShort),
    (WellKnown::Void, WellKnown::BoxedVoid),
];

impl WellKnown {
    pub fn from_name(name: Name) -> Option<WellKnown> {
        // known names sit at reserved indices, anything else is a miss
        if !name.is_known() {
            return None;
        }
        WellKnown::ALL.iter().copied().find(|wk| wk.binary_name() == name)
    }

    /// The registry's singleton for this type
    pub fn sym(self) -> &'static SymRef {
        well_known().get(self)
    }

    pub fn is_primitive(self) -> bool {
        BOXING.iter().any(|(primitive, _)| *primitive == self)
    }

    /// Box of a primitive; `None` for everything else
    pub fn boxed(self) -> Option<WellKnown> {
        BOXING
            .iter()
            .find(|(primitive, _)| *primitive == self)
            .map(|(_, boxed)| *boxed)
    }

    /// Primitive of a box; `None` for everything else
    pub fn unboxed(self) -> Option<WellKnown> {
        BOXING
            .iter()
            .find(|(_, boxed)| *boxed == self)
            .map(|(primitive, _)| *primitive)
    }
}

/// The frozen table of well-known symbols
pub struct WellKnownSymbols {
    symbols: IndexMap<Name, SymRef, FxBuildHasher>,
    array_super_interfaces: [SymRef; 2],
}

impl WellKnownSymbols {
    fn build() -> Self {
        let mut builder = RegistryBuilder::default();
        let mut symbols = IndexMap::with_capacity_and_hasher(WellKnown::ALL.len(), FxBuildHasher);
        for &wk in WellKnown::ALL {
            let sym = builder.build(wk);
            symbols.insert(wk.binary_name(), sym);
        }

        let array_super_interfaces = [
            builder.build(WellKnown::Cloneable),
            builder.build(WellKnown::Serializable),
        ];

        log::debug!("well-known registry initialized with {} symbols", symbols.len());
        Self {
            symbols,
            array_super_interfaces,
        }
    }

    /// Symbol of a well-known type
    #[inline]
    pub fn get(&self, wk: WellKnown) -> &SymRef {
        // inserted in declaration order
        &self.symbols[wk as usize]
    }

    /// Look up by binary name without interning it
    pub fn lookup(&self, binary_name: &str) -> Option<&SymRef> {
        self.lookup_name(NAME_TABLE.lookup(binary_name)?)
    }

    pub fn lookup_name(&self, binary_name: Name) -> Option<&SymRef> {
        self.symbols.get(&binary_name)
    }

    /// Which well-known type `sym` is, by identity
    pub fn which(&self, sym: &SymRef) -> Option<WellKnown> {
        let wk = WellKnown::from_name(sym.binary_name())?;
        SymRef::ptr_eq(self.get(wk), sym).then_some(wk)
    }

    pub fn is_well_known(&self, sym: &SymRef) -> bool {
        self.which(sym).is_some()
    }

    /// Resolve a simple name such as `String` against `java.lang`
    pub fn lookup_java_lang(&self, simple_name: &str) -> Option<&SymRef> {
        if simple_name.contains('.') {
            return None;
        }
        self.lookup(&format!("java.lang.{simple_name}"))
    }

    /// Primitive type by keyword (`int`, `void`, ...)
    pub fn primitive(&self, keyword: &str) -> Option<&SymRef> {
        let wk = WellKnown::from_name(NAME_TABLE.lookup(keyword)?)?;
        wk.is_primitive().then(|| self.get(wk))
    }

    /// Box for a primitive symbol
    pub fn boxed(&self, primitive: &SymRef) -> Option<&SymRef> {
        self.which(primitive)?.boxed().map(|wk| self.get(wk))
    }

    /// Primitive for a box symbol
    pub fn unboxed(&self, boxed: &SymRef) -> Option<&SymRef> {
        self.which(boxed)?.unboxed().map(|wk| self.get(wk))
    }

    /// `[Cloneable, Serializable]`, in that order
    pub fn array_super_interfaces(&self) -> &[SymRef] {
        &self.array_super_interfaces
    }

    /// All well-known symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (WellKnown, &SymRef)> + '_ {
        WellKnown::ALL.iter().map(move |&wk| (wk, self.get(wk)))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn object(&self) -> &SymRef {
        self.get(WellKnown::Object)
    }

    pub fn unresolved_class(&self) -> &SymRef {
        self.get(WellKnown::UnresolvedClass)
    }

    pub fn string(&self) -> &SymRef {
        self.get(WellKnown::String)
    }

    pub fn cloneable(&self) -> &SymRef {
        self.get(WellKnown::Cloneable)
    }

    pub fn serializable(&self) -> &SymRef {
        self.get(WellKnown::Serializable)
    }
}

/// Builds well-known symbols dependencies first
#[derive(Default)]
struct RegistryBuilder {
    built: FxHashMap<Name, SymRef>,
}

impl RegistryBuilder {
    fn build(&mut self, wk: WellKnown) -> SymRef {
        let binary_name = wk.binary_name();
        if let Some(sym) = self.built.get(&binary_name) {
            return sym.clone();
        }

        let sym = match builtins::descriptor(wk) {
            Some(desc) => {
                match reflect::create_shared_sym(&desc, FactoryId::BUILTIN, &mut |name| self.resolve(name)) {
                    Ok(sym) => sym,
                    Err(err) => {
                        log::warn!("well-known type `{}` could not be built: {}", binary_name, err);
                        Self::unresolved(binary_name)
                    }
                }
            }
            None => Self::unresolved(binary_name),
        };

        self.built.insert(binary_name, sym.clone());
        sym
    }

    /// Supertypes outside the well-known set stay unresolved
    fn resolve(&mut self, name: Name) -> SymRef {
        match WellKnown::from_name(name) {
            Some(wk) => self.build(wk),
            None => {
                if let Some(sym) = self.built.get(&name) {
                    return sym.clone();
                }
                let sym = Self::unresolved(name);
                self.built.insert(name, sym.clone());
                sym
            }
        }
    }

    fn unresolved(name: Name) -> SymRef {
        SymRef::new(ClassSymbol::Unresolved(UnresolvedClass::from_name(
            name,
            FactoryId::BUILTIN,
        )))
    }
}

static REGISTRY: LazyLock<WellKnownSymbols> = LazyLock::new(WellKnownSymbols::build);

/// The process-wide registry, built on first use
#[inline]
pub fn well_known() -> &'static WellKnownSymbols {
    &REGISTRY
}

/// Build the registry now rather than on first use.
///
/// Repeated calls return the same table.
pub fn initialize() -> &'static WellKnownSymbols {
    LazyLock::force(&REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::ClassKind;

    #[test]
    fn test_every_type_is_present() {
        let registry = well_known();
        assert_eq!(registry.len(), WellKnown::ALL.len());
        assert_eq!(registry.len(), 29);
        for (wk, sym) in registry.iter() {
            assert_eq!(sym.binary_name(), wk.binary_name());
            assert_eq!(registry.which(sym), Some(wk));
        }
    }

    #[test]
    fn test_lookup_is_identity() {
        for &wk in WellKnown::ALL {
            let by_variant = wk.sym();
            let by_name = well_known().lookup(wk.binary_name().as_str()).unwrap();
            assert!(SymRef::ptr_eq(by_variant, by_name), "{:?}", wk);
        }
    }

    #[test]
    fn test_lookup_unknown_does_not_intern() {
        assert!(well_known().lookup("com.never.Interned$Here").is_none());
        assert!(NAME_TABLE.lookup("com.never.Interned$Here").is_none());
    }

    #[test]
    fn test_array_super_interfaces_order() {
        let pair = well_known().array_super_interfaces();
        assert_eq!(pair.len(), 2);
        assert!(SymRef::ptr_eq(&pair[0], well_known().cloneable()));
        assert!(SymRef::ptr_eq(&pair[1], well_known().serializable()));
    }

    #[test]
    fn test_primitives() {
        let int = well_known().primitive("int").unwrap();
        assert!(int.is_primitive());
        assert_eq!(int.kind(), ClassKind::Primitive);
        assert!(int.superclass().is_none());
        assert!(int.package_name().is_empty());

        assert!(well_known().primitive("java.lang.Integer").is_none());
        assert!(well_known().primitive("integer").is_none());
    }

    #[test]
    fn test_boxing() {
        let registry = well_known();
        for &wk in WellKnown::ALL.iter().filter(|wk| wk.is_primitive()) {
            let boxed = registry.boxed(wk.sym()).unwrap();
            assert!(SymRef::ptr_eq(registry.unboxed(boxed).unwrap(), wk.sym()));
        }
        assert_eq!(WellKnown::Char.boxed(), Some(WellKnown::BoxedChar));
        assert!(registry.boxed(registry.string()).is_none());
        assert!(registry.unboxed(registry.object()).is_none());
    }

    #[test]
    fn test_supertypes_are_singletons() {
        let registry = well_known();
        let string = registry.string();
        assert!(SymRef::ptr_eq(string.superclass().unwrap(), registry.object()));
        assert!(string
            .super_interfaces()
            .iter()
            .any(|sym| SymRef::ptr_eq(sym, registry.serializable())));

        let integer = WellKnown::BoxedInt.sym();
        let number = integer.superclass().unwrap();
        assert!(number.is_unresolved());
        assert_eq!(number.binary_name().as_str(), "java.lang.Number");
    }

    #[test]
    fn test_object_has_no_superclass() {
        let object = well_known().object();
        assert!(object.superclass().is_none());
        assert!(object.super_interfaces().is_empty());
        assert!(object.methods_named("hashCode").next().is_some());
    }

    #[test]
    fn test_unresolved_marker() {
        let marker = well_known().unresolved_class();
        assert!(marker.is_unresolved());
        assert_eq!(marker.binary_name(), name::UNRESOLVED_MARKER);
        assert!(marker.origin().is_builtin());
    }

    #[test]
    fn test_java_lang_lookup() {
        let registry = well_known();
        assert!(SymRef::ptr_eq(registry.lookup_java_lang("String").unwrap(), registry.string()));
        assert!(registry.lookup_java_lang("Cloneable").is_some());
        assert!(registry.lookup_java_lang("Serializable").is_none());
        assert!(registry.lookup_java_lang("java.lang.String").is_none());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let first = initialize();
        let second = initialize();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, well_known()));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(WellKnown::from_name(name::JAVA_LANG_ENUM), Some(WellKnown::Enum));
        assert_eq!(WellKnown::from_name(name::LENGTH), None);
        assert_eq!(WellKnown::from_name(Name::intern("com.acme.Enum")), None);
    }
}
