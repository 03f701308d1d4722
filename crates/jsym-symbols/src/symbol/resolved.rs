use std::fmt;

use jsym_util::{name, FactoryId, Name};

use super::{ClassKind, ClassSymbol, FieldSig, MethodSig, SymRef};
use crate::error::{SymbolError, SymbolResult};
use crate::modifiers::Modifiers;

/// A class or interface whose definition was found
pub struct ResolvedClass {
    binary_name: Name,
    canonical_name: Option<Name>,
    simple_name: Name,
    package_name: Name,
    kind: ClassKind,
    modifiers: Modifiers,
    anonymous: bool,
    superclass: Option<SymRef>,
    interfaces: Vec<SymRef>,
    fields: Vec<FieldSig>,
    methods: Vec<MethodSig>,
    origin: FactoryId,
}

impl ResolvedClass {
    pub fn builder(binary_name: impl Into<Name>, kind: ClassKind) -> ResolvedClassBuilder {
        ResolvedClassBuilder::new(binary_name.into(), kind)
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

    pub fn package_name(&self) -> Name {
        self.package_name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn superclass(&self) -> Option<&SymRef> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[SymRef] {
        &self.interfaces
    }

    pub fn fields(&self) -> &[FieldSig] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }

    pub fn origin(&self) -> FactoryId {
        self.origin
    }
}

impl fmt::Debug for ResolvedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // supertypes by name only, the graph may be deep
        f.debug_struct("ResolvedClass")
            .field("binary_name", &self.binary_name)
            .field("kind", &self.kind)
            .field("modifiers", &self.modifiers)
            .field("superclass", &self.superclass.as_ref().map(|s| s.binary_name()))
            .field(
                "interfaces",
                &self.interfaces.iter().map(|s| s.binary_name()).collect::<Vec<_>>(),
            )
            .field("origin", &self.origin)
            .finish()
    }
}

/// Split a binary name into (package, simple name, canonical name).
///
/// `a.b.Outer$Inner` gives (`a.b`, `Inner`, `a.b.Outer.Inner`); anonymous
/// classes have an empty simple name and no canonical name. Local classes
/// (`a.Outer$1Local`) drop the ordinal from their simple name and have no
/// canonical name either.
pub(crate) fn split_binary_name(binary_name: &str, kind: ClassKind, anonymous: bool) -> (Name, Name, Option<Name>) {
    if kind == ClassKind::Primitive {
        let name = Name::intern(binary_name);
        return (name::EMPTY, name, Some(name));
    }

    let (package, tail) = match binary_name.rsplit_once('.') {
        Some((package, tail)) => (package, tail),
        None => ("", binary_name),
    };

    if anonymous {
        return (Name::intern(package), name::EMPTY, None);
    }

    let simple = tail.rsplit_once('$').map_or(tail, |(_, simple)| local_simple_name(simple));
    // local classes and their members have no canonical name
    let in_local = tail
        .split('$')
        .skip(1)
        .any(|segment| segment.starts_with(|c: char| c.is_ascii_digit()));
    let canonical = if in_local {
        None
    } else if binary_name.contains('$') {
        Some(Name::intern(&binary_name.replace('$', ".")))
    } else {
        Some(Name::intern(binary_name))
    };
    (Name::intern(package), Name::intern(simple), canonical)
}

/// `1Local` -> `Local`; an all-digit segment is kept as is
fn local_simple_name(segment: &str) -> &str {
    let stripped = segment.trim_start_matches(|c: char| c.is_ascii_digit());
    if stripped.is_empty() {
        segment
    } else {
        stripped
    }
}

/// Builder for [`ResolvedClass`] symbols
///
/// Names not set explicitly are derived from the binary name.
pub struct ResolvedClassBuilder {
    binary_name: Name,
    kind: ClassKind,
    canonical_name: Option<Option<Name>>,
    simple_name: Option<Name>,
    package_name: Option<Name>,
    modifiers: Modifiers,
    anonymous: bool,
    superclass: Option<SymRef>,
    interfaces: Vec<SymRef>,
    fields: Vec<FieldSig>,
    methods: Vec<MethodSig>,
    origin: FactoryId,
}

impl ResolvedClassBuilder {
    fn new(binary_name: Name, kind: ClassKind) -> Self {
        Self {
            binary_name,
            kind,
            canonical_name: None,
            simple_name: None,
            package_name: None,
            modifiers: Modifiers::NONE,
            anonymous: false,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            origin: FactoryId::BUILTIN,
        }
    }

    pub fn canonical_name(mut self, canonical_name: Option<Name>) -> Self {
        self.canonical_name = Some(canonical_name);
        self
    }

    pub fn simple_name(mut self, simple_name: impl Into<Name>) -> Self {
        self.simple_name = Some(simple_name.into());
        self
    }

    pub fn package_name(mut self, package_name: impl Into<Name>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    pub fn superclass(mut self, superclass: SymRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn maybe_superclass(mut self, superclass: Option<SymRef>) -> Self {
        self.superclass = superclass;
        self
    }

    pub fn interface(mut self, interface: SymRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn interfaces(mut self, interfaces: impl IntoIterator<Item = SymRef>) -> Self {
        self.interfaces.extend(interfaces);
        self
    }

    pub fn field(mut self, field: FieldSig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSig>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn method(mut self, method: MethodSig) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodSig>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn origin(mut self, origin: FactoryId) -> Self {
        self.origin = origin;
        self
    }

    pub fn build(self) -> SymbolResult<SymRef> {
        const OP: &str = "ResolvedClass::build";

        if self.binary_name.is_empty() {
            return Err(SymbolError::invalid(OP, "binary name is empty"));
        }
        match self.kind {
            ClassKind::Array => {
                return Err(SymbolError::invalid(
                    OP,
                    format!("`{}`: array symbols are derived from their component", self.binary_name),
                ));
            }
            ClassKind::Primitive if self.superclass.is_some() || !self.interfaces.is_empty() => {
                return Err(SymbolError::invalid(
                    OP,
                    format!("primitive `{}` cannot have supertypes", self.binary_name),
                ));
            }
            ClassKind::Primitive if self.anonymous => {
                return Err(SymbolError::invalid(
                    OP,
                    format!("primitive `{}` cannot be anonymous", self.binary_name),
                ));
            }
            _ => {}
        }

        let (package, simple, canonical) =
            split_binary_name(self.binary_name.as_str(), self.kind, self.anonymous);

        Ok(SymRef::new(ClassSymbol::Resolved(ResolvedClass {
            binary_name: self.binary_name,
            canonical_name: self.canonical_name.unwrap_or(canonical),
            simple_name: self.simple_name.unwrap_or(simple),
            package_name: self.package_name.unwrap_or(package),
            kind: self.kind,
            modifiers: self.modifiers,
            anonymous: self.anonymous,
            superclass: self.superclass,
            interfaces: self.interfaces,
            fields: self.fields,
            methods: self.methods,
            origin: self.origin,
        })))
    }
}
