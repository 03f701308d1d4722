//! Compiled-class adapter.
//!
//! Turns [`ClassDescriptor`]s, the metadata of compiled classes, into
//! symbols. [`create_shared_sym`] is the single construction path used both
//! by this adapter and by the well-known registry, so a builtin symbol and a
//! class resolved from the classpath are built the same way.

pub mod builtins;

use parking_lot::{ReentrantMutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};

use jsym_util::{FactoryId, Name};

use crate::config::FactoryConfig;
use crate::error::{SymbolError, SymbolResult};
use crate::factory::{self, SymbolFactory};
use crate::modifiers::Modifiers;
use crate::registry::{well_known, WellKnown};
use crate::symbol::{ClassKind, FieldSig, MethodSig, ResolvedClass, SymRef};
use crate::type_ref::TypeRef;

/// Metadata of one compiled class, interface, primitive or array type.
///
/// Supertypes are referenced by binary name and resolved by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub binary_name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub anonymous: bool,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldSig>,
    pub methods: Vec<MethodSig>,
    /// Component type, for array descriptors
    pub component: Option<Box<ClassDescriptor>>,
}

impl ClassDescriptor {
    pub fn new(binary_name: impl Into<String>, kind: ClassKind) -> Self {
        let modifiers = match kind {
            ClassKind::Interface | ClassKind::Annotation => {
                Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT
            }
            _ => Modifiers::PUBLIC,
        };
        Self {
            binary_name: binary_name.into(),
            kind,
            modifiers,
            anonymous: false,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            component: None,
        }
    }

    pub fn class(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, ClassKind::Class).extends("java.lang.Object")
    }

    pub fn interface(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, ClassKind::Interface)
    }

    pub fn primitive(keyword: impl Into<String>) -> Self {
        Self::new(keyword, ClassKind::Primitive)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ABSTRACT)
    }

    /// Descriptor of the array type one dimension above `component`
    pub fn array_of(component: ClassDescriptor) -> Self {
        let mut desc = Self::new(format!("{}[]", component.binary_name), ClassKind::Array);
        desc.component = Some(Box::new(component));
        desc
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn field(mut self, name: &str, ty: TypeRef, modifiers: Modifiers) -> Self {
        self.fields.push(FieldSig::new(name, ty, modifiers));
        self
    }

    pub fn method(mut self, name: &str, params: Vec<TypeRef>, return_type: TypeRef, modifiers: Modifiers) -> Self {
        self.methods.push(MethodSig::new(name, params, return_type, modifiers));
        self
    }
}

/// Build the symbol for a non-array descriptor.
///
/// Supertype names are turned into symbols by `resolve`; the caller decides
/// what a name it cannot find becomes.
///
/// # Errors
///
/// `InvalidArgument` for an empty binary name, an array descriptor, or a
/// descriptor the symbol builder rejects.
pub fn create_shared_sym(
    desc: &ClassDescriptor,
    origin: FactoryId,
    resolve: &mut dyn FnMut(Name) -> SymRef,
) -> SymbolResult<SymRef> {
    const OP: &str = "create_shared_sym";

    if desc.binary_name.is_empty() {
        return Err(SymbolError::invalid(OP, "descriptor has an empty binary name"));
    }
    if desc.kind == ClassKind::Array {
        return Err(SymbolError::invalid(
            OP,
            format!("`{}`: array descriptors are built from their component", desc.binary_name),
        ));
    }

    let superclass = desc.superclass.as_deref().map(|name| resolve(Name::intern(name)));
    let interfaces: Vec<SymRef> = desc
        .interfaces
        .iter()
        .map(|name| resolve(Name::intern(name)))
        .collect();

    ResolvedClass::builder(desc.binary_name.as_str(), desc.kind)
        .modifiers(desc.modifiers)
        .anonymous(desc.anonymous)
        .maybe_superclass(superclass)
        .interfaces(interfaces)
        .fields(desc.fields.iter().cloned())
        .methods(desc.methods.iter().cloned())
        .origin(origin)
        .build()
}

/// Symbol factory over a snapshot of compiled classes
///
/// Each class is built at most once per factory; later lookups return the
/// same symbol. Well-known types always come from the registry.
pub struct ReflectSymbolFactory {
    id: FactoryId,
    config: FactoryConfig,
    classpath: FxHashMap<Name, ClassDescriptor>,
    resolved: RwLock<FxHashMap<Name, SymRef>>,
    /// Held for a whole top-level build, so every supertype of a memoized
    /// class is itself the memoized symbol
    building: ReentrantMutex<()>,
}

impl ReflectSymbolFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self::with_classpath(config, std::iter::empty())
    }

    pub fn with_classpath(config: FactoryConfig, classes: impl IntoIterator<Item = ClassDescriptor>) -> Self {
        let classpath: FxHashMap<Name, ClassDescriptor> = classes
            .into_iter()
            .map(|desc| (Name::intern(&desc.binary_name), desc))
            .collect();
        log::debug!("[{}] classpath factory with {} classes", config.label, classpath.len());

        Self {
            id: FactoryId::fresh(),
            config,
            classpath,
            resolved: RwLock::new(FxHashMap::default()),
            building: ReentrantMutex::new(()),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Descriptor on the classpath with this binary name
    pub fn descriptor(&self, binary_name: Name) -> Option<&ClassDescriptor> {
        self.classpath.get(&binary_name)
    }

    /// True if the name is well-known or on the classpath
    pub fn contains(&self, binary_name: Name) -> bool {
        WellKnown::from_name(binary_name).is_some() || self.classpath.contains_key(&binary_name)
    }

    /// Symbol for a binary name; unresolved if it is not on the classpath
    pub fn resolve_name(&self, binary_name: Name) -> SymRef {
        self.resolve_guarded(binary_name, &mut FxHashSet::default())
    }

    /// Symbol for a textual type, array dimensions included.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the type has more dimensions than the configured
    /// limit.
    pub fn resolve_type_ref(&self, ty: &TypeRef) -> SymbolResult<SymRef> {
        if ty.dimensions > self.config.max_array_dimensions {
            return Err(SymbolError::invalid(
                "resolve_type_ref",
                format!(
                    "`{}` exceeds the limit of {} array dimensions",
                    ty, self.config.max_array_dimensions
                ),
            ));
        }
        let element = match well_known().primitive(ty.name.as_str()) {
            Some(primitive) => primitive.clone(),
            None => self.resolve_name(ty.name),
        };
        self.make_array_type(&element, ty.dimensions)
    }

    /// Number of classes built so far
    pub fn resolved_count(&self) -> usize {
        self.resolved.read().len()
    }

    fn resolve_guarded(&self, binary_name: Name, visiting: &mut FxHashSet<Name>) -> SymRef {
        if let Some(sym) = well_known().lookup_name(binary_name) {
            return sym.clone();
        }
        if let Some(sym) = self.resolved.read().get(&binary_name) {
            return sym.clone();
        }
        let Some(desc) = self.classpath.get(&binary_name) else {
            return factory::degrade(self.id, &self.config, binary_name);
        };
        if visiting.contains(&binary_name) {
            log::warn!("[{}] supertype cycle through `{}`", self.config.label, binary_name);
            return factory::degrade(self.id, &self.config, binary_name);
        }

        match self.symbol_for(desc, visiting) {
            Ok(sym) => sym,
            Err(err) => {
                log::warn!("[{}] malformed class descriptor `{}`: {}", self.config.label, binary_name, err);
                factory::degrade(self.id, &self.config, binary_name)
            }
        }
    }

    fn symbol_for(&self, desc: &ClassDescriptor, visiting: &mut FxHashSet<Name>) -> SymbolResult<SymRef> {
        if desc.binary_name.is_empty() {
            return Err(SymbolError::invalid("get_class_symbol", "descriptor has an empty binary name"));
        }
        if desc.kind == ClassKind::Array {
            let component = desc.component.as_deref().ok_or_else(|| {
                SymbolError::invalid(
                    "get_class_symbol",
                    format!("array descriptor `{}` has no component", desc.binary_name),
                )
            })?;
            let component = self.symbol_for(component, visiting)?;
            return self.make_array_symbol(Some(&component));
        }

        let binary_name = Name::intern(&desc.binary_name);
        if let Some(sym) = well_known().lookup_name(binary_name) {
            return Ok(sym.clone());
        }
        if let Some(sym) = self.resolved.read().get(&binary_name) {
            return Ok(sym.clone());
        }

        let _building = self.building.lock();
        // another thread may have built it while we waited
        if let Some(sym) = self.resolved.read().get(&binary_name) {
            return Ok(sym.clone());
        }

        visiting.insert(binary_name);
        let built = create_shared_sym(desc, self.id, &mut |name| self.resolve_guarded(name, visiting));
        visiting.remove(&binary_name);

        let sym = built?;
        self.resolved.write().insert(binary_name, sym.clone());
        Ok(sym)
    }
}

impl SymbolFactory<ClassDescriptor> for ReflectSymbolFactory {
    fn factory_id(&self) -> FactoryId {
        self.id
    }

    fn get_class_symbol(&self, desc: Option<&ClassDescriptor>) -> Option<SymRef> {
        let desc = desc?;
        match self.symbol_for(desc, &mut FxHashSet::default()) {
            Ok(sym) => Some(sym),
            Err(err) => {
                log::warn!("[{}] malformed class descriptor: {}", self.config.label, err);
                Some(well_known().unresolved_class().clone())
            }
        }
    }
}
