//! Source-declaration adapter.
//!
//! Builds symbols for the type declarations of a source set. Names written
//! in `extends`/`implements` clauses are resolved the way a Java compiler
//! scopes them:
//!
//! 1. primitive keywords
//! 2. qualified names (`java.util.Map.Entry`, `Outer.Inner`)
//! 3. member types of the declaration and its enclosing declarations
//! 4. single-type imports
//! 5. types of the same package
//! 6. on-demand imports
//! 7. `java.lang`, when `implicit_java_lang` is set
//!
//! Anything still unknown becomes an unresolved reference. Names are looked
//! up in the well-known registry first, then in the source set, then in the
//! optional classpath factory.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};

use jsym_util::{FactoryId, Name};

use crate::config::FactoryConfig;
use crate::error::{SymbolError, SymbolResult};
use crate::factory::{self, SymbolFactory};
use crate::modifiers::Modifiers;
use crate::reflect::ReflectSymbolFactory;
use crate::registry::{well_known, WellKnown};
use crate::symbol::{ClassKind, FieldSig, MethodSig, ResolvedClass, SymRef};
use crate::type_ref::TypeRef;

/// An `import` clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Import {
    /// `import a.b.C;`
    Single(String),
    /// `import a.b.*;`
    OnDemand(String),
}

impl Import {
    /// Parse the text between `import` and `;`
    pub fn parse(text: &str) -> Import {
        let text = text.trim();
        match text.strip_suffix(".*") {
            Some(package) => Import::OnDemand(package.to_string()),
            None => Import::Single(text.to_string()),
        }
    }
}

/// A type declaration as parsed from source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclNode {
    pub simple_name: String,
    pub package: String,
    pub imports: Vec<Import>,
    /// Binary name of the enclosing declaration, for member, local and
    /// anonymous classes
    pub enclosing: Option<String>,
    pub kind: ClassKind,
    /// Ordinal of an anonymous class within its top-level class
    pub anonymous: Option<u32>,
    pub modifiers: Modifiers,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub fields: Vec<FieldSig>,
    pub methods: Vec<MethodSig>,
}

impl TypeDeclNode {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            simple_name: simple_name.into(),
            package: package.into(),
            imports: Vec::new(),
            enclosing: None,
            kind,
            anonymous: None,
            modifiers: Modifiers::PUBLIC,
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Member type declared inside `outer`; shares its package and imports
    pub fn nested_in(outer: &TypeDeclNode, simple_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            imports: outer.imports.clone(),
            enclosing: Some(outer.binary_name()),
            ..Self::new(outer.package.clone(), simple_name, kind)
        }
    }

    /// The `ordinal`-th anonymous class in `outer`, created from `base`
    pub fn anonymous_in(outer: &TypeDeclNode, ordinal: u32, base: TypeRef) -> Self {
        Self {
            anonymous: Some(ordinal),
            modifiers: Modifiers::NONE,
            extends: Some(base),
            ..Self::nested_in(outer, "", ClassKind::Class)
        }
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn extends(mut self, ty: TypeRef) -> Self {
        self.extends = Some(ty);
        self
    }

    pub fn implements(mut self, ty: TypeRef) -> Self {
        self.implements.push(ty);
        self
    }

    pub fn field(mut self, field: FieldSig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodSig) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous.is_some()
    }

    /// `pkg.Outer$Inner` for member types, `pkg.Outer$1` for anonymous ones
    pub fn binary_name(&self) -> String {
        match (&self.enclosing, self.anonymous) {
            (Some(outer), Some(ordinal)) => format!("{outer}${ordinal}"),
            (Some(outer), None) => format!("{outer}${}", self.simple_name),
            (None, _) if self.package.is_empty() => self.simple_name.clone(),
            (None, _) => format!("{}.{}", self.package, self.simple_name),
        }
    }

    fn validate(&self) -> SymbolResult<()> {
        const OP: &str = "get_class_symbol";

        match (self.anonymous, &self.enclosing) {
            (Some(_), None) => {
                return Err(SymbolError::invalid(OP, "anonymous class without an enclosing declaration"));
            }
            (None, _) if self.simple_name.is_empty() => {
                return Err(SymbolError::invalid(OP, "declaration has an empty name"));
            }
            _ => {}
        }
        match self.kind {
            ClassKind::Array | ClassKind::Primitive => Err(SymbolError::invalid(
                OP,
                format!("`{}`: {:?} types are not declared in source", self.binary_name(), self.kind),
            )),
            ClassKind::Class if self.anonymous.is_some() && self.extends.is_none() => Err(SymbolError::invalid(
                OP,
                format!("anonymous class `{}` has no base type", self.binary_name()),
            )),
            _ => Ok(()),
        }
    }
}

/// Symbol factory over the declarations of a source set
pub struct AstSymbolFactory {
    id: FactoryId,
    config: FactoryConfig,
    decls: FxHashMap<Name, TypeDeclNode>,
    classpath: Option<Arc<ReflectSymbolFactory>>,
    resolved: RwLock<FxHashMap<Name, SymRef>>,
    building: ReentrantMutex<()>,
}

impl AstSymbolFactory {
    pub fn new(config: FactoryConfig, decls: impl IntoIterator<Item = TypeDeclNode>) -> Self {
        let decls: FxHashMap<Name, TypeDeclNode> = decls
            .into_iter()
            .map(|decl| (Name::intern(&decl.binary_name()), decl))
            .collect();
        log::debug!("[{}] source factory with {} declarations", config.label, decls.len());

        Self {
            id: FactoryId::fresh(),
            config,
            decls,
            classpath: None,
            resolved: RwLock::new(FxHashMap::default()),
            building: ReentrantMutex::new(()),
        }
    }

    /// Fall back to `classpath` for names outside the source set
    pub fn with_classpath(mut self, classpath: Arc<ReflectSymbolFactory>) -> Self {
        self.classpath = Some(classpath);
        self
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Declaration in the source set with this binary name
    pub fn declaration(&self, binary_name: &str) -> Option<&TypeDeclNode> {
        self.decls.get(&Name::intern(binary_name))
    }

    /// Symbol for `ty` as written inside `scope`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the type has more dimensions than the configured
    /// limit.
    pub fn resolve_in_scope(&self, scope: &TypeDeclNode, ty: &TypeRef) -> SymbolResult<SymRef> {
        self.resolve_type(scope, ty, &mut FxHashSet::default())
    }

    fn resolve_type(&self, scope: &TypeDeclNode, ty: &TypeRef, visiting: &mut FxHashSet<Name>) -> SymbolResult<SymRef> {
        if ty.dimensions > self.config.max_array_dimensions {
            return Err(SymbolError::invalid(
                "resolve_in_scope",
                format!(
                    "`{}` exceeds the limit of {} array dimensions",
                    ty, self.config.max_array_dimensions
                ),
            ));
        }
        let element = self.resolve_simple_or_qualified(scope, ty.name, visiting);
        self.make_array_type(&element, ty.dimensions)
    }

    fn resolve_simple_or_qualified(&self, scope: &TypeDeclNode, name: Name, visiting: &mut FxHashSet<Name>) -> SymRef {
        let text = name.as_str();
        if let Some(primitive) = well_known().primitive(text) {
            return primitive.clone();
        }

        let found = match text.split_once('.') {
            Some((head, tail)) => self.resolve_qualified(scope, text, head, tail, visiting),
            None => self.resolve_simple(scope, text, visiting),
        };
        match found {
            Some(sym) => sym,
            None => self.degrade(name),
        }
    }

    fn resolve_qualified(
        &self,
        scope: &TypeDeclNode,
        text: &str,
        head: &str,
        tail: &str,
        visiting: &mut FxHashSet<Name>,
    ) -> Option<SymRef> {
        if let Some(sym) = self.lookup_canonical(text, visiting) {
            return Some(sym);
        }
        // `Outer.Inner` where `Outer` is itself in scope
        let outer = self.resolve_simple(scope, head, visiting)?;
        if outer.is_unresolved() {
            return None;
        }
        let nested = format!("{}${}", outer.binary_name(), tail.replace('.', "$"));
        self.lookup_binary(&nested, visiting)
    }

    fn resolve_simple(&self, scope: &TypeDeclNode, simple: &str, visiting: &mut FxHashSet<Name>) -> Option<SymRef> {
        // member types, innermost declaration first
        let mut current = Some(scope.binary_name());
        let mut next = scope.enclosing.clone();
        while let Some(outer) = current {
            if let Some(sym) = self.lookup_binary(&format!("{outer}${simple}"), visiting) {
                return Some(sym);
            }
            current = next.take();
            next = current
                .as_deref()
                .and_then(|binary| self.declaration(binary))
                .and_then(|decl| decl.enclosing.clone());
        }

        for import in &scope.imports {
            if let Import::Single(imported) = import {
                let last = imported.rsplit('.').next().unwrap_or(imported);
                if last == simple {
                    // the import names the type even when nothing defines it
                    let sym = self
                        .lookup_canonical(imported, visiting)
                        .unwrap_or_else(|| self.degrade(Name::intern(imported)));
                    return Some(sym);
                }
            }
        }

        let same_package = if scope.package.is_empty() {
            simple.to_string()
        } else {
            format!("{}.{}", scope.package, simple)
        };
        if let Some(sym) = self.lookup_binary(&same_package, visiting) {
            return Some(sym);
        }

        for import in &scope.imports {
            if let Import::OnDemand(package) = import {
                if let Some(sym) = self.lookup_canonical(&format!("{package}.{simple}"), visiting) {
                    return Some(sym);
                }
            }
        }

        if self.config.implicit_java_lang {
            if let Some(sym) = well_known().lookup_java_lang(simple) {
                return Some(sym.clone());
            }
            if let Some(sym) = self.lookup_binary(&format!("java.lang.{simple}"), visiting) {
                return Some(sym);
            }
        }
        None
    }

    /// Try a canonical name as a binary name, then with trailing segments
    /// taken as member types (`a.Outer.Inner` -> `a.Outer$Inner`)
    fn lookup_canonical(&self, canonical: &str, visiting: &mut FxHashSet<Name>) -> Option<SymRef> {
        let mut candidate = canonical.to_string();
        loop {
            if let Some(sym) = self.lookup_binary(&candidate, visiting) {
                return Some(sym);
            }
            let dot = candidate.rfind('.')?;
            candidate.replace_range(dot..=dot, "$");
        }
    }

    /// Well-known, then source set, then classpath; `None` if nobody has it
    fn lookup_binary(&self, binary_name: &str, visiting: &mut FxHashSet<Name>) -> Option<SymRef> {
        let name = Name::intern(binary_name);
        if let Some(sym) = well_known().lookup_name(name) {
            return Some(sym.clone());
        }
        if let Some(decl) = self.decls.get(&name) {
            if let Some(sym) = self.resolved.read().get(&name) {
                return Some(sym.clone());
            }
            if visiting.contains(&name) {
                log::warn!("[{}] supertype cycle through `{}`", self.config.label, name);
                return Some(self.degrade(name));
            }
            return Some(match self.symbol_for(decl, visiting) {
                Ok(sym) => sym,
                Err(err) => {
                    log::warn!("[{}] malformed declaration `{}`: {}", self.config.label, name, err);
                    self.degrade(name)
                }
            });
        }
        let classpath = self.classpath.as_ref()?;
        classpath.contains(name).then(|| classpath.resolve_name(name))
    }

    fn degrade(&self, name: Name) -> SymRef {
        factory::degrade(self.id, &self.config, name)
    }

    fn symbol_for(&self, decl: &TypeDeclNode, visiting: &mut FxHashSet<Name>) -> SymbolResult<SymRef> {
        decl.validate()?;

        let binary_name = Name::intern(&decl.binary_name());
        // a source set that declares `java.lang.String` still gets the singleton
        if let Some(sym) = well_known().lookup_name(binary_name) {
            return Ok(sym.clone());
        }
        if let Some(sym) = self.resolved.read().get(&binary_name) {
            return Ok(sym.clone());
        }

        let _building = self.building.lock();
        if let Some(sym) = self.resolved.read().get(&binary_name) {
            return Ok(sym.clone());
        }

        visiting.insert(binary_name);
        let built = self.build(decl, binary_name, visiting);
        visiting.remove(&binary_name);

        let sym = built?;
        self.resolved.write().insert(binary_name, sym.clone());
        Ok(sym)
    }

    fn build(&self, decl: &TypeDeclNode, binary_name: Name, visiting: &mut FxHashSet<Name>) -> SymbolResult<SymRef> {
        let mut interfaces = Vec::with_capacity(decl.implements.len() + 1);
        let mut modifiers = decl.modifiers;

        let superclass = match decl.kind {
            ClassKind::Interface => {
                if let Some(ty) = &decl.extends {
                    interfaces.push(self.resolve_supertype(decl, ty, visiting));
                }
                modifiers |= Modifiers::INTERFACE | Modifiers::ABSTRACT;
                None
            }
            ClassKind::Annotation => {
                interfaces.push(self.lookup_or_degrade("java.lang.annotation.Annotation", visiting));
                modifiers |= Modifiers::INTERFACE | Modifiers::ABSTRACT;
                None
            }
            ClassKind::Enum => Some(well_known().get(WellKnown::Enum).clone()),
            ClassKind::Record => {
                modifiers |= Modifiers::FINAL;
                Some(self.lookup_or_degrade("java.lang.Record", visiting))
            }
            _ => match &decl.extends {
                // `new Runnable() { .. }` implements its base
                Some(ty) if decl.is_anonymous() => {
                    let base = self.resolve_supertype(decl, ty, visiting);
                    if base.is_interface() {
                        interfaces.push(base);
                        Some(well_known().object().clone())
                    } else {
                        Some(base)
                    }
                }
                Some(ty) => Some(self.resolve_supertype(decl, ty, visiting)),
                None => Some(well_known().object().clone()),
            },
        };

        for ty in &decl.implements {
            interfaces.push(self.resolve_supertype(decl, ty, visiting));
        }

        ResolvedClass::builder(binary_name, decl.kind)
            .modifiers(modifiers)
            .anonymous(decl.is_anonymous())
            .maybe_superclass(superclass)
            .interfaces(interfaces)
            .fields(decl.fields.iter().cloned())
            .methods(decl.methods.iter().cloned())
            .origin(self.id)
            .build()
    }

    /// A supertype that cannot be resolved degrades alone; the declaration
    /// keeps its own name
    fn resolve_supertype(&self, decl: &TypeDeclNode, ty: &TypeRef, visiting: &mut FxHashSet<Name>) -> SymRef {
        self.resolve_type(decl, ty, visiting).unwrap_or_else(|err| {
            log::warn!("[{}] supertype of `{}`: {}", self.config.label, decl.binary_name(), err);
            self.degrade(ty.name)
        })
    }

    fn lookup_or_degrade(&self, binary_name: &str, visiting: &mut FxHashSet<Name>) -> SymRef {
        self.lookup_binary(binary_name, visiting)
            .unwrap_or_else(|| self.degrade(Name::intern(binary_name)))
    }
}

impl SymbolFactory<TypeDeclNode> for AstSymbolFactory {
    fn factory_id(&self) -> FactoryId {
        self.id
    }

    fn get_class_symbol(&self, decl: Option<&TypeDeclNode>) -> Option<SymRef> {
        let decl = decl?;
        match self.symbol_for(decl, &mut FxHashSet::default()) {
            Ok(sym) => Some(sym),
            Err(err) => {
                log::warn!("[{}] malformed declaration: {}", self.config.label, err);
                Some(well_known().unresolved_class().clone())
            }
        }
    }
}
