use std::fmt;
use std::hash::{Hash, Hasher};

use jsym_util::{FactoryId, Name};

use super::{ClassSymbol, SymRef};
use crate::error::{SymbolError, SymbolResult};
use crate::modifiers::Modifiers;

/// Placeholder for a type that is referenced but could not be found.
///
/// Only the canonical name is reliable. Supertype and member queries answer
/// empty. Two unresolved symbols are equal when their names are.
pub struct UnresolvedClass {
    canonical_name: Name,
    simple_name: Name,
    package_name: Name,
    origin: FactoryId,
}

impl UnresolvedClass {
    pub(crate) const MODIFIERS: Modifiers = Modifiers::PUBLIC;

    /// Build an unresolved symbol for `canonical_name`.
    ///
    /// # Errors
    ///
    /// `MissingArgument` if the name is `None`, `InvalidArgument` if it is
    /// empty.
    pub fn new(canonical_name: Option<&str>, origin: FactoryId) -> SymbolResult<SymRef> {
        const OP: &str = "make_unresolved_reference";

        let canonical_name = canonical_name.ok_or_else(|| SymbolError::missing(OP, "canonical_name"))?;
        if canonical_name.is_empty() {
            return Err(SymbolError::invalid(OP, "canonical name is empty"));
        }

        let unresolved = Self::from_name(Name::intern(canonical_name), origin);
        Ok(SymRef::new(ClassSymbol::Unresolved(unresolved)))
    }

    /// Names are split on the last dot; nothing else is guessed.
    pub(crate) fn from_name(canonical_name: Name, origin: FactoryId) -> Self {
        let (package, simple) = match canonical_name.as_str().rsplit_once('.') {
            Some((package, simple)) => (Name::intern(package), Name::intern(simple)),
            None => (jsym_util::name::EMPTY, canonical_name),
        };
        Self {
            canonical_name,
            simple_name: simple,
            package_name: package,
            origin,
        }
    }

    pub fn canonical_name(&self) -> Name {
        self.canonical_name
    }

    pub fn simple_name(&self) -> Name {
        self.simple_name
    }

    pub fn package_name(&self) -> Name {
        self.package_name
    }

    pub fn origin(&self) -> FactoryId {
        self.origin
    }
}

impl PartialEq for UnresolvedClass {
    fn eq(&self, other: &UnresolvedClass) -> bool {
        self.canonical_name == other.canonical_name
    }
}

impl Eq for UnresolvedClass {}

impl Hash for UnresolvedClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name.hash(state);
    }
}

impl fmt::Debug for UnresolvedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnresolvedClass({})", self.canonical_name)
    }
}
