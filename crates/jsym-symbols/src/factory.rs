//! The symbol factory contract.
//!
//! Every adapter implements [`SymbolFactory`] for its own input type and gets
//! the well-known table, unresolved references and array construction from
//! the provided methods. Adapters only decide how one unit of input becomes a
//! symbol.

use jsym_util::{FactoryId, Name};

use crate::config::FactoryConfig;
use crate::error::SymbolResult;
use crate::registry::{self, WellKnown, WellKnownSymbols};
use crate::symbol::{ArraySymbol, ClassSymbol, SymRef, UnresolvedClass};

/// Builds symbols from inputs of type `T`
pub trait SymbolFactory<T: ?Sized>: Send + Sync {
    /// Handle recorded as the origin of symbols built by this factory
    fn factory_id(&self) -> FactoryId;

    /// Convert one input into a symbol.
    ///
    /// Returns `None` exactly when `input` is `None`. A type that cannot be
    /// found comes back as an unresolved symbol, never as `None`.
    fn get_class_symbol(&self, input: Option<&T>) -> Option<SymRef>;

    /// The process-wide well-known symbols
    fn well_known(&self) -> &'static WellKnownSymbols {
        registry::well_known()
    }

    /// Placeholder for a type that is referenced but could not be found.
    ///
    /// # Errors
    ///
    /// `MissingArgument` for `None`, `InvalidArgument` for an empty name.
    fn make_unresolved_reference(&self, canonical_name: Option<&str>) -> SymbolResult<SymRef> {
        UnresolvedClass::new(canonical_name, self.factory_id())
    }

    /// Array type one dimension above `component`.
    ///
    /// # Errors
    ///
    /// `MissingArgument` for `None`, `InvalidArgument` for an anonymous
    /// class component.
    fn make_array_symbol(&self, component: Option<&SymRef>) -> SymbolResult<SymRef> {
        ArraySymbol::new(component, self.factory_id())
    }

    /// `element` wrapped in `dimensions` array levels; `element` itself for 0
    fn make_array_type(&self, element: &SymRef, dimensions: usize) -> SymbolResult<SymRef> {
        let mut current = element.clone();
        for _ in 0..dimensions {
            current = self.make_array_symbol(Some(&current))?;
        }
        Ok(current)
    }
}

/// Unresolved symbol for a name an adapter failed to find
pub(crate) fn degrade(origin: FactoryId, config: &FactoryConfig, name: Name) -> SymRef {
    if name.is_empty() {
        return WellKnown::UnresolvedClass.sym().clone();
    }
    if config.log_unresolved {
        log::debug!("[{}] unresolved reference to `{}`", config.label, name);
    }
    SymRef::new(ClassSymbol::Unresolved(UnresolvedClass::from_name(name, origin)))
}
