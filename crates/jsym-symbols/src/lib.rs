//! jsym-symbols - Symbol Construction for Java-like Type Analysis
//!
//! ============================================================================
//! WHAT A SYMBOL IS
//! ============================================================================
//!
//! A symbol is the analysis-time representation of a type: a class, an
//! interface, a primitive, an array, or a placeholder for a type nobody could
//! find. Later phases (type resolution, rule evaluation) only ever see
//! symbols, never the input they were built from.
//!
//! Symbols come from two kinds of input:
//!
//! 1. COMPILED CLASSES
//!    [`ClassDescriptor`]s, turned into symbols by
//!    [`ReflectSymbolFactory`].
//!
//! 2. SOURCE DECLARATIONS
//!    [`TypeDeclNode`]s, turned into symbols by [`AstSymbolFactory`], which
//!    also resolves the names written in `extends` and `implements`.
//!
//! Both implement [`SymbolFactory`] and get the shared behaviour from it:
//! the well-known table, unresolved references and array construction.
//!
//! ============================================================================
//! IDENTITY
//! ============================================================================
//!
//! The well-known types (`Object`, primitives and their boxes, `Cloneable`,
//! `Serializable`, `Class`, `Iterable`, `Enum`, `String`) exist exactly once
//! per process:
//!
//! ```
//! use jsym_symbols::{well_known, SymRef, WellKnown};
//!
//! let a = well_known().lookup("int").unwrap();
//! let b = WellKnown::Int.sym();
//! assert!(SymRef::ptr_eq(a, b));
//! ```
//!
//! Arrays and unresolved symbols are built on every call and compare
//! structurally.
//!
//! ============================================================================
//! DEGRADATION
//! ============================================================================
//!
//! A type that cannot be found is not an error. It becomes an unresolved
//! symbol whose only reliable attribute is its name; supertype and member
//! queries answer empty. Errors ([`SymbolError`]) are reserved for arguments
//! that violate an operation's contract:
//!
//! ```
//! use jsym_symbols::{ErrorKind, FactoryConfig, ReflectSymbolFactory, SymbolFactory};
//!
//! let factory = ReflectSymbolFactory::new(FactoryConfig::default());
//! assert_eq!(
//!     factory.make_unresolved_reference(None).unwrap_err().kind(),
//!     ErrorKind::MissingArgument
//! );
//! assert_eq!(
//!     factory.make_unresolved_reference(Some("")).unwrap_err().kind(),
//!     ErrorKind::InvalidArgument
//! );
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod factory;
pub mod modifiers;
pub mod reflect;
pub mod registry;
pub mod symbol;
pub mod type_ref;

mod edge_cases;

pub use ast::{AstSymbolFactory, Import, TypeDeclNode};
pub use config::FactoryConfig;
pub use error::{ConfigError, ConfigResult, ErrorKind, SymbolError, SymbolResult};
pub use factory::SymbolFactory;
pub use modifiers::Modifiers;
pub use reflect::{create_shared_sym, ClassDescriptor, ReflectSymbolFactory};
pub use registry::{initialize, well_known, WellKnown, WellKnownSymbols};
pub use symbol::{
    ArraySymbol, ClassKind, ClassSymbol, FieldSig, MethodSig, ResolvedClass, ResolvedClassBuilder, SymRef,
    UnresolvedClass,
};
pub use type_ref::TypeRef;

pub use jsym_util::{FactoryId, Name};

static_assertions::assert_impl_all!(SymRef: Send, Sync, Clone);
static_assertions::assert_impl_all!(WellKnownSymbols: Send, Sync);
static_assertions::assert_impl_all!(ReflectSymbolFactory: Send, Sync);
static_assertions::assert_impl_all!(AstSymbolFactory: Send, Sync);
static_assertions::assert_impl_all!(SymbolError: Send, Sync, std::error::Error);
