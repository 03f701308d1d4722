//! Name module - interned type and member names.
//!
//! [`Name`] is a compact (4-byte) handle to a string stored in the global
//! name table. Binary names such as `java.lang.Object` or
//! `com.example.Outer$Inner` are compared and hashed as integers once
//! interned.
//!
//! # Known names
//!
//! The names of the well-known types, the array members and the unresolved
//! marker are interned when the table is first touched, at the reserved
//! indices exposed as constants below:
//!
//! ```
//! use jsym_util::name::{self, Name};
//!
//! assert_eq!(name::JAVA_LANG_OBJECT.as_str(), "java.lang.Object");
//! assert_eq!(Name::intern("int"), name::INT);
//! assert!(name::INT.is_known());
//! ```
//!
//! # Thread Safety
//!
//! Interning and lookup are safe from any thread. Interned strings live for
//! the rest of the process.

mod interner;

pub(crate) use interner::KNOWN_NAMES;
pub use interner::{NameTable, NAME_TABLE};

use std::fmt;

/// Statistics about the name interner for profiling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InternerStats {
    /// Number of interned names
    pub count: usize,
    /// Number of lookups that found an existing entry
    pub hits: usize,
    /// Number of lookups that allocated a new entry
    pub misses: usize,
}

impl InternerStats {
    /// Total number of intern operations
    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }

    /// Calculate the hit rate (hits / (hits + misses))
    ///
    /// Returns 0.0 if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_operations();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// An interned name
///
/// Two names are equal exactly when their strings are equal. Ordering follows
/// interning order, not lexical order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    pub(crate) index: u32,
}

impl Name {
    /// Intern a string, returning its name
    #[inline]
    pub fn intern(string: &str) -> Self {
        NAME_TABLE.intern(string)
    }

    /// Get the string this name was interned from
    #[inline]
    pub fn as_str(&self) -> &'static str {
        // indices only come out of the table, so the lookup cannot miss
        NAME_TABLE.get(*self).unwrap_or("")
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == EMPTY
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Returns true for the names interned at table initialization
    #[inline]
    pub fn is_known(&self) -> bool {
        (self.index as usize) < KNOWN_NAMES.len()
    }

    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// Current interner statistics
    pub fn stats() -> InternerStats {
        NAME_TABLE.stats()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(string: &str) -> Self {
        Name::intern(string)
    }
}

// ============================================================================
// KNOWN NAMES
// ============================================================================
//
// Must match the order of `KNOWN_NAMES` in interner.rs.

/// Marker name carried by the shared unresolved class symbol
pub const UNRESOLVED_MARKER: Name = Name { index: 0 };
pub const JAVA_LANG_OBJECT: Name = Name { index: 1 };
pub const JAVA_LANG_CLASS: Name = Name { index: 2 };
pub const JAVA_LANG_ITERABLE: Name = Name { index: 3 };
pub const JAVA_LANG_ENUM: Name = Name { index: 4 };
pub const JAVA_LANG_STRING: Name = Name { index: 5 };
pub const JAVA_LANG_CLONEABLE: Name = Name { index: 6 };
pub const JAVA_IO_SERIALIZABLE: Name = Name { index: 7 };

// ----------------------------------------------------------------------------
// Primitives
// ----------------------------------------------------------------------------

pub const BOOLEAN: Name = Name { index: 8 };
pub const BYTE: Name = Name { index: 9 };
pub const CHAR: Name = Name { index: 10 };
pub const DOUBLE: Name = Name { index: 11 };
pub const FLOAT: Name = Name { index: 12 };
pub const INT: Name = Name { index: 13 };
pub const LONG: Name = Name { index: 14 };
pub const SHORT: Name = Name { index: 15 };
pub const VOID: Name = Name { index: 16 };

// ----------------------------------------------------------------------------
// Primitive wrappers
// ----------------------------------------------------------------------------

pub const JAVA_LANG_BOOLEAN: Name = Name { index: 17 };
pub const JAVA_LANG_BYTE: Name = Name { index: 18 };
pub const JAVA_LANG_CHARACTER: Name = Name { index: 19 };
pub const JAVA_LANG_DOUBLE: Name = Name { index: 20 };
pub const JAVA_LANG_FLOAT: Name = Name { index: 21 };
pub const JAVA_LANG_INTEGER: Name = Name { index: 22 };
pub const JAVA_LANG_LONG: Name = Name { index: 23 };
pub const JAVA_LANG_SHORT: Name = Name { index: 24 };
pub const JAVA_LANG_VOID: Name = Name { index: 25 };

// ----------------------------------------------------------------------------
// Miscellaneous
// ----------------------------------------------------------------------------

/// The implicitly imported package
pub const JAVA_LANG: Name = Name { index: 26 };
/// Array `length` field
pub const LENGTH: Name = Name { index: 27 };
/// Array `clone()` method
pub const CLONE: Name = Name { index: 28 };
/// The empty name (default package, anonymous simple name)
pub const EMPTY: Name = Name { index: 29 };
