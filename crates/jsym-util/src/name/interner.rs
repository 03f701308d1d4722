//! Name interner backed by DashMap for concurrent lookups.
//!
//! - text -> index: `DashMap` hashed with `ahash`
//! - index -> text: append-only vector behind a `parking_lot::RwLock`
//!
//! New entries are published under the vector's write lock, so two threads
//! racing on the same unseen string agree on a single index.

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::{InternerStats, Name};

/// Names interned at reserved indices, in the order of the constants in
/// `name/mod.rs`.
pub(crate) const KNOWN_NAMES: &[&str] = &[
    "/*unresolved*/",
    "java.lang.Object",
    "java.lang.Class",
    "java.lang.Iterable",
    "java.lang.Enum",
    "java.lang.String",
    "java.lang.Cloneable",
    "java.io.Serializable",
    // primitives
    "boolean",
    "byte",
    "char",
    "double",
    "float",
    "int",
    "long",
    "short",
    "void",
    // wrappers
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Character",
    "java.lang.Double",
    "java.lang.Float",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Short",
    "java.lang.Void",
    // misc
    "java.lang",
    "length",
    "clone",
    "",
];

/// Global name table
pub static NAME_TABLE: LazyLock<NameTable> = LazyLock::new(|| {
    let table = NameTable::new();
    table.initialize_known_names();
    table
});

/// Thread-safe string table
pub struct NameTable {
    map: DashMap<&'static str, u32, RandomState>,
    strings: RwLock<Vec<&'static str>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl NameTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: RwLock::new(Vec::with_capacity(256)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Must run exactly once, before the table is shared.
    fn initialize_known_names(&self) {
        let mut strings = self.strings.write();
        for known in KNOWN_NAMES {
            let index = strings.len() as u32;
            strings.push(known);
            self.map.insert(known, index);
        }
    }

    /// Intern a string, returning its name
    pub fn intern(&self, string: &str) -> Name {
        if let Some(index) = self.map.get(string) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Name { index: *index };
        }

        let mut strings = self.strings.write();

        // Another thread may have published it while we waited for the lock
        if let Some(index) = self.map.get(string) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Name { index: *index };
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = u32::try_from(strings.len()).unwrap_or(u32::MAX);
        strings.push(interned);
        self.map.insert(interned, index);
        Name { index }
    }

    /// Look up an already interned string without allocating
    pub fn lookup(&self, string: &str) -> Option<Name> {
        self.map.get(string).map(|index| Name { index: *index })
    }

    /// Get the string for a name
    pub fn get(&self, name: Name) -> Option<&'static str> {
        self.strings.read().get(name.index as usize).copied()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.map.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_intern_same_string() {
        let a = NAME_TABLE.intern("hello.World");
        let b = NAME_TABLE.intern("hello.World");
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_string() {
        let name = NAME_TABLE.intern("test.TableEntry");
        assert_eq!(NAME_TABLE.get(name), Some("test.TableEntry"));
    }

    #[test]
    fn test_lookup_does_not_intern() {
        assert!(NAME_TABLE.lookup("never.interned.Anywhere$42").is_none());
        let name = NAME_TABLE.intern("now.interned.Somewhere");
        assert_eq!(NAME_TABLE.lookup("now.interned.Somewhere"), Some(name));
    }

    #[test]
    fn test_out_of_range_index() {
        assert_eq!(NAME_TABLE.get(Name { index: u32::MAX - 1 }), None);
    }

    #[test]
    fn test_unicode_strings() {
        for text in ["名前", "Größe", "🦀", "Привет"] {
            let name = NAME_TABLE.intern(text);
            assert_eq!(NAME_TABLE.get(name), Some(text));
        }
    }

    #[test]
    fn test_concurrent_distinct_strings() {
        let handles: Vec<_> = (0..20)
            .map(|i| thread::spawn(move || NAME_TABLE.intern(&format!("thread.Type{}", i))))
            .collect();

        let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                assert_ne!(names[i], names[j]);
            }
        }
    }

    #[test]
    fn test_race_on_unseen_string() {
        const THREADS: usize = 16;

        for round in 0..20 {
            let text = format!("race.Round{}", round);
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let text = text.clone();
                    thread::spawn(move || NAME_TABLE.intern(&text))
                })
                .collect();

            let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert!(names.iter().all(|n| *n == names[0]));
            assert_eq!(NAME_TABLE.get(names[0]), Some(text.as_str()));
        }
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NameTable>();
    }
}
