use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

/// Non-owning handle to the factory that produced a symbol
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactoryId(pub u32);

impl FactoryId {
    /// Origin of the process-wide well-known symbols
    pub const BUILTIN: FactoryId = FactoryId(u32::MAX);

    pub fn is_builtin(self) -> bool {
        self == Self::BUILTIN
    }

    /// Allocate a fresh id from the process-wide generator
    pub fn fresh() -> FactoryId {
        GLOBAL_GENERATOR.next()
    }
}

impl fmt::Debug for FactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            f.write_str("FactoryId(builtin)")
        } else {
            write!(f, "FactoryId({})", self.0)
        }
    }
}

static GLOBAL_GENERATOR: LazyLock<FactoryIdGenerator> = LazyLock::new(FactoryIdGenerator::new);

/// Generator for unique FactoryIds
pub struct FactoryIdGenerator {
    counter: AtomicU32,
}

impl FactoryIdGenerator {
    /// Create a new generator starting from 0
    pub fn new() -> Self {
        Self {
            counter: AtomicU32::new(0),
        }
    }

    /// Generate a new unique FactoryId
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted; `u32::MAX` is reserved for
    /// [`FactoryId::BUILTIN`].
    pub fn next(&self) -> FactoryId {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        if id == u32::MAX {
            panic!("FactoryId overflow: too many symbol factories created");
        }
        FactoryId(id)
    }
}

impl Default for FactoryIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
