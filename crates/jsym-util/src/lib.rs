//! jsym-util - Foundation Types for the Symbol Core
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! Small, dependency-light building blocks shared by the symbol crate:
//!
//! 1. INTERNED NAMES
//!    Binary and canonical type names (`java.lang.Object`, `int`,
//!    `com.example.Outer$Inner`) are repeated across every resolved class,
//!    every member signature and every unresolved reference. They are interned
//!    once into a global table and handled as 4-byte [`Name`] values, so name
//!    equality and hashing are integer operations.
//!
//! 2. FACTORY HANDLES
//!    Every symbol remembers which factory produced it. That relation is a
//!    non-owning handle ([`FactoryId`]) rather than a pointer, so symbols stay
//!    `'static`, `Send + Sync` and free of reference cycles.
//
// ============================================================================
// NAME TABLE LAYOUT
// ============================================================================
//
// ```
// Name Table (Global):
// ┌──────────────────┬────────────────┬─────┬──────────────┬──────────────┐
// │ 0 /*unresolved*/ │ 1 java.lang... │ ... │ 30 com.acme  │ 31 ...       │
// └──────────────────┴────────────────┴─────┴──────────────┴──────────────┘
//   ^ reserved (known names)                  ^ interned on demand
//
// Name (4 bytes):
// ┌──────────────┐
// │    index     │  u32: slot in the reverse table
// └──────────────┘
// ```
//
// Lookup by string goes through a DashMap (text -> index); lookup by index
// goes through an append-only vector guarded by a parking_lot RwLock.

pub mod factory_id;
pub mod name;

pub use factory_id::{FactoryId, FactoryIdGenerator};
pub use name::{InternerStats, Name};

static_assertions::assert_eq_size!(Name, u32);
static_assertions::assert_impl_all!(Name: Send, Sync, Copy);
static_assertions::assert_impl_all!(FactoryId: Send, Sync, Copy);
