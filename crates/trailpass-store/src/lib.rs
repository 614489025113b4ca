//! # TrailPass Store
//!
//! The shared mutable heart of the service: a volatile, in-process store of
//! check-in events keyed by wallet address, newest first. Request handlers
//! append through it; background jobs read aggregates from it. Nothing is
//! ever persisted — the store is created empty at startup and discarded at
//! shutdown.
//!
//! ## Guarantees
//! - A wallet's sequence is append-only at the head; records are immutable.
//! - Transaction ids are unique across the whole store lifetime.
//! - `history` returns an owned snapshot, never a view into live state.
//! - Appends to different wallets do not serialize against each other
//!   beyond brief map/id bookkeeping.

pub mod catalog;
pub mod memory;
pub mod record;

pub use catalog::{Trail, trails};
pub use memory::{CheckInStore, MemoryStore, StoreStats};
pub use record::{CheckInRecord, Difficulty, NewCheckIn};
