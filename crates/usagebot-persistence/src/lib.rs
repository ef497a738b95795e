//! Snapshot persistence for the VPN usage bot.
//!
//! The consolidated usage snapshot lives in a single JSON file written by
//! exactly one writer (the periodic collector) and read by any number of
//! concurrent lookups. Writes go through a temp-file-then-rename sequence
//! so a reader never observes a partially written snapshot.

pub mod atomic;
pub mod error;
pub mod store;

pub use error::{PersistenceError, Result};
pub use store::{LookupOutcome, SnapshotStore};
