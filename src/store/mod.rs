//! Local Storage Engine
//!
//! Implements the single-node durable key-value engine behind every replica.
//!
//! ## Core Concepts
//! - **Memtable**: Writes land in an in-memory table guarded by a
//!   reader-writer lock; a write only replaces an existing entry when its
//!   version is strictly greater (last-writer-wins).
//! - **SSTables**: When the memtable reaches the flush threshold it is
//!   snapshotted, sorted by key, and written as one JSON line per entry to an
//!   immutable file named by a nanosecond timestamp. Files are write-once and
//!   never deleted; newest file wins on reads.
//! - **Durability**: The memtable is volatile and flushes are not fsynced.
//!   Durability comes from the replica factor, not from disk sync.

pub mod engine;
pub mod types;

pub use engine::{Store, StoreError, FLUSH_THRESHOLD};
pub use types::{Entry, Version};
