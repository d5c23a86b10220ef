//! Replicated Key-Value Store Library
//!
//! This library crate defines the core modules of an eventually consistent,
//! Dynamo-style key-value store. It serves as the foundation for the node
//! binary (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems plus wiring:
//!
//! - **`ring`**: The placement layer. A consistent-hash ring over a 64-bit
//!   hash space maps every key to an ordered set of replica nodes. All nodes
//!   compute identical placement independently.
//! - **`store`**: The single-node storage engine. An in-memory memtable backed
//!   by immutable, sorted on-disk tables (SSTables), with per-entry versions
//!   for last-writer-wins conflict resolution.
//! - **`membership`**: The cluster view. A gossip protocol periodically pushes
//!   the local node-id to address map to peers; views merge by logical
//!   timestamp so partitioned nodes converge on the newest map.
//! - **`coordinator`**: The request layer. Any node coordinates client PUT/GET
//!   by fanning sub-operations out to the replica set and applying quorum
//!   arithmetic over the acknowledgments.
//! - **`config`**: Environment-derived node identity and cluster topology.

pub mod config;
pub mod coordinator;
pub mod membership;
pub mod ring;
pub mod store;
