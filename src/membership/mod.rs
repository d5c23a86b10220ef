//! Membership & Gossip Module
//!
//! Maintains each node's view of the cluster: a map from node id to network
//! address tagged with a logical timestamp.
//!
//! ## Core Mechanisms
//! - **Push Gossip**: Every node periodically POSTs its serialized view to
//!   every configured peer. Send failures are dropped; the next tick retries.
//! - **Last-Writer-Wins Merge**: An incoming view replaces the local one only
//!   when its timestamp is strictly newer, so two partitioned views heal to
//!   whichever map carries the larger timestamp. The local node's own binding
//!   always survives a merge.
//!
//! The member set is fixed at launch; gossip only propagates addresses, never
//! ring membership.

pub mod service;
pub mod types;

pub use service::Membership;
pub use types::State;

#[cfg(test)]
mod tests;
