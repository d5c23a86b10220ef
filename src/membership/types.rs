//! Gossip wire state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The gossiped cluster view: node-id to address bindings plus the logical
/// timestamp that orders competing views.
///
/// This struct is exactly what travels in a `/gossip` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    /// nodeID -> `host:port`
    pub nodes: HashMap<String, String>,
    /// Unix nanoseconds at creation; higher wins on merge.
    pub ts: i64,
}
