//! Storage data model: versions and entries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Per-key write token defining a total order on updates.
///
/// Acts as a Lamport clock per node: counters are bumped locally and never
/// synchronized, so concurrent writes at different nodes tie-break on the
/// node id. The default `{0, ""}` is the absent sentinel; every real write
/// dominates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub counter: u64,
    pub node_id: String,
}

impl Version {
    pub fn new(counter: u64, node_id: impl Into<String>) -> Self {
        Version {
            counter,
            node_id: node_id.into(),
        }
    }
}

impl Ord for Version {
    /// Counter first, node id lexicographically as tie-break.
    fn cmp(&self, other: &Self) -> Ordering {
        self.counter
            .cmp(&other.counter)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A stored key-value pair together with its version.
///
/// This is also the on-disk SSTable line format: the `value` field carries
/// raw bytes as a base64 string on the wire, matching what peers and clients
/// see in JSON bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
    pub version: Version,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: Vec<u8>, version: Version) -> Self {
        Entry {
            key: key.into(),
            value,
            version,
        }
    }
}

/// Serde adapter encoding byte values as base64 strings in JSON.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
