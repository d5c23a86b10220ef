//! Coordinator Network Protocol
//!
//! Defines the endpoints and Data Transfer Objects used between nodes and
//! towards clients. All bodies are JSON; byte values travel base64-encoded.

use crate::store::types::base64_bytes;
use crate::store::Version;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Internal endpoint peers use to replicate a single entry (POST) or read a
/// local value without fan-out (GET). The key rides in the query string.
pub const ENDPOINT_INTERNAL_KV: &str = "/internal/kv";
/// Endpoint receiving pushed membership state.
pub const ENDPOINT_GOSSIP: &str = "/gossip";

// --- Data Transfer Objects ---

/// Body of an internal replication PUT: the value plus the version the
/// coordinator assigned. The key is a query parameter.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplicateRequest {
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
    pub version: Version,
}

/// Successful read reply, both for clients and for internal GETs.
#[derive(Debug, Serialize, Deserialize)]
pub struct KvResponse {
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
    pub version: Version,
}

/// Query string carrying the key for internal endpoints.
#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub key: String,
}
