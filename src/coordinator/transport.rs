//! Outbound peer transport.
//!
//! A thin client over HTTP that carries the three internal message kinds:
//! replicate-put, replica-read and gossip-push. Every call has a bounded
//! timeout; a slow or dead peer simply yields no acknowledgment and the
//! coordinator moves on. Calls are never retried within one client request.

use crate::coordinator::protocol::{
    KvResponse, ReplicateRequest, ENDPOINT_GOSSIP, ENDPOINT_INTERNAL_KV,
};
use crate::membership::State;
use crate::store::Entry;
use std::time::Duration;

/// Per-call timeout for internal replication and read requests.
const PEER_TIMEOUT: Duration = Duration::from_secs(1);
/// Per-call timeout for gossip pushes.
const GOSSIP_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for internal peer requests, shared by all handler tasks.
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new() -> Self {
        PeerClient {
            http: reqwest::Client::new(),
        }
    }

    /// Replicates `entry` to the peer at `addr`.
    ///
    /// Both 201 (stored) and 200 (peer already held an equal or newer
    /// version) acknowledge the write: either way the peer has at least
    /// this version.
    pub async fn send_put(&self, addr: &str, entry: &Entry) -> bool {
        let url = format!("http://{}{}", addr, ENDPOINT_INTERNAL_KV);
        let body = ReplicateRequest {
            value: entry.value.clone(),
            version: entry.version.clone(),
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", entry.key.as_str())])
            .json(&body)
            .timeout(PEER_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => {
                resp.status() == reqwest::StatusCode::CREATED
                    || resp.status() == reqwest::StatusCode::OK
            }
            Err(e) => {
                tracing::warn!("replication to {} failed for {}: {}", addr, entry.key, e);
                false
            }
        }
    }

    /// Reads `key` from the local store of the peer at `addr`.
    ///
    /// Returns `None` on any transport error, non-200 status or unparseable
    /// body - all indistinguishable from a missing key to the coordinator.
    pub async fn send_get(&self, addr: &str, key: &str) -> Option<Entry> {
        let url = format!("http://{}{}", addr, ENDPOINT_INTERNAL_KV);

        let response = self
            .http
            .get(&url)
            .query(&[("key", key)])
            .timeout(PEER_TIMEOUT)
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!("replica read from {} failed for {}: {}", addr, key, e);
                return None;
            }
        };

        if resp.status() != reqwest::StatusCode::OK {
            return None;
        }

        match resp.json::<KvResponse>().await {
            Ok(body) => Some(Entry::new(key, body.value, body.version)),
            Err(e) => {
                tracing::debug!("unparseable replica read from {}: {}", addr, e);
                None
            }
        }
    }

    /// Pushes a membership view to the peer at `addr`.
    ///
    /// Fire-and-forget: a failed push is logged and dropped, the next gossip
    /// round retries. Returns whether the peer accepted the push.
    pub async fn gossip(&self, addr: &str, state: &State) -> bool {
        let url = format!("http://{}{}", addr, ENDPOINT_GOSSIP);

        let response = self
            .http
            .post(&url)
            .json(state)
            .timeout(GOSSIP_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => resp.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::debug!("gossip to {} failed: {}", addr, e);
                false
            }
        }
    }
}

impl Default for PeerClient {
    fn default() -> Self {
        Self::new()
    }
}
