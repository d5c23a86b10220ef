//! The coordinator state machine.

use crate::coordinator::transport::PeerClient;
use crate::membership::Membership;
use crate::ring::Ring;
use crate::store::{Entry, Store, Version};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Replicas targeted per key.
pub const REPLICA_FACTOR: usize = 3;
/// Acknowledgments required for a client write to succeed.
pub const WRITE_QUORUM: usize = 2;
/// Acknowledgments required for a client read to succeed.
pub const READ_QUORUM: usize = 2;

/// One node's coordinator: composes the ring, the local store, the cluster
/// view and the peer transport into quorum reads and writes.
///
/// The Lamport counter is bumped once per coordinated write; paired with the
/// node id it yields this node's slice of the global version order.
pub struct Node {
    id: String,
    addr: String,
    counter: AtomicU64,
    ring: Arc<Ring>,
    store: Arc<Store>,
    membership: Arc<Membership>,
    peers: PeerClient,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        addr: impl Into<String>,
        ring: Arc<Ring>,
        store: Arc<Store>,
        membership: Arc<Membership>,
    ) -> Self {
        Node {
            id: id.into(),
            addr: addr.into(),
            counter: AtomicU64::new(0),
            ring,
            store,
            membership,
            peers: PeerClient::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Allocates the version for a new coordinated write.
    fn next_version(&self) -> Version {
        Version::new(self.counter.fetch_add(1, Ordering::SeqCst) + 1, self.id.clone())
    }

    /// Coordinates a client write. Returns whether the write quorum was met.
    ///
    /// Replicas are attempted in ring order: the local store when this node
    /// is in the replica set, peers through the transport otherwise. A local
    /// put that loses the version race is not an acknowledgment, so retrying
    /// an older write can never reach quorum. Nothing is rolled back when
    /// the quorum fails - replicas that took the write keep it.
    pub async fn put(&self, key: String, value: Vec<u8>) -> bool {
        let entry = Entry::new(key.clone(), value, self.next_version());
        let replicas = self.ring.get(&key, REPLICA_FACTOR);

        let mut acks = 0;
        for node_id in &replicas {
            if node_id == &self.id {
                if self.store.put(entry.clone()) {
                    acks += 1;
                }
                continue;
            }

            let Some(addr) = self.membership.lookup(node_id) else {
                tracing::debug!("no address for replica {}, skipping", node_id);
                continue;
            };

            if self.peers.send_put(&addr, &entry).await {
                acks += 1;
            }
        }

        tracing::debug!("put {} acked by {}/{} replicas", entry.key, acks, replicas.len());
        acks >= WRITE_QUORUM
    }

    /// Coordinates a client read. Returns the highest-versioned entry when
    /// the read quorum was met.
    ///
    /// Replicas whose address is unknown fall back to the local store, like
    /// the local replica itself. The first hit seeds the winner; later hits
    /// replace it only with a strictly greater version. Stale replicas are
    /// not repaired.
    pub async fn get(&self, key: &str) -> Option<Entry> {
        let replicas = self.ring.get(key, REPLICA_FACTOR);

        let mut winner: Option<Entry> = None;
        let mut acks = 0;
        for node_id in &replicas {
            let remote_addr = if node_id == &self.id {
                None
            } else {
                self.membership.lookup(node_id)
            };

            let found = match remote_addr {
                Some(addr) => self.peers.send_get(&addr, key).await,
                None => self.store.get(key),
            };

            if let Some(entry) = found {
                let newer = winner
                    .as_ref()
                    .map_or(true, |w| entry.version > w.version);
                if newer {
                    winner = Some(entry);
                }
                acks += 1;
            }
        }

        if acks >= READ_QUORUM {
            winner
        } else {
            tracing::debug!("get {} missed read quorum: {} acks", key, acks);
            None
        }
    }

    /// Applies a replication request from a peer straight to the local
    /// store. Returns whether the entry's version won. No fan-out happens
    /// here - the sending coordinator owns the quorum.
    pub fn apply_replica(&self, entry: Entry) -> bool {
        self.store.put(entry)
    }
}
