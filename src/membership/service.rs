//! Membership state handle and the background gossip loop.

use crate::coordinator::transport::PeerClient;
use crate::membership::types::State;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const GOSSIP_INTERVAL: Duration = Duration::from_secs(2);

/// Thread-safe owner of this node's cluster view.
///
/// One reader-writer lock guards the whole state: merges are exclusive so
/// the nodes map and timestamp move together; lookups and snapshots for
/// outbound gossip take the shared lock.
pub struct Membership {
    self_id: String,
    self_addr: String,
    state: RwLock<State>,
}

impl Membership {
    /// Initializes the view with the single binding self -> `self_addr`.
    pub fn new(self_id: impl Into<String>, self_addr: impl Into<String>) -> Self {
        let self_id = self_id.into();
        let self_addr = self_addr.into();

        let mut nodes = HashMap::new();
        nodes.insert(self_id.clone(), self_addr.clone());

        Membership {
            self_id,
            self_addr,
            state: RwLock::new(State {
                nodes,
                ts: now_nanos(),
            }),
        }
    }

    /// Integrates `remote` when it is strictly newer, overwriting local
    /// bindings wholesale.
    ///
    /// The local node's own binding is re-asserted afterwards: a peer
    /// shipping a stale address for us must not make us forget ourselves.
    pub fn merge(&self, remote: &State) {
        let mut state = self.state.write();

        if remote.ts <= state.ts {
            return;
        }

        for (id, addr) in &remote.nodes {
            state.nodes.insert(id.clone(), addr.clone());
        }
        state.ts = remote.ts;
        state
            .nodes
            .insert(self.self_id.clone(), self.self_addr.clone());
    }

    /// Address of `node_id` in the current view, if known.
    pub fn lookup(&self, node_id: &str) -> Option<String> {
        self.state.read().nodes.get(node_id).cloned()
    }

    /// Clone of the current view, for outbound gossip and stats.
    pub fn snapshot(&self) -> State {
        self.state.read().clone()
    }

    /// Pushes the current view to every peer forever, one round per tick.
    ///
    /// Failures are expected while peers boot or restart; they are logged at
    /// debug and retried implicitly on the next round. The loop only ends
    /// when its task is aborted at shutdown.
    pub async fn gossip_loop(self: Arc<Self>, peers: Vec<String>) {
        let transport = PeerClient::new();
        let mut interval = tokio::time::interval(GOSSIP_INTERVAL);

        loop {
            interval.tick().await;

            let state = self.snapshot();
            for peer in &peers {
                transport.gossip(peer, &state).await;
            }
        }
    }
}

fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or_default()
}
