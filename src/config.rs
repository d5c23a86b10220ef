//! Node configuration.
//!
//! Everything a node needs to join the cluster comes from the environment:
//! its own identity, its listen address, the static peer list, and the
//! SSTable directory. Peers follow the deployment convention that the host
//! portion of a peer address equals its node id.

use std::path::PathBuf;

/// Runtime configuration for a single node, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity of this node; must match the id peers use for us in `PEERS`.
    pub node_id: String,
    /// `host:port` the HTTP server binds to.
    pub node_addr: String,
    /// Other cluster members as `host:port`, host doubling as node id.
    pub peers: Vec<String>,
    /// Directory that receives SSTable files.
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads `NODE_ID`, `NODE_ADDR`, `PEERS` and `DATA_DIR` from the
    /// environment, falling back to single-node defaults.
    pub fn from_env() -> Self {
        let peers = std::env::var("PEERS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Config {
            node_id: env_or("NODE_ID", "node1"),
            node_addr: env_or("NODE_ADDR", "localhost:8080"),
            peers,
            data_dir: PathBuf::from(env_or("DATA_DIR", "/data")),
        }
    }

    /// Node ids of the configured peers (the host portion of each address).
    pub fn peer_ids(&self) -> Vec<String> {
        self.peers
            .iter()
            .map(|p| p.split(':').next().unwrap_or(p).to_string())
            .collect()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
