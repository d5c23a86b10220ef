//! Consistent-Hash Ring
//!
//! Maps keys to the ordered set of nodes responsible for them. Every physical
//! node is inserted as `replicas` virtual nodes spread over the 64-bit hash
//! space; a key is owned by the first virtual nodes clockwise from its hash.
//!
//! ## Determinism
//! Placement must be identical on every node regardless of startup order, so
//! the ring hashes with xxh64 (seed 0), a fixed function that is stable across
//! processes and releases. Two nodes that add the same member set always
//! agree on every replica set.

use std::collections::{HashMap, HashSet};
use xxhash_rust::xxh64::xxh64;

/// Default number of virtual nodes per physical node.
pub const VIRTUAL_NODES: usize = 100;

/// Consistent-hash ring over a static node population.
///
/// Nodes are added once at startup; the ring is effectively immutable
/// afterwards and can be shared behind an `Arc` without locking.
pub struct Ring {
    replicas: usize,
    hash_map: HashMap<u64, String>,
    keys: Vec<u64>,
}

impl Ring {
    /// Creates an empty ring with `replicas` virtual nodes per member.
    pub fn new(replicas: usize) -> Self {
        Ring {
            replicas,
            hash_map: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Inserts a physical node as `replicas` virtual nodes.
    ///
    /// Virtual node `i` hashes the concatenation of the index and the node
    /// id, so the same id always lands on the same ring positions.
    pub fn add(&mut self, node_id: &str) {
        for i in 0..self.replicas {
            let h = xxh64(format!("{}{}", i, node_id).as_bytes(), 0);
            self.keys.push(h);
            self.hash_map.insert(h, node_id.to_string());
        }
        self.keys.sort_unstable();
    }

    /// Returns up to `n` distinct node ids responsible for `key`, in ring
    /// order starting from the key's position.
    ///
    /// When the ring holds fewer than `n` distinct physical nodes the walk
    /// stops after one full pass and the shorter list is returned.
    pub fn get(&self, key: &str, n: usize) -> Vec<String> {
        if self.keys.is_empty() || n == 0 {
            return Vec::new();
        }

        let h = xxh64(key.as_bytes(), 0);
        let mut idx = self.search(h);

        let mut res = Vec::with_capacity(n);
        let mut visited = HashSet::new();

        // One full lap bounds the walk: after visiting every virtual node we
        // have seen every distinct physical node there is.
        for _ in 0..self.keys.len() {
            if res.len() == n {
                break;
            }
            let node_id = &self.hash_map[&self.keys[idx]];
            if visited.insert(node_id.clone()) {
                res.push(node_id.clone());
            }
            idx = (idx + 1) % self.keys.len();
        }

        res
    }

    /// Smallest index whose hash is >= `h`, wrapping to 0 past the end.
    fn search(&self, h: u64) -> usize {
        let idx = self.keys.partition_point(|&k| k < h);
        if idx == self.keys.len() {
            0
        } else {
            idx
        }
    }

    /// Number of virtual nodes currently on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
