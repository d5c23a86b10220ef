//! Coordination Module
//!
//! Every node runs the same coordinator: whichever node receives a client
//! request orchestrates it for the whole replica set.
//!
//! ## Request Flow
//! 1. **Placement**: The ring maps the key to up to `REPLICA_FACTOR` nodes.
//! 2. **Fan-out**: The coordinator applies the sub-operation locally when it
//!    is part of the replica set and dispatches internal requests to the
//!    remaining replicas through the peer transport.
//! 3. **Quorum**: Acknowledgments are counted; the client sees success only
//!    when the write (`WRITE_QUORUM`) or read (`READ_QUORUM`) threshold is
//!    met. Partial writes are never rolled back - convergence is handled by
//!    versioned last-writer-wins on every replica.
//!
//! ## Submodules
//! - **`node`**: The coordinator state machine (quorum PUT/GET, Lamport clock).
//! - **`protocol`**: HTTP API contracts shared by handlers and transport.
//! - **`transport`**: Outbound peer client with per-call timeouts.
//! - **`handlers`**: Axum handlers binding the HTTP surface to the node.

pub mod handlers;
pub mod node;
pub mod protocol;
pub mod transport;

pub use node::{Node, READ_QUORUM, REPLICA_FACTOR, WRITE_QUORUM};
