use quorumkv::config::Config;
use quorumkv::coordinator::handlers::router;
use quorumkv::coordinator::Node;
use quorumkv::membership::Membership;
use quorumkv::ring::{Ring, VIRTUAL_NODES};
use quorumkv::store::{Store, FLUSH_THRESHOLD};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cfg = Config::from_env();
    tracing::info!("[{}] starting on {}", cfg.node_id, cfg.node_addr);
    if cfg.peers.is_empty() {
        tracing::info!("no peers configured, running standalone");
    } else {
        tracing::info!("peers: {:?}", cfg.peers);
    }

    // 1. Local storage engine:
    let store = Arc::new(Store::new(&cfg.data_dir, FLUSH_THRESHOLD)?);

    // 2. Placement ring over the static member set (peer host == node id):
    let mut ring = Ring::new(VIRTUAL_NODES);
    ring.add(&cfg.node_id);
    for peer_id in cfg.peer_ids() {
        ring.add(&peer_id);
    }
    let ring = Arc::new(ring);

    // 3. Cluster view, spread by background gossip:
    let membership = Arc::new(Membership::new(&cfg.node_id, &cfg.node_addr));
    let gossip = membership.clone();
    let peers = cfg.peers.clone();
    tokio::spawn(async move {
        gossip.gossip_loop(peers).await;
    });

    // 4. Coordinator + HTTP server:
    let node = Arc::new(Node::new(
        &cfg.node_id,
        &cfg.node_addr,
        ring,
        store,
        membership,
    ));

    let max_body_bytes = std::env::var("MAX_BODY_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(20 * 1024 * 1024);
    let app = router(node, max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&cfg.node_addr).await?;
    tracing::info!("listening on {}", cfg.node_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
