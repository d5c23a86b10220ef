//! HTTP surface of a node.
//!
//! Translates the client API (`/kv/{key}`), the internal replication API and
//! the gossip endpoint into coordinator calls. Handlers absorb every failure
//! into a status code; nothing propagates past this boundary.

use crate::coordinator::node::Node;
use crate::coordinator::protocol::{
    KeyQuery, KvResponse, ReplicateRequest, ENDPOINT_GOSSIP, ENDPOINT_INTERNAL_KV,
};
use crate::membership::State;
use crate::store::Entry;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Extension, Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds the complete route table for one node.
pub fn router(node: Arc<Node>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/kv/{key}", put(handle_put).get(handle_get))
        .route(
            ENDPOINT_INTERNAL_KV,
            post(handle_internal_put).get(handle_internal_get),
        )
        .route(ENDPOINT_GOSSIP, post(handle_gossip))
        .route("/health/stats", get(handle_stats))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(node))
}

/// Client write: the raw body is the value, the coordinator assigns the
/// version and replicates.
pub async fn handle_put(
    Extension(node): Extension<Arc<Node>>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    if node.put(key, body.to_vec()).await {
        Ok(StatusCode::CREATED)
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, "quorum failed"))
    }
}

/// Client read: replies with the quorum winner's value and version.
///
/// A key that no responding replica holds fails the same way an unreachable
/// replica set does - the coordinator cannot tell the two apart.
pub async fn handle_get(
    Extension(node): Extension<Arc<Node>>,
    Path(key): Path<String>,
) -> Result<Json<KvResponse>, (StatusCode, &'static str)> {
    match node.get(&key).await {
        Some(entry) => Ok(Json(KvResponse {
            value: entry.value,
            version: entry.version,
        })),
        None => Err((StatusCode::SERVICE_UNAVAILABLE, "quorum failed")),
    }
}

/// Internal replication write from a peer coordinator.
///
/// 201 when the version won, 200 when the local copy is already equal or
/// newer. Both tell the sender this node holds at least that version.
pub async fn handle_internal_put(
    Extension(node): Extension<Arc<Node>>,
    query: Result<Query<KeyQuery>, QueryRejection>,
    payload: Result<Json<ReplicateRequest>, JsonRejection>,
) -> StatusCode {
    let Ok(Query(query)) = query else {
        return StatusCode::BAD_REQUEST;
    };
    if query.key.is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("discarding malformed replication body: {}", rejection);
            return StatusCode::BAD_REQUEST;
        }
    };

    if node.apply_replica(Entry::new(query.key, req.value, req.version)) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Internal read: local store only, no replica fan-out.
pub async fn handle_internal_get(
    Extension(node): Extension<Arc<Node>>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<KvResponse>, StatusCode> {
    let Ok(Query(query)) = query else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if query.key.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match node.store().get(&query.key) {
        Some(entry) => Ok(Json(KvResponse {
            value: entry.value,
            version: entry.version,
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Merges a pushed membership view into the local one.
pub async fn handle_gossip(
    Extension(node): Extension<Arc<Node>>,
    payload: Result<Json<State>, JsonRejection>,
) -> StatusCode {
    match payload {
        Ok(Json(state)) => {
            node.membership().merge(&state);
            StatusCode::OK
        }
        Err(rejection) => {
            tracing::warn!("discarding malformed gossip payload: {}", rejection);
            StatusCode::BAD_REQUEST
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub node_id: String,
    pub addr: String,
    pub nodes: HashMap<String, String>,
    pub memtable_entries: usize,
    pub sstable_files: usize,
}

/// Cheap cluster-view and storage probe for operators.
pub async fn handle_stats(Extension(node): Extension<Arc<Node>>) -> Json<StatsResponse> {
    let view = node.membership().snapshot();
    Json(StatsResponse {
        node_id: node.id().to_string(),
        addr: node.addr().to_string(),
        nodes: view.nodes,
        memtable_entries: node.store().memtable_len(),
        sstable_files: node.store().sstable_count(),
    })
}
