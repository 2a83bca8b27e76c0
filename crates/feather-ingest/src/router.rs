//! Axum router wiring.
//!
//! Two routers on two listeners: the RPC port carries the single `Ingest`
//! method, the ops port carries scrape and liveness endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use feather_core::protocol::INGEST_PATH;

use crate::{app_state::AppState, ops, transport};

pub fn build_rpc_router(state: AppState) -> Router {
    Router::new()
        .route(INGEST_PATH, post(transport::rpc::ingest_rpc))
        .layer(DefaultBodyLimit::max(transport::rpc::MAX_BODY_BYTES))
        .with_state(state)
}

pub fn build_ops_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
