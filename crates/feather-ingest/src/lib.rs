//! feather ingest service library.
//!
//! This crate wires the metrics store, the ingest handler, the RPC and ops
//! transports, and the client caller into one service stack. It is consumed
//! by the `ingest-server` / `ingest-client` binaries and by integration tests.

pub mod app_state;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod handler;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
pub mod transport;
