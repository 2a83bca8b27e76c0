//! Protocol modules for the `Ingest` RPC.
//!
//! - `event`: request/response messages and the reply envelope (JSON).
//! - `timeout`: the deadline header carried alongside a call.
//!
//! All decoders are panic-free: malformed input is reported as
//! `FeatherError` so the service stays up under bad traffic.

pub mod event;
pub mod timeout;

/// Path of the single RPC method.
pub const INGEST_PATH: &str = "/feather.Ingest/Ingest";

/// Content type of request and reply bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";
