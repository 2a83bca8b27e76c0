//! Transport layer (unary JSON RPC over HTTP).
//!
//! Decodes the request once, builds the per-call context from the
//! propagated deadline, and hands the call to the bound `IngestService`.

pub mod rpc;
