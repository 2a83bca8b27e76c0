//! feather core: transport-agnostic wire contracts, status codes, and errors.
//!
//! This crate defines the request/response shapes of the `Ingest` RPC, the
//! status surface every call terminates with, and the deadline header
//! encoding. It carries no transport or runtime dependencies so both the
//! server and the client (and tests) can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input from the wire must surface as `FeatherError`/`Status`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod status;

/// Shared result type.
pub use error::{FeatherError, Result};
pub use status::{Status, StatusCode};
