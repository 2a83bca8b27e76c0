//! Top-level facade crate for feather.
//!
//! Re-exports the wire contracts and the ingest service so users can depend on a single crate.

pub mod core {
    pub use feather_core::*;
}

pub mod ingest {
    pub use feather_ingest::*;
}
