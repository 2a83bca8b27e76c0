//! Observability: in-process metrics store and tracing setup.
//!
//! Metrics are kept as atomics behind a name-keyed registry and rendered in
//! Prometheus text format by the `/metrics` handler on the ops listener.

pub mod logging;
pub mod metrics;

pub use metrics::{Counter, Histogram, IngestMetrics, MetricsStore};
