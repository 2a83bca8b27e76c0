//! Process metrics store for the ingest service.
//!
//! Counters and histograms are registered by name once and then updated
//! through shared `Arc` handles, so the request path never touches the
//! registry map. Every update is a relaxed atomic; a histogram's sum is an
//! `f64` kept as raw bits and advanced with a CAS loop.
//!
//! Histogram buckets are stored per bucket (one slot per upper bound plus
//! an overflow slot) and made cumulative only when rendered. Rendering
//! clones the handles out of the registry first, so a scrape never holds a
//! registry shard while formatting and never blocks writers.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use feather_core::error::{FeatherError, Result};

/// Requests that completed successfully.
pub const REQUESTS_TOTAL: &str = "ingest_requests_total";
/// End-to-end handler latency of successful requests.
pub const LATENCY_MS: &str = "ingest_latency_ms";
/// Latency bucket upper bounds in milliseconds.
pub const LATENCY_MS_BUCKETS: [f64; 11] =
    [0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0];

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Prometheus spelling of a sample value.
fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Monotonic counter.
#[derive(Debug)]
pub struct Counter {
    help: String,
    value: AtomicU64,
}

impl Counter {
    fn new(help: &str) -> Self {
        Self { help: help.to_string(), value: AtomicU64::new(0) }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} counter", name);
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

/// Fixed-bucket histogram.
#[derive(Debug)]
pub struct Histogram {
    help: String,
    bounds: Vec<f64>,
    // bounds.len() + 1 slots; the last one is the overflow ("+Inf") slot.
    buckets: Vec<AtomicU64>,
    sum_bits: AtomicU64,
    count: AtomicU64,
}

/// Point-in-time view of a histogram with cumulative bucket counts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    pub bounds: Vec<f64>,
    /// `cumulative[i]` counts observations `<= bounds[i]`.
    pub cumulative: Vec<u64>,
    /// All bucketed observations, overflow included.
    pub inf: u64,
    pub sum: f64,
    pub count: u64,
}

impl Histogram {
    fn new(help: &str, bounds: &[f64]) -> Result<Self> {
        if bounds.is_empty() {
            return Err(FeatherError::BadRequest("histogram needs at least one bucket".into()));
        }
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(FeatherError::BadRequest("histogram bounds must be finite".into()));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FeatherError::BadRequest(
                "histogram bounds must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            help: help.to_string(),
            bounds: bounds.to_vec(),
            buckets: (0..=bounds.len()).map(|_| AtomicU64::new(0)).collect(),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            count: AtomicU64::new(0),
        })
    }

    /// Record one value into the smallest bucket whose bound is `>= v`,
    /// or the overflow slot. NaN is dropped.
    pub fn observe(&self, v: f64) {
        if v.is_nan() {
            tracing::debug!("histogram observation NaN dropped");
            return;
        }
        let idx = self
            .bounds
            .iter()
            .position(|b| v <= *b)
            .unwrap_or(self.bounds.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);

        let mut cur = self.sum_bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + v).to_bits();
            match self
                .sum_bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }

        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let mut running = 0u64;
        let mut cumulative = Vec::with_capacity(self.bounds.len());
        for slot in &self.buckets[..self.bounds.len()] {
            running += slot.load(Ordering::Relaxed);
            cumulative.push(running);
        }
        let inf = running + self.buckets[self.bounds.len()].load(Ordering::Relaxed);

        HistogramSnapshot {
            bounds: self.bounds.clone(),
            cumulative,
            inf,
            sum: self.sum(),
            count: self.count(),
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let snap = self.snapshot();
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for (le, count) in snap.bounds.iter().zip(&snap.cumulative) {
            let _ = writeln!(out, "{}_bucket{{le=\"{}\"}} {}", name, le, count);
        }
        let _ = writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", name, snap.inf);
        let _ = writeln!(out, "{}_sum {}", name, fmt_value(snap.sum));
        let _ = writeln!(out, "{}_count {}", name, snap.count);
    }
}

#[derive(Debug, Clone)]
enum Metric {
    Counter(Arc<Counter>),
    Histogram(Arc<Histogram>),
}

/// Name-keyed registry of counters and histograms. Entries live for the
/// lifetime of the store; there is no removal.
#[derive(Debug, Default)]
pub struct MetricsStore {
    metrics: DashMap<String, Metric>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or fetch) a counter.
    pub fn register_counter(&self, name: &str, help: &str) -> Result<Arc<Counter>> {
        if !valid_name(name) {
            return Err(FeatherError::BadRequest(format!("invalid metric name: {name}")));
        }
        let entry = self
            .metrics
            .entry(name.to_string())
            .or_insert_with(|| Metric::Counter(Arc::new(Counter::new(help))));
        match entry.value() {
            Metric::Counter(c) => Ok(Arc::clone(c)),
            Metric::Histogram(_) => Err(FeatherError::BadRequest(format!(
                "metric {name} already registered as histogram"
            ))),
        }
    }

    /// Register (or fetch) a histogram. An existing histogram is returned
    /// as is, whatever `bounds` were passed.
    pub fn register_histogram(&self, name: &str, help: &str, bounds: &[f64]) -> Result<Arc<Histogram>> {
        if !valid_name(name) {
            return Err(FeatherError::BadRequest(format!("invalid metric name: {name}")));
        }
        // Validate before taking the shard lock.
        let fresh = Histogram::new(help, bounds)?;
        let entry = self
            .metrics
            .entry(name.to_string())
            .or_insert_with(|| Metric::Histogram(Arc::new(fresh)));
        match entry.value() {
            Metric::Histogram(h) => Ok(Arc::clone(h)),
            Metric::Counter(_) => Err(FeatherError::BadRequest(format!(
                "metric {name} already registered as counter"
            ))),
        }
    }

    pub fn counter(&self, name: &str) -> Option<Arc<Counter>> {
        match self.metrics.get(name)?.value() {
            Metric::Counter(c) => Some(Arc::clone(c)),
            Metric::Histogram(_) => None,
        }
    }

    pub fn histogram(&self, name: &str) -> Option<Arc<Histogram>> {
        match self.metrics.get(name)?.value() {
            Metric::Histogram(h) => Some(Arc::clone(h)),
            Metric::Counter(_) => None,
        }
    }

    /// Add one to a registered counter. Returns false if no counter has that name.
    pub fn increment_counter(&self, name: &str) -> bool {
        match self.counter(name) {
            Some(c) => {
                c.inc();
                true
            }
            None => false,
        }
    }

    /// Observe into a registered histogram. Returns false if no histogram has that name.
    pub fn observe_histogram(&self, name: &str, v: f64) -> bool {
        match self.histogram(name) {
            Some(h) => {
                h.observe(v);
                true
            }
            None => false,
        }
    }

    /// Render every metric in Prometheus text exposition format, sorted by name.
    pub fn snapshot(&self) -> String {
        let mut all: Vec<(String, Metric)> = self
            .metrics
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (name, metric) in &all {
            match metric {
                Metric::Counter(c) => c.render(name, &mut out),
                Metric::Histogram(h) => h.render(name, &mut out),
            }
        }
        out
    }
}

/// Handles to the two metrics the ingest handler records.
#[derive(Debug, Clone)]
pub struct IngestMetrics {
    pub requests: Arc<Counter>,
    pub latency_ms: Arc<Histogram>,
}

impl IngestMetrics {
    pub fn register(store: &MetricsStore) -> Result<Self> {
        Ok(Self {
            requests: store.register_counter(REQUESTS_TOTAL, "Total number of ingest RPCs received")?,
            latency_ms: store.register_histogram(
                LATENCY_MS,
                "Ingest RPC latency in milliseconds",
                &LATENCY_MS_BUCKETS,
            )?,
        })
    }
}
