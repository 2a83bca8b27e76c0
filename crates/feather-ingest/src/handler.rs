//! Ingest handler: the per-call state machine.
//!
//! Start -> (cancelled? CANCELLED "Cancelled")
//!       -> Working (sleep `work_delay`, the only suspension point)
//!       -> Post-check (cancelled? CANCELLED "Cancelled mid-flight")
//!       -> Complete (Ack ok, counter +1, latency observed)
//!
//! Metrics are touched only on Complete. The token is read at most twice,
//! so a caller that gives up mid-work is noticed after the full delay.

use std::time::Duration;

use async_trait::async_trait;
use feather_core::protocol::event::{Ack, Event};
use feather_core::Status;
use tokio::time::Instant;

use crate::context::{CallContext, CancelSignal};
use crate::obs::IngestMetrics;

pub const MSG_CANCELLED: &str = "Cancelled";
pub const MSG_CANCELLED_MID_FLIGHT: &str = "Cancelled mid-flight";
pub const MSG_OK: &str = "ok";

/// The `Ingest` RPC as seen by the transport. The transport binds to this
/// trait, never to a concrete handler.
#[async_trait]
pub trait IngestService: Send + Sync {
    async fn ingest(&self, ctx: CallContext, event: Event) -> Result<Ack, Status>;
}

#[derive(Debug, Clone)]
pub struct IngestHandler {
    work_delay: Duration,
    metrics: IngestMetrics,
}

impl IngestHandler {
    pub fn new(work_delay: Duration, metrics: IngestMetrics) -> Self {
        Self { work_delay, metrics }
    }

    pub async fn handle<C: CancelSignal + ?Sized>(&self, event: &Event, token: &C) -> Result<Ack, Status> {
        let t0 = Instant::now();

        if token.is_cancelled() {
            tracing::warn!(id = %event.id, "request cancelled before start");
            return Err(Status::cancelled(MSG_CANCELLED));
        }

        tracing::info!(id = %event.id, val = event.val, ts = event.ts, "got event");

        if !self.work_delay.is_zero() {
            tokio::time::sleep(self.work_delay).await;
        }

        if token.is_cancelled() {
            tracing::warn!(id = %event.id, "request cancelled during work (deadline exceeded?)");
            return Err(Status::cancelled(MSG_CANCELLED_MID_FLIGHT));
        }

        let ack = Ack { ok: true, msg: MSG_OK.to_string() };

        self.metrics.requests.inc();
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        self.metrics.latency_ms.observe(ms);

        tracing::info!(id = %event.id, latency_ms = ms, "reply ok");
        Ok(ack)
    }
}

#[async_trait]
impl IngestService for IngestHandler {
    async fn ingest(&self, ctx: CallContext, event: Event) -> Result<Ack, Status> {
        self.handle(&event, &ctx).await
    }
}
