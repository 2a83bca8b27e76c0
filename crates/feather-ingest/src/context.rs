//! Per-call context: the caller's cancellation signal.
//!
//! A `CallContext` reports cancelled once either its token is cancelled
//! (connection dropped, explicit abort) or its propagated deadline has
//! passed. The state only ever moves from active to cancelled.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Capability the handler polls at its checkpoints.
pub trait CancelSignal: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context without a deadline; only an explicit cancel ends it.
    pub fn new() -> Self {
        Self { token: CancellationToken::new(), deadline: None }
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_timeout(Some(timeout))
    }

    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        let deadline = timeout.map(|t| Instant::now() + t);
        Self { token: CancellationToken::new(), deadline }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Guard that cancels this context when dropped unless disarmed.
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal for CallContext {
    fn is_cancelled(&self) -> bool {
        if self.token.is_cancelled() {
            return true;
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => {
                // Latch so later observers agree without re-reading the clock.
                self.token.cancel();
                true
            }
            _ => false,
        }
    }
}
