//! Client caller for the `Ingest` RPC.
//!
//! With a deadline the client propagates it in `grpc-timeout` and enforces
//! it locally around the whole exchange, so the caller sees
//! DEADLINE_EXCEEDED even when the server never notices the cancellation.

use std::time::Duration;

use feather_core::error::{FeatherError, Result};
use feather_core::protocol::event::{decode_reply, Ack, Event};
use feather_core::protocol::{timeout, INGEST_PATH};
use feather_core::{Status, StatusCode};

pub const MSG_DEADLINE_EXCEEDED: &str = "Deadline Exceeded";

#[derive(Debug, Clone)]
pub struct IngestClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IngestClient {
    /// `target` is the RPC base URL, e.g. `http://localhost:50051`.
    pub fn new(target: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FeatherError::Transport(format!("client error: {e}")))?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", target.trim_end_matches('/'), INGEST_PATH),
        })
    }

    pub async fn call(&self, event: &Event, deadline: Option<Duration>) -> std::result::Result<Ack, Status> {
        event.validate()?;

        let exchange = self.exchange(event, deadline);
        match deadline {
            Some(d) => match tokio::time::timeout(d, exchange).await {
                Ok(res) => res,
                Err(_) => Err(Status::deadline_exceeded(MSG_DEADLINE_EXCEEDED)),
            },
            None => exchange.await,
        }
    }

    async fn exchange(&self, event: &Event, deadline: Option<Duration>) -> std::result::Result<Ack, Status> {
        let mut req = self.http.post(&self.endpoint).json(event);
        if let Some(d) = deadline {
            req = req.header(timeout::HEADER, timeout::encode(d));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Status::unavailable(format!("request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Status::internal(format!("unexpected http status: {}", resp.status())));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| Status::unavailable(format!("reading reply failed: {e}")))?;

        decode_reply(&body)?.into_result()
    }
}

/// Process exit code for a call outcome: 0 iff OK.
pub fn exit_code(res: &std::result::Result<Ack, Status>) -> u8 {
    match res {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Log a call outcome the way the CLI reports it.
pub fn report(res: &std::result::Result<Ack, Status>) {
    match res {
        Ok(ack) => tracing::info!(ok = ack.ok, msg = %ack.msg, "success"),
        Err(st) => {
            tracing::warn!(code = st.code().as_i32(), name = %st.code(), message = %st.message(), "RPC failed");
            if st.code() == StatusCode::DeadlineExceeded {
                tracing::warn!("deadline exceeded (timeout)");
            }
        }
    }
}
