//! `Event` / `Ack` messages and the single-call `Reply` envelope.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{FeatherError, Result};
use crate::status::{Status, StatusCode};

/// Ingest request. Caller-assigned `id` and `ts` (Unix epoch millis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub id: String,
    pub val: f64,
    pub ts: i64,
}

impl Event {
    pub fn new(id: impl Into<String>, val: f64, ts: i64) -> Self {
        Self { id: id.into(), val, ts }
    }

    /// Build an event stamped with the current wall-clock time.
    pub fn stamped(id: impl Into<String>, val: f64) -> Self {
        Self::new(id, val, unix_millis_now())
    }

    /// JSON has no NaN/Inf; such a `val` cannot cross the wire.
    pub fn validate(&self) -> Result<()> {
        if !self.val.is_finite() {
            return Err(FeatherError::BadRequest(format!("event val must be finite, got {}", self.val)));
        }
        Ok(())
    }
}

/// Ingest response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ack {
    pub ok: bool,
    pub msg: String,
}

/// Reply envelope. `ack` is present iff `code` is OK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reply {
    pub code: StatusCode,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<Ack>,
}

impl Reply {
    pub fn from_result(res: std::result::Result<Ack, Status>) -> Self {
        match res {
            Ok(ack) => Self { code: StatusCode::Ok, message: String::new(), ack: Some(ack) },
            Err(st) => Self { code: st.code(), message: st.message().to_string(), ack: None },
        }
    }

    pub fn into_result(self) -> std::result::Result<Ack, Status> {
        match (self.code, self.ack) {
            (StatusCode::Ok, Some(ack)) => Ok(ack),
            (StatusCode::Ok, None) => Err(Status::internal("OK reply without ack")),
            (code, _) => Err(Status::new(code, self.message)),
        }
    }
}

pub fn decode_event(body: &[u8]) -> Result<Event> {
    serde_json::from_slice(body).map_err(|e| FeatherError::BadRequest(format!("invalid event: {e}")))
}

pub fn decode_reply(body: &[u8]) -> Result<Reply> {
    serde_json::from_slice(body).map_err(|e| FeatherError::Internal(format!("invalid reply: {e}")))
}

pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(msg).map_err(|e| FeatherError::Internal(format!("encode failed: {e}")))
}

/// Milliseconds since the Unix epoch; 0 if the clock is before it.
pub fn unix_millis_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
