//! `Ingest` RPC endpoint.
//!
//! Every request gets a 200 with a JSON `Reply`; the call status travels in
//! the reply, not in the HTTP status line. The handler runs in its own task
//! so that hyper dropping this future (client gone) trips the drop guard
//! and cancels the call context instead of aborting the handler between
//! its checkpoints.

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode as HttpStatus},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use feather_core::protocol::event::{decode_event, encode, Ack, Reply};
use feather_core::protocol::{timeout, CONTENT_TYPE_JSON};
use feather_core::Status;

use crate::app_state::AppState;
use crate::context::CallContext;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn ingest_rpc(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let res = match body {
        Ok(body) => call(&app, &headers, &body).await,
        // Over-limit or unreadable bodies still get a Reply, not a bare 4xx.
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejecting call: unreadable body");
            Err(Status::invalid_argument(format!("unreadable body: {}", rejection.body_text())))
        }
    };
    if let Err(st) = &res {
        tracing::debug!(code = %st.code(), message = %st.message(), "ingest call failed");
    }
    reply_response(&Reply::from_result(res))
}

async fn call(app: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Ack, Status> {
    let timeout = request_timeout(headers).map_err(|st| {
        tracing::warn!(message = %st.message(), "rejecting call: bad deadline header");
        st
    })?;
    let event = decode_event(body).map_err(|e| {
        tracing::warn!(error = %e, "rejecting call: bad event");
        Status::from(e)
    })?;

    let ctx = CallContext::from_timeout(timeout);
    let guard = ctx.drop_guard();

    let svc = app.service();
    let task_ctx = ctx.clone();
    let joined = tokio::spawn(async move { svc.ingest(task_ctx, event).await }).await;
    guard.disarm();

    match joined {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(error = %e, "ingest task failed");
            Err(Status::internal("ingest task failed"))
        }
    }
}

fn request_timeout(headers: &HeaderMap) -> Result<Option<std::time::Duration>, Status> {
    let Some(v) = headers.get(timeout::HEADER) else {
        return Ok(None);
    };
    let s = v
        .to_str()
        .map_err(|_| Status::invalid_argument(format!("{} is not ascii", timeout::HEADER)))?;
    Ok(Some(timeout::decode(s)?))
}

fn reply_response(reply: &Reply) -> Response {
    match encode(reply) {
        Ok(body) => (HttpStatus::OK, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "reply encode failed");
            (HttpStatus::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
