//! feather ingest client.
//!
//! Usage: `ingest-client [deadline_ms]`
//! Sends one event to `client.target`. Exit code 0 iff the call returned OK.

use std::process::ExitCode;

use feather_core::protocol::event::Event;
use feather_ingest::{cli, client, config, obs};

#[tokio::main]
async fn main() -> ExitCode {
    obs::logging::init_tracing();

    let arg = std::env::args().nth(1);
    let deadline = match cli::parse_ms_arg(arg.as_deref()) {
        Ok(v) => cli::deadline(v),
        Err(e) => {
            tracing::error!(error = %e, "usage: ingest-client [deadline_ms]");
            return ExitCode::from(cli::USAGE_EXIT);
        }
    };

    let cfg = match config::load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    match deadline {
        Some(d) => tracing::info!(deadline_ms = d.as_millis() as u64, "using deadline"),
        None => tracing::info!("no deadline"),
    }

    let caller = match client::IngestClient::new(&cfg.client.target) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "client init failed");
            return ExitCode::FAILURE;
        }
    };

    let event = Event::stamped(cfg.client.event_id.clone(), cfg.client.event_val);
    let res = caller.call(&event, deadline).await;
    client::report(&res);

    ExitCode::from(client::exit_code(&res))
}
