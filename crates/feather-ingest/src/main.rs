//! feather ingest server.
//!
//! Usage: `ingest-server [sleep_ms]`
//! - RPC: POST /feather.Ingest/Ingest on `server.listen` (default :50051)
//! - Ops: GET /metrics, /healthz on `server.metrics_listen` (default :8080)
//! - `sleep_ms` overrides `server.work_delay_ms` for every request

use std::process::ExitCode;

use feather_ingest::{app_state, cli, config, obs, server};

#[tokio::main]
async fn main() -> ExitCode {
    obs::logging::init_tracing();

    let arg = std::env::args().nth(1);
    let sleep_ms = match cli::parse_ms_arg(arg.as_deref()) {
        Ok(v) => cli::work_delay_ms(v),
        Err(e) => {
            tracing::error!(error = %e, "usage: ingest-server [sleep_ms]");
            return ExitCode::from(cli::USAGE_EXIT);
        }
    };

    let mut cfg = match config::load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ms) = sleep_ms {
        cfg.server.work_delay_ms = ms;
        if let Err(e) = cfg.validate() {
            tracing::error!(error = %e, "invalid sleep_ms");
            return ExitCode::from(cli::USAGE_EXIT);
        }
    }

    tracing::info!(
        listen = %cfg.server.listen,
        sleep_ms = cfg.server.work_delay_ms,
        "starting ingest server"
    );

    let state = match app_state::AppState::new(cfg) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "state init failed");
            return ExitCode::FAILURE;
        }
    };

    let srv = match server::Server::bind(state).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "bind failed");
            return ExitCode::FAILURE;
        }
    };

    match srv.serve(server::shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
