//! Loopback server harness shared by the integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::net::SocketAddr;

use feather_ingest::app_state::AppState;
use feather_ingest::config::IngestConfig;
use feather_ingest::server::Server;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct Running {
    pub rpc: SocketAddr,
    pub ops: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<feather_core::Result<()>>,
}

impl Running {
    pub fn target(&self) -> String {
        format!("http://{}", self.rpc)
    }

    pub async fn scrape(&self) -> String {
        let resp = reqwest::get(format!("http://{}/metrics", self.ops)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let ct = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert!(ct.starts_with("text/plain; version=0.0.4"));
        resp.text().await.unwrap()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        self.task.await.unwrap().unwrap();
    }
}

pub async fn start(sleep_ms: u64) -> Running {
    let mut cfg = IngestConfig::default();
    cfg.server.listen = "127.0.0.1:0".into();
    cfg.server.metrics_listen = "127.0.0.1:0".into();
    cfg.server.work_delay_ms = sleep_ms;
    cfg.validate().unwrap();

    let state = AppState::new(cfg).unwrap();
    let srv = Server::bind(state).await.unwrap();
    let rpc = srv.rpc_addr().unwrap();
    let ops = srv.ops_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(srv.serve(async move {
        let _ = rx.await;
    }));

    Running { rpc, ops, stop: Some(tx), task }
}

pub fn sample(text: &str, name: &str) -> Option<f64> {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| {
            let (k, v) = l.rsplit_once(' ')?;
            (k == name).then(|| v.parse().ok()).flatten()
        })
}
