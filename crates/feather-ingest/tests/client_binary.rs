//! Runs the `ingest-client` binary against a loopback server and checks
//! its process exit status.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;

use tokio::process::Command;

mod support;
use support::{sample, start};

fn config_for(target: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "version: 1\nclient:\n  target: \"{target}\"").unwrap();
    f
}

async fn run_client(cfg: &tempfile::NamedTempFile, args: &[&str]) -> Option<i32> {
    Command::new(env!("CARGO_BIN_EXE_ingest-client"))
        .args(args)
        .env("FEATHER_CONFIG", cfg.path())
        .env("RUST_LOG", "warn")
        .status()
        .await
        .unwrap()
        .code()
}

#[tokio::test]
async fn exits_zero_on_ok() {
    let srv = start(0).await;
    let cfg = config_for(&srv.target());

    assert_eq!(run_client(&cfg, &[]).await, Some(0));
    let text = srv.scrape().await;
    assert_eq!(sample(&text, "ingest_requests_total"), Some(1.0));

    srv.shutdown().await;
}

#[tokio::test]
async fn exits_one_on_zero_deadline_against_slow_server() {
    let srv = start(50).await;
    let cfg = config_for(&srv.target());

    assert_eq!(run_client(&cfg, &["0"]).await, Some(1));

    srv.shutdown().await;
}

#[tokio::test]
async fn negative_deadline_means_no_deadline() {
    let srv = start(20).await;
    let cfg = config_for(&srv.target());

    assert_eq!(run_client(&cfg, &["-1"]).await, Some(0));

    srv.shutdown().await;
}

#[tokio::test]
async fn exits_one_when_server_is_down() {
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let cfg = config_for(&format!("http://{addr}"));

    assert_eq!(run_client(&cfg, &[]).await, Some(1));
}

#[tokio::test]
async fn exits_two_on_bad_argument() {
    let cfg = config_for("http://127.0.0.1:1");
    assert_eq!(run_client(&cfg, &["soon"]).await, Some(2));
}
