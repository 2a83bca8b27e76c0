#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use feather_ingest::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:50051"
  work_delay: 5 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.status_code().as_str(), "INVALID_ARGUMENT");
    assert!(err.to_string().contains("invalid yaml"));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:50051");
    assert_eq!(cfg.server.metrics_listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.work_delay_ms, 0);
    assert_eq!(cfg.client.target, "http://localhost:50051");
    assert_eq!(cfg.client.event_id, "abc");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:6000"
  metrics_listen: "127.0.0.1:6001"
  work_delay_ms: 50
client:
  target: "http://127.0.0.1:6000/"
  event_id: "evt-1"
  event_val: 1.5
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.work_delay_ms, 50);
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 6000);
    assert_eq!(cfg.client.event_val, 1.5);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, feather_core::FeatherError::UnsupportedVersion));
}

#[test]
fn rejects_bad_listen_addr() {
    let bad = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}

#[test]
fn rejects_shared_port() {
    let bad = r#"
version: 1
server:
  listen: "127.0.0.1:7000"
  metrics_listen: "127.0.0.1:7000"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_excessive_work_delay() {
    let bad = "version: 1\nserver:\n  work_delay_ms: 600001\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("work_delay_ms"));
}

#[test]
fn rejects_non_http_target() {
    let bad = "version: 1\nclient:\n  target: \"localhost:50051\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("client.target"));
}

#[test]
fn rejects_non_finite_event_val() {
    for v in [".nan", ".inf", "-.inf"] {
        let bad = format!("version: 1\nclient:\n  event_val: {v}\n");
        let err = config::load_from_str(&bad).expect_err(v);
        assert!(err.to_string().contains("client.event_val"), "value={v}");
    }
}
